use fretsheet_core::geometry::Rect;

use super::{Element, Placement, RenderContext};

/// Fixed vertical gap. Draws nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacer {
    height: f32,
}

impl Spacer {
    pub fn new(height: f32) -> Self {
        debug_assert!(height >= 0.0, "spacer height must not be negative");
        Self { height }
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

impl Element for Spacer {
    fn measure_or_draw(&self, area: Rect, _ctx: &mut RenderContext<'_>) -> Placement {
        Placement::after(area, self.height)
    }
}

#[cfg(test)]
mod tests {
    use fretsheet_core::{
        draw::{CommandList, MonospaceMeasure},
        geometry::Size,
    };

    use super::*;

    #[test]
    fn test_spacer_consumes_height_without_drawing() {
        let measurer = MonospaceMeasure;
        let mut list = CommandList::new();
        let mut ctx = RenderContext::drawing(Size::new(10.0, 10.0), &measurer, &mut list);

        let placement = Spacer::new(4.0).measure_or_draw(Rect::from_xywh(0.0, 0.0, 10.0, 10.0), &mut ctx);

        assert_eq!(placement.consumed, 4.0);
        assert_eq!(placement.remaining, Rect::from_xywh(0.0, 4.0, 10.0, 6.0));
        assert!(list.is_empty());
    }
}
