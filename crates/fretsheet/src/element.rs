//! The drawable element protocol.
//!
//! Every piece of a page, from a single label to a whole chord diagram, is an
//! [`Element`]. An element is handed an area and consumes vertical space from
//! its top, returning a [`Placement`] with the consumed height and the area
//! left for whatever comes next.
//!
//! The same call serves two passes. With a [`RenderContext::measuring`]
//! context nothing is drawn and the element only reports how much room it
//! needs; with a [`RenderContext::drawing`] context the element additionally
//! emits [`DrawCommand`]s. Elements route every command through
//! [`RenderContext::emit`] and compute geometry identically in both modes, so
//! the page flow can trust a measurement when it decides where a page breaks.

mod shape;
mod spacer;
mod text;

pub use shape::{Background, Clip, Mask};
pub use spacer::Spacer;
pub use text::TextElement;

use std::fmt;

use fretsheet_core::{
    draw::{DrawCommand, Surface, TextMeasure},
    geometry::{Rect, Size},
};

/// Result of placing an element: how much height it used and what is left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub consumed: f32,
    pub remaining: Rect,
}

impl Placement {
    /// Placement for an element that used `consumed` from the top of `area`.
    ///
    /// The remaining area starts exactly `consumed` below `area` even when
    /// that overruns it; its height saturates at zero.
    pub fn after(area: Rect, consumed: f32) -> Self {
        let (_, remaining) = area.split_top(consumed);
        Self {
            consumed,
            remaining,
        }
    }
}

/// Something that can be measured and drawn into a rectangular area.
///
/// Implementations must be pure with respect to `&self`: the consumed height
/// may only depend on the area, the page size and the measurer, never on
/// whether the context draws.
pub trait Element: fmt::Debug + Send + Sync {
    fn measure_or_draw(&self, area: Rect, ctx: &mut RenderContext<'_>) -> Placement;
}

impl<E: Element + ?Sized> Element for Box<E> {
    fn measure_or_draw(&self, area: Rect, ctx: &mut RenderContext<'_>) -> Placement {
        (**self).measure_or_draw(area, ctx)
    }
}

/// Everything an element may consult while it is placed.
pub struct RenderContext<'a> {
    page_size: Size,
    measurer: &'a dyn TextMeasure,
    surface: Option<&'a mut dyn Surface>,
}

impl fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("page_size", &self.page_size)
            .field("measurer", &self.measurer)
            .field("drawing", &self.surface.is_some())
            .finish()
    }
}

impl<'a> RenderContext<'a> {
    /// A context that measures only; [`emit`](Self::emit) does nothing.
    pub fn measuring(page_size: Size, measurer: &'a dyn TextMeasure) -> Self {
        Self {
            page_size,
            measurer,
            surface: None,
        }
    }

    /// A context that records drawing commands on `surface`.
    pub fn drawing(
        page_size: Size,
        measurer: &'a dyn TextMeasure,
        surface: &'a mut dyn Surface,
    ) -> Self {
        Self {
            page_size,
            measurer,
            surface: Some(surface),
        }
    }

    pub fn is_measuring(&self) -> bool {
        self.surface.is_none()
    }

    pub fn page_size(&self) -> Size {
        self.page_size
    }

    pub fn measurer(&self) -> &'a dyn TextMeasure {
        self.measurer
    }

    /// Sends a command to the surface. In measurement mode `build` is not
    /// called at all.
    pub fn emit(&mut self, build: impl FnOnce() -> DrawCommand) {
        if let Some(surface) = self.surface.as_deref_mut() {
            surface.push(build());
        }
    }

    /// A measurement-only twin of this context, used by elements that need
    /// a child's height before drawing it.
    pub fn measure_only(&self) -> RenderContext<'a> {
        RenderContext::measuring(self.page_size, self.measurer)
    }
}

#[cfg(test)]
mod tests {
    use fretsheet_core::{
        color::Color,
        draw::{CommandList, MonospaceMeasure},
    };

    use super::*;

    #[derive(Debug)]
    struct Block(f32);

    impl Element for Block {
        fn measure_or_draw(&self, area: Rect, ctx: &mut RenderContext<'_>) -> Placement {
            ctx.emit(|| DrawCommand::FillRect {
                rect: area.with_height(self.0.min(area.height())),
                color: Color::default(),
            });
            Placement::after(area, self.0)
        }
    }

    #[test]
    fn test_placement_after_saturates() {
        let area = Rect::from_xywh(10.0, 20.0, 100.0, 30.0);
        let placement = Placement::after(area, 50.0);

        assert_eq!(placement.consumed, 50.0);
        assert_eq!(placement.remaining.min_y(), 70.0);
        assert_eq!(placement.remaining.height(), 0.0);
        assert_eq!(placement.remaining.min_x(), 10.0);
        assert_eq!(placement.remaining.width(), 100.0);
    }

    #[test]
    fn test_measuring_context_emits_nothing() {
        let measurer = MonospaceMeasure;
        let mut ctx = RenderContext::measuring(Size::new(100.0, 100.0), &measurer);
        assert!(ctx.is_measuring());

        let mut called = false;
        ctx.emit(|| {
            called = true;
            DrawCommand::PopClip
        });
        assert!(!called);
    }

    #[test]
    fn test_drawing_context_records_commands() {
        let measurer = MonospaceMeasure;
        let mut list = CommandList::new();
        let area = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);

        let drawn = {
            let mut ctx = RenderContext::drawing(Size::new(100.0, 100.0), &measurer, &mut list);
            assert!(!ctx.is_measuring());
            assert!(ctx.measure_only().is_measuring());
            Block(12.0).measure_or_draw(area, &mut ctx)
        };
        let measured = {
            let mut ctx = RenderContext::measuring(Size::new(100.0, 100.0), &measurer);
            Block(12.0).measure_or_draw(area, &mut ctx)
        };

        assert_eq!(list.len(), 1);
        assert_eq!(drawn, measured);
    }

    #[test]
    fn test_boxed_element_delegates() {
        let measurer = MonospaceMeasure;
        let boxed: Box<dyn Element> = Box::new(Block(7.0));
        let mut ctx = RenderContext::measuring(Size::new(50.0, 50.0), &measurer);
        let placement = boxed.measure_or_draw(Rect::from_xywh(0.0, 0.0, 50.0, 50.0), &mut ctx);
        assert_eq!(placement.consumed, 7.0);
    }
}
