use fretsheet_core::{
    draw::{DrawCommand, TextDefinition},
    geometry::Rect,
};
use log::trace;

use super::{Element, Placement, RenderContext};

/// A block of text laid out inside its padding.
///
/// The text wraps to the padded width of the area it is given. It consumes
/// the measured text height plus the vertical padding.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    content: String,
    style: TextDefinition,
}

impl TextElement {
    pub fn new(content: impl Into<String>, style: TextDefinition) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn style(&self) -> &TextDefinition {
        &self.style
    }
}

impl Element for TextElement {
    fn measure_or_draw(&self, area: Rect, ctx: &mut RenderContext<'_>) -> Placement {
        let padding = self.style.padding();
        let inner = area.inset_by(padding);
        let size = ctx
            .measurer()
            .measure(&self.content, &self.style, Some(inner.width()));
        trace!(
            content = self.content.as_str(), width = size.width(), height = size.height();
            "Measured text"
        );

        ctx.emit(|| DrawCommand::Text {
            rect: inner.with_height(size.height()),
            content: self.content.clone(),
            style: self.style.clone(),
        });

        Placement::after(area, size.height() + padding.vertical_sum())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use fretsheet_core::{
        draw::{CommandList, MonospaceMeasure},
        geometry::{Insets, Size},
    };

    use super::*;

    fn style(size: u16, padding: f32) -> TextDefinition {
        let mut style = TextDefinition::new();
        style.set_font_size(size);
        style.set_padding(Insets::uniform(padding));
        style
    }

    #[test]
    fn test_consumes_text_height_plus_padding() {
        let measurer = MonospaceMeasure;
        let element = TextElement::new("Am7", style(10, 2.0));
        let mut ctx = RenderContext::measuring(Size::new(200.0, 200.0), &measurer);

        let area = Rect::from_xywh(0.0, 0.0, 200.0, 200.0);
        let placement = element.measure_or_draw(area, &mut ctx);

        // one line of 10pt text is 12 high, plus 2 on top and bottom
        assert_approx_eq!(f32, placement.consumed, 16.0);
        assert_approx_eq!(f32, placement.remaining.min_y(), 16.0);
    }

    #[test]
    fn test_wraps_to_padded_width() {
        let measurer = MonospaceMeasure;
        // 10pt monospace advances 6 per char; 31 wide fits 5 chars
        let element = TextElement::new("abcdefghij", style(10, 0.0));
        let mut ctx = RenderContext::measuring(Size::new(31.0, 100.0), &measurer);

        let placement = element.measure_or_draw(Rect::from_xywh(0.0, 0.0, 31.0, 100.0), &mut ctx);
        assert_approx_eq!(f32, placement.consumed, 24.0);
    }

    #[test]
    fn test_draws_inside_padding() {
        let measurer = MonospaceMeasure;
        let element = TextElement::new("C", style(10, 2.0));
        let mut list = CommandList::new();
        let mut ctx = RenderContext::drawing(Size::new(100.0, 100.0), &measurer, &mut list);

        element.measure_or_draw(Rect::from_xywh(10.0, 10.0, 50.0, 50.0), &mut ctx);

        let [DrawCommand::Text { rect, content, .. }] = list.commands() else {
            panic!("expected a single text command, got {:?}", list.commands());
        };
        assert_eq!(content, "C");
        assert_approx_eq!(f32, rect.min_x(), 12.0);
        assert_approx_eq!(f32, rect.min_y(), 12.0);
        assert_approx_eq!(f32, rect.width(), 46.0);
        assert_approx_eq!(f32, rect.height(), 12.0);
    }

    #[test]
    fn test_empty_text_consumes_only_padding() {
        let measurer = MonospaceMeasure;
        let element = TextElement::new("", style(10, 1.5));
        let mut ctx = RenderContext::measuring(Size::new(100.0, 100.0), &measurer);

        let placement = element.measure_or_draw(Rect::from_xywh(0.0, 0.0, 100.0, 100.0), &mut ctx);
        assert_approx_eq!(f32, placement.consumed, 3.0);
    }
}
