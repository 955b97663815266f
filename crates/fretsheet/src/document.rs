//! Page flow: placing a sequence of elements onto fixed-size pages.
//!
//! Each block is measured against the space left on the current page before
//! it is drawn. A block that does not fit moves to a fresh page; a block
//! that does not even fit on an empty page is placed anyway and overflows.

use fretsheet_core::{
    color::Color,
    draw::{CommandList, TextMeasure},
    geometry::{Insets, Point, Rect, Size},
};
use log::{debug, info, warn};

use crate::element::{Element, RenderContext};

/// Page geometry shared by all pages of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSetup {
    size: Size,
    margin: Insets,
    background: Option<Color>,
}

impl Default for PageSetup {
    /// A4 in points with half-inch margins.
    fn default() -> Self {
        Self::new(Size::new(595.0, 842.0), 36.0)
    }
}

impl PageSetup {
    pub fn new(size: Size, margin: f32) -> Self {
        Self {
            size,
            margin: Insets::uniform(margin),
            background: None,
        }
    }

    pub fn with_background(mut self, color: Option<Color>) -> Self {
        self.background = color;
        self
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn margin(&self) -> Insets {
        self.margin
    }

    pub fn background(&self) -> Option<&Color> {
        self.background.as_ref()
    }

    /// The page rectangle minus its margins.
    pub fn content_area(&self) -> Rect {
        Rect::new(Point::default(), self.size).inset_by(self.margin)
    }
}

/// One laid-out page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    number: usize,
    commands: CommandList,
    used_height: f32,
}

impl Page {
    pub fn new(number: usize, commands: CommandList, used_height: f32) -> Self {
        Self {
            number,
            commands,
            used_height,
        }
    }

    /// 1-based page number.
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn commands(&self) -> &CommandList {
        &self.commands
    }

    /// Height of the content area taken by the blocks on this page.
    pub fn used_height(&self) -> f32 {
        self.used_height
    }
}

/// An ordered list of blocks to be flowed onto pages.
#[derive(Debug, Default)]
pub struct Document {
    page: PageSetup,
    blocks: Vec<Box<dyn Element>>,
}

impl Document {
    pub fn new(page: PageSetup) -> Self {
        Self {
            page,
            blocks: Vec::new(),
        }
    }

    pub fn push(&mut self, block: impl Element + 'static) {
        self.blocks.push(Box::new(block));
    }

    pub fn page_setup(&self) -> &PageSetup {
        &self.page
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Lays out all blocks and returns the pages, at least one.
    pub fn paginate(&self, measurer: &dyn TextMeasure) -> Vec<Page> {
        let page_size = self.page.size();
        let content = self.page.content_area();

        let mut pages = Vec::new();
        let mut commands = CommandList::new();
        let mut area = content;
        let mut has_content = false;

        for (index, block) in self.blocks.iter().enumerate() {
            let mut measured = block
                .measure_or_draw(area, &mut RenderContext::measuring(page_size, measurer))
                .consumed;

            if measured > area.height() && has_content {
                debug!(block = index, page = pages.len() + 1; "Block does not fit, breaking page");
                pages.push(Self::finish_page(
                    pages.len() + 1,
                    std::mem::take(&mut commands),
                    content,
                    area,
                ));
                area = content;
                has_content = false;
                measured = block
                    .measure_or_draw(area, &mut RenderContext::measuring(page_size, measurer))
                    .consumed;
            }

            if measured > area.height() {
                warn!(
                    block = index, height = measured, available = area.height();
                    "Block is taller than an empty page, it will overflow"
                );
            }

            let placement = block.measure_or_draw(
                area,
                &mut RenderContext::drawing(page_size, measurer, &mut commands),
            );
            debug_assert_eq!(
                placement.consumed.to_bits(),
                measured.to_bits(),
                "block {index} drew {} but measured {measured}",
                placement.consumed,
            );

            area = area.split_top(placement.consumed).1;
            has_content = true;
        }

        if has_content || pages.is_empty() {
            pages.push(Self::finish_page(pages.len() + 1, commands, content, area));
        }

        info!(pages = pages.len(), blocks = self.blocks.len(); "Paginated document");
        pages
    }

    fn finish_page(number: usize, commands: CommandList, content: Rect, area: Rect) -> Page {
        Page::new(number, commands, area.min_y() - content.min_y())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use fretsheet_core::draw::{DrawCommand, MonospaceMeasure, TextDefinition};

    use super::*;
    use crate::element::{Spacer, TextElement};

    fn small_page() -> PageSetup {
        PageSetup::new(Size::new(100.0, 120.0), 10.0)
    }

    #[test]
    fn test_content_area_respects_margin() {
        let content = small_page().content_area();
        assert_eq!(content, Rect::from_xywh(10.0, 10.0, 80.0, 100.0));
    }

    #[test]
    fn test_empty_document_has_one_blank_page() {
        let pages = Document::new(small_page()).paginate(&MonospaceMeasure);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].commands().is_empty());
        assert_eq!(pages[0].used_height(), 0.0);
    }

    #[test]
    fn test_blocks_stack_top_down() {
        let mut document = Document::new(small_page());
        document.push(Spacer::new(20.0));
        document.push(TextElement::new("Verse", TextDefinition::new()));

        let pages = document.paginate(&MonospaceMeasure);
        assert_eq!(pages.len(), 1);

        let DrawCommand::Text { rect, .. } = &pages[0].commands().commands()[0] else {
            panic!("expected the text command");
        };
        assert_approx_eq!(f32, rect.min_y(), 30.0);
        assert_approx_eq!(f32, rect.min_x(), 10.0);
        assert_approx_eq!(f32, pages[0].used_height(), 20.0 + 14.4);
    }

    #[test]
    fn test_breaks_page_when_block_does_not_fit() {
        let mut document = Document::new(small_page());
        document.push(Spacer::new(60.0));
        document.push(Spacer::new(30.0));
        document.push(Spacer::new(30.0));
        document.push(TextElement::new("Chorus", TextDefinition::new()));

        let pages = document.paginate(&MonospaceMeasure);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].number(), 1);
        assert_eq!(pages[1].number(), 2);
        assert_approx_eq!(f32, pages[0].used_height(), 90.0);

        let DrawCommand::Text { rect, .. } = &pages[1].commands().commands()[0] else {
            panic!("expected the text command on page two");
        };
        assert_approx_eq!(f32, rect.min_y(), 40.0);
    }

    #[test]
    fn test_oversized_block_is_placed_on_its_own_page() {
        let mut document = Document::new(small_page());
        document.push(Spacer::new(10.0));
        document.push(Spacer::new(500.0));
        document.push(Spacer::new(10.0));

        let pages = document.paginate(&MonospaceMeasure);
        assert_eq!(pages.len(), 3);
        assert_approx_eq!(f32, pages[1].used_height(), 500.0);
    }
}
