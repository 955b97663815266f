use fretsheet_core::geometry::Rect;
use log::debug;

use super::ChordDiagram;
use crate::element::{Element, Placement, RenderContext};

/// Chord diagrams flowed left to right, wrapping onto new lines.
///
/// A diagram that does not fit beside the previous ones starts a new line
/// below the tallest diagram of the current line. A diagram wider than the
/// whole area still gets a line of its own.
#[derive(Debug, Clone, Default)]
pub struct DiagramRow {
    diagrams: Vec<ChordDiagram>,
}

impl DiagramRow {
    pub fn new(diagrams: Vec<ChordDiagram>) -> Self {
        Self { diagrams }
    }

    pub fn push(&mut self, diagram: ChordDiagram) {
        self.diagrams.push(diagram);
    }

    pub fn diagrams(&self) -> &[ChordDiagram] {
        &self.diagrams
    }

    pub fn is_empty(&self) -> bool {
        self.diagrams.is_empty()
    }

    /// Splits the row into one row per line it would occupy in an area
    /// `width` wide, so that each line can be paginated on its own.
    pub fn into_lines(self, width: f32) -> Vec<DiagramRow> {
        let mut lines = Vec::new();
        let mut line = DiagramRow::default();
        let mut remaining = width;

        for diagram in self.diagrams {
            let footprint = diagram.footprint_width();
            if !line.is_empty() && footprint > remaining {
                lines.push(std::mem::take(&mut line));
                remaining = width;
            }
            remaining = (remaining - footprint).max(0.0);
            line.push(diagram);
        }
        if !line.is_empty() {
            lines.push(line);
        }
        lines
    }
}

impl Element for DiagramRow {
    fn measure_or_draw(&self, area: Rect, ctx: &mut RenderContext<'_>) -> Placement {
        let mut total: f32 = 0.0;
        let mut line_height: f32 = 0.0;
        let mut lines = 0usize;
        let mut slot = area;
        let mut line_empty = true;

        for diagram in &self.diagrams {
            let width = diagram.footprint_width();
            if !line_empty && width > slot.width() {
                total += line_height;
                line_height = 0.0;
                line_empty = true;
                slot = area.split_top(total).1;
            }
            if line_empty {
                lines += 1;
            }

            let placement = diagram.measure_or_draw(slot, ctx);
            line_height = line_height.max(placement.consumed);
            slot = slot.split_left(width).1;
            line_empty = false;
        }
        total += line_height;

        debug!(diagrams = self.diagrams.len(), lines, height = total; "Placed diagram row");
        Placement::after(area, total)
    }
}
