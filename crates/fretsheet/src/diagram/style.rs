use fretsheet_core::{
    color::Color,
    draw::{StrokeCap, StrokeDefinition, TextAlign, TextDefinition},
    geometry::{Insets, Size},
};

/// Visual parameters of a chord diagram.
///
/// The grid geometry lives here rather than in the layout code, so
/// instruments with a different number of strings or a longer neck only
/// need a different style.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramStyle {
    grid_size: Size,
    fret_rows: u32,
    name_scale: f32,
    name_text: TextDefinition,
    finger_text: TextDefinition,
    marker_text: TextDefinition,
    base_fret_text: TextDefinition,
    note_text: TextDefinition,
    dot_color: Color,
    nut_color: Color,
    grid_stroke: StrokeDefinition,
    muted_marker: String,
    open_marker: String,
}

impl Default for DiagramStyle {
    fn default() -> Self {
        let mut style = Self {
            grid_size: Size::new(50.0, 60.0),
            fret_rows: 5,
            name_scale: 0.8,
            name_text: label(10, TextAlign::Center),
            finger_text: label(6, TextAlign::Center),
            marker_text: label(4, TextAlign::Center),
            base_fret_text: label(4, TextAlign::Left),
            note_text: label(4, TextAlign::Center),
            dot_color: Color::gray(),
            nut_color: Color::black(),
            grid_stroke: StrokeDefinition::hairline(),
            muted_marker: "×".to_string(),
            open_marker: "○".to_string(),
        };
        style.name_text.set_color(Some(Color::gray()));
        style.finger_text.set_color(Some(Color::white()));
        style
    }
}

fn label(size: u16, align: TextAlign) -> TextDefinition {
    let mut text = TextDefinition::new();
    text.set_font_size(size);
    text.set_padding(Insets::uniform(1.0));
    text.with_align(align)
}

impl DiagramStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Width and height of the fretboard grid.
    pub fn grid_size(&self) -> Size {
        self.grid_size
    }

    /// Number of fret rows drawn below the nut.
    pub fn fret_rows(&self) -> u32 {
        self.fret_rows
    }

    /// Fraction of the name label's height the diagram actually reserves.
    pub fn name_scale(&self) -> f32 {
        self.name_scale
    }

    pub fn name_text(&self) -> &TextDefinition {
        &self.name_text
    }

    pub fn finger_text(&self) -> &TextDefinition {
        &self.finger_text
    }

    pub fn marker_text(&self) -> &TextDefinition {
        &self.marker_text
    }

    pub fn base_fret_text(&self) -> &TextDefinition {
        &self.base_fret_text
    }

    pub fn note_text(&self) -> &TextDefinition {
        &self.note_text
    }

    pub fn dot_color(&self) -> &Color {
        &self.dot_color
    }

    pub fn nut_color(&self) -> &Color {
        &self.nut_color
    }

    pub fn grid_stroke(&self) -> &StrokeDefinition {
        &self.grid_stroke
    }

    pub fn muted_marker(&self) -> &str {
        &self.muted_marker
    }

    pub fn open_marker(&self) -> &str {
        &self.open_marker
    }

    pub fn set_grid_size(&mut self, size: Size) {
        self.grid_size = size;
    }

    /// Sets the number of fret rows; at least one row is always drawn.
    pub fn set_fret_rows(&mut self, rows: u32) {
        self.fret_rows = rows.max(1);
    }

    pub fn set_name_scale(&mut self, scale: f32) {
        self.name_scale = scale;
    }

    /// Applies a font family to every label of the diagram.
    pub fn set_font_family(&mut self, family: &str) {
        for text in [
            &mut self.name_text,
            &mut self.finger_text,
            &mut self.marker_text,
            &mut self.base_fret_text,
            &mut self.note_text,
        ] {
            text.set_font_family(family);
        }
    }

    pub fn name_text_mut(&mut self) -> &mut TextDefinition {
        &mut self.name_text
    }

    pub fn finger_text_mut(&mut self) -> &mut TextDefinition {
        &mut self.finger_text
    }

    pub fn marker_text_mut(&mut self) -> &mut TextDefinition {
        &mut self.marker_text
    }

    pub fn base_fret_text_mut(&mut self) -> &mut TextDefinition {
        &mut self.base_fret_text
    }

    pub fn note_text_mut(&mut self) -> &mut TextDefinition {
        &mut self.note_text
    }

    pub fn set_dot_color(&mut self, color: Color) {
        self.dot_color = color;
    }

    pub fn set_nut_color(&mut self, color: Color) {
        self.nut_color = color;
    }

    pub fn set_line_cap(&mut self, cap: StrokeCap) {
        self.grid_stroke.set_cap(cap);
    }

    /// Sets color and width of fretboard lines; the nut uses the same color.
    pub fn set_line(&mut self, color: Color, width: f32) {
        self.grid_stroke.set_color(color);
        self.grid_stroke.set_width(width);
        self.nut_color = color;
    }

    pub fn set_markers(&mut self, muted: impl Into<String>, open: impl Into<String>) {
        self.muted_marker = muted.into();
        self.open_marker = open.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = DiagramStyle::default();
        assert_eq!(style.grid_size(), Size::new(50.0, 60.0));
        assert_eq!(style.fret_rows(), 5);
        assert_eq!(style.finger_text().font_size(), 6);
        assert_eq!(style.base_fret_text().align(), TextAlign::Left);
        assert_eq!(style.grid_stroke().cap(), StrokeCap::Round);
    }

    #[test]
    fn test_font_family_applies_to_all_labels() {
        let mut style = DiagramStyle::new();
        style.set_font_family("Helvetica");
        assert_eq!(style.name_text().font_family(), "Helvetica");
        assert_eq!(style.note_text().font_family(), "Helvetica");
    }

    #[test]
    fn test_fret_rows_at_least_one() {
        let mut style = DiagramStyle::new();
        style.set_fret_rows(0);
        assert_eq!(style.fret_rows(), 1);
    }
}
