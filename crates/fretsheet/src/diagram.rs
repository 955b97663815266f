//! Chord diagrams: a fretboard grid with markers, dots and barres.
//!
//! A [`ChordDiagram`] is a composite [`Element`]. It stacks the chord name,
//! the open/muted marker bar, the nut, the grid and an optional notes row,
//! then reports the height of the stack and hands back the area to the right
//! of its footprint.
//!
//! ```text
//!        Am           name (scaled)
//!   ×  ○        ○     top bar
//!   ===========       nut (only at base fret 1)
//!   |  |  |  |  |     grid, fret_rows rows
//!   |  |  ●  ●  |     dots and barres overlay the grid
//!   A  E  A  C  E     notes row (optional)
//! ```

mod orientation;
mod row;
mod style;

pub use orientation::Orientation;
pub use row::DiagramRow;
pub use style::DiagramStyle;

use std::sync::Arc;

use fretsheet_core::{
    draw::{DrawCommand, TextDefinition},
    geometry::{Point, Rect},
};
use log::trace;
use serde::Deserialize;

use crate::{
    chord::{Barre, ChordDefinition, MUTED, OPEN},
    element::{Background, Clip, Element, Mask, Placement, RenderContext, TextElement},
};

/// Label drawn where a cell has nothing to show. A space keeps the cell
/// height identical to a labeled one.
const BLANK: &str = " ";

/// Per-render display switches supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DiagramDisplayOptions {
    /// Draw strings in left-handed order.
    pub mirror_diagram: bool,
    /// Print finger numbers inside dots and barres.
    pub show_fingers: bool,
    /// Print the sounded note of each string below the grid.
    pub show_notes: bool,
}

impl Default for DiagramDisplayOptions {
    fn default() -> Self {
        Self {
            mirror_diagram: false,
            show_fingers: true,
            show_notes: false,
        }
    }
}

/// A finger dot resolved to its grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerDot {
    /// String index in display order.
    pub string: usize,
    /// Fret row, 1-based.
    pub row: u32,
    pub finger: u8,
}

/// A chord definition laid out as a diagram.
///
/// All derived geometry is computed once on construction; placing the
/// diagram never mutates it, so measuring and drawing agree.
///
/// # Examples
///
/// ```
/// # use std::sync::Arc;
/// # use fretsheet::chord::{ChordDefinition, Instrument};
/// # use fretsheet::diagram::{ChordDiagram, DiagramDisplayOptions, DiagramStyle};
/// let chord = ChordDefinition::new(
///     "Am",
///     Instrument::guitar(),
///     vec![-1, 0, 2, 2, 1, 0],
///     vec![0, 0, 2, 3, 1, 0],
///     vec![],
///     1,
/// )
/// .unwrap();
///
/// let diagram = ChordDiagram::new(
///     &chord,
///     DiagramDisplayOptions::default(),
///     Arc::new(DiagramStyle::default()),
/// );
/// assert_eq!(diagram.columns(), 5);
/// assert_eq!(diagram.x_spacing(), 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct ChordDiagram {
    name: String,
    base_fret: u32,
    options: DiagramDisplayOptions,
    style: Arc<DiagramStyle>,
    orientation: Orientation,
    columns: usize,
    x_spacing: f32,
    y_spacing: f32,
}

impl ChordDiagram {
    pub fn new(
        chord: &ChordDefinition,
        options: DiagramDisplayOptions,
        style: Arc<DiagramStyle>,
    ) -> Self {
        let columns = chord.strings().saturating_sub(1).max(1);
        let grid = style.grid_size();
        let x_spacing = grid.width() / columns as f32;
        let y_spacing = grid.height() / style.fret_rows() as f32;

        Self {
            name: chord.name().to_string(),
            base_fret: chord.base_fret(),
            orientation: Orientation::resolve(chord, options.mirror_diagram),
            options,
            style,
            columns,
            x_spacing,
            y_spacing,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of gaps between strings.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Horizontal distance between two strings.
    pub fn x_spacing(&self) -> f32 {
        self.x_spacing
    }

    /// Vertical distance between two frets.
    pub fn y_spacing(&self) -> f32 {
        self.y_spacing
    }

    /// Height reserved for the nut, painted or not.
    pub fn nut_height(&self) -> f32 {
        self.y_spacing / 5.0
    }

    /// Horizontal room the diagram occupies, including its side gutters.
    pub fn footprint_width(&self) -> f32 {
        self.style.grid_size().width() + 3.0 * self.x_spacing
    }

    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    /// Finger dots in display order. Strings fretted on a row that holds a
    /// barre are covered by the barre and get no dot.
    pub fn dots(&self) -> Vec<FingerDot> {
        let mut dots = Vec::new();
        for row in 1..=self.style.fret_rows() {
            if self.barre_on_row(row).is_some() {
                continue;
            }
            for (string, &fret) in self.orientation.frets.iter().enumerate() {
                if fret == row as i32 {
                    dots.push(FingerDot {
                        string,
                        row,
                        finger: self.orientation.fingers[string],
                    });
                }
            }
        }
        dots
    }

    /// Barres in display order, at most one per row.
    pub fn barre_spans(&self) -> Vec<Barre> {
        (1..=self.style.fret_rows())
            .filter_map(|row| self.barre_on_row(row).copied())
            .collect()
    }

    fn barre_on_row(&self, row: u32) -> Option<&Barre> {
        self.orientation
            .barres
            .iter()
            .find(|barre| barre.fret == row as i32)
    }

    fn dot_diameter(&self) -> f32 {
        self.style.grid_size().width() / 5.0
    }

    fn finger_label(&self, finger: u8) -> String {
        if self.options.show_fingers && finger != 0 {
            finger.to_string()
        } else {
            BLANK.to_string()
        }
    }

    /// Lays out one label per string in cells aligned with the strings and
    /// returns the tallest label height. `None` leaves a cell empty.
    fn string_labels<'l>(
        &self,
        area: Rect,
        labels: impl Iterator<Item = Option<&'l str>>,
        style: &TextDefinition,
        ctx: &mut RenderContext<'_>,
    ) -> f32 {
        let mut tallest: f32 = 0.0;
        for (string, label) in labels.enumerate() {
            let Some(label) = label else {
                continue;
            };
            let cell = Rect::from_xywh(
                area.min_x() + self.x_spacing * (1 + string) as f32,
                area.min_y(),
                self.x_spacing,
                area.height(),
            );
            let placement = TextElement::new(label, style.clone()).measure_or_draw(cell, ctx);
            tallest = tallest.max(placement.consumed);
        }
        tallest
    }

    fn draw_grid(&self, origin: Point, ctx: &mut RenderContext<'_>) {
        let grid = self.style.grid_size();
        ctx.emit(|| {
            let verticals = (0..=self.columns).map(|column| {
                let x = origin.x() + column as f32 * self.x_spacing;
                (Point::new(x, origin.y()), Point::new(x, origin.y() + grid.height()))
            });
            let horizontals = (0..=self.style.fret_rows()).map(|row| {
                let y = origin.y() + row as f32 * self.y_spacing;
                (Point::new(origin.x(), y), Point::new(origin.x() + grid.width(), y))
            });
            DrawCommand::StrokeLines {
                segments: verticals.chain(horizontals).collect(),
                stroke: self.style.grid_stroke().clone(),
            }
        });
    }

    fn place_dots(&self, grid_origin: Point, ctx: &mut RenderContext<'_>) {
        let diameter = self.dot_diameter();
        let x_offset = (self.x_spacing - diameter) / 2.0;
        let left = grid_origin.x() - 0.5 * self.x_spacing;

        for dot in self.dots() {
            let cell = Rect::from_xywh(
                left + x_offset + dot.string as f32 * self.x_spacing,
                grid_origin.y() + (dot.row - 1) as f32 * self.y_spacing,
                diameter,
                self.y_spacing,
            );
            Clip::new(
                Mask::Circle,
                Background::new(
                    *self.style.dot_color(),
                    TextElement::new(self.finger_label(dot.finger), self.style.finger_text().clone()),
                ),
            )
            .measure_or_draw(cell, ctx);
        }
    }

    fn place_barres(&self, grid_origin: Point, ctx: &mut RenderContext<'_>) {
        let diameter = self.dot_diameter();
        let x_offset = (self.x_spacing - diameter) / 2.0;
        let left = grid_origin.x() - 0.5 * self.x_spacing;

        for barre in self.barre_spans() {
            let cell = Rect::from_xywh(
                left + barre.start as f32 * self.x_spacing + x_offset,
                grid_origin.y() + (barre.fret - 1) as f32 * self.y_spacing,
                (barre.length as f32 * self.x_spacing - 2.0 * x_offset).max(0.0),
                self.y_spacing,
            );
            Clip::new(
                Mask::RoundedRect {
                    radius: diameter / 2.0,
                },
                Background::new(
                    *self.style.dot_color(),
                    TextElement::new(
                        self.finger_label(barre.finger),
                        self.style.finger_text().clone(),
                    ),
                ),
            )
            .measure_or_draw(cell, ctx);
        }
    }
}

impl Element for ChordDiagram {
    fn measure_or_draw(&self, area: Rect, ctx: &mut RenderContext<'_>) -> Placement {
        let style = &self.style;
        let grid = style.grid_size();
        let x = area.min_x();
        let footprint = self.footprint_width();
        let below = |total: f32| area.split_top(total).1;

        let mut total: f32 = 0.0;

        // Chord name, centered over the footprint
        let name = TextElement::new(self.name.as_str(), style.name_text().clone());
        let name_area = below(total).with_width(footprint);
        total += name.measure_or_draw(name_area, ctx).consumed * style.name_scale();

        // Open and muted markers above each string
        let markers = self.orientation.frets.iter().map(|&fret| {
            Some(match fret {
                MUTED => style.muted_marker(),
                OPEN => style.open_marker(),
                _ => BLANK,
            })
        });
        total += self.string_labels(below(total), markers, style.marker_text(), ctx);

        // Nut; its room is reserved even when it is not painted
        if self.base_fret == 1 {
            let nut = Rect::from_xywh(
                x + 1.25 * self.x_spacing,
                area.min_y() + total,
                grid.width() + 0.55 * self.x_spacing,
                self.nut_height(),
            );
            ctx.emit(|| DrawCommand::FillRect {
                rect: nut,
                color: *style.nut_color(),
            });
        }
        total += self.nut_height();

        // Base fret number in the left gutter; takes no height
        if self.base_fret != 1 {
            let working = below(total);
            let label_area = Rect::from_xywh(
                x + self.x_spacing / 2.5,
                working.min_y() + self.y_spacing / 8.0,
                grid.width(),
                (working.height() - self.y_spacing / 8.0).max(0.0),
            );
            TextElement::new(self.base_fret.to_string(), style.base_fret_text().clone())
                .measure_or_draw(label_area, ctx);
        }

        let grid_origin = Point::new(x + 1.5 * self.x_spacing, area.min_y() + total);
        self.draw_grid(grid_origin, ctx);
        self.place_dots(grid_origin, ctx);
        self.place_barres(grid_origin, ctx);
        total += grid.height();

        if self.options.show_notes {
            let names: Vec<Option<String>> = self
                .orientation
                .notes
                .iter()
                .map(|note| note.map(|note| note.to_string()))
                .collect();
            let labels = names.iter().map(|name| name.as_deref());
            total += self.string_labels(below(total), labels, style.note_text(), ctx);
        }

        trace!(
            chord = self.name.as_str(), height = total, width = footprint;
            "Placed chord diagram"
        );

        let (_, remaining) = below(total).split_left(footprint);
        Placement {
            consumed: total,
            remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::{approx_eq, assert_approx_eq};
    use fretsheet_core::{
        draw::{ClipShape, CommandList, MonospaceMeasure},
        geometry::Size,
    };
    use proptest::prelude::*;

    use super::*;
    use crate::chord::Instrument;

    fn page() -> Size {
        Size::new(595.0, 842.0)
    }

    fn c_major() -> ChordDefinition {
        ChordDefinition::new(
            "C",
            Instrument::guitar(),
            vec![-1, 3, 2, 0, 1, 0],
            vec![0, 3, 2, 0, 1, 0],
            vec![],
            1,
        )
        .unwrap()
    }

    fn f_major() -> ChordDefinition {
        ChordDefinition::new(
            "F",
            Instrument::guitar(),
            vec![1, 3, 3, 2, 1, 1],
            vec![1, 3, 4, 2, 1, 1],
            vec![Barre::new(1, 0, 6, 1)],
            1,
        )
        .unwrap()
    }

    fn diagram(chord: &ChordDefinition, options: DiagramDisplayOptions) -> ChordDiagram {
        ChordDiagram::new(chord, options, Arc::new(DiagramStyle::default()))
    }

    fn area() -> Rect {
        Rect::from_xywh(0.0, 0.0, 300.0, 400.0)
    }

    fn measure(element: &impl Element) -> Placement {
        let measurer = MonospaceMeasure;
        let mut ctx = RenderContext::measuring(page(), &measurer);
        element.measure_or_draw(area(), &mut ctx)
    }

    fn draw(element: &impl Element) -> (Placement, CommandList) {
        let measurer = MonospaceMeasure;
        let mut list = CommandList::new();
        let placement = {
            let mut ctx = RenderContext::drawing(page(), &measurer, &mut list);
            element.measure_or_draw(area(), &mut ctx)
        };
        (placement, list)
    }

    /// Height of a one-line label of `size` points with the default padding.
    fn label_height(size: f32) -> f32 {
        size * 1.2 + 2.0
    }

    #[test]
    fn test_spacing_scales_with_strings() {
        let ukulele = ChordDefinition::new(
            "C",
            Instrument::ukulele(),
            vec![0, 0, 0, 3],
            vec![0, 0, 0, 3],
            vec![],
            1,
        )
        .unwrap();

        let six = diagram(&c_major(), DiagramDisplayOptions::default());
        let four = diagram(&ukulele, DiagramDisplayOptions::default());

        assert_approx_eq!(f32, six.x_spacing(), 50.0 / 5.0);
        assert_approx_eq!(f32, four.x_spacing(), 50.0 / 3.0);
        assert_approx_eq!(f32, six.y_spacing(), 12.0);
        assert_approx_eq!(f32, four.footprint_width(), 100.0, epsilon = 1e-4);
    }

    #[test]
    fn test_nut_space_reserved_at_any_base_fret() {
        let at_nut = c_major();
        let up_the_neck = ChordDefinition::new(
            "C",
            Instrument::guitar(),
            at_nut.frets().to_vec(),
            at_nut.fingers().to_vec(),
            vec![],
            3,
        )
        .unwrap();

        let options = DiagramDisplayOptions::default();
        let first = measure(&diagram(&at_nut, options));
        let third = measure(&diagram(&up_the_neck, options));
        assert_eq!(first.consumed, third.consumed);

        let nut_fills = |commands: &CommandList| {
            commands
                .iter()
                .filter(|command| {
                    matches!(command, DrawCommand::FillRect { rect, .. }
                        if approx_eq!(f32, rect.height(), 12.0 / 5.0))
                })
                .count()
        };

        let (_, commands) = draw(&diagram(&at_nut, options));
        assert_eq!(nut_fills(&commands), 1);
        assert_eq!(commands.texts().count(), 10);

        // no nut, but a base fret label right after the top bar
        let (_, commands) = draw(&diagram(&up_the_neck, options));
        assert_eq!(nut_fills(&commands), 0);
        assert_eq!(commands.texts().count(), 11);
        assert_eq!(commands.texts().nth(7), Some("3"));
    }

    #[test]
    fn test_end_to_end_c_major() {
        let chord_diagram = diagram(&c_major(), DiagramDisplayOptions::default());

        let top_bar: Vec<&str> = vec!["×", " ", " ", "○", " ", "○"];
        let (placement, commands) = draw(&chord_diagram);
        let texts: Vec<&str> = commands.texts().collect();
        assert_eq!(texts[0], "C");
        assert_eq!(&texts[1..7], top_bar.as_slice());
        assert_eq!(&texts[7..], &["1", "2", "3"]);

        let dots: Vec<(usize, u32)> = chord_diagram
            .dots()
            .iter()
            .map(|dot| (dot.string, dot.row))
            .collect();
        assert_eq!(dots, vec![(4, 1), (2, 2), (1, 3)]);

        let expected = label_height(10.0) * 0.8 + label_height(4.0) + 12.0 / 5.0 + 60.0;
        assert_approx_eq!(f32, placement.consumed, expected, epsilon = 1e-4);
        assert_approx_eq!(f32, placement.remaining.min_x(), 80.0);
        assert_approx_eq!(f32, placement.remaining.min_y(), expected, epsilon = 1e-4);
    }

    #[test]
    fn test_dot_cells_centered_on_strings() {
        let (_, commands) = draw(&diagram(&c_major(), DiagramDisplayOptions::default()));
        let centers: Vec<f32> = commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::PushClip(ClipShape::Circle { center, radius }) => {
                    assert_approx_eq!(f32, *radius, 5.0);
                    Some(center.x())
                }
                _ => None,
            })
            .collect();
        // string lines sit at x = 15 + 10 * string
        assert_eq!(centers.len(), 3);
        assert_approx_eq!(f32, centers[0], 55.0);
        assert_approx_eq!(f32, centers[1], 35.0);
        assert_approx_eq!(f32, centers[2], 25.0);
    }

    #[test]
    fn test_barre_suppresses_dots_on_its_row() {
        let chord_diagram = diagram(&f_major(), DiagramDisplayOptions::default());

        let dots = chord_diagram.dots();
        assert!(dots.iter().all(|dot| dot.row != 1));
        assert_eq!(dots.len(), 3);
        assert_eq!(chord_diagram.barre_spans(), vec![Barre::new(1, 0, 6, 1)]);

        let (_, commands) = draw(&chord_diagram);
        let rounded: Vec<Rect> = commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::PushClip(ClipShape::RoundedRect { rect, .. }) => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(rounded.len(), 1);
        assert_approx_eq!(f32, rounded[0].min_x(), 10.0);
        assert_approx_eq!(f32, rounded[0].width(), 60.0);
    }

    #[test]
    fn test_finger_labels_follow_options() {
        let shown = draw(&diagram(&c_major(), DiagramDisplayOptions::default())).1;
        assert!(shown.texts().any(|text| text == "3"));

        let options = DiagramDisplayOptions {
            show_fingers: false,
            ..Default::default()
        };
        let hidden = draw(&diagram(&c_major(), options)).1;
        assert!(!hidden.texts().any(|text| text == "3" || text == "2"));
    }

    #[test]
    fn test_notes_row_adds_height_and_skips_muted() {
        let options = DiagramDisplayOptions {
            show_notes: true,
            ..Default::default()
        };
        let plain = measure(&diagram(&c_major(), DiagramDisplayOptions::default()));
        let (with_notes, commands) = draw(&diagram(&c_major(), options));

        assert_approx_eq!(
            f32,
            with_notes.consumed - plain.consumed,
            label_height(4.0),
            epsilon = 1e-4
        );
        let texts: Vec<&str> = commands.texts().collect();
        assert_eq!(&texts[texts.len() - 5..], &["C", "E", "G", "C", "E"]);
    }

    #[test]
    fn test_mirrored_diagram_flips_dots() {
        let options = DiagramDisplayOptions {
            mirror_diagram: true,
            ..Default::default()
        };
        let mirrored = diagram(&c_major(), options);
        let dots: Vec<(usize, u32)> = mirrored.dots().iter().map(|d| (d.string, d.row)).collect();
        assert_eq!(dots, vec![(1, 1), (3, 2), (4, 3)]);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: DiagramDisplayOptions = toml::from_str("show_notes = true").unwrap();
        assert!(options.show_notes);
        assert!(options.show_fingers);
        assert!(!options.mirror_diagram);
    }

    fn chord_strategy() -> impl Strategy<Value = ChordDefinition> {
        (4usize..=6)
            .prop_flat_map(|strings| {
                (
                    Just(strings),
                    prop::collection::vec(-1i32..=5, strings),
                    prop::collection::vec(0u8..=4, strings),
                    prop::option::of((1i32..=5, 0..strings)),
                    1u32..=9,
                )
            })
            .prop_map(|(strings, frets, fingers, barre, base_fret)| {
                let instrument = match strings {
                    4 => Instrument::ukulele(),
                    5 => Instrument::preset("banjo").unwrap(),
                    _ => Instrument::guitar(),
                };
                let barres = barre
                    .map(|(fret, start)| vec![Barre::new(fret, start, strings - start, 1)])
                    .unwrap_or_default();
                ChordDefinition::new("X", instrument, frets, fingers, barres, base_fret).unwrap()
            })
    }

    fn options_strategy() -> impl Strategy<Value = DiagramDisplayOptions> {
        (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(mirror_diagram, show_fingers, show_notes)| DiagramDisplayOptions {
                mirror_diagram,
                show_fingers,
                show_notes,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_measure_and_draw_agree(
            chord in chord_strategy(),
            options in options_strategy(),
        ) {
            let chord_diagram = diagram(&chord, options);
            let measured = measure(&chord_diagram);
            let (drawn, _) = draw(&chord_diagram);
            prop_assert_eq!(measured.consumed.to_bits(), drawn.consumed.to_bits());
            prop_assert_eq!(measured.remaining, drawn.remaining);
        }

        #[test]
        fn prop_double_mirror_restores_layout(chord in chord_strategy()) {
            let mirror = DiagramDisplayOptions { mirror_diagram: true, ..Default::default() };
            let original = diagram(&chord, DiagramDisplayOptions::default());
            let twice = diagram(&chord.mirrored(), mirror);

            prop_assert_eq!(original.dots(), twice.dots());
            prop_assert_eq!(original.barre_spans(), twice.barre_spans());
        }

        #[test]
        fn prop_mirrored_barres_stay_on_fretboard(chord in chord_strategy()) {
            let mirror = DiagramDisplayOptions { mirror_diagram: true, ..Default::default() };
            for barre in diagram(&chord, mirror).barre_spans() {
                prop_assert!(barre.end() <= chord.strings());
            }
        }
    }
}
