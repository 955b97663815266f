//! Drawing primitives shared by the layout engine and the exporters.
//!
//! Elements never talk to an output format directly. They emit
//! [`DrawCommand`]s into a [`Surface`]; exporters turn the recorded commands
//! into SVG (grouped by [`RenderLayer`]).
mod command;
mod layer;
mod stroke;
mod text;

pub use command::{ClipShape, CommandList, DrawCommand, Surface};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use stroke::{StrokeCap, StrokeDefinition};
pub use text::{CosmicTextMeasure, MonospaceMeasure, TextAlign, TextDefinition, TextMeasure};
