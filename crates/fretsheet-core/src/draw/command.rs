//! Drawing commands and the surfaces that collect them.
//!
//! A [`Surface`] is the only place an element's drawing pass has side
//! effects. Commands arrive in paint order; exporters replay them.

use crate::{
    color::Color,
    draw::{StrokeDefinition, TextDefinition},
    geometry::{Point, Rect},
};

/// A geometric mask applied to subsequent commands until the matching
/// [`DrawCommand::PopClip`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClipShape {
    Circle { center: Point, radius: f32 },
    RoundedRect { rect: Rect, radius: f32 },
}

/// A primitive drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill a rectangle with a solid color.
    FillRect { rect: Rect, color: Color },
    /// Stroke independent line segments with one stroke style.
    StrokeLines {
        segments: Vec<(Point, Point)>,
        stroke: StrokeDefinition,
    },
    /// Start clipping to a shape.
    PushClip(ClipShape),
    /// End the most recent clip.
    PopClip,
    /// Draw a styled text run inside a box.
    Text {
        rect: Rect,
        content: String,
        style: TextDefinition,
    },
}

/// Receives drawing commands during a drawing pass.
pub trait Surface {
    fn push(&mut self, command: DrawCommand);
}

/// A surface that records commands in order.
///
/// # Examples
///
/// ```
/// # use fretsheet_core::color::Color;
/// # use fretsheet_core::draw::{CommandList, DrawCommand, Surface};
/// # use fretsheet_core::geometry::Rect;
/// let mut list = CommandList::new();
/// list.push(DrawCommand::FillRect {
///     rect: Rect::from_xywh(0.0, 0.0, 10.0, 10.0),
///     color: Color::default(),
/// });
/// assert_eq!(list.len(), 1);
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Returns the content of every text command, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }
}

impl Surface for CommandList {
    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}
