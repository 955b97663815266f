//! Decorators that paint behind or mask a child element.

use fretsheet_core::{
    color::Color,
    draw::{ClipShape, DrawCommand},
    geometry::Rect,
};

use super::{Element, Placement, RenderContext};

/// Fills the area behind a child with a solid color.
///
/// The fill spans the full width of the given area. Its height is the
/// child's consumed height, or the area's height when that is larger, so a
/// label placed in a fixed-size cell gets the whole cell painted.
#[derive(Debug)]
pub struct Background<E> {
    color: Color,
    child: E,
}

impl<E: Element> Background<E> {
    pub fn new(color: Color, child: E) -> Self {
        Self { color, child }
    }
}

impl<E: Element> Element for Background<E> {
    fn measure_or_draw(&self, area: Rect, ctx: &mut RenderContext<'_>) -> Placement {
        if !ctx.is_measuring() {
            let child_height = self
                .child
                .measure_or_draw(area, &mut ctx.measure_only())
                .consumed;
            let rect = area.with_height(child_height.max(area.height()));
            ctx.emit(|| DrawCommand::FillRect {
                rect,
                color: self.color,
            });
        }
        self.child.measure_or_draw(area, ctx)
    }
}

/// Shape used by [`Clip`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mask {
    /// Largest circle centered in the area.
    Circle,
    /// The area itself with rounded corners.
    RoundedRect { radius: f32 },
}

impl Mask {
    /// The concrete clip shape for `area`.
    pub fn clip_shape(self, area: Rect) -> ClipShape {
        match self {
            Mask::Circle => ClipShape::Circle {
                center: area.center(),
                radius: area.width().min(area.height()) / 2.0,
            },
            Mask::RoundedRect { radius } => ClipShape::RoundedRect { rect: area, radius },
        }
    }
}

/// Restricts everything a child draws to a [`Mask`].
#[derive(Debug)]
pub struct Clip<E> {
    mask: Mask,
    child: E,
}

impl<E: Element> Clip<E> {
    pub fn new(mask: Mask, child: E) -> Self {
        Self { mask, child }
    }
}

impl<E: Element> Element for Clip<E> {
    fn measure_or_draw(&self, area: Rect, ctx: &mut RenderContext<'_>) -> Placement {
        ctx.emit(|| DrawCommand::PushClip(self.mask.clip_shape(area)));
        let placement = self.child.measure_or_draw(area, ctx);
        ctx.emit(|| DrawCommand::PopClip);
        placement
    }
}
