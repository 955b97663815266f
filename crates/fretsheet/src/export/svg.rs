//! SVG rendering of pages.
//!
//! Commands outside any clip are sorted into [`RenderLayer`]s, so fills sit
//! below the fretboard lines and labels sit on top. A clipped run of
//! commands (a finger dot or a barre) becomes one `<g clip-path=...>` group
//! that keeps its own paint order and lands on the marker layer.

use log::debug;
use svg::node::{Text as SvgText, element as svg_element};

use fretsheet_core::draw::{ClipShape, DrawCommand, LayeredOutput, RenderLayer, SvgNode, TextAlign};

use super::{Error, Exporter};
use crate::document::{Page, PageSetup};

/// SVG exporter for one document.
///
/// Clip ids are numbered across all pages rendered by the same exporter.
///
/// # Examples
///
/// ```
/// # use fretsheet::document::{Document, PageSetup};
/// # use fretsheet::draw::MonospaceMeasure;
/// # use fretsheet::export::svg::Svg;
/// let document = Document::new(PageSetup::default());
/// let pages = document.paginate(&MonospaceMeasure);
///
/// let mut exporter = Svg::new(document.page_setup().clone());
/// let svg = exporter.render_page(&pages[0]).unwrap();
/// assert!(svg.to_string().contains("viewBox=\"0 0 595 842\""));
/// ```
#[derive(Debug, Clone)]
pub struct Svg {
    setup: PageSetup,
    next_clip_id: usize,
}

impl Svg {
    pub fn new(setup: PageSetup) -> Self {
        Self {
            setup,
            next_clip_id: 0,
        }
    }

    /// Renders one page to an SVG document sized like the page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnbalancedClip`] when `PushClip` and `PopClip`
    /// commands do not pair up.
    pub fn render_page(&mut self, page: &Page) -> Result<svg::Document, Error> {
        let size = self.setup.size();
        let mut doc = svg::Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", size.width(), size.height()),
            )
            .set("width", size.width())
            .set("height", size.height());

        let mut output = LayeredOutput::new();
        if let Some(color) = self.setup.background() {
            let background = svg_element::Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", size.width())
                .set("height", size.height())
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
            output.add_to_layer(RenderLayer::Background, Box::new(background));
        }

        let mut defs = svg_element::Definitions::new();
        let mut open_clips: Vec<svg_element::Group> = Vec::new();
        let mut clip_count = 0usize;

        for command in page.commands().iter() {
            match command {
                DrawCommand::PushClip(shape) => {
                    let id = format!("clip-{}", self.next_clip_id);
                    self.next_clip_id += 1;
                    clip_count += 1;

                    defs = defs.add(
                        svg_element::ClipPath::new()
                            .set("id", id.as_str())
                            .add(clip_node(shape)),
                    );
                    open_clips.push(
                        svg_element::Group::new().set("clip-path", format!("url(#{id})")),
                    );
                }
                DrawCommand::PopClip => {
                    let group = open_clips.pop().ok_or_else(|| Error::UnbalancedClip {
                        page: page.number(),
                        detail: "clip popped without a matching push".to_string(),
                    })?;
                    match open_clips.pop() {
                        Some(parent) => open_clips.push(parent.add(group)),
                        None => output.add_to_layer(RenderLayer::Marker, Box::new(group)),
                    }
                }
                command => {
                    let Some((layer, node)) = command_node(command) else {
                        continue;
                    };
                    match open_clips.pop() {
                        Some(group) => open_clips.push(group.add(node)),
                        None => output.add_to_layer(layer, node),
                    }
                }
            }
        }

        if !open_clips.is_empty() {
            return Err(Error::UnbalancedClip {
                page: page.number(),
                detail: format!("{} clip(s) never popped", open_clips.len()),
            });
        }

        debug!(
            page = page.number(), commands = page.commands().len(), clips = clip_count;
            "Rendered page to SVG"
        );

        if clip_count > 0 {
            doc = doc.add(defs);
        }
        for node in output.render() {
            doc = doc.add(node);
        }
        Ok(doc)
    }
}

impl Exporter for Svg {
    type Output = String;

    fn export_pages(&mut self, pages: &[Page]) -> Result<Vec<String>, Error> {
        pages
            .iter()
            .map(|page| self.render_page(page).map(|doc| doc.to_string()))
            .collect()
    }
}

/// Renders `page` with a fresh exporter.
///
/// # Errors
///
/// See [`Svg::render_page`].
pub fn render_page(page: &Page, setup: &PageSetup) -> Result<svg::Document, Error> {
    Svg::new(setup.clone()).render_page(page)
}

fn clip_node(shape: &ClipShape) -> SvgNode {
    match *shape {
        ClipShape::Circle { center, radius } => {
            let circle = svg_element::Circle::new()
                .set("cx", center.x())
                .set("cy", center.y())
                .set("r", radius);
            Box::new(circle)
        }
        ClipShape::RoundedRect { rect, radius } => {
            let rounded = svg_element::Rectangle::new()
                .set("x", rect.min_x())
                .set("y", rect.min_y())
                .set("width", rect.width())
                .set("height", rect.height())
                .set("rx", radius)
                .set("ry", radius);
            Box::new(rounded)
        }
    }
}

/// Converts a drawing command to a node and the layer it belongs on.
/// Clip commands have no node of their own.
fn command_node(command: &DrawCommand) -> Option<(RenderLayer, SvgNode)> {
    match command {
        DrawCommand::FillRect { rect, color } => {
            let node = svg_element::Rectangle::new()
                .set("x", rect.min_x())
                .set("y", rect.min_y())
                .set("width", rect.width())
                .set("height", rect.height())
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
            let node: SvgNode = Box::new(node);
            Some((RenderLayer::Background, node))
        }
        DrawCommand::StrokeLines { segments, stroke } => {
            let data = segments
                .iter()
                .map(|(from, to)| {
                    format!("M {} {} L {} {}", from.x(), from.y(), to.x(), to.y())
                })
                .collect::<Vec<_>>()
                .join(" ");
            let path = svg_element::Path::new().set("d", data).set("fill", "none");
            let node: SvgNode = Box::new(stroke.apply_to(path));
            Some((RenderLayer::Grid, node))
        }
        DrawCommand::Text {
            rect,
            content,
            style,
        } => {
            let x = match style.align() {
                TextAlign::Left => rect.min_x(),
                TextAlign::Center => rect.center().x(),
                TextAlign::Right => rect.max_x(),
            };
            let line_height = style.line_height();

            // Each line is centered on its slot; the first tspan moves down one line.
            let mut text = svg_element::Text::new("")
                .set("x", x)
                .set("y", rect.min_y() - line_height / 2.0)
                .set("text-anchor", style.align().to_svg_anchor())
                .set("dominant-baseline", "central")
                .set("font-family", style.font_family())
                .set("font-size", style.font_size());
            if let Some(color) = style.color() {
                text = text
                    .set("fill", color.to_string())
                    .set("fill-opacity", color.alpha());
            }
            for line in content.lines() {
                let tspan = svg_element::TSpan::new("")
                    .set("x", x)
                    .set("dy", line_height)
                    .add(SvgText::new(line));
                text = text.add(tspan);
            }
            let node: SvgNode = Box::new(text);
            Some((RenderLayer::Text, node))
        }
        DrawCommand::PushClip(_) | DrawCommand::PopClip => None,
    }
}
