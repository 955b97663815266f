//! Layer-based rendering system for SVG output.
//!
//! Exporters replay drawing commands into SVG nodes and sort them into z-order
//! layers, so that fills never cover fretboard lines and labels always sit on
//! top, regardless of the order in which elements emitted them.
//!
//! # Example
//!
//! ```
//! # use fretsheet_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Path, Rectangle, Text};
//! let mut output = LayeredOutput::new();
//!
//! output.add_to_layer(RenderLayer::Text, Box::new(Text::new("Am")));
//! output.add_to_layer(RenderLayer::Grid, Box::new(Path::new()));
//! output.add_to_layer(RenderLayer::Background, Box::new(Rectangle::new()));
//!
//! // Background, Grid, then Text
//! let svg_nodes = output.render();
//! assert_eq!(svg_nodes.len(), 3);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Defines the rendering layers for SVG output.
///
/// Layers are rendered from bottom to top in the order defined by variant declaration.
/// The `Ord` derive uses declaration order, so the first variant renders first (bottom),
/// and the last variant renders last (top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Page background and solid fills such as the nut - renders first
    Background,
    /// Fretboard strings and frets
    Grid,
    /// Clipped finger dots and barres
    Marker,
    /// Text labels
    Text,
}

impl RenderLayer {
    /// Returns the value of the `data-layer` attribute for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Grid => "grid",
            Self::Marker => "marker",
            Self::Text => "text",
        }
    }
}

/// SVG nodes grouped by rendering layer.
///
/// Nodes keep their insertion order within a layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node to the specified layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Appends all nodes of `other`, keeping their layers.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of nodes across all layers.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes a `<g data-layer="...">` element; groups
    /// are returned bottom layer first.
    pub fn render(mut self) -> Vec<SvgNode> {
        // Stable sort keeps paint order inside each layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result: Vec<SvgNode> = Vec::new();
        let mut current: Option<(RenderLayer, svg_element::Group)> = None;

        for (layer, node) in self.items {
            current = match current {
                Some((current_layer, group)) if current_layer == layer => {
                    Some((layer, group.add(node)))
                }
                previous => {
                    if let Some((_, group)) = previous {
                        result.push(Box::new(group));
                    }
                    let group = svg_element::Group::new().set("data-layer", layer.name());
                    Some((layer, group.add(node)))
                }
            };
        }

        if let Some((_, group)) = current {
            result.push(Box::new(group));
        }

        result
    }
}
