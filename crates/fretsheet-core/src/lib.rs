//! Fretsheet Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Fretsheet layout
//! engine and its exporters. It includes:
//!
//! - **Geometry**: Points, sizes, insets and carvable rectangles ([`geometry`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Draw**: Stroke and text styles, text measurement, drawing commands and
//!   layered SVG output ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
