//! Export of laid-out pages.
//!
//! ```text
//! Sheet / ChordDefinition
//!     ↓ build
//! Document (blocks of elements)
//!     ↓ paginate
//! Pages (recorded draw commands)
//!     ↓ export (this module)
//! Output files
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: one SVG document per page via [`svg::Svg`]
//!
//! [`Error`] converts into [`FretsheetError::Export`] at the crate boundary.
//!
//! [`FretsheetError::Export`]: crate::FretsheetError::Export

/// SVG export backend.
pub mod svg;

use thiserror::Error;

use crate::document::Page;

/// Abstraction for page export backends.
pub trait Exporter {
    /// Rendered form of one page.
    type Output;

    /// Exports every page, in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnbalancedClip`] when a page's commands do not
    /// nest their clips properly.
    fn export_pages(&mut self, pages: &[Page]) -> Result<Vec<Self::Output>, Error>;
}

/// Errors that can occur while exporting pages.
#[derive(Debug, Error)]
pub enum Error {
    /// A page popped a clip it never pushed, or ended with clips still open.
    #[error("page {page}: unbalanced clip commands ({detail})")]
    UnbalancedClip { page: usize, detail: String },
}
