//! CLI logic for the Fretsheet chord sheet renderer.
//!
//! Reads a TOML chord sheet, applies command-line display overrides, and
//! writes one SVG file per page.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;

use fretsheet::{FretsheetError, SheetBuilder};

/// Run the Fretsheet CLI application
///
/// This function processes the input file through the Fretsheet pipeline
/// and writes the resulting pages to SVG files. Returns the paths written.
///
/// # Errors
///
/// Returns `FretsheetError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Sheet decoding and validation errors
/// - Export errors
pub fn run(args: &Args) -> Result<Vec<PathBuf>, FretsheetError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing sheet"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = SheetBuilder::new(app_config);
    let mut sheet = builder.parse(&source)?;

    let mut options = sheet.options();
    options.mirror_diagram |= args.mirror;
    options.show_notes |= args.notes;
    options.show_fingers &= !args.no_fingers;
    sheet.set_options(options);

    let pages = builder.render_svg_pages(&sheet)?;

    let paths = output_paths(Path::new(&args.output), pages.len());
    for (path, svg) in paths.iter().zip(&pages) {
        fs::write(path, svg)?;
        info!(output_file = path.display().to_string(); "SVG page exported");
    }

    Ok(paths)
}

/// File names for `count` pages: `output` itself for a single page,
/// otherwise `stem-N.ext` next to it.
fn output_paths(output: &Path, count: usize) -> Vec<PathBuf> {
    if count <= 1 {
        return vec![output.to_path_buf()];
    }

    let stem = output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    let extension = output
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| "svg".to_string());

    (1..=count)
        .map(|number| output.with_file_name(format!("{stem}-{number}.{extension}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page_keeps_output_name() {
        assert_eq!(
            output_paths(Path::new("dir/song.svg"), 1),
            vec![PathBuf::from("dir/song.svg")]
        );
    }

    #[test]
    fn test_multiple_pages_are_numbered() {
        assert_eq!(
            output_paths(Path::new("dir/song.svg"), 2),
            vec![
                PathBuf::from("dir/song-1.svg"),
                PathBuf::from("dir/song-2.svg")
            ]
        );
    }

    #[test]
    fn test_missing_extension_defaults_to_svg() {
        assert_eq!(
            output_paths(Path::new("song"), 2)[1],
            PathBuf::from("song-2.svg")
        );
    }
}
