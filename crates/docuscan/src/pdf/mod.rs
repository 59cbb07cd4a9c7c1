//! PDF rasterization.
//!
//! Scanned PDFs enter the image pipeline by being rendered to one JPEG
//! per page. The page files use the `<stem>_page_<n>.jpg` naming scheme
//! and land directly in the output directory, where the batch runner
//! picks them up like any other image.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use pdfium_render::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::io::{file_name_of, traverse_directory};
use crate::{DocuscanError, Result};

const PDF_POINTS_PER_INCH: f32 = 72.0;

/// Rasterization tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterizeOptions {
    /// Render resolution. 300 DPI keeps small print legible for OCR.
    pub dpi: i32,
}

impl Default for RasterizeOptions {
    fn default() -> Self {
        Self { dpi: 300 }
    }
}

/// Output path for one rendered page.
///
/// Page numbers are 1-based so the file names read naturally.
pub(crate) fn page_output_path(pdf_path: &Path, output_dir: &Path, page_number: usize) -> PathBuf {
    let stem = pdf_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name_of(pdf_path));
    output_dir.join(format!("{}_page_{}.jpg", stem, page_number))
}

fn bind_pdfium() -> Result<Pdfium> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| {
            DocuscanError::MissingDependency(format!(
                "Pdfium library not found (install libpdfium or place it next to the binary): {}",
                e
            ))
        })?;
    Ok(Pdfium::new(bindings))
}

/// Render every page of one PDF to JPEG files under `output_dir`.
///
/// Pages whose output file already exists are skipped, so re-running
/// after an interruption only renders the remainder. Returns the paths
/// of the pages rendered by this call.
///
/// # Errors
///
/// Returns `DocuscanError::MissingDependency` when no Pdfium library can
/// be bound, `DocuscanError::Parsing` for unreadable PDFs, and
/// `DocuscanError::ImageProcessing` for render or encode failures.
pub fn rasterize_file(pdf_path: &Path, output_dir: &Path, options: &RasterizeOptions) -> Result<Vec<PathBuf>> {
    let pdfium = bind_pdfium()?;

    let document = pdfium
        .load_pdf_from_file(pdf_path, None)
        .map_err(|e| DocuscanError::parsing(format!("Failed to load PDF {}: {}", pdf_path.display(), e)))?;

    std::fs::create_dir_all(output_dir).map_err(DocuscanError::Io)?;

    let scale = options.dpi as f32 / PDF_POINTS_PER_INCH;
    let mut rendered = Vec::new();

    for (index, page) in document.pages().iter().enumerate() {
        let page_number = index + 1;
        let output_path = page_output_path(pdf_path, output_dir, page_number);

        if output_path.exists() {
            tracing::info!(page = page_number, output = %output_path.display(), "page already rendered, skipping");
            continue;
        }

        let config = PdfRenderConfig::new()
            .set_target_width(((page.width().value * scale) as i32).max(1))
            .set_target_height(((page.height().value * scale) as i32).max(1));

        let bitmap = page.render_with_config(&config).map_err(|e| {
            DocuscanError::image_processing_with_source(
                format!("Failed to render page {} of {}", page_number, pdf_path.display()),
                e,
            )
        })?;

        let image = DynamicImage::ImageRgb8(bitmap.as_image().into_rgb8());
        image.save(&output_path).map_err(|e| {
            DocuscanError::image_processing_with_source(format!("Failed to write {}", output_path.display()), e)
        })?;

        tracing::info!(page = page_number, output = %output_path.display(), "rendered page");
        rendered.push(output_path);
    }

    Ok(rendered)
}

/// Rasterize every PDF directly under `input_dir`.
///
/// Per-file failures are logged and the remaining PDFs still get
/// processed. Returns the number of PDFs rasterized without error.
pub fn rasterize_dir(input_dir: &Path, output_dir: &Path, options: &RasterizeOptions) -> Result<usize> {
    let pdfs = {
        let mut files = traverse_directory(input_dir, false, |p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })?;
        files.sort();
        files
    };

    let mut succeeded = 0usize;
    for pdf in &pdfs {
        match rasterize_file(pdf, output_dir, options) {
            Ok(pages) => {
                tracing::info!(file = %file_name_of(pdf), pages = pages.len(), "rasterized");
                succeeded += 1;
            }
            Err(e @ DocuscanError::MissingDependency(_)) => return Err(e),
            Err(e) => {
                tracing::error!(file = %file_name_of(pdf), error = %e, "failed to rasterize");
            }
        }
    }

    Ok(succeeded)
}
