// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page rasterization via pdfium-render (dynamically linked — needs a
// libpdfium shared library at runtime).

use std::path::Path;

use image::DynamicImage;
use pdfium_render::prelude::*;
use textwerk_core::error::{Result, TextwerkError};
use tracing::{debug, instrument};

/// Renders single pages of a source document to raster images.
///
/// Pages are rendered one at a time and dropped as soon as their text has
/// been recognized, bounding peak memory to one page.
pub trait PageRasterizer {
    /// Number of pages in the document.
    fn page_count(&self, path: &Path) -> Result<usize>;

    /// Render one page (0-indexed) at `scale` times its natural size.
    fn render_page(&self, path: &Path, index: usize, scale: f32) -> Result<DynamicImage>;
}

/// `PageRasterizer` backed by pdfium.
///
/// Binding is attempted against a library next to the executable first, then
/// the system library. Construction fails cleanly when neither is present,
/// which the caller folds into the OCR capability flag.
pub struct PdfiumRasterizer {
    pdfium: Pdfium,
}

impl PdfiumRasterizer {
    pub fn new() -> Result<Self> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|err| {
                TextwerkError::Rasterization(format!("pdfium library not available: {err}"))
            })?;
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }

    fn load_document(&self, path: &Path) -> Result<PdfDocument<'_>> {
        self.pdfium.load_pdf_from_file(path, None).map_err(|err| {
            TextwerkError::Rasterization(format!("failed to load {}: {err}", path.display()))
        })
    }
}

impl PageRasterizer for PdfiumRasterizer {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn page_count(&self, path: &Path) -> Result<usize> {
        let document = self.load_document(path)?;
        let count = document.pages().len() as usize;
        debug!(count, "page count read");
        Ok(count)
    }

    #[instrument(skip(self), fields(path = %path.display(), index, scale))]
    fn render_page(&self, path: &Path, index: usize, scale: f32) -> Result<DynamicImage> {
        let document = self.load_document(path)?;
        let pages = document.pages();
        let page = pages.get(index as u16).map_err(|err| {
            TextwerkError::Rasterization(format!("page {index} not available: {err}"))
        })?;

        let config = PdfRenderConfig::new().scale_page_by_factor(scale);
        let bitmap = page.render_with_config(&config).map_err(|err| {
            TextwerkError::Rasterization(format!("failed to render page {index}: {err}"))
        })?;

        let image = bitmap.as_image();
        debug!(
            width = image.width(),
            height = image.height(),
            "page rendered"
        );
        Ok(image)
    }
}
