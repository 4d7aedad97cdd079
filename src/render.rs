//! # Image Rendering
//!
//! Renders the composed HTML card to JPEG bytes through `wkhtmltoimage` and
//! post-processes the raw render into the final square image.
//!
//! ## The renderer contract
//!
//! `wkhtmltoimage` exits 1 or 2 for font and network warnings even when the
//! image renders fine, so the exit status is ignored. Validity is judged by
//! the output file instead: it must exist and exceed a minimum byte size.
//! A render that fails that check is the one fatal error in the whole run.
//!
//! ## Testing seam
//!
//! The subprocess sits behind the [`CardRenderer`] trait so the pipeline
//! tests can swap in a canned renderer and never spawn a process.

use crate::config::RenderConfig;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use std::fs;
use std::io;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::Builder;
use thiserror::Error;

/// Errors from the render step.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Temp file handling or subprocess spawn failed
    #[error("render I/O error: {0}")]
    Io(#[from] io::Error),

    /// The renderer ran but produced no plausible image
    #[error("renderer produced no valid image ({size} bytes, need at least {min})")]
    Invalid { size: u64, min: u64 },
}

/// Narrow rendering interface: markup in, raster bytes out.
pub trait CardRenderer {
    fn render(&self, html: &str) -> Result<Vec<u8>, RenderError>;
}

/// The production renderer: a blocking `wkhtmltoimage` invocation.
#[derive(Debug)]
pub struct Wkhtmltoimage {
    width: u32,
    height: u32,
    quality: u8,
    min_bytes: u64,
}

impl Wkhtmltoimage {
    pub fn new(config: &RenderConfig) -> Self {
        Wkhtmltoimage {
            width: config.width,
            height: config.height,
            quality: config.quality,
            min_bytes: config.min_bytes,
        }
    }
}

impl CardRenderer for Wkhtmltoimage {
    fn render(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        let mut page = Builder::new().suffix(".html").tempfile()?;
        page.write_all(html.as_bytes())?;
        page.flush()?;

        let raw = Builder::new().suffix("_raw.jpg").tempfile()?;

        // Exit status intentionally unchecked; see module docs.
        let _ = Command::new("wkhtmltoimage")
            .arg("--width")
            .arg(self.width.to_string())
            .arg("--height")
            .arg(self.height.to_string())
            .arg("--quality")
            .arg(self.quality.to_string())
            .arg("--log-level")
            .arg("none")
            .arg("--format")
            .arg("jpg")
            .arg(page.path())
            .arg(raw.path())
            .output()?;

        validate_render(raw.path(), self.min_bytes)?;
        Ok(fs::read(raw.path())?)
    }
}

/// Check that a rendered file exists and passes the size threshold.
pub fn validate_render(path: &Path, min_bytes: u64) -> Result<(), RenderError> {
    let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    if size < min_bytes {
        return Err(RenderError::Invalid {
            size,
            min: min_bytes,
        });
    }
    Ok(())
}

/// Crop the raw render to its content band and resize to an exact square.
///
/// The renderer lays the card out in the top `crop_height` pixels of the
/// page; the rest is blank margin. When decoding or re-encoding fails the
/// raw bytes are returned verbatim; an uncropped card beats no card.
pub fn square_crop(raw: &[u8], config: &RenderConfig) -> Vec<u8> {
    let img = match image::load_from_memory(raw) {
        Ok(img) => img,
        Err(error) => {
            eprintln!("  WARNING: Could not decode raw render ({}), using as-is", error);
            return raw.to_vec();
        }
    };

    let keep = img.height().min(config.crop_height);
    let cropped = img.crop_imm(0, 0, config.width, keep);
    let resized = cropped.resize_exact(config.width, config.width, FilterType::Lanczos3);

    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, config.quality);
    match resized.write_with_encoder(encoder) {
        Ok(()) => out,
        Err(error) => {
            eprintln!("  WARNING: Could not re-encode render ({}), using as-is", error);
            raw.to_vec()
        }
    }
}

/// Write the final card, creating the output directory as needed. The fixed
/// file name is overwritten on every run.
pub fn write_card(path: &Path, bytes: &[u8]) -> Result<(), RenderError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, bytes)?;
    Ok(())
}
