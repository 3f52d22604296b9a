//! Output format resolution from declared media types.
//!
//! Each upload carries the media type its browser declared (`image/png`,
//! `image/jpeg`, ...). The output of the batch mirrors that container format
//! rather than converting: a JPEG in is a JPEG out. Anything unrecognized or
//! missing falls back to PNG.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The output encoding for a processed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Lossless PNG. The fallback for absent or unrecognized declared types.
    #[default]
    Png,
    /// Lossy JPEG with configurable quality.
    Jpeg,
}

impl OutputFormat {
    /// The display name of the format (`"PNG"` / `"JPEG"`).
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Png => "PNG",
            OutputFormat::Jpeg => "JPEG",
        }
    }

    /// The conventional file extension, including the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => ".png",
            OutputFormat::Jpeg => ".jpg",
        }
    }

    /// Convert to the image crate's format enum.
    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            OutputFormat::Png => image::ImageFormat::Png,
            OutputFormat::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve a declared media type to an output encoding.
///
/// The subtype after `/` is taken and uppercased; `JPG` normalizes to `JPEG`.
/// An absent, empty, or unrecognized declared type resolves to PNG. The
/// comparison is case-insensitive, so `image/JPEG` and `IMAGE/jpg` both
/// resolve to JPEG.
///
/// # Example
///
/// ```ignore
/// use batchcrop_core::format::{resolve_format, OutputFormat};
///
/// assert_eq!(resolve_format(Some("image/jpg")), OutputFormat::Jpeg);
/// assert_eq!(resolve_format(None), OutputFormat::Png);
/// ```
pub fn resolve_format(declared: Option<&str>) -> OutputFormat {
    let declared = match declared {
        Some(s) if !s.trim().is_empty() => s,
        _ => return OutputFormat::Png,
    };

    let subtype = declared.rsplit('/').next().unwrap_or(declared);
    match subtype.to_ascii_uppercase().as_str() {
        "JPEG" | "JPG" => OutputFormat::Jpeg,
        _ => OutputFormat::Png,
    }
}
