//! Crop geometry: the shared rectangle and rotation angle for a batch.
//!
//! A batch applies one [`CropRect`] and one [`RotationAngle`] to every image.
//! Both are selected against a single reference image by the presentation
//! layer (pointer-drawn selection or manual numeric entry) and arrive here as
//! plain values; this module owns their validation.
//!
//! # Coordinate System
//!
//! - Pixel coordinates, origin at the top-left corner
//! - A rectangle is (left, top, right, bottom) with half-open edges:
//!   the crop output is `right - left` pixels wide and `bottom - top` tall
//! - Angles are integer degrees; positive values rotate the image clockwise

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Validation errors for the shared crop geometry.
///
/// Any of these is fatal to starting a batch: there is nothing to process
/// without a valid rectangle and angle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    /// The rectangle has no width.
    #[error("right edge ({right}) must be greater than left edge ({left})")]
    EmptyWidth { left: u32, right: u32 },

    /// The rectangle has no height.
    #[error("bottom edge ({bottom}) must be greater than top edge ({top})")]
    EmptyHeight { top: u32, bottom: u32 },

    /// The rectangle extends past the image it was validated against.
    #[error("rectangle {rect} exceeds the {width}x{height} image bounds")]
    ExceedsBounds {
        rect: CropRect,
        width: u32,
        height: u32,
    },

    /// The rotation angle is outside the supported range.
    #[error("rotation angle {degrees} is outside [-180, 180]")]
    AngleOutOfRange { degrees: i32 },
}

/// An axis-aligned crop rectangle in pixel coordinates.
///
/// Edges are half-open: a valid rectangle satisfies `right > left` and
/// `bottom > top`, and cropping with it yields a `(right - left) x
/// (bottom - top)` image. Construction does not validate; callers run
/// [`CropRect::validate`] (or [`CropRect::validate_within`] against the
/// post-rotation reference dimensions) before starting a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropRect {
    /// Create a rectangle from its four edges. No validation is performed.
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width the crop output would have.
    ///
    /// Saturating so that an unvalidated rectangle reports 0 instead of
    /// wrapping.
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    /// Height the crop output would have.
    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Check the rectangle is well-formed: `right > left` and `bottom > top`.
    ///
    /// This is the pre-batch gate. It deliberately does not clamp and does
    /// not check bounds; the caller bounds raw widget inputs to the image
    /// beforehand (use [`CropRect::validate_within`] to check both).
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.right <= self.left {
            return Err(GeometryError::EmptyWidth {
                left: self.left,
                right: self.right,
            });
        }
        if self.bottom <= self.top {
            return Err(GeometryError::EmptyHeight {
                top: self.top,
                bottom: self.bottom,
            });
        }
        Ok(())
    }

    /// Check the full invariant against a concrete image size: well-formed
    /// and every edge within `[0, width]` / `[0, height]`.
    pub fn validate_within(&self, width: u32, height: u32) -> Result<(), GeometryError> {
        self.validate()?;
        if self.right > width || self.bottom > height {
            return Err(GeometryError::ExceedsBounds {
                rect: *self,
                width,
                height,
            });
        }
        Ok(())
    }

    /// Whether the rectangle lies fully inside a `width x height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.validate_within(width, height).is_ok()
    }
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})..({}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// A rotation angle in integer degrees, restricted to `[-180, 180]`.
///
/// Zero means no rotation. Positive values rotate the image clockwise (the
/// slider convention of the selection UI). The restriction matches the range
/// the selection widget offers; every full-turn rotation is expressible
/// within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct RotationAngle(i32);

impl RotationAngle {
    /// The maximum magnitude an angle may have, in degrees.
    pub const MAX_DEGREES: i32 = 180;

    /// Validate and wrap a degree value.
    pub fn new(degrees: i32) -> Result<Self, GeometryError> {
        if degrees.abs() > Self::MAX_DEGREES {
            return Err(GeometryError::AngleOutOfRange { degrees });
        }
        Ok(Self(degrees))
    }

    /// The angle in degrees.
    pub fn degrees(&self) -> i32 {
        self.0
    }

    /// Whether this angle is a no-op.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<i32> for RotationAngle {
    type Error = GeometryError;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        Self::new(degrees)
    }
}

impl From<RotationAngle> for i32 {
    fn from(angle: RotationAngle) -> i32 {
        angle.0
    }
}

impl fmt::Display for RotationAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
