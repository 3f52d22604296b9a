//! The batch processor: one shared transform over an ordered set of uploads.
//!
//! A [`BatchJob`] carries the uploaded items plus the rectangle and angle the
//! user selected against the reference image. [`run`] applies the shared
//! transform to every item in order, with partial-failure semantics: a bad
//! image is recorded against its name and never aborts its siblings. Only an
//! invalid shared rectangle is fatal, because then there is nothing to
//! process at all.

use serde::Serialize;

use crate::archive::{write_archive, ArchiveEntry, ArchiveError};
use crate::decode::{decode_image, DecodeError};
use crate::encode::{encode_image, EncodeError};
use crate::format::resolve_format;
use crate::geometry::{CropRect, GeometryError, RotationAngle};
use crate::transform::{apply_transform, InterpolationFilter, TransformError};
use thiserror::Error;

/// One uploaded file: its name, raw bytes, and the media type the upload
/// layer declared for it. The declared type only drives the output encoding;
/// decoding sniffs the real format from the bytes.
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub name: String,
    pub bytes: Vec<u8>,
    pub declared_type: Option<String>,
}

impl BatchItem {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>, declared_type: Option<String>) -> Self {
        Self {
            name: name.into(),
            bytes,
            declared_type,
        }
    }
}

/// How archive entry names are derived from upload names.
///
/// The upload name is first reduced to its base file name: path components
/// are stripped so a hostile name cannot smuggle directories into the
/// archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputNaming {
    /// Insert before the extension: `photo.png` becomes `photo_Cropped.png`.
    /// Names without an extension get the suffix appended.
    Suffix(String),
    /// Prepend: `photo.png` becomes `cropped_photo.png`.
    Prefix(String),
}

impl Default for OutputNaming {
    fn default() -> Self {
        OutputNaming::Suffix("_Cropped".to_string())
    }
}

impl OutputNaming {
    /// Derive the archive entry name for an upload.
    ///
    /// `index` feeds the fallback name for uploads whose name reduces to
    /// nothing (empty, `.`, `..`).
    pub fn apply(&self, upload_name: &str, index: usize) -> String {
        let base = sanitize_entry_name(upload_name, index);
        match self {
            OutputNaming::Suffix(suffix) => match base.rfind('.') {
                // A leading dot is a hidden-file name, not an extension.
                Some(pos) if pos > 0 => format!("{}{}{}", &base[..pos], suffix, &base[pos..]),
                _ => format!("{base}{suffix}"),
            },
            OutputNaming::Prefix(prefix) => format!("{prefix}{base}"),
        }
    }
}

/// Reduce an upload name to a safe base file name.
///
/// Strips path components (including `../`) so the derived archive entry
/// cannot escape into directories when extracted.
fn sanitize_entry_name(name: &str, index: usize) -> String {
    std::path::Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .map(str::to_string)
        .unwrap_or_else(|| format!("unnamed_{index}"))
}

/// A batch: ordered items plus the shared transform selected against the
/// reference image.
#[derive(Debug, Clone)]
pub struct BatchJob {
    /// Uploaded files, in upload order.
    pub items: Vec<BatchItem>,
    /// The shared crop rectangle, in post-rotation pixel coordinates.
    pub rect: CropRect,
    /// The shared rotation angle.
    pub angle: RotationAngle,
    /// Entry naming convention for the archive.
    pub naming: OutputNaming,
    /// Interpolation for non-right-angle rotations.
    pub filter: InterpolationFilter,
}

impl BatchJob {
    /// Create an empty job with the default naming (`_Cropped` suffix) and
    /// export-quality interpolation.
    pub fn new(rect: CropRect, angle: RotationAngle) -> Self {
        Self {
            items: Vec::new(),
            rect,
            angle,
            naming: OutputNaming::default(),
            filter: InterpolationFilter::Lanczos3,
        }
    }

    /// Append an uploaded file.
    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        bytes: Vec<u8>,
        declared_type: Option<String>,
    ) {
        self.items.push(BatchItem::new(name, bytes, declared_type));
    }
}

/// Why a single item failed. Recorded against the item's name; never fatal
/// to the batch.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// A per-item failure: the upload name and what went wrong.
#[derive(Debug)]
pub struct ItemFailure {
    pub name: String,
    pub error: ItemError,
}

/// The user-facing failure summary line for one item.
#[derive(Debug, Clone, Serialize)]
pub struct FailureSummary {
    pub name: String,
    pub reason: String,
}

impl ItemFailure {
    pub fn summary(&self) -> FailureSummary {
        FailureSummary {
            name: self.name.clone(),
            reason: self.error.to_string(),
        }
    }
}

/// Fractional completion, reported after each item (including failed ones).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// Items finished so far.
    pub completed: usize,
    /// Total items in the job.
    pub total: usize,
}

impl BatchProgress {
    /// Completion as a fraction in `[0, 1]`. An empty job reports 1.0.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// What a batch run produced: archive entries for the successes and recorded
/// failures for the rest, both in job order.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub entries: Vec<ArchiveEntry>,
    pub failures: Vec<ItemFailure>,
}

impl BatchOutcome {
    pub fn succeeded_count(&self) -> usize {
        self.entries.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// The names of the items that failed, for the user-facing summary.
    pub fn failed_names(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.name.as_str()).collect()
    }

    /// One summary line per failure, serializable for the presentation layer.
    pub fn failure_summaries(&self) -> Vec<FailureSummary> {
        self.failures.iter().map(ItemFailure::summary).collect()
    }
}

/// Errors that abort a whole batch before or after item processing.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The shared rectangle is invalid; nothing was processed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Archive assembly failed after processing.
    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

/// Run a batch job.
///
/// The shared rectangle is validated up front; a violation is fatal and no
/// item is touched. Each item is then decoded, transformed with the shared
/// rectangle and angle, and re-encoded in the format resolved from its own
/// declared type. Item failures are recorded and processing continues:
/// partial success is a valid terminal outcome.
pub fn run(job: &BatchJob) -> Result<BatchOutcome, GeometryError> {
    run_with_progress(job, |_| {})
}

/// [`run`], reporting fractional completion after each item.
///
/// The callback is an observability side-channel for progress bars; it fires
/// for failed items too, since they also consume a slot of the work.
pub fn run_with_progress(
    job: &BatchJob,
    mut progress: impl FnMut(BatchProgress),
) -> Result<BatchOutcome, GeometryError> {
    job.rect.validate()?;

    let total = job.items.len();
    let mut outcome = BatchOutcome::default();

    for (index, item) in job.items.iter().enumerate() {
        tracing::debug!(name = %item.name, "processing batch item");

        match process_item(item, job) {
            Ok(bytes) => {
                let entry_name = job.naming.apply(&item.name, index);
                outcome.entries.push(ArchiveEntry::new(entry_name, bytes));
            }
            Err(error) => {
                tracing::warn!(name = %item.name, %error, "batch item failed");
                outcome.failures.push(ItemFailure {
                    name: item.name.clone(),
                    error,
                });
            }
        }

        progress(BatchProgress {
            completed: index + 1,
            total,
        });
    }

    Ok(outcome)
}

/// Decode, transform, and re-encode a single item.
fn process_item(item: &BatchItem, job: &BatchJob) -> Result<Vec<u8>, ItemError> {
    let decoded = decode_image(&item.bytes)?;
    let transformed = apply_transform(&decoded, job.angle, &job.rect, job.filter)?;
    let format = resolve_format(item.declared_type.as_deref());
    let bytes = encode_image(&transformed, format)?;
    Ok(bytes)
}

/// Run a batch job and pack the successes into a downloadable ZIP.
///
/// Returns the archive bytes alongside the outcome so the caller can show
/// the failure summary next to the download.
pub fn run_to_archive(job: &BatchJob) -> Result<(Vec<u8>, BatchOutcome), BatchError> {
    run_to_archive_with_progress(job, |_| {})
}

/// [`run_to_archive`] with a progress callback.
pub fn run_to_archive_with_progress(
    job: &BatchJob,
    progress: impl FnMut(BatchProgress),
) -> Result<(Vec<u8>, BatchOutcome), BatchError> {
    let outcome = run_with_progress(job, progress)?;
    let archive = write_archive(&outcome.entries)?;
    Ok((archive, outcome))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: entry counts always partition the job: every item ends
        /// up as exactly one entry or one failure.
        #[test]
        fn prop_outcome_partitions_items(broken_mask in proptest::collection::vec(any::<bool>(), 0..8)) {
            let mut job = BatchJob::new(
                CropRect::new(0, 0, 8, 8),
                RotationAngle::new(0).unwrap(),
            );
            for (i, broken) in broken_mask.iter().enumerate() {
                let bytes = if *broken {
                    vec![0u8; 4]
                } else {
                    let img = image::RgbImage::from_pixel(16, 16, image::Rgb([1, 2, 3]));
                    let mut buffer = std::io::Cursor::new(Vec::new());
                    img.write_to(&mut buffer, image::ImageFormat::Png).unwrap();
                    buffer.into_inner()
                };
                job.add_item(format!("img_{i}.png"), bytes, None);
            }

            let outcome = run(&job).unwrap();
            prop_assert_eq!(
                outcome.succeeded_count() + outcome.failed_count(),
                broken_mask.len()
            );
            let expected_failures = broken_mask.iter().filter(|b| **b).count();
            prop_assert_eq!(outcome.failed_count(), expected_failures);
        }

        /// Property: suffix naming never emits path separators.
        #[test]
        fn prop_entry_names_have_no_separators(name in "[a-zA-Z0-9_./-]{0,40}") {
            let derived = OutputNaming::default().apply(&name, 0);
            prop_assert!(!derived.contains('/'));
            prop_assert!(!derived.is_empty());
        }
    }
}
