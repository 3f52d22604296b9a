//! WASM bindings for the batch processor.
//!
//! JavaScript builds a [`JsBatchJob`] from the uploaded files and the
//! selected rectangle/angle, then calls [`run_batch`]. The result carries
//! the ZIP bytes, the download metadata, and a serialized failure list for
//! the summary panel.
//!
//! # Example
//!
//! ```typescript
//! import { JsBatchJob, run_batch } from '@batchcrop/wasm';
//!
//! const job = new JsBatchJob(l, t, r, b, angle);
//! for (const file of files) {
//!   job.add_item(file.name, new Uint8Array(await file.arrayBuffer()), file.type);
//! }
//!
//! const result = run_batch(job, (done, total) => setProgress(done / total));
//! download(result.archive(), result.download_name, result.content_type);
//! for (const f of result.failures()) showWarning(`${f.name}: ${f.reason}`);
//! ```

use batchcrop_core::archive::{ARCHIVE_CONTENT_TYPE, ARCHIVE_FILE_NAME};
use batchcrop_core::batch::{run_to_archive_with_progress, BatchJob, FailureSummary, OutputNaming};
use batchcrop_core::geometry::{CropRect, RotationAngle};
use wasm_bindgen::prelude::*;

/// A batch job under construction on the JavaScript side.
#[wasm_bindgen]
pub struct JsBatchJob {
    inner: BatchJob,
}

#[wasm_bindgen]
impl JsBatchJob {
    /// Create a job from the shared rectangle and rotation angle.
    ///
    /// The angle is validated here; the rectangle's ordering rule is
    /// checked when the batch runs (and should be pre-checked with
    /// `validate_rect` for early UI feedback).
    #[wasm_bindgen(constructor)]
    pub fn new(
        left: u32,
        top: u32,
        right: u32,
        bottom: u32,
        angle_degrees: i32,
    ) -> Result<JsBatchJob, JsValue> {
        let angle =
            RotationAngle::new(angle_degrees).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let rect = CropRect::new(left, top, right, bottom);

        Ok(JsBatchJob {
            inner: BatchJob::new(rect, angle),
        })
    }

    /// Append an uploaded file.
    ///
    /// # Arguments
    ///
    /// * `name` - The upload's file name
    /// * `bytes` - The raw file bytes
    /// * `declared_type` - The media type the browser declared (`file.type`),
    ///   or undefined; it only affects the output encoding
    pub fn add_item(&mut self, name: String, bytes: Vec<u8>, declared_type: Option<String>) {
        // An empty declared type (file.type for unknown files) means absent.
        let declared = declared_type.filter(|t| !t.trim().is_empty());
        self.inner.add_item(name, bytes, declared);
    }

    /// Number of items added so far.
    #[wasm_bindgen(getter)]
    pub fn item_count(&self) -> usize {
        self.inner.items.len()
    }

    /// Name outputs `<stem><suffix><extension>` (the default is `_Cropped`).
    pub fn use_suffix_naming(&mut self, suffix: String) {
        self.inner.naming = OutputNaming::Suffix(suffix);
    }

    /// Name outputs `<prefix><name>`.
    pub fn use_prefix_naming(&mut self, prefix: String) {
        self.inner.naming = OutputNaming::Prefix(prefix);
    }
}

/// The terminal outcome of a batch run.
///
/// Partial success is a valid outcome: the archive holds every item that
/// succeeded, and `failures()` names the rest.
#[wasm_bindgen]
pub struct JsBatchResult {
    archive: Vec<u8>,
    succeeded: usize,
    failures: Vec<FailureSummary>,
}

#[wasm_bindgen]
impl JsBatchResult {
    /// The ZIP archive bytes, ready for download.
    pub fn archive(&self) -> Vec<u8> {
        self.archive.clone()
    }

    /// Number of items that made it into the archive.
    #[wasm_bindgen(getter)]
    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    /// Number of items that failed.
    #[wasm_bindgen(getter)]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Suggested download file name for the archive.
    #[wasm_bindgen(getter)]
    pub fn download_name(&self) -> String {
        ARCHIVE_FILE_NAME.to_string()
    }

    /// MIME type of the archive.
    #[wasm_bindgen(getter)]
    pub fn content_type(&self) -> String {
        ARCHIVE_CONTENT_TYPE.to_string()
    }

    /// The failure list as `[{ name, reason }, ...]` for the summary panel.
    pub fn failures(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.failures).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Run a batch job.
///
/// `on_progress`, when given, is called with `(completed, total)` after each
/// item, including failed ones.
///
/// # Errors
///
/// Returns an error only for a fatal condition: an invalid shared rectangle
/// (nothing was processed) or a failure assembling the archive. Per-item
/// problems are reported through the result's failure list instead.
#[wasm_bindgen]
pub fn run_batch(
    job: &JsBatchJob,
    on_progress: Option<js_sys::Function>,
) -> Result<JsBatchResult, JsValue> {
    let progress = |p: batchcrop_core::batch::BatchProgress| {
        if let Some(callback) = &on_progress {
            // A throwing progress callback must not kill the batch.
            let _ = callback.call2(
                &JsValue::NULL,
                &JsValue::from(p.completed as u32),
                &JsValue::from(p.total as u32),
            );
        }
    };

    let (archive, outcome) = run_to_archive_with_progress(&job.inner, progress)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    Ok(JsBatchResult {
        archive,
        succeeded: outcome.succeeded_count(),
        failures: outcome.failure_summaries(),
    })
}
