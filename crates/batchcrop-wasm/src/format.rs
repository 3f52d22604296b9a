//! WASM binding for output format resolution.

use batchcrop_core::format;
use wasm_bindgen::prelude::*;

/// Resolve a declared media type to the output encoding name.
///
/// Returns `"PNG"` or `"JPEG"`. Absent, empty, or unrecognized declared
/// types resolve to `"PNG"`; `image/jpg` normalizes to `"JPEG"`.
///
/// # Example (TypeScript)
///
/// ```typescript
/// resolve_format("image/jpg");  // "JPEG"
/// resolve_format(undefined);    // "PNG"
/// ```
#[wasm_bindgen]
pub fn resolve_format(declared: Option<String>) -> String {
    format::resolve_format(declared.as_deref())
        .name()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_format_binding() {
        assert_eq!(resolve_format(Some("image/jpg".to_string())), "JPEG");
        assert_eq!(resolve_format(Some("image/jpeg".to_string())), "JPEG");
        assert_eq!(resolve_format(Some("image/png".to_string())), "PNG");
        assert_eq!(resolve_format(None), "PNG");
    }
}
