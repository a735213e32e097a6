//! Error types for the SNQR reader

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, ReaderError>;

/// Reader error type
///
/// None of these escape the bootstrap or direction-toggle entry points;
/// they are logged and replaced by a fallback at each async boundary.
#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("Metadata request failed with HTTP {0}")]
    MetadataHttp(u16),

    #[error("Metadata request failed: {0}")]
    MetadataNetwork(String),

    #[error("Metadata parse error: {0}")]
    MetadataParse(#[from] serde_json::Error),

    #[error("Page memory lookup failed: {0}")]
    PageMemory(String),

    #[error("Invalid PDF URL provided to the viewer")]
    InvalidPdfUrl,

    #[error("Flipbook mount failed: {0}")]
    ViewerMount(String),

    #[error("Element not found: {0}")]
    MissingElement(String),

    #[error("Invalid reader configuration: {0}")]
    Config(String),

    #[error("JavaScript error: {0}")]
    Js(String),
}

impl ReaderError {
    /// Wrap a thrown JS value, keeping whatever message it carries
    pub fn js(value: JsValue) -> Self {
        ReaderError::Js(describe_js(&value))
    }
}

impl From<ReaderError> for JsValue {
    fn from(err: ReaderError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Best-effort text for a thrown JS value
pub(crate) fn describe_js(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{:?}", value)
}
