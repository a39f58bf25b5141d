//! Error types shared by the page components.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures that can occur while wiring or running the page.
///
/// None of these are fatal: callers log them and skip the dependent feature.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required element is absent from the document.
    #[error("element not found: {0}")]
    MissingElement(String),

    /// `window`, `document` or `localStorage` could not be obtained.
    #[error("browser api unavailable: {0}")]
    Unavailable(&'static str),

    /// Writing a key to the persistent store failed (quota, private mode).
    #[error("failed to write '{key}' to storage")]
    StorageWrite { key: String },

    /// A persisted record exists but does not decode.
    #[error("malformed persisted value under '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A DOM call raised a JavaScript exception.
    #[error("dom call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for AppError {
    fn from(value: JsValue) -> Self {
        AppError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<AppError> for JsValue {
    fn from(err: AppError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
