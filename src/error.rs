//! Structured error types for staysheet.
//!
//! Rendering itself never fails on bad field values (those become
//! placeholders), so the variants cover the real error sources: JSON
//! input, the hotel API, image decoding and file output.

use thiserror::Error;

/// The unified error type returned by the public staysheet API.
#[derive(Debug, Error)]
pub enum StaysheetError {
    /// JSON input failed to parse as a hotel, proposal or config.
    #[error("Failed to parse input: {source}{}", hint_suffix(.hint))]
    ParseError {
        source: serde_json::Error,
        hint: String,
    },
    /// The HTTP request itself failed (connect, TLS, body decode).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The API answered with a non-success status.
    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },
    /// No hotel in the API listing has the requested id.
    #[error("No hotel with id {0}")]
    HotelNotFound(u64),
    /// An image could not be decoded, converted or measured.
    #[error("Image error: {0}")]
    ImageError(String),
    /// PDF generation failed.
    #[error("Render error: {0}")]
    RenderError(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for StaysheetError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the expected record. Check field names and types.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        StaysheetError::ParseError { source: e, hint }
    }
}

pub type Result<T> = std::result::Result<T, StaysheetError>;
