use std::path::PathBuf;

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::position::PositionError;

/// Reasons a single NMEA sentence does not yield a position.
///
/// The log reader treats every variant as a skip; only direct callers of the
/// per-sentence functions ever see one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NmeaError {
    #[error("Malformed NMEA sentence")]
    MalformedSentence,
    #[error("Checksum mismatch: sentence declares {declared:02X}, body computes to {computed:02X}")]
    ChecksumMismatch { declared: u8, computed: u8 },
    #[error("Unsupported sentence format '{0}'")]
    UnsupportedFormat(String),
    #[error("Invalid sentence data: {0}")]
    InvalidData(String),
}

/// Errors raised while reading a GPX document. Any of these aborts the parse.
#[derive(Debug, Error)]
pub enum GpxError {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),
    #[error("Unexpected second root element '{0}'.")]
    ExtraRootElement(String),
    #[error("Unclosed '{0}' element.")]
    UnclosedElement(String),
    #[error("Missing '{0}' element.")]
    MissingElement(String),
    #[error("Missing '{0}' attribute.")]
    MissingAttribute(String),
    #[error("Malformed date/time content: {0}")]
    MalformedTimestamp(String),
    #[error("Invalid position: {0}")]
    InvalidPosition(#[from] PositionError),
    #[error("Error opening source file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GpxError {
    pub(crate) fn missing_element(name: &str) -> Self {
        Self::MissingElement(name.to_string())
    }

    pub(crate) fn missing_attribute(name: &str) -> Self {
        Self::MissingAttribute(name.to_string())
    }
}

impl From<GpxError> for JsValue {
    fn from(e: GpxError) -> Self {
        js_sys::Error::new(&e.to_string()).into()
    }
}
