use thiserror::Error;
use wangmap_core::InvalidAssetData;

/// Error type for tileset loading failures
#[derive(Debug, Error)]
pub enum TsxError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML error: {0}")]
    Xml(String),
    #[error("missing attribute '{attribute}' in <{element}>")]
    MissingAttribute { element: String, attribute: String },
    #[error("invalid value '{value}' for attribute '{attribute}' in <{element}>")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },
    #[error("missing <{0}> element")]
    MissingElement(String),
    #[error("Invalid asset data: {0}")]
    Asset(#[from] InvalidAssetData),
}

impl From<quick_xml::Error> for TsxError {
    fn from(e: quick_xml::Error) -> Self {
        TsxError::Xml(e.to_string())
    }
}
