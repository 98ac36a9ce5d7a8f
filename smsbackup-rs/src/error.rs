use thiserror::Error;

use crate::storage::AttachmentId;

#[derive(Error, Debug)]
pub enum BackupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Malformed record: attribute `{attribute}` has non-integer value {value:?}")]
    MalformedRecord { attribute: &'static str, value: String },

    #[error("Attachment {id} does not fit in the {limit} byte read limit")]
    AttachmentTooLarge { id: AttachmentId, limit: usize },

    #[error("Invalid part URI: {0}")]
    InvalidPartUri(String),

    #[error("Attachment not found: {0}")]
    NotFound(AttachmentId),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BackupError>;
