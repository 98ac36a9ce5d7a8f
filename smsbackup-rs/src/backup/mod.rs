//! Backup module
//!
//! Reads and writes the SMS Backup & Restore XML format:
//! - [`reader`]: streaming `<sms>` record reader
//! - [`writer`]: SMS and MMS record writer
//! - [`escape`]: attribute escaping
//! - [`templates`]: literal fragments of the format
//! - [`types`]: record types

pub mod escape;
pub mod reader;
pub mod templates;
pub mod types;
pub mod writer;

pub use escape::escape_xml;
pub use reader::{count_items, XmlBackupReader};
pub use types::*;
pub use writer::{WriterOptions, XmlBackupWriter, LEGACY_ATTACHMENT_LIMIT};
