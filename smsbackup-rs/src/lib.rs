//! smsbackup-rs: SMS Backup & Restore XML codec
//!
//! Reads and writes the XML backup format used by common SMS backup tools, so
//! message history can move between a messaging app and those tools.
//!
//! # Features
//!
//! - **Reader**: forward-only streaming parser yielding typed SMS records
//! - **Writer**: SMS and MMS serialization with the format's fixed attribute
//!   order, placeholder values and escaping rules
//! - **Attachments**: MMS parts read from a pluggable attachment store and
//!   embedded as base64
//!
//! # Example
//!
//! ```no_run
//! use smsbackup_rs::backup::{SmsItem, XmlBackupReader, XmlBackupWriter};
//!
//! fn main() -> smsbackup_rs::Result<()> {
//!     let item = SmsItem::new(0, "+15551234567", 1406695762000, 1, None, "Hello", None, 1, -1);
//!
//!     let mut writer = XmlBackupWriter::create("backup.xml", 1)?;
//!     writer.write_item(&item)?;
//!     writer.close()?;
//!
//!     for item in XmlBackupReader::open("backup.xml")? {
//!         println!("{}", item?.body);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`backup`]: Reader, writer and record types
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling
//! - [`storage`]: Attachment storage access

pub mod backup;
pub mod config;
pub mod error;
pub mod storage;

// Re-export commonly used types
pub use backup::{MmsAttachment, MmsRecord, SmsItem, XmlBackupReader, XmlBackupWriter};
pub use config::Config;
pub use error::{BackupError, Result};
