//! Attachment storage module
//!
//! Provides access to MMS attachment bytes:
//! - [`part_uri`]: attachment references parsed from part content URIs
//! - [`attachments`]: the attachment store interface and a directory backend

pub mod attachments;
pub mod part_uri;

pub use attachments::{AttachmentStore, DirectoryAttachmentStore};
pub use part_uri::{AttachmentId, PartUri};
