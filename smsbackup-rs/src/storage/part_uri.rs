//! Attachment references
//!
//! MMS attachments are addressed by content URIs of the form
//! `content://<authority>/part/<unique_id>/<row_id>`.

use crate::error::{BackupError, Result};
use std::fmt;

const CONTENT_SCHEME: &str = "content://";
const PART_SEGMENT: &str = "part";

/// Identifies one attachment in the attachment store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttachmentId {
    /// Row id of the part
    pub row_id: i64,
    /// Unique id assigned when the part was stored
    pub unique_id: i64,
}

impl AttachmentId {
    pub fn new(row_id: i64, unique_id: i64) -> Self {
        Self { row_id, unique_id }
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "part {} (unique id {})", self.row_id, self.unique_id)
    }
}

/// A parsed part URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartUri {
    authority: String,
    id: AttachmentId,
}

impl PartUri {
    /// Parse a `content://<authority>/part/<unique_id>/<row_id>` URI
    pub fn parse(uri: &str) -> Result<Self> {
        let invalid = || BackupError::InvalidPartUri(uri.to_string());

        let rest = uri.strip_prefix(CONTENT_SCHEME).ok_or_else(invalid)?;
        let (authority, path) = rest.split_once('/').ok_or_else(invalid)?;
        if authority.is_empty() {
            return Err(invalid());
        }

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [PART_SEGMENT, unique_id, row_id] => {
                let unique_id = unique_id.parse::<i64>().map_err(|_| invalid())?;
                let row_id = row_id.parse::<i64>().map_err(|_| invalid())?;

                Ok(Self {
                    authority: authority.to_string(),
                    id: AttachmentId::new(row_id, unique_id),
                })
            }
            _ => Err(invalid()),
        }
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// The attachment this URI points at
    pub fn part_id(&self) -> AttachmentId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_part_uri() {
        let uri = PartUri::parse("content://org.thoughtcrime.securesms/part/1463318259018/4").unwrap();

        assert_eq!(uri.authority(), "org.thoughtcrime.securesms");
        assert_eq!(uri.part_id(), AttachmentId::new(4, 1463318259018));
    }

    #[test]
    fn test_parse_part_uri_trailing_slash() {
        let uri = PartUri::parse("content://provider/part/7/12/").unwrap();
        assert_eq!(uri.part_id(), AttachmentId::new(12, 7));
    }

    #[test]
    fn test_reject_invalid_uris() {
        for uri in [
            "",
            "file:///tmp/part/1/2",
            "content:///part/1/2",
            "content://provider/mms/1/2",
            "content://provider/part/1",
            "content://provider/part/abc/2",
            "content://provider/part/1/2/3",
        ] {
            assert!(
                matches!(PartUri::parse(uri), Err(BackupError::InvalidPartUri(_))),
                "accepted {uri:?}"
            );
        }
    }
}
