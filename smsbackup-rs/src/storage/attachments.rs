use crate::error::{BackupError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::PathBuf;
use tracing::debug;

use super::part_uri::AttachmentId;

/// Source of attachment bytes for MMS export
pub trait AttachmentStore {
    /// Open a blocking stream over the stored bytes of one attachment
    fn attachment_stream(&self, id: &AttachmentId) -> Result<Box<dyn Read + '_>>;
}

impl AttachmentStore for HashMap<AttachmentId, Vec<u8>> {
    fn attachment_stream(&self, id: &AttachmentId) -> Result<Box<dyn Read + '_>> {
        let data = self.get(id).ok_or(BackupError::NotFound(*id))?;
        Ok(Box::new(Cursor::new(data.as_slice())))
    }
}

/// Attachment store backed by a directory of part files
///
/// A part is looked up as `<root>/<unique_id>/<row_id>`, then as
/// `<root>/<row_id>`.
pub struct DirectoryAttachmentStore {
    base_path: PathBuf,
}

impl DirectoryAttachmentStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn locate(&self, id: &AttachmentId) -> Option<PathBuf> {
        let nested = self
            .base_path
            .join(id.unique_id.to_string())
            .join(id.row_id.to_string());
        if nested.is_file() {
            return Some(nested);
        }

        let flat = self.base_path.join(id.row_id.to_string());
        flat.is_file().then_some(flat)
    }
}

impl AttachmentStore for DirectoryAttachmentStore {
    fn attachment_stream(&self, id: &AttachmentId) -> Result<Box<dyn Read + '_>> {
        let path = self.locate(id).ok_or(BackupError::NotFound(*id))?;
        debug!("Reading attachment {} from {}", id, path.display());

        let file = File::open(&path)?;
        Ok(Box::new(BufReader::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn read_all(store: &dyn AttachmentStore, id: &AttachmentId) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        store.attachment_stream(id)?.read_to_end(&mut data)?;
        Ok(data)
    }

    #[test]
    fn test_directory_store_nested_and_flat() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("99")).unwrap();
        fs::write(dir.path().join("99").join("4"), b"nested").unwrap();
        fs::write(dir.path().join("5"), b"flat").unwrap();

        let store = DirectoryAttachmentStore::new(dir.path());

        assert_eq!(read_all(&store, &AttachmentId::new(4, 99)).unwrap(), b"nested");
        assert_eq!(read_all(&store, &AttachmentId::new(5, 1)).unwrap(), b"flat");
    }

    #[test]
    fn test_directory_store_missing_part() {
        let dir = TempDir::new().unwrap();
        let store = DirectoryAttachmentStore::new(dir.path());

        let result = read_all(&store, &AttachmentId::new(1, 2));
        assert!(matches!(result, Err(BackupError::NotFound(id)) if id == AttachmentId::new(1, 2)));
    }

    #[test]
    fn test_map_store() {
        let mut store = HashMap::new();
        store.insert(AttachmentId::new(1, 1), vec![1u8, 2, 3]);

        assert_eq!(read_all(&store, &AttachmentId::new(1, 1)).unwrap(), vec![1, 2, 3]);
        assert!(read_all(&store, &AttachmentId::new(2, 1)).is_err());
    }
}
