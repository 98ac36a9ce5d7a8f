//! Backup writer
//!
//! Serializes SMS and MMS records into the backup XML format.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};

use super::escape::escape_xml;
use super::templates::*;
use super::types::{MmsRecord, SmsItem};
use crate::error::{BackupError, Result};
use crate::storage::{AttachmentId, AttachmentStore, PartUri};

/// Size of the single read buffer older exporters used for attachments
pub const LEGACY_ATTACHMENT_LIMIT: usize = 1_000_000;

/// Writer settings
#[derive(Debug, Clone)]
pub struct WriterOptions {
    /// Name placed in the `File Created By` comment
    pub generator: String,
    /// Reject attachments of this many bytes or more (None = no limit)
    pub attachment_limit: Option<usize>,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            generator: "Signal".to_string(),
            attachment_limit: None,
        }
    }
}

/// Backup writer for exporting messages
///
/// The header is written on construction. [`close`](Self::close) must be
/// called once all records are written, otherwise the document is left
/// without its closing tag.
pub struct XmlBackupWriter<W: Write> {
    writer: W,
    declared_count: usize,
    items_written: u64,
    options: WriterOptions,
}

impl XmlBackupWriter<BufWriter<File>> {
    /// Create (or truncate) a backup file announcing `count` records
    pub fn create<P: AsRef<Path>>(path: P, count: usize) -> Result<Self> {
        Self::create_with_options(path, count, WriterOptions::default())
    }

    pub fn create_with_options<P: AsRef<Path>>(
        path: P,
        count: usize,
        options: WriterOptions,
    ) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        info!("Writing backup of {} records to {}", count, path.display());

        Self::with_options(BufWriter::new(file), count, options)
    }
}

impl<W: Write> XmlBackupWriter<W> {
    pub fn new(writer: W, count: usize) -> Result<Self> {
        Self::with_options(writer, count, WriterOptions::default())
    }

    pub fn with_options(mut writer: W, count: usize, options: WriterOptions) -> Result<Self> {
        writeln!(writer, "{}", XML_HEADER)?;
        writeln!(writer, "{}", created_by(&options.generator))?;
        write!(writer, "{}", open_tag_smses(count))?;

        Ok(Self {
            writer,
            declared_count: count,
            items_written: 0,
            options,
        })
    }

    /// Write one `<sms/>` element
    pub fn write_item(&mut self, item: &SmsItem) -> Result<()> {
        let subject = item.subject.as_deref().map(escape_xml);

        let mut element = String::with_capacity(256 + item.body.len());
        element.push_str(OPEN_TAG_SMS);
        append_attribute(&mut element, "protocol", item.protocol);
        append_attribute(&mut element, "address", escape_xml(&item.address));
        append_attribute(&mut element, "date", item.date);
        append_attribute(&mut element, "type", item.kind);
        append_attribute(&mut element, "subject", subject.as_deref().unwrap_or(NULL));
        append_attribute(&mut element, "body", escape_xml(&item.body));
        append_attribute(&mut element, "toa", NULL);
        append_attribute(&mut element, "sc_toa", NULL);
        // Written unescaped, like the tool that defined the format.
        append_attribute(
            &mut element,
            "service_center",
            item.service_center.as_deref().unwrap_or(NULL),
        );
        append_attribute(&mut element, "read", item.read);
        append_attribute(&mut element, "status", item.status);
        append_attribute(&mut element, "locked", 0);
        element.push_str(CLOSE_EMPTY_TAG);

        self.write_record(&element)?;
        debug!("Wrote SMS record dated {}", item.date);
        Ok(())
    }

    /// Write one `<mms>` element, pulling attachment bytes from `store`
    ///
    /// The element is built in memory first, so a failing attachment leaves
    /// nothing behind in the output.
    pub fn write_mms<S>(&mut self, store: &S, record: &MmsRecord) -> Result<()>
    where
        S: AttachmentStore + ?Sized,
    {
        let mut element = String::with_capacity(4096);

        element.push_str(MMS_OPEN);
        append_attribute(&mut element, "date", record.date_sent);
        element.push_str(MMS_AFTER_DATE);
        append_attribute(&mut element, "address", escape_xml(&record.address));
        element.push_str(MMS_AFTER_ADDRESS);

        element.push_str(TEXT_PART_OPEN);
        append_attribute(&mut element, "text", escape_xml(&record.display_body));
        element.push_str(PART_CLOSE);

        element.push_str(SMIL_PART);

        for attachment in &record.attachments {
            let id = PartUri::parse(&attachment.data_uri)?.part_id();
            let data = read_attachment(store.attachment_stream(&id)?, id, self.options.attachment_limit)?;
            debug!("Encoding attachment {} ({} bytes, {})", id, data.len(), attachment.content_type);

            element.push_str(ATTACHMENT_PART_OPEN);
            append_attribute(&mut element, "ct", &attachment.content_type);
            element.push_str(ATTACHMENT_PART_ATTRS);
            append_attribute(&mut element, "data", BASE64.encode(&data));
            element.push_str(PART_CLOSE);
        }

        element.push_str(MMS_CLOSE);

        self.write_record(&element)?;
        debug!(
            "Wrote MMS record dated {} with {} attachments",
            record.date_sent,
            record.attachments.len()
        );
        Ok(())
    }

    fn write_record(&mut self, element: &str) -> Result<()> {
        writeln!(self.writer)?;
        self.writer.write_all(element.as_bytes())?;
        self.items_written += 1;
        Ok(())
    }

    /// Get the number of records written so far
    pub fn items_written(&self) -> u64 {
        self.items_written
    }

    /// Write the closing tag, flush, and return the inner writer
    pub fn close(mut self) -> Result<W> {
        writeln!(self.writer)?;
        self.writer.write_all(CLOSE_TAG_SMSES.as_bytes())?;
        self.writer.flush()?;

        if self.items_written != self.declared_count as u64 {
            warn!(
                "Backup declared {} records but {} were written",
                self.declared_count, self.items_written
            );
        }
        info!("Finished backup with {} records", self.items_written);

        Ok(self.writer)
    }
}

fn append_attribute<T: Display>(element: &mut String, name: &str, value: T) {
    element.push_str(name);
    element.push_str(OPEN_ATTRIBUTE);
    element.push_str(&value.to_string());
    element.push_str(CLOSE_ATTRIBUTE);
}

/// Read an attachment to the end, enforcing the optional size limit
fn read_attachment<R: Read>(mut stream: R, id: AttachmentId, limit: Option<usize>) -> Result<Vec<u8>> {
    let mut data = Vec::new();

    match limit {
        Some(limit) => {
            stream.by_ref().take(limit as u64).read_to_end(&mut data)?;
            if data.len() >= limit {
                return Err(BackupError::AttachmentTooLarge { id, limit });
            }
        }
        None => {
            stream.read_to_end(&mut data)?;
        }
    }

    Ok(data)
}
