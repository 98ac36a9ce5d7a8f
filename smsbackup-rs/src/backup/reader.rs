//! Backup reader
//!
//! Streams SMS records out of a backup file. Only `<sms>` elements are
//! recognized; `<mms>` elements and everything else are skipped.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use super::templates::NULL;
use super::types::SmsItem;
use crate::error::{BackupError, Result};

const SMS_TAG: &[u8] = b"sms";

/// Backup reader for importing messages
pub struct XmlBackupReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    items_read: u64,
    finished: bool,
}

impl XmlBackupReader<BufReader<File>> {
    /// Open a backup file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        info!("Reading backup from {}", path.display());

        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> XmlBackupReader<R> {
    /// Create a new backup reader
    pub fn new(reader: R) -> Self {
        Self {
            reader: Reader::from_reader(reader),
            buf: Vec::new(),
            items_read: 0,
            finished: false,
        }
    }

    /// Read the next SMS item
    ///
    /// Returns `Ok(None)` once the document is exhausted, and keeps doing so
    /// on later calls.
    pub fn next_item(&mut self) -> Result<Option<SmsItem>> {
        while !self.finished {
            self.buf.clear();

            match self.reader.read_event_into(&mut self.buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    if !e.name().as_ref().eq_ignore_ascii_case(SMS_TAG) {
                        continue;
                    }

                    match parse_item(&e) {
                        Ok(Some(item)) => {
                            self.items_read += 1;
                            return Ok(Some(item));
                        }
                        Ok(None) => debug!(
                            "Skipping <sms> without attributes at byte {}",
                            self.reader.buffer_position()
                        ),
                        Err(err) => {
                            self.finished = true;
                            return Err(err);
                        }
                    }
                }
                Ok(Event::Eof) => {
                    self.finished = true;
                    info!("Reached end of backup after {} items", self.items_read);
                }
                Ok(_) => {}
                Err(e) => {
                    self.finished = true;
                    return Err(e.into());
                }
            }
        }

        Ok(None)
    }

    /// Get the number of items read
    pub fn items_read(&self) -> u64 {
        self.items_read
    }

    /// Release the tokenizer and return the underlying reader
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

impl<R: BufRead> Iterator for XmlBackupReader<R> {
    type Item = Result<SmsItem>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_item().transpose()
    }
}

/// Build an item from the attributes of an `<sms>` tag
///
/// Returns `None` for a tag without attributes.
fn parse_item(start: &BytesStart<'_>) -> Result<Option<SmsItem>> {
    let mut item = SmsItem::default();
    let mut attribute_count = 0usize;

    for attr in start.attributes() {
        let attr = attr?;
        attribute_count += 1;

        let value = attr.unescape_value()?;
        match attr.key.as_ref() {
            b"protocol" => item.protocol = parse_number("protocol", &value)?,
            b"address" => item.address = value.into_owned(),
            b"date" => item.date = parse_number("date", &value)?,
            b"type" => item.kind = parse_number("type", &value)?,
            b"subject" => item.subject = optional_text(&value),
            b"body" => item.body = value.into_owned(),
            b"service_center" => item.service_center = optional_text(&value),
            b"read" => item.read = parse_number("read", &value)?,
            b"status" => item.status = parse_number("status", &value)?,
            _ => {}
        }
    }

    Ok((attribute_count > 0).then_some(item))
}

fn parse_number<T: FromStr>(attribute: &'static str, value: &str) -> Result<T> {
    value.parse().map_err(|_| BackupError::MalformedRecord {
        attribute,
        value: value.to_string(),
    })
}

/// The writer emits `null` for absent optional text
fn optional_text(value: &str) -> Option<String> {
    (value != NULL).then(|| value.to_string())
}

/// Count `<sms>` records without building items
pub fn count_items<R: BufRead>(reader: R) -> Result<u64> {
    let mut reader = Reader::from_reader(reader);
    let mut buf = Vec::new();
    let mut count = 0u64;

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) => {
                if e.name().as_ref().eq_ignore_ascii_case(SMS_TAG) && e.attributes().next().is_some() {
                    count += 1;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\" ?>\n\
                          <!-- File Created By Signal -->\n";

    fn reader(body: &str) -> XmlBackupReader<Cursor<Vec<u8>>> {
        XmlBackupReader::new(Cursor::new(format!("{}{}", HEADER, body).into_bytes()))
    }

    #[test]
    fn test_read_items() {
        let mut reader = reader(
            r#"<smses count="2">
 <sms protocol="0" address="+15551234567" date="1406695762000" type="1" subject="null" body="Hello &lt;world&gt; &amp; &quot;friends&quot;" toa="null" sc_toa="null" service_center="+3161000000" read="1" status="-1" locked="0" />
 <SMS address="5556" date="-5" type="2" body="&#128512;&#13;&#10;" subject="Re: hi"></SMS>
</smses>"#,
        );

        let first = reader.next_item().unwrap().unwrap();
        assert_eq!(first.protocol, 0);
        assert_eq!(first.address, "+15551234567");
        assert_eq!(first.date, 1406695762000);
        assert_eq!(first.kind, 1);
        assert_eq!(first.subject, None);
        assert_eq!(first.body, "Hello <world> & \"friends\"");
        assert_eq!(first.service_center.as_deref(), Some("+3161000000"));
        assert_eq!(first.read, 1);
        assert_eq!(first.status, -1);

        let second = reader.next_item().unwrap().unwrap();
        assert_eq!(second.address, "5556");
        assert_eq!(second.date, -5);
        assert_eq!(second.body, "😀\r\n");
        assert_eq!(second.subject.as_deref(), Some("Re: hi"));
        assert_eq!(second.service_center, None);

        assert!(reader.next_item().unwrap().is_none());
        assert_eq!(reader.items_read(), 2);
    }

    #[test]
    fn test_skips_empty_sms_and_mms() {
        let mut reader = reader(
            r#"<smses count="3">
 <sms/>
 <sms></sms>
 <mms date="1" address="x"><part seq="0" text="hi" /></mms>
 <sms body="after" />
</smses>"#,
        );

        let item = reader.next_item().unwrap().unwrap();
        assert_eq!(item.body, "after");
        assert!(reader.next_item().unwrap().is_none());
    }

    #[test]
    fn test_exhausted_reader_keeps_returning_none() {
        let mut reader = reader(r#"<smses count="0"></smses>"#);

        for _ in 0..3 {
            assert!(reader.next_item().unwrap().is_none());
        }
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_unknown_attributes_are_ignored() {
        let mut reader = reader(r#"<smses><sms body="x" readable_date="today" contact_name="Bob" /></smses>"#);

        let item = reader.next_item().unwrap().unwrap();
        assert_eq!(item.body, "x");
    }

    #[test]
    fn test_malformed_number_is_fatal() {
        let mut reader = reader(
            r#"<smses><sms date="yesterday" body="x" /><sms body="y" /></smses>"#,
        );

        match reader.next_item() {
            Err(BackupError::MalformedRecord { attribute, value }) => {
                assert_eq!(attribute, "date");
                assert_eq!(value, "yesterday");
            }
            other => panic!("expected malformed record, got {:?}", other),
        }
        assert!(reader.next_item().unwrap().is_none());
    }

    #[test]
    fn test_out_of_range_integer_is_malformed() {
        let mut reader = reader(r#"<smses><sms type="4294967296" /></smses>"#);
        assert!(matches!(
            reader.next_item(),
            Err(BackupError::MalformedRecord { attribute: "type", .. })
        ));
    }

    #[test]
    fn test_syntax_error() {
        let mut reader = reader(r#"<smses><sms body="x"></mms></smses>"#);

        let first = reader.next_item().unwrap();
        assert!(first.is_some());
        assert!(matches!(reader.next_item(), Err(BackupError::Syntax(_))));
    }

    #[test]
    fn test_iterator() {
        let reader = reader(r#"<smses><sms body="a" /><sms body="b" /><sms body="c" /></smses>"#);

        let bodies: Vec<String> = reader.map(|item| item.unwrap().body).collect();
        assert_eq!(bodies, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_count_items() {
        let xml = format!(
            "{}{}",
            HEADER,
            r#"<smses count="9"><sms body="a" /><sms /><mms date="1"></mms><sms body="b"></sms></smses>"#
        );
        assert_eq!(count_items(Cursor::new(xml.into_bytes())).unwrap(), 2);
    }
}
