//! Backup record types
//!
//! Data structures shared by the backup reader and writer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One SMS message as stored in a backup file
///
/// Text fields hold their natural, unescaped form. Escaping only happens when
/// the item is written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsItem {
    /// SMS protocol code
    pub protocol: i32,
    /// Sender or recipient phone number
    pub address: String,
    /// Epoch milliseconds
    pub date: i64,
    /// Message box (see [`MessageBox`])
    #[serde(rename = "type")]
    pub kind: i32,
    /// Optional subject line
    pub subject: Option<String>,
    /// Message text
    pub body: String,
    /// SMS service center address
    pub service_center: Option<String>,
    /// Read flag (0/1)
    pub read: i32,
    /// Delivery status code
    pub status: i32,
}

impl SmsItem {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        protocol: i32,
        address: impl Into<String>,
        date: i64,
        kind: i32,
        subject: Option<String>,
        body: impl Into<String>,
        service_center: Option<String>,
        read: i32,
        status: i32,
    ) -> Self {
        Self {
            protocol,
            address: address.into(),
            date,
            kind,
            subject,
            body: body.into(),
            service_center,
            read,
            status,
        }
    }

    pub fn message_box(&self) -> MessageBox {
        MessageBox::from(self.kind)
    }

    pub fn is_read(&self) -> bool {
        self.read != 0
    }

    /// Timestamp of the message, if `date` is within chrono's range
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.date)
    }
}

/// Message box codes used by the `type` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageBox {
    Inbox,
    Sent,
    Draft,
    Outbox,
    Failed,
    Queued,
    /// Any code the format does not name
    Other(i32),
}

impl From<i32> for MessageBox {
    fn from(code: i32) -> Self {
        match code {
            1 => MessageBox::Inbox,
            2 => MessageBox::Sent,
            3 => MessageBox::Draft,
            4 => MessageBox::Outbox,
            5 => MessageBox::Failed,
            6 => MessageBox::Queued,
            other => MessageBox::Other(other),
        }
    }
}

impl From<MessageBox> for i32 {
    fn from(message_box: MessageBox) -> Self {
        match message_box {
            MessageBox::Inbox => 1,
            MessageBox::Sent => 2,
            MessageBox::Draft => 3,
            MessageBox::Outbox => 4,
            MessageBox::Failed => 5,
            MessageBox::Queued => 6,
            MessageBox::Other(code) => code,
        }
    }
}

impl std::fmt::Display for MessageBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageBox::Inbox => write!(f, "Inbox"),
            MessageBox::Sent => write!(f, "Sent"),
            MessageBox::Draft => write!(f, "Draft"),
            MessageBox::Outbox => write!(f, "Outbox"),
            MessageBox::Failed => write!(f, "Failed"),
            MessageBox::Queued => write!(f, "Queued"),
            MessageBox::Other(code) => write!(f, "Box {}", code),
        }
    }
}

/// One MMS message to export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MmsRecord {
    /// Sent timestamp in epoch milliseconds
    pub date_sent: i64,
    /// Sender phone number
    pub address: String,
    /// Rendered message text
    pub display_body: String,
    /// Attachments in slide order
    pub attachments: Vec<MmsAttachment>,
}

/// An attachment of an [`MmsRecord`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MmsAttachment {
    /// MIME content type, e.g. `image/jpeg`
    pub content_type: String,
    /// Part URI locating the bytes in the attachment store
    pub data_uri: String,
}

impl MmsAttachment {
    pub fn new(content_type: impl Into<String>, data_uri: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            data_uri: data_uri.into(),
        }
    }
}
