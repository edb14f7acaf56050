//! The normalized message record

use crate::address::Address;
use crate::body::File;
use crate::date::{serialize_optional_timestamp, serialize_timestamp};
use crate::headers::HeaderStore;
use crate::warning::Warning;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A decoded message, flattened into typed fields
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    /// Email subject
    pub subject: String,

    /// Message-ID header as sent
    pub message_id: String,

    /// Message-ids this message replies to or references, parent first
    pub references: Vec<String>,

    /// First valid From address. Every From address stays in `headers`.
    pub from_addr: Option<Address>,

    pub to_addrs: Option<Vec<Address>>,

    pub cc_addrs: Option<Vec<Address>>,

    /// BCC recipients. Incoming mail normally carries none.
    pub bcc_addrs: Option<Vec<Address>>,

    pub reply_to_addr: Option<Address>,

    /// When this record was built, not anything the message claims
    #[serde(rename = "date", serialize_with = "serialize_timestamp")]
    pub received_at: DateTime<Utc>,

    /// Date the message claims for itself (may be spoofed)
    #[serde(serialize_with = "serialize_optional_timestamp")]
    pub message_date: Option<DateTime<Utc>>,

    pub body_html: Option<String>,

    pub body_text: Option<String>,

    /// Headers parsed into addresses, dates and content types where it makes sense
    pub headers: HeaderStore,

    /// Headers with their raw string values
    pub raw_headers: HeaderStore,

    /// Attachments and inline files
    pub files: Vec<File>,

    /// Recoverable problems met while decoding
    #[serde(skip)]
    pub warnings: Vec<Warning>,

    /// Set when at least one body part could not be decoded or classified
    #[serde(skip)]
    pub body_error: bool,
}

impl Message {
    #[must_use]
    pub fn has_attachments(&self) -> bool {
        self.files.iter().any(|f| !f.is_inline)
    }
}
