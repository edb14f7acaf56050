//! Ordered, name-normalized header collection

use crate::address::Address;
use crate::date;
use crate::mime::ContentType;
use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Well-known headers in their canonical spelling
pub const KNOWN_HEADERS: &[&str] = &[
    "Autoforwarded",
    "BCC",
    "CC",
    "Content-Disposition",
    "Content-ID",
    "Content-Language",
    "Content-Length",
    "Content-Transfer-Encoding",
    "Content-Type",
    "Date",
    "Delivered-To",
    "Delivery-Date",
    "Distribution",
    "Encoding",
    "Envelope-ID",
    "From",
    "Importance",
    "In-Reply-To",
    "Language",
    "List-ID",
    "Mailer",
    "Mailing-List",
    "Message-ID",
    "Original-Recipient",
    "Path",
    "Priority",
    "Received",
    "References",
    "Reply-To",
    "Return-Path",
    "Sender",
    "Subject",
    "To",
    "User-Agent",
    "MIME-Version",
];

/// Headers whose values are address lists
pub const ADDR_HEADERS: &[&str] = &[
    "BCC",
    "CC",
    "Delivered-To",
    "From",
    "Original-Recipient",
    "Reply-To",
    "Return-Path",
    "Sender",
    "To",
];

/// Headers whose values are dates
pub const DATE_HEADERS: &[&str] = &["Date", "Delivery-Date"];

/// Headers that only ever keep their first value
pub const SINGLE_HEADERS: &[&str] = &[
    "Message-ID",
    "In-Reply-To",
    "Accept-Language",
    "Content-Language",
    "MIME-Version",
    "Thread-Topic",
    "Thread-Index",
    "Subject",
];

/// Map any header name to its bucket key.
///
/// Known headers get their canonical spelling, everything else is lowercased.
#[must_use]
pub fn canonical_name(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    KNOWN_HEADERS
        .iter()
        .find(|known| known.eq_ignore_ascii_case(&lower))
        .map_or(lower, |known| (*known).to_string())
}

fn is_single_header(canonical: &str) -> bool {
    SINGLE_HEADERS
        .iter()
        .any(|h| h.eq_ignore_ascii_case(canonical))
}

/// Typed value of a header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    Text(String),
    Address(Address),
    Date(DateTime<Utc>),
    ContentType(ContentType),
}

impl HeaderValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_address(&self) -> Option<&Address> {
        match self {
            Self::Address(a) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_content_type(&self) -> Option<&ContentType> {
        match self {
            Self::ContentType(ct) => Some(ct),
            _ => None,
        }
    }
}

impl From<String> for HeaderValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for HeaderValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Address> for HeaderValue {
    fn from(a: Address) -> Self {
        Self::Address(a)
    }
}

impl From<DateTime<Utc>> for HeaderValue {
    fn from(d: DateTime<Utc>) -> Self {
        Self::Date(d)
    }
}

impl From<ContentType> for HeaderValue {
    fn from(ct: ContentType) -> Self {
        Self::ContentType(ct)
    }
}

impl Serialize for HeaderValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Address(a) => a.serialize(serializer),
            Self::Date(d) => serializer.serialize_str(&date::format_timestamp(d)),
            Self::ContentType(ct) => ct.serialize(serializer),
        }
    }
}

/// One occurrence of a header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry {
    /// Name exactly as it appeared on the wire
    pub raw_name: String,

    /// Bucket key derived from `raw_name`
    pub name: String,

    pub value: HeaderValue,

    /// Only the first value of a single-valued header is projected
    pub is_single: bool,
}

impl HeaderEntry {
    pub fn new(raw_name: &str, value: impl Into<HeaderValue>) -> Self {
        let name = canonical_name(raw_name);
        let is_single = is_single_header(&name);
        Self {
            raw_name: raw_name.to_string(),
            name,
            value: value.into(),
            is_single,
        }
    }
}

/// Multimap of headers keyed by canonical name, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderStore {
    buckets: Vec<(String, Vec<HeaderEntry>)>,
}

impl HeaderStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buckets: Vec::new(),
        }
    }

    /// Append a value under the normalized form of `name`
    pub fn add(&mut self, name: &str, value: impl Into<HeaderValue>) {
        self.push(HeaderEntry::new(name, value));
    }

    /// Append a value and mark it single-valued regardless of the header tables
    pub fn add_single(&mut self, name: &str, value: impl Into<HeaderValue>) {
        let mut entry = HeaderEntry::new(name, value);
        entry.is_single = true;
        self.push(entry);
    }

    pub fn push(&mut self, entry: HeaderEntry) {
        if let Some((_, entries)) = self.buckets.iter_mut().find(|(k, _)| *k == entry.name) {
            entries.push(entry);
        } else {
            self.buckets.push((entry.name.clone(), vec![entry]));
        }
    }

    /// All entries for a header, in the order they were added
    #[must_use]
    pub fn get_all(&self, name: &str) -> Option<&[HeaderEntry]> {
        let key = canonical_name(name);
        self.buckets
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, entries)| entries.as_slice())
    }

    /// The earliest entry for a header
    #[must_use]
    pub fn get_first(&self, name: &str) -> Option<&HeaderEntry> {
        self.get_all(name).and_then(<[HeaderEntry]>::first)
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.get_all(name).is_some()
    }

    /// All values for a header, empty if absent
    pub fn values(&self, name: &str) -> impl Iterator<Item = &HeaderValue> {
        self.get_all(name)
            .unwrap_or_default()
            .iter()
            .map(|e| &e.value)
    }

    /// Text of the first entry, when it holds plain text
    #[must_use]
    pub fn first_text(&self, name: &str) -> Option<&str> {
        self.get_first(name).and_then(|e| e.value.as_text())
    }

    /// Force every entry of a header to be single-valued
    pub fn mark_single(&mut self, name: &str) {
        let key = canonical_name(name);
        if let Some((_, entries)) = self.buckets.iter_mut().find(|(k, _)| *k == key) {
            for entry in entries {
                entry.is_single = true;
            }
        }
    }

    /// Bucket keys in first-seen order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[HeaderEntry])> {
        self.buckets
            .iter()
            .map(|(k, entries)| (k.as_str(), entries.as_slice()))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

struct EntryValues<'a>(&'a [HeaderEntry]);

impl Serialize for EntryValues<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|e| &e.value))
    }
}

impl Serialize for HeaderStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for (name, entries) in &self.buckets {
            match entries.first() {
                Some(first) if first.is_single => map.serialize_entry(name, &first.value)?,
                _ => map.serialize_entry(name, &EntryValues(entries))?,
            }
        }
        map.end()
    }
}
