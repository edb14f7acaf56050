//! Read-only view of the MIME part tree produced by the MIME engine

use crate::error::{DecodeError, Result};
use crate::headers::{ADDR_HEADERS, canonical_name};
use mailparse::{MailHeaderMap, ParsedMail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structured Content-Type value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentType {
    /// Full lowercase type, e.g. "text/plain"
    #[serde(rename = "content_type")]
    pub mimetype: String,

    #[serde(rename = "main_type")]
    pub main: String,

    #[serde(rename = "sub_type")]
    pub sub: String,

    pub params: BTreeMap<String, String>,
}

impl ContentType {
    /// Parse a Content-Type header value
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let parsed = mailparse::parse_content_type(value);
        Self::from_parts(&parsed.mimetype, parsed.params.into_iter().collect())
    }

    fn from_parts(mimetype: &str, params: BTreeMap<String, String>) -> Self {
        let mimetype = mimetype.trim().to_lowercase();
        let (main, sub) = mimetype
            .split_once('/')
            .map_or_else(|| (mimetype.clone(), String::new()), |(m, s)| {
                (m.to_string(), s.to_string())
            });
        Self {
            mimetype,
            main,
            sub,
            params,
        }
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        self.main == "text"
    }
}

/// Primary token of a Content-Disposition header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispositionKind {
    Inline,
    Attachment,
    /// Any other token, lowercased
    Other(String),
}

impl DispositionKind {
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_lowercase().as_str() {
            "inline" => Self::Inline,
            "attachment" => Self::Attachment,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Parsed Content-Disposition header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disposition {
    pub kind: DispositionKind,
    pub params: BTreeMap<String, String>,
}

/// A node of the decoded part tree.
///
/// Implemented for `mailparse::ParsedMail`; anything else that can expose
/// these accessors can be walked the same way.
pub trait MimePart {
    /// Whether this node is a multipart container
    fn is_multipart(&self) -> bool;

    /// Direct sub-parts, in order
    fn children(&self) -> &[Self]
    where
        Self: Sized;

    /// Header name/value pairs in wire order, unfolded.
    ///
    /// Encoded words are decoded except in address headers, where they must
    /// survive until the address list has been split.
    fn headers(&self) -> Vec<(String, String)>;

    fn subject(&self) -> Option<String>;

    fn content_type(&self) -> ContentType;

    /// `None` when the part has no Content-Disposition header or its token
    /// is empty
    fn disposition(&self) -> Option<Disposition>;

    fn filename(&self) -> Option<String>;

    /// Content-ID without angle brackets
    fn content_id(&self) -> Option<String>;

    /// Transfer-decoded body bytes
    fn body_bytes(&self) -> Result<Vec<u8>>;

    /// Transfer- and charset-decoded body text
    fn body_text(&self) -> Result<String>;
}

impl MimePart for ParsedMail<'_> {
    fn is_multipart(&self) -> bool {
        !self.subparts.is_empty() || self.ctype.mimetype.to_lowercase().starts_with("multipart/")
    }

    fn children(&self) -> &[Self] {
        &self.subparts
    }

    fn headers(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .map(|h| {
                let key = h.get_key();
                let value = if is_address_header(&key) {
                    unfold(h.get_value_raw())
                } else {
                    h.get_value()
                };
                (key, value)
            })
            .collect()
    }

    fn subject(&self) -> Option<String> {
        self.headers.get_first_value("Subject")
    }

    fn content_type(&self) -> ContentType {
        ContentType::from_parts(
            &self.ctype.mimetype,
            self.ctype
                .params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    fn disposition(&self) -> Option<Disposition> {
        let value = self.headers.get_first_value("Content-Disposition")?;
        let token = value.split(';').next().unwrap_or_default().trim();
        if token.is_empty() {
            return None;
        }
        let params = self
            .get_content_disposition()
            .params
            .into_iter()
            .collect();
        Some(Disposition {
            kind: DispositionKind::from_token(token),
            params,
        })
    }

    fn filename(&self) -> Option<String> {
        self.get_content_disposition()
            .params
            .get("filename")
            .cloned()
            .or_else(|| self.ctype.params.get("name").cloned())
            .map(|name| decode_encoded_words(name.trim()))
            .filter(|name| !name.is_empty())
    }

    fn content_id(&self) -> Option<String> {
        self.headers
            .get_first_value("Content-ID")
            .map(|id| strip_angle_brackets(&id).to_string())
            .filter(|id| !id.is_empty())
    }

    fn body_bytes(&self) -> Result<Vec<u8>> {
        self.get_body_raw()
            .map_err(|e| DecodeError::Decode(e.to_string()))
    }

    fn body_text(&self) -> Result<String> {
        self.get_body()
            .map_err(|e| DecodeError::Decode(e.to_string()))
    }
}

fn is_address_header(name: &str) -> bool {
    ADDR_HEADERS.contains(&canonical_name(name).as_str())
}

/// Join folded lines of a raw header value, leaving encoded words alone
fn unfold(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    let mut out = String::with_capacity(text.len());
    for line in text.split('\n') {
        out.push_str(line.strip_suffix('\r').unwrap_or(line));
    }
    out.trim().to_string()
}

/// Parse raw message bytes with the MIME engine
pub fn parse_raw(raw: &[u8]) -> Result<ParsedMail<'_>> {
    mailparse::parse_mail(raw).map_err(|e| DecodeError::Structure(e.to_string()))
}

/// Decode RFC 2047 encoded words embedded in a header fragment
#[must_use]
pub fn decode_encoded_words(value: &str) -> String {
    if !value.contains("=?") {
        return value.to_string();
    }
    let line = format!("X-Decode: {value}");
    mailparse::parse_header(line.as_bytes())
        .map_or_else(|_| value.to_string(), |(header, _)| header.get_value())
}

fn strip_angle_brackets(value: &str) -> &str {
    value
        .trim()
        .trim_start_matches('<')
        .trim_end_matches('>')
        .trim()
}
