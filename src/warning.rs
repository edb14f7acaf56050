//! Recoverable anomalies found while decoding

use std::fmt;
use tracing::warn;

/// Machine-readable tag attached to every recoverable anomaly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningTag {
    InvalidEmailAddress,
    UnparseableAddressHeader,
    InvalidDateHeader,
    UnexpectedMimeVersion,
    BadContentDisposition,
    PartDecodeFailed,
}

impl WarningTag {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidEmailAddress => "invalid_email_address",
            Self::UnparseableAddressHeader => "unparseable_address_header",
            Self::InvalidDateHeader => "invalid_date_header",
            Self::UnexpectedMimeVersion => "unexpected_mime_version",
            Self::BadContentDisposition => "bad_content_disposition",
            Self::PartDecodeFailed => "part_decode_failed",
        }
    }
}

impl fmt::Display for WarningTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recoverable anomaly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub tag: WarningTag,

    /// Header the value came from, if any
    pub header: Option<String>,

    /// The offending raw value
    pub value: String,
}

/// Collects warnings for one message and mirrors each one to the log
#[derive(Debug, Default)]
pub struct Warnings(Vec<Warning>);

impl Warnings {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Record a warning about a header value
    pub fn header(&mut self, tag: WarningTag, hname: &str, value: &str) {
        warn!(tag = %tag, hname, value, "Recoverable problem in {hname} header");
        self.0.push(Warning {
            tag,
            header: Some(hname.to_string()),
            value: value.to_string(),
        });
    }

    /// Record a warning about a body part
    pub fn part(&mut self, tag: WarningTag, value: &str) {
        warn!(tag = %tag, value, "Recoverable problem in body part");
        self.0.push(Warning {
            tag,
            header: None,
            value: value.to_string(),
        });
    }

    #[must_use]
    pub fn has(&self, tag: WarningTag) -> bool {
        self.0.iter().any(|w| w.tag == tag)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Warning> {
        self.0
    }
}
