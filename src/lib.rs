// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Email Decoder
//!
//! Normalizes a decoded MIME part tree into one flat, typed [`Message`]
//! record ready for serialization.
//!
//! # Features
//!
//! - Header store with canonical names and single/multi-value semantics
//! - Address headers parsed, validated, de-duplicated and sorted
//! - Message date with a Received-header fallback
//! - Thread references merged from In-Reply-To and References
//! - Body text, HTML and attachments split out of the MIME tree
//! - JSON and `MessagePack` projections
//!
//! # Example
//!
//! ```rust
//! use email_decoder::{DiscardStore, parse_message};
//!
//! let raw = b"From: Ann <ann@example.com>\r\nSubject: Hello\r\n\r\nBody";
//! let message = parse_message(raw, &DiscardStore).unwrap();
//!
//! assert_eq!(message.subject, "Hello");
//! assert_eq!(message.from_addr.unwrap().email, "ann@example.com");
//! assert_eq!(message.body_text.as_deref(), Some("Body"));
//! ```

mod address;
mod body;
mod date;
mod error;
mod headers;
mod mime;
mod normalizer;
pub mod output;
mod parser;
mod references;
mod store;
mod types;
mod warning;

pub use address::{
    Address, is_valid_addr_spec, parse_address_value, parse_address_values, resolve_addresses,
};
pub use body::{
    BodyParts, BodyWalker, File, PartKind, classify, guess_extension, normalize_newlines,
};
pub use date::{format_timestamp, parse_date, received_date_part, resolve_message_date};
pub use error::{DecodeError, Result};
pub use headers::{
    ADDR_HEADERS, DATE_HEADERS, HeaderEntry, HeaderStore, HeaderValue, KNOWN_HEADERS,
    SINGLE_HEADERS, canonical_name,
};
pub use mime::{
    ContentType, Disposition, DispositionKind, MimePart, decode_encoded_words, parse_raw,
};
pub use normalizer::{normalize_headers, raw_header_store};
pub use parser::{MessageBuilder, parse_message};
pub use references::{normalize_message_id, references_from_headers, resolve_references};
pub use store::{DirStore, DiscardStore, FileStore, MemoryStore};
pub use types::Message;
pub use warning::{Warning, WarningTag, Warnings};
