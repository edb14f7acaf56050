//! Message assembly from a decoded part tree

use crate::address::Address;
use crate::body::BodyWalker;
use crate::date::resolve_message_date;
use crate::error::Result;
use crate::headers::HeaderStore;
use crate::mime::{MimePart, parse_raw};
use crate::normalizer::{normalize_headers, raw_header_store};
use crate::references::references_from_headers;
use crate::store::FileStore;
use crate::types::Message;
use crate::warning::Warnings;
use chrono::{SubsecRound, Utc};
use tracing::debug;

/// Builds `Message` records, handing attachment bytes to a file store
pub struct MessageBuilder<'s> {
    store: &'s dyn FileStore,
}

impl<'s> MessageBuilder<'s> {
    #[must_use]
    pub fn new(store: &'s dyn FileStore) -> Self {
        Self { store }
    }

    /// Normalize a decoded part tree into a `Message`.
    ///
    /// Only a file-store failure makes this fail; everything else degrades
    /// to absent fields plus entries in `Message::warnings`.
    pub fn build<P: MimePart>(&self, root: &P) -> Result<Message> {
        let mut warnings = Warnings::new();

        let raw_headers = raw_header_store(root.headers());
        let headers = normalize_headers(&raw_headers, &mut warnings);

        let message_date = resolve_message_date(&headers, &raw_headers, &mut warnings);
        let references = references_from_headers(&headers);

        let body = BodyWalker::new(self.store).walk(root, &mut warnings)?;

        let message = Message {
            subject: root
                .subject()
                .or_else(|| headers.first_text("Subject").map(str::to_string))
                .unwrap_or_default(),
            message_id: headers
                .first_text("Message-ID")
                .map(|id| id.trim().to_string())
                .unwrap_or_default(),
            references,
            from_addr: first_address(&headers, "From"),
            to_addrs: address_list(&headers, "To"),
            cc_addrs: address_list(&headers, "CC"),
            bcc_addrs: address_list(&headers, "BCC"),
            reply_to_addr: first_address(&headers, "Reply-To"),
            received_at: Utc::now().trunc_subsecs(0),
            message_date,
            body_html: body.html,
            body_text: body.text,
            headers,
            raw_headers,
            files: body.files,
            warnings: warnings.into_vec(),
            body_error: body.has_error,
        };

        debug!(
            message_id = %message.message_id,
            files = message.files.len(),
            warnings = message.warnings.len(),
            "Built message"
        );

        Ok(message)
    }
}

fn first_address(headers: &HeaderStore, name: &str) -> Option<Address> {
    headers.values(name).find_map(|v| v.as_address()).cloned()
}

fn address_list(headers: &HeaderStore, name: &str) -> Option<Vec<Address>> {
    let addrs: Vec<Address> = headers
        .values(name)
        .filter_map(|v| v.as_address())
        .cloned()
        .collect();
    if addrs.is_empty() { None } else { Some(addrs) }
}

/// Parse raw message bytes and build a `Message`
pub fn parse_message(raw: &[u8], store: &dyn FileStore) -> Result<Message> {
    let parsed = parse_raw(raw)?;
    MessageBuilder::new(store).build(&parsed)
}
