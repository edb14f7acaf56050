//! Thread reference reconstruction

use crate::headers::HeaderStore;
use std::collections::HashSet;

/// Strip the angle brackets from a message-id token
#[must_use]
pub fn normalize_message_id(token: &str) -> &str {
    token
        .trim()
        .trim_start_matches('<')
        .trim_end_matches('>')
        .trim()
}

/// Merge In-Reply-To and References values into unique ids, first-seen order.
///
/// In-Reply-To values are consumed first, so a parent id always leads even
/// when References lists it elsewhere.
pub fn resolve_references<'a>(
    in_reply_to: impl IntoIterator<Item = &'a str>,
    references: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for value in in_reply_to.into_iter().chain(references) {
        for token in value.split_whitespace() {
            let id = normalize_message_id(token);
            if !id.is_empty() && seen.insert(id.to_string()) {
                ids.push(id.to_string());
            }
        }
    }

    ids
}

/// Resolve references from the threading headers of a header store
#[must_use]
pub fn references_from_headers(headers: &HeaderStore) -> Vec<String> {
    resolve_references(
        headers.values("In-Reply-To").filter_map(|v| v.as_text()),
        headers.values("References").filter_map(|v| v.as_text()),
    )
}
