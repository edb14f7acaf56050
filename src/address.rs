//! Address header parsing and validation

use crate::mime::decode_encoded_words;
use crate::warning::{WarningTag, Warnings};
use mailparse::{MailAddr, SingleInfo};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// RFC 5322 addr-spec: dot-atom or quoted local part, dot-atom or literal domain
static ADDR_SPEC_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(
        r##"^(?:[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*|"(?:[^"\\\r\n]|\\.)*")@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*|\[[^\[\]\\\r\n]*\])$"##,
    )
    .unwrap()
});

/// Email address with optional display name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Address {
    /// Display name (e.g., "John Doe")
    pub name: Option<String>,

    /// Address spec (e.g., "john@example.com")
    pub email: String,
}

impl Address {
    pub fn new(name: Option<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.filter(|n| !n.is_empty()),
            email: email.into(),
        }
    }

    /// Whether the email is a syntactically valid addr-spec.
    ///
    /// The display name plays no part in validity.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_valid_addr_spec(&self.email)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.email),
            None => write!(f, "{}", self.email),
        }
    }
}

#[must_use]
pub fn is_valid_addr_spec(email: &str) -> bool {
    ADDR_SPEC_REGEX.is_match(email)
}

/// Parse one address-header value into sorted, unique `(name, email)` pairs.
///
/// Encoded words in both halves are decoded. A missing display name is the
/// empty string.
#[must_use]
pub fn parse_address_value(value: &str) -> Vec<(String, String)> {
    let mut pairs = BTreeSet::new();
    collect_pairs(value, &mut pairs);
    pairs.into_iter().collect()
}

/// Parse several values of the same header into one sorted, unique list
pub fn parse_address_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<(String, String)> {
    let mut pairs = BTreeSet::new();
    for value in values {
        collect_pairs(value, &mut pairs);
    }
    pairs.into_iter().collect()
}

/// Resolve every value of an address header into valid addresses.
///
/// A value the address-list grammar rejects as a whole is reported once
/// under `hname`, then salvaged entry by entry. Invalid entries are dropped
/// and reported too.
pub fn resolve_addresses<'a>(
    hname: &str,
    values: impl IntoIterator<Item = &'a str>,
    warnings: &mut Warnings,
) -> Vec<Address> {
    let mut pairs = BTreeSet::new();
    for value in values {
        if !collect_pairs(value, &mut pairs) {
            warnings.header(WarningTag::UnparseableAddressHeader, hname, value);
        }
    }

    pairs
        .into_iter()
        .filter_map(|(name, email)| {
            let addr = Address::new(Some(name), email);
            if addr.is_valid() {
                Some(addr)
            } else {
                warnings.header(WarningTag::InvalidEmailAddress, hname, &addr.email);
                None
            }
        })
        .collect()
}

/// Returns false when the value had to be salvaged piece by piece
fn collect_pairs(value: &str, pairs: &mut BTreeSet<(String, String)>) -> bool {
    if value.trim().is_empty() {
        return true;
    }

    if let Ok(list) = mailparse::addrparse(value) {
        for addr in list.iter() {
            insert_mail_addr(addr, pairs);
        }
        return true;
    }

    // Salvage what we can one mailbox at a time
    for piece in split_address_list(value) {
        match mailparse::addrparse(piece) {
            Ok(list) => {
                for addr in list.iter() {
                    insert_mail_addr(addr, pairs);
                }
            }
            Err(_) => {
                pairs.insert((String::new(), decode_encoded_words(piece.trim())));
            }
        }
    }
    false
}

fn insert_mail_addr(addr: &MailAddr, pairs: &mut BTreeSet<(String, String)>) {
    match addr {
        MailAddr::Single(info) => insert_single(info, pairs),
        MailAddr::Group(group) => {
            for info in &group.addrs {
                insert_single(info, pairs);
            }
        }
    }
}

fn insert_single(info: &SingleInfo, pairs: &mut BTreeSet<(String, String)>) {
    let name = info
        .display_name
        .as_deref()
        .map(|n| decode_encoded_words(n.trim()))
        .unwrap_or_default();
    let email = decode_encoded_words(info.addr.trim());
    pairs.insert((name, email));
}

/// Split an address list on commas that are not quoted, bracketed or commented
fn split_address_list(value: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;
    let mut angle_depth = 0_usize;
    let mut comment_depth = 0_usize;

    for (i, c) in value.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            '<' if !in_quotes => angle_depth += 1,
            '>' if !in_quotes => angle_depth = angle_depth.saturating_sub(1),
            '(' if !in_quotes => comment_depth += 1,
            ')' if !in_quotes => comment_depth = comment_depth.saturating_sub(1),
            ',' if !in_quotes && angle_depth == 0 && comment_depth == 0 => {
                pieces.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push(&value[start..]);

    pieces
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect()
}
