//! Turns raw string headers into typed headers

use crate::address::resolve_addresses;
use crate::date::parse_date;
use crate::headers::{ADDR_HEADERS, DATE_HEADERS, HeaderStore};
use crate::mime::ContentType;
use crate::warning::{WarningTag, Warnings};

/// Build a header store of raw string values from wire-order pairs
pub fn raw_header_store<I, K, V>(pairs: I) -> HeaderStore
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut store = HeaderStore::new();
    for (name, value) in pairs {
        let value: String = value.into();
        store.add(name.as_ref(), value);
    }
    store
}

fn is_category(table: &[&str], name: &str) -> bool {
    table.iter().any(|h| *h == name)
}

/// Produce the typed header store from a raw one.
///
/// Address headers become one entry per valid address, date headers keep
/// the first value that parses, Content-Type is structured, and everything
/// else is copied through as text.
pub fn normalize_headers(raw: &HeaderStore, warnings: &mut Warnings) -> HeaderStore {
    let mut headers = HeaderStore::new();

    for hname in ADDR_HEADERS {
        let Some(entries) = raw.get_all(hname) else {
            continue;
        };
        let values = entries.iter().filter_map(|e| e.value.as_text());
        for addr in resolve_addresses(hname, values, warnings) {
            headers.add(hname, addr);
        }
    }

    for hname in DATE_HEADERS {
        for value in raw.values(hname).filter_map(|v| v.as_text()) {
            match parse_date(value) {
                Ok(date) => {
                    headers.add_single(hname, date);
                    break;
                }
                Err(_) => warnings.header(WarningTag::InvalidDateHeader, hname, value),
            }
        }
    }

    for (hname, entries) in raw.iter() {
        if is_category(ADDR_HEADERS, hname) || is_category(DATE_HEADERS, hname) {
            continue;
        }
        for entry in entries {
            let Some(text) = entry.value.as_text() else {
                headers.push(entry.clone());
                continue;
            };
            match hname {
                "Content-Type" => headers.add(&entry.raw_name, ContentType::parse(text)),
                "MIME-Version" => {
                    if !is_mime_version_1_0(text) {
                        warnings.header(WarningTag::UnexpectedMimeVersion, hname, text);
                    }
                    headers.add(&entry.raw_name, text);
                }
                _ => headers.add(&entry.raw_name, text),
            }
        }
    }

    // From is a single logical sender even when the wire carries a list
    headers.mark_single("From");

    headers
}

/// Whether a MIME-Version value is 1.0, ignoring comments and whitespace
fn is_mime_version_1_0(value: &str) -> bool {
    let mut version = String::new();
    let mut depth = 0_usize;
    for c in value.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if depth == 0 && !c.is_whitespace() => version.push(c),
            _ => {}
        }
    }
    version == "1.0"
}
