//! Projections of a `Message` for downstream consumers

use crate::address::Address;
use crate::error::Result;
use crate::types::Message;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fmt::Write;

/// Pretty JSON with a four-space indent
pub fn to_json(message: &Message) -> Result<String> {
    let mut out = Vec::new();
    let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    message.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// `MessagePack` map encoding; keys match the JSON projection
pub fn to_msgpack(message: &Message) -> Result<Vec<u8>> {
    Ok(rmp_serde::to_vec_named(message)?)
}

fn join_addresses(addrs: &[Address]) -> String {
    addrs
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Human-readable rendering for terminals
#[must_use]
pub fn summary(message: &Message) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{:<10} {}", "Subject:", message.subject);
    let from = message
        .from_addr
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    let _ = writeln!(out, "{:<10} {from}", "From:");
    if let Some(to) = &message.to_addrs {
        let _ = writeln!(out, "{:<10} {}", "To:", join_addresses(to));
    }
    if let Some(cc) = &message.cc_addrs {
        let _ = writeln!(out, "{:<10} {}", "CC:", join_addresses(cc));
    }

    if let Some(html) = &message.body_html {
        let _ = write!(out, "\n{html}\n");
    }
    if message.body_html.is_some() && message.body_text.is_some() {
        let _ = write!(out, "\n{}\n", "-".repeat(78));
    }
    if let Some(text) = &message.body_text {
        let _ = write!(out, "\n{text}\n");
    }

    if !message.files.is_empty() {
        out.push_str("\nAttachments:\n");
        for file in &message.files {
            let _ = writeln!(
                out,
                "  * {} ({} bytes) -- {}",
                file.filename.as_deref().unwrap_or(""),
                file.size,
                file.content_type
            );
        }
    }

    out
}
