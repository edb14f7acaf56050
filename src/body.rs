//! MIME tree walk: body text, HTML and attachments

use crate::error::Result;
use crate::mime::{ContentType, DispositionKind, MimePart};
use crate::store::FileStore;
use crate::warning::{WarningTag, Warnings};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// An attachment or inline file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct File {
    /// Content-ID, used by HTML bodies to reference inline resources
    pub content_id: Option<String>,

    /// Declared filename, or a synthesized one
    pub filename: Option<String>,

    /// Size of the decoded content in bytes
    pub size: usize,

    pub content_type: String,

    pub is_inline: bool,

    /// Reference returned by the file store
    pub data: String,
}

/// Everything collected from the body of one message
#[derive(Debug, Clone, Default)]
pub struct BodyParts {
    pub text: Option<String>,
    pub html: Option<String>,
    pub files: Vec<File>,

    /// At least one part could not be decoded or classified
    pub has_error: bool,
}

impl BodyParts {
    fn push_text(&mut self, fragment: &str) {
        match &mut self.text {
            Some(text) => {
                text.push('\n');
                text.push_str(fragment);
            }
            None => self.text = Some(fragment.to_string()),
        }
    }

    fn push_html(&mut self, fragment: &str) {
        self.html
            .get_or_insert_with(String::new)
            .push_str(fragment);
    }
}

/// How a leaf part is treated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartKind {
    Html,
    Text,
    Attachment { is_inline: bool },
    /// Unrecognized disposition token
    BadDisposition(String),
}

/// Classify a leaf from its disposition, content type and identifiers.
///
/// The inline rule is a heuristic: an inline text part with neither a
/// filename nor a content-id is taken as body text, any other inline part
/// is an inline file.
#[must_use]
pub fn classify(
    disposition: Option<&DispositionKind>,
    content_type: &ContentType,
    has_filename: bool,
    has_content_id: bool,
) -> PartKind {
    let is_inline = match disposition {
        None => false,
        Some(DispositionKind::Inline) => true,
        Some(DispositionKind::Attachment) => return PartKind::Attachment { is_inline: false },
        Some(DispositionKind::Other(token)) => return PartKind::BadDisposition(token.clone()),
    };

    let looks_like_body = content_type.is_text() && !has_filename && !has_content_id;
    if is_inline && !looks_like_body {
        return PartKind::Attachment { is_inline: true };
    }

    if content_type.is_text() {
        match content_type.mimetype.as_str() {
            "text/html" => PartKind::Html,
            "text/plain" => PartKind::Text,
            _ => PartKind::Attachment { is_inline },
        }
    } else {
        PartKind::Attachment { is_inline }
    }
}

/// Rewrite CRLF and lone CR line endings to LF
#[must_use]
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// File extension, with its dot, for common content types
#[must_use]
pub fn guess_extension(mimetype: &str) -> &'static str {
    match mimetype {
        "text/plain" => ".txt",
        "text/html" => ".html",
        "text/css" => ".css",
        "text/csv" => ".csv",
        "text/calendar" => ".ics",
        "text/xml" | "application/xml" => ".xml",
        "text/vcard" | "text/x-vcard" => ".vcf",
        "image/png" => ".png",
        "image/jpeg" | "image/jpg" | "image/pjpeg" => ".jpg",
        "image/gif" => ".gif",
        "image/bmp" => ".bmp",
        "image/webp" => ".webp",
        "image/svg+xml" => ".svg",
        "image/tiff" => ".tiff",
        "audio/mpeg" => ".mp3",
        "audio/wav" | "audio/x-wav" => ".wav",
        "video/mp4" => ".mp4",
        "video/mpeg" => ".mpeg",
        "application/pdf" => ".pdf",
        "application/zip" => ".zip",
        "application/gzip" | "application/x-gzip" => ".gz",
        "application/json" => ".json",
        "application/msword" => ".doc",
        "application/vnd.ms-excel" => ".xls",
        "application/vnd.ms-powerpoint" => ".ppt",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => ".docx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => ".xlsx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation" => ".pptx",
        "application/rtf" => ".rtf",
        "application/octet-stream" => ".bin",
        "message/rfc822" => ".eml",
        _ => "",
    }
}

/// Depth-first walk over a part tree, feeding attachments to a file store
pub struct BodyWalker<'s> {
    store: &'s dyn FileStore,
}

impl<'s> BodyWalker<'s> {
    #[must_use]
    pub fn new(store: &'s dyn FileStore) -> Self {
        Self { store }
    }

    /// Walk every leaf under `root`.
    ///
    /// Per-part problems are recorded in `warnings` and flagged on the
    /// result; only a file-store failure is returned as an error.
    pub fn walk<P: MimePart>(&self, root: &P, warnings: &mut Warnings) -> Result<BodyParts> {
        let mut body = BodyParts::default();
        let mut stack = vec![root];
        let mut index = 0_usize;

        while let Some(part) = stack.pop() {
            if part.is_multipart() {
                stack.extend(part.children().iter().rev());
                continue;
            }
            self.visit(part, index, &mut body, warnings)?;
            index += 1;
        }

        Ok(body)
    }

    fn visit<P: MimePart>(
        &self,
        part: &P,
        index: usize,
        body: &mut BodyParts,
        warnings: &mut Warnings,
    ) -> Result<()> {
        let content_type = part.content_type();
        let disposition = part.disposition();
        let filename = part.filename();
        let content_id = part.content_id();

        let kind = classify(
            disposition.as_ref().map(|d| &d.kind),
            &content_type,
            filename.is_some(),
            content_id.is_some(),
        );
        debug!(index, content_type = %content_type.mimetype, ?kind, "Classified part");

        match kind {
            PartKind::BadDisposition(token) => {
                warnings.part(WarningTag::BadContentDisposition, &token);
                body.has_error = true;
            }
            PartKind::Html => append_body(part, body, warnings, BodyParts::push_html),
            PartKind::Text => append_body(part, body, warnings, BodyParts::push_text),
            PartKind::Attachment { is_inline } => match part.body_bytes() {
                Ok(bytes) => {
                    let filename = filename
                        .unwrap_or_else(|| synthesize_filename(index, &bytes, &content_type));
                    let data = self.store.store(&bytes)?;
                    body.files.push(File {
                        content_id,
                        filename: Some(filename),
                        size: bytes.len(),
                        content_type: content_type.mimetype,
                        is_inline,
                        data,
                    });
                }
                Err(e) => {
                    warnings.part(WarningTag::PartDecodeFailed, &e.to_string());
                    body.has_error = true;
                }
            },
        }

        Ok(())
    }
}

fn append_body<P: MimePart>(
    part: &P,
    body: &mut BodyParts,
    warnings: &mut Warnings,
    push: fn(&mut BodyParts, &str),
) {
    match part.body_text() {
        Ok(text) => push(body, &normalize_newlines(&text)),
        Err(e) => {
            warnings.part(WarningTag::PartDecodeFailed, &e.to_string());
            body.has_error = true;
        }
    }
}

/// Unique name for an attachment that declared none.
///
/// Derived from the part position and content so decoding the same
/// message twice yields the same name.
fn synthesize_filename(index: usize, bytes: &[u8], content_type: &ContentType) -> String {
    let mut seed = index.to_be_bytes().to_vec();
    seed.extend_from_slice(bytes);
    let id = Uuid::new_v5(&Uuid::NAMESPACE_OID, &seed);
    format!("{id}{}", guess_extension(&content_type.mimetype))
}
