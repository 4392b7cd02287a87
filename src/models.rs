//! Request payload types: outgoing email, contacts, and attachments.

use std::collections::BTreeMap;
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use crate::{Error, Result};

/// Body of a `POST /emails` request.
///
/// The send operation serializes this verbatim; fields left as `None` are
/// omitted from the JSON entirely, never sent as `null`. At least one of
/// `text` and `html` must be set for the API to accept the request, which
/// the caller is responsible for.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmailPayload {
    /// Sender identity, e.g. `Name <addr@domain>`.
    pub from: String,
    /// One or more recipient addresses.
    pub to: Vec<String>,
    /// Subject line.
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    /// Extra message headers carried inside the payload, such as
    /// `Idempotency-Key` for send deduplication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
}

/// A name/value pair attached to a sent email for later filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

impl Tag {
    /// Parse a `name=value` flag string; anything without a `=` is
    /// rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        let (name, value) = raw.split_once('=')?;
        Some(Self {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}

/// Body of a `POST /audiences/{id}/contacts` request. Optional fields are
/// only serialized when the caller provided them.
#[derive(Debug, Clone, Serialize)]
pub struct NewContact {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsubscribed: Option<bool>,
}

/// A file attachment: base name plus base64-encoded content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub filename: String,
    /// Base64 (standard alphabet, padded) encoding of the file bytes.
    pub content: String,
}

impl Attachment {
    /// Read a local file and build its attachment descriptor.
    ///
    /// No size limit is applied here; oversized attachments are rejected
    /// by the API at send time.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| Error::File {
            path: path.to_path_buf(),
            source,
        })?;

        let filename = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |name| {
                name.to_string_lossy().into_owned()
            });

        Ok(Self {
            filename,
            content: STANDARD.encode(bytes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn attachment_encodes_file_bytes_with_base_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.txt");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"hello world")
            .unwrap();

        let attachment = Attachment::from_file(&path).unwrap();
        assert_eq!(attachment.filename, "test.txt");
        assert_eq!(attachment.content, "aGVsbG8gd29ybGQ=");
    }

    #[test]
    fn attachment_missing_file_is_a_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Attachment::from_file(dir.path().join("absent.bin")).unwrap_err();
        assert!(matches!(err, Error::File { .. }));
    }

    #[test]
    fn payload_omits_unset_fields() {
        let payload = EmailPayload {
            from: "a@b.com".into(),
            to: vec!["x@y.com".into()],
            subject: "Hi".into(),
            text: Some("Hello".into()),
            ..Default::default()
        };

        let json = serde_json::to_value(&payload).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(
            object.keys().map(String::as_str).collect::<Vec<_>>(),
            ["from", "subject", "text", "to"]
        );
        assert!(!object.contains_key("html"));
        assert!(!object.contains_key("reply_to"));
    }

    #[test]
    fn contact_omits_unset_fields() {
        let contact = NewContact {
            email: "x@y.com".into(),
            first_name: Some("Ada".into()),
            last_name: None,
            unsubscribed: None,
        };

        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(json, serde_json::json!({"email": "x@y.com", "first_name": "Ada"}));
    }

    #[test]
    fn tag_parsing_splits_on_first_equals() {
        assert_eq!(
            Tag::parse("env=prod=eu"),
            Some(Tag {
                name: "env".into(),
                value: "prod=eu".into()
            })
        );
        assert_eq!(Tag::parse("no-separator"), None);
    }
}
