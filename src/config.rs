//! Credential resolution and fixed client configuration.
//!
//! Every value is looked up in the process environment first, then in a
//! line-oriented `KEY=value` credentials file under the user's home
//! directory. Only the API key is mandatory; the sender defaults fall back
//! to hard-coded placeholders.

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Base URL all API paths are appended to.
pub const API_BASE: &str = "https://api.resend.com";

/// Request timeout applied to every HTTP call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_API_KEY: &str = "RESEND_API_KEY";
const ENV_FROM: &str = "RESEND_FROM";
const ENV_REPLY_TO: &str = "RESEND_REPLY_TO";
const ENV_SIGNATURE: &str = "RESEND_SIGNATURE";

const FALLBACK_FROM: &str = "sender@example.com";

/// Resolved API key plus sender defaults, constructed once per invocation
/// and handed to the [`Client`](crate::Client) and the CLI.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Bearer token for the `Authorization` header.
    pub api_key: String,
    /// Sender defaults from the same sources as the key.
    pub defaults: SenderDefaults,
}

/// Sender defaults used by the `send` command. Unlike the API key these
/// always resolve, falling back to a placeholder sender identity and
/// empty strings, so keyless flows (such as `send --dry-run`) still work.
#[derive(Debug, Clone)]
pub struct SenderDefaults {
    /// Default sender identity for `send` when `--from` is absent.
    pub from: String,
    /// Default reply-to address; may be empty.
    pub reply_to: String,
    /// Signature text appended by `--sign`; may be empty.
    pub signature: String,
}

impl Credentials {
    /// Resolve credentials from the environment and the default
    /// credentials file (`~/.openclaw/credentials/resend.env`).
    ///
    /// Fails with [`Error::Config`] when no API key is found in either
    /// source.
    pub fn resolve() -> Result<Self> {
        Self::resolve_at(&default_credentials_path())
    }

    /// Resolve credentials against an explicit credentials file path.
    ///
    /// The file is read fresh on every call; a missing file is treated as
    /// an empty one.
    pub fn resolve_at(path: &Path) -> Result<Self> {
        let file = read_credentials_file(path);

        let api_key = lookup(ENV_API_KEY, &file).ok_or_else(|| {
            Error::Config(format!(
                "{ENV_API_KEY} not found. Set it in the environment or in {}",
                path.display()
            ))
        })?;

        Ok(Self {
            api_key,
            defaults: SenderDefaults::from_entries(&file),
        })
    }
}

impl SenderDefaults {
    /// Resolve sender defaults from the environment and the default
    /// credentials file. Never fails.
    pub fn resolve() -> Self {
        Self::resolve_at(&default_credentials_path())
    }

    /// Resolve sender defaults against an explicit credentials file path.
    pub fn resolve_at(path: &Path) -> Self {
        Self::from_entries(&read_credentials_file(path))
    }

    fn from_entries(file: &HashMap<String, String>) -> Self {
        Self {
            from: lookup(ENV_FROM, file).unwrap_or_else(|| FALLBACK_FROM.to_string()),
            reply_to: lookup(ENV_REPLY_TO, file).unwrap_or_default(),
            signature: lookup(ENV_SIGNATURE, file).unwrap_or_default(),
        }
    }
}

/// Environment override wins; otherwise the credentials file entry.
fn lookup(name: &str, file: &HashMap<String, String>) -> Option<String> {
    if let Ok(value) = env::var(name) {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }
    file.get(name).cloned()
}

fn default_credentials_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".openclaw")
        .join("credentials")
        .join("resend.env")
}

/// Parse `KEY=value` pairs, skipping blanks and `#` comments. Unreadable
/// or absent files yield an empty map.
fn read_credentials_file(path: &Path) -> HashMap<String, String> {
    let Ok(text) = std::fs::read_to_string(path) else {
        return HashMap::new();
    };

    let mut entries = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        entries.insert(key.trim().to_string(), strip_quotes(value.trim()).to_string());
    }
    entries
}

/// Strip one layer of matching surrounding quotes, single or double.
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
