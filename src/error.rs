//! Error types for Resend operations.

use std::path::PathBuf;

/// Errors returned by credential resolution, API calls, and attachment
/// encoding.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No API key could be resolved from the environment or the credentials
    /// file.
    #[error("configuration error: {0}")]
    Config(String),

    /// The server answered with a non-success status.
    #[error("Resend API error {status}: {message}")]
    Api {
        /// HTTP status code of the final response.
        status: u16,
        /// Message extracted from the response body, or the raw body text
        /// when it was not JSON.
        message: String,
    },

    /// The request never produced a usable response: connection failure,
    /// timeout, or a malformed body on a success status.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A local file (attachment or body source) could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    File {
        /// Path that failed to open or read.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Status code of an API rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
