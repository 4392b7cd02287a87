//! # Resend CLI
//! Asynchronous client for the Resend transactional email HTTP API, plus the library core behind the `resend-cli` binary: send mail with [`Client::send_email`], inspect delivery with [`Client::get_email`], read inbound messages, and manage domains, audiences, and contacts.
//!
//! ## Audience and uses
//! For Rust developers and operators who send transactional mail from scripts or CI without pulling in a full SDK: resolve credentials with [`Credentials::resolve`], build a [`Client`], then call the endpoint method matching the action. The shipped binary wraps the same calls behind subcommands.
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`. An API key must be present in the `RESEND_API_KEY` environment variable or the credentials file under the user's home directory.
//!
//! ## Out of scope
//! Not a mail server, template engine, or bulk campaign scheduler. It only proxies the Resend service and inherits its rate limits, payload size caps, and retention behavior. Responses are passed through as JSON rather than mapped to exhaustive typed models.
//!
//! ## Errors
//! Rejected requests surface as [`Error::Api`] with the server's status and message; network and timeout failures become [`Error::Transport`]. A missing API key is [`Error::Config`], and an unreadable attachment is [`Error::File`]. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Example
//! ```no_run
//! use resend_cli::{Client, Credentials, EmailPayload};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), resend_cli::Error> {
//!     let credentials = Credentials::resolve()?;
//!     let client = Client::new(&credentials.api_key)?;
//!
//!     let payload = EmailPayload {
//!         from: credentials.defaults.from.clone(),
//!         to: vec!["reader@example.com".into()],
//!         subject: "Hello".into(),
//!         text: Some("Hello from Rust.".into()),
//!         ..Default::default()
//!     };
//!     let sent = client.send_email(&payload).await?;
//!     println!("Sent: {}", sent["id"]);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{Body, Client, ClientBuilder};
pub use config::{API_BASE, Credentials, DEFAULT_TIMEOUT_SECS, SenderDefaults};
pub use error::Error;
pub use models::{Attachment, EmailPayload, NewContact, Tag};

/// Result type alias for Resend operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
