//! Resend async client implementation: request engine and endpoint methods.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, RETRY_AFTER};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{API_BASE, DEFAULT_TIMEOUT_SECS};
use crate::{EmailPayload, Error, NewContact, Result};

/// Async client for the Resend transactional email API.
///
/// Use [`Client::new`] for defaults or [`Client::builder`] to override the
/// base URL or timeout. Every call is bearer-authenticated with the key
/// the client was built with.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

/// A response body: parsed JSON, or the explicit no-content marker for
/// 204 responses.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    Empty,
}

impl Body {
    /// The JSON payload, or `Value::Null` for an empty response.
    pub fn into_value(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Empty => Value::Null,
        }
    }
}

/// The two list shapes the API is known to produce: a container object
/// with a `data` field, or the bare array itself. Which one arrives is
/// environment-dependent, so both must be accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListResponse {
    Wrapped { data: Vec<Value> },
    Bare(Vec<Value>),
}

/// Adapter from either transport shape to the item sequence. Anything
/// that is neither shape (including an object without `data`) yields an
/// empty list.
fn unwrap_list(body: Body) -> Vec<Value> {
    match body {
        Body::Empty => Vec::new(),
        Body::Json(value) => match serde_json::from_value(value) {
            Ok(ListResponse::Wrapped { data }) => data,
            Ok(ListResponse::Bare(items)) => items,
            Err(_) => Vec::new(),
        },
    }
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Create a new Resend client with the default base URL and timeout.
    ///
    /// # Examples
    /// ```no_run
    /// # use resend_cli::Client;
    /// let client = Client::new("re_123")?;
    /// # Ok::<(), resend_cli::Error>(())
    /// ```
    pub fn new(api_key: &str) -> Result<Self> {
        ClientBuilder::new(api_key).build()
    }

    /// Issue one authenticated request against the API.
    ///
    /// The path is appended to the base URL, the body (if any) is sent as
    /// JSON, and `extra_headers` are merged on top of the defaults. A 429
    /// response is retried exactly once after the server's `Retry-After`
    /// delay (1 second when absent or malformed); a second 429 is
    /// terminal. Any final status of 400 or above becomes [`Error::Api`]
    /// carrying the JSON `message` field when the body has one, else the
    /// raw body text.
    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&T>,
        extra_headers: Option<HeaderMap>,
    ) -> Result<Body>
    where
        T: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, path, "issuing request");

        let mut response = self
            .send_once(&method, &url, body, extra_headers.as_ref())
            .await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let delay = retry_after_seconds(response.headers());
            warn!(path, delay, "rate limited, retrying once");
            tokio::time::sleep(Duration::from_secs(delay)).await;
            response = self
                .send_once(&method, &url, body, extra_headers.as_ref())
                .await?;
        }

        let status = response.status();
        if status.as_u16() >= 400 {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|parsed| {
                    parsed
                        .get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or(text);
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(Body::Empty);
        }

        Ok(Body::Json(response.json().await?))
    }

    async fn send_once<T>(
        &self,
        method: &Method,
        url: &str,
        body: Option<&T>,
        extra_headers: Option<&HeaderMap>,
    ) -> Result<reqwest::Response>
    where
        T: Serialize + ?Sized,
    {
        let mut request = self.http.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(headers) = extra_headers {
            request = request.headers(headers.clone());
        }
        request.send().await.map_err(Into::into)
    }

    /// Send an email.
    ///
    /// The payload is passed through verbatim; the API's own validation
    /// (recipient format, size limits) surfaces as [`Error::Api`].
    ///
    /// # Returns
    /// The created email's identifier and metadata as returned by the API.
    ///
    /// # Examples
    /// ```no_run
    /// # use resend_cli::{Client, EmailPayload};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), resend_cli::Error> {
    /// let client = Client::new("re_123")?;
    /// let payload = EmailPayload {
    ///     from: "Me <me@example.com>".into(),
    ///     to: vec!["you@example.com".into()],
    ///     subject: "Hi".into(),
    ///     text: Some("Hello.".into()),
    ///     ..Default::default()
    /// };
    /// let sent = client.send_email(&payload).await?;
    /// println!("{}", sent["id"]);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send_email(&self, payload: &EmailPayload) -> Result<Value> {
        let body = self
            .request(Method::POST, "/emails", Some(payload), None)
            .await?;
        Ok(body.into_value())
    }

    /// Fetch delivery status and metadata for a sent email.
    pub async fn get_email(&self, email_id: &str) -> Result<Value> {
        let body = self
            .request::<Value>(Method::GET, &format!("/emails/{email_id}"), None, None)
            .await?;
        Ok(body.into_value())
    }

    /// List inbound (received) emails.
    pub async fn list_inbound(&self) -> Result<Vec<Value>> {
        let body = self
            .request::<Value>(Method::GET, "/emails/receiving", None, None)
            .await?;
        Ok(unwrap_list(body))
    }

    /// Fetch one inbound email, including its body content.
    pub async fn get_inbound(&self, email_id: &str) -> Result<Value> {
        let body = self
            .request::<Value>(
                Method::GET,
                &format!("/emails/receiving/{email_id}"),
                None,
                None,
            )
            .await?;
        Ok(body.into_value())
    }

    /// List configured sending domains.
    ///
    /// # Examples
    /// ```no_run
    /// # use resend_cli::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), resend_cli::Error> {
    /// let client = Client::new("re_123")?;
    /// for domain in client.list_domains().await? {
    ///     println!("{} {}", domain["name"], domain["status"]);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_domains(&self) -> Result<Vec<Value>> {
        let body = self
            .request::<Value>(Method::GET, "/domains", None, None)
            .await?;
        Ok(unwrap_list(body))
    }

    /// Trigger DNS verification for a domain.
    ///
    /// # Returns
    /// The post-verification domain representation.
    pub async fn verify_domain(&self, domain_id: &str) -> Result<Value> {
        let body = self
            .request::<Value>(
                Method::POST,
                &format!("/domains/{domain_id}/verify"),
                None,
                None,
            )
            .await?;
        Ok(body.into_value())
    }

    /// List audiences.
    pub async fn list_audiences(&self) -> Result<Vec<Value>> {
        let body = self
            .request::<Value>(Method::GET, "/audiences", None, None)
            .await?;
        Ok(unwrap_list(body))
    }

    /// Create a named audience.
    pub async fn create_audience(&self, name: &str) -> Result<Value> {
        let body = self
            .request(
                Method::POST,
                "/audiences",
                Some(&serde_json::json!({ "name": name })),
                None,
            )
            .await?;
        Ok(body.into_value())
    }

    /// Delete an audience.
    pub async fn delete_audience(&self, audience_id: &str) -> Result<Value> {
        let body = self
            .request::<Value>(
                Method::DELETE,
                &format!("/audiences/{audience_id}"),
                None,
                None,
            )
            .await?;
        Ok(body.into_value())
    }

    /// List contacts in an audience.
    pub async fn list_contacts(&self, audience_id: &str) -> Result<Vec<Value>> {
        let body = self
            .request::<Value>(
                Method::GET,
                &format!("/audiences/{audience_id}/contacts"),
                None,
                None,
            )
            .await?;
        Ok(unwrap_list(body))
    }

    /// Add a contact to an audience.
    ///
    /// Optional contact fields are only included in the request body when
    /// set on [`NewContact`].
    ///
    /// # Examples
    /// ```no_run
    /// # use resend_cli::{Client, NewContact};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), resend_cli::Error> {
    /// let client = Client::new("re_123")?;
    /// let contact = NewContact {
    ///     email: "ada@example.com".into(),
    ///     first_name: Some("Ada".into()),
    ///     last_name: None,
    ///     unsubscribed: None,
    /// };
    /// let created = client.create_contact("aud_1", &contact).await?;
    /// println!("{}", created["id"]);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_contact(&self, audience_id: &str, contact: &NewContact) -> Result<Value> {
        let body = self
            .request(
                Method::POST,
                &format!("/audiences/{audience_id}/contacts"),
                Some(contact),
                None,
            )
            .await?;
        Ok(body.into_value())
    }

    /// Remove a contact from an audience.
    pub async fn delete_contact(&self, audience_id: &str, contact_id: &str) -> Result<Value> {
        let body = self
            .request::<Value>(
                Method::DELETE,
                &format!("/audiences/{audience_id}/contacts/{contact_id}"),
                None,
                None,
            )
            .await?;
        Ok(body.into_value())
    }
}

/// Parse `Retry-After` as integer seconds, defaulting to 1 when the
/// header is absent or malformed.
fn retry_after_seconds(headers: &HeaderMap) -> u64 {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(1)
}

/// Builder for configuring a Resend client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl ClientBuilder {
    /// Create a new builder holding the given API key.
    ///
    /// Defaults:
    /// - Base URL `https://api.resend.com`
    /// - 30 second request timeout
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the API base URL.
    ///
    /// Useful for testing against a mock server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    ///
    /// The bearer authorization and JSON content-type headers are fixed
    /// here and sent on every request.
    pub fn build(self) -> Result<Client> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| Error::Config("API key contains invalid header characters".into()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Client {
            http,
            base_url: self.base_url.trim_end_matches('/').to_string(),
        })
    }
}
