//! Transactional email sent through the core API.

use crate::{metadata::RequestMetadata, ApiClient, Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A transactional email.
///
/// Either reference a template with `transactional_message_id` or supply
/// `from`, `subject` and `body` directly. `identifiers` names the recipient
/// profile (`{"id": ...}` or `{"email": ...}`) and is always sent.
///
/// # Examples
///
/// ```
/// use customerio::SendEmailRequest;
///
/// let mut request = SendEmailRequest::new("welcome", [("id", "42")])
///     .to("ada@example.com")
///     .message_data("plan", "pro");
/// request.attach("terms.txt", b"be excellent").unwrap();
///
/// let json = serde_json::to_value(&request).unwrap();
/// assert_eq!(json["transactional_message_id"], "welcome");
/// assert_eq!(json["identifiers"]["id"], "42");
/// assert_eq!(json["attachments"]["terms.txt"], "YmUgZXhjZWxsZW50");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SendEmailRequest {
    /// Template to send, by ID or trigger name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactional_message_id: Option<String>,
    /// Recipient profile, e.g. `{"id": "42"}` or `{"email": ...}`.
    pub identifiers: BTreeMap<String, String>,
    /// Values the template reads as `{{trigger.<key>}}`.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub message_data: Map<String, Value>,
    /// Extra email headers.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// Sender address; overrides the template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Recipient address; overrides the profile email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Reply-to address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    /// BCC address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<String>,
    /// Subject line; overrides the template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Preview text shown after the subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preheader: Option<String>,
    /// HTML body; overrides the template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Plain-text alternative body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plaintext_body: Option<String>,
    /// AMP body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amp_body: Option<String>,
    /// Send BCC copies as separate messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fake_bcc: Option<bool>,
    /// File name to base64 content. Fill through [`attach`](Self::attach).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attachments: BTreeMap<String, String>,
    /// Do not store the message body after sending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_message_retention: Option<bool>,
    /// Deliver even if the recipient unsubscribed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_to_unsubscribed: Option<bool>,
    /// Track opens and clicks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracked: Option<bool>,
    /// Queue as a draft instead of sending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_draft: Option<bool>,
    /// Skip CSS inlining.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_css_preprocessing: Option<bool>,
}

impl SendEmailRequest {
    /// Creates a request for a template-based message.
    pub fn new<K, V>(
        transactional_message_id: impl Into<String>,
        identifiers: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            transactional_message_id: Some(transactional_message_id.into()),
            identifiers: identifiers
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Default::default()
        }
    }

    /// Sets the recipient address.
    pub fn to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    /// Adds one value available to the template as `{{trigger.<key>}}`.
    pub fn message_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.message_data.insert(key.into(), value.into());
        self
    }

    /// Attaches a file, base64-encoding its content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AttachmentExists`] if an attachment with this name
    /// was already added.
    pub fn attach(&mut self, name: impl Into<String>, content: impl AsRef<[u8]>) -> Result<()> {
        let name = name.into();
        if self.attachments.contains_key(&name) {
            return Err(Error::AttachmentExists(name));
        }

        self.attachments.insert(name, STANDARD.encode(content));
        Ok(())
    }
}

/// Response to a queued transactional email.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendEmailResponse {
    /// Identifier of the delivery, usable to look up its metrics.
    pub delivery_id: String,
    /// When the message was queued. Sent by the API as Unix seconds.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub queued_at: DateTime<Utc>,
}

impl ApiClient {
    /// Queues a transactional email.
    ///
    /// Sends `POST /v1/send/email`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use customerio::{ApiClient, SendEmailRequest};
    ///
    /// # async fn example() -> Result<(), customerio::Error> {
    /// let client = ApiClient::new("app-api-key")?;
    /// let request = SendEmailRequest::new("3", [("email", "ada@example.com")])
    ///     .message_data("order_id", 1234);
    ///
    /// let sent = client.send_email(&request).await?;
    /// println!("delivery {} queued at {}", sent.delivery_id, sent.queued_at);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send_email(&self, request: &SendEmailRequest) -> Result<SendEmailResponse> {
        let metadata = RequestMetadata::new(Method::POST, "/v1/send/email");
        self.base.send(metadata, Some(request)).await?.decode()
    }
}
