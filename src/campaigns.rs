//! Campaign actions: the individual messages and steps inside a campaign.

use crate::{metadata::RequestMetadata, response::null_as_default, BetaApiClient, Result};
use chrono::{DateTime, Utc};
use http::Method;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Changes to apply to a campaign action.
///
/// Unset fields and an empty `headers` map are left out of the request.
///
/// # Examples
///
/// ```
/// use customerio::UpdateCampaignActionRequest;
///
/// let request = UpdateCampaignActionRequest {
///     subject: Some("Welcome aboard".to_string()),
///     body: Some("<p>Hello {{customer.first_name}}</p>".to_string()),
///     ..Default::default()
/// };
/// let json = serde_json::to_value(&request).unwrap();
/// assert_eq!(json["subject"], "Welcome aboard");
/// assert!(json.get("headers").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateCampaignActionRequest {
    /// Action this one follows in the workflow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_action_id: Option<i64>,
    /// Creation time override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Last-update time override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    /// Message body (HTML for email).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// `automatic`, `draft` or `off`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sending_state: Option<String>,
    /// Sender identity ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_id: Option<i64>,
    /// Reply-to identity ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<i64>,
    /// Recipient address or liquid expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    /// Subject line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Extra email headers.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

/// A campaign action as returned by the App API.
///
/// The API wraps the action in an `{"action": {...}}` envelope and reports
/// `created`/`updated` as Unix timestamps in seconds; both are unwrapped and
/// converted while decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignAction {
    /// Action identifier.
    pub id: String,
    /// Campaign the action belongs to.
    pub campaign_id: i64,
    /// Action this one follows in the workflow.
    pub parent_action_id: i64,
    /// Identifier that changes whenever the action is edited.
    pub deduplicate_id: String,
    /// Display name.
    pub name: String,
    /// Layout wrapped around the body.
    pub layout: String,
    /// Message body.
    pub body: String,
    /// When the action was created.
    pub created: DateTime<Utc>,
    /// When the action was last updated.
    pub updated: DateTime<Utc>,
    /// Action kind, sent as `type` (e.g. `email`, `push`, `webhook`).
    pub action_type: String,
    /// `automatic`, `draft` or `off`.
    pub sending_state: String,
    /// Sender address.
    pub from: String,
    /// Sender identity ID.
    pub from_id: i64,
    /// Reply-to address.
    pub reply_to: String,
    /// Reply-to identity ID.
    pub reply_to_id: i64,
    /// CSS preprocessor applied to the body.
    pub preprocessor: String,
    /// Recipient address or liquid expression.
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// BCC address.
    pub bcc: String,
    /// Whether BCC copies are sent as separate messages.
    pub fake_bcc: bool,
    /// Preview text shown after the subject.
    pub preheader_text: String,
}

#[derive(Deserialize)]
struct ActionEnvelope {
    action: WireAction,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct WireAction {
    #[serde(deserialize_with = "null_as_default")]
    id: String,
    #[serde(deserialize_with = "null_as_default")]
    campaign_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    parent_action_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    deduplicate_id: String,
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    #[serde(deserialize_with = "null_as_default")]
    layout: String,
    #[serde(deserialize_with = "null_as_default")]
    body: String,
    #[serde(deserialize_with = "null_as_default")]
    created: i64,
    #[serde(deserialize_with = "null_as_default")]
    updated: i64,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    action_type: String,
    #[serde(deserialize_with = "null_as_default")]
    sending_state: String,
    #[serde(deserialize_with = "null_as_default")]
    from: String,
    #[serde(deserialize_with = "null_as_default")]
    from_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    reply_to: String,
    #[serde(deserialize_with = "null_as_default")]
    reply_to_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    preprocessor: String,
    #[serde(deserialize_with = "null_as_default")]
    recipient: String,
    #[serde(deserialize_with = "null_as_default")]
    subject: String,
    #[serde(deserialize_with = "null_as_default")]
    bcc: String,
    #[serde(deserialize_with = "null_as_default")]
    fake_bcc: bool,
    #[serde(deserialize_with = "null_as_default")]
    preheader_text: String,
}

fn from_epoch_seconds<E: de::Error>(
    field: &str,
    seconds: i64,
) -> std::result::Result<DateTime<Utc>, E> {
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| E::custom(format!("{field} timestamp out of range: {seconds}")))
}

impl<'de> Deserialize<'de> for CampaignAction {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ActionEnvelope { action } = ActionEnvelope::deserialize(deserializer)?;

        Ok(CampaignAction {
            created: from_epoch_seconds("created", action.created)?,
            updated: from_epoch_seconds("updated", action.updated)?,
            id: action.id,
            campaign_id: action.campaign_id,
            parent_action_id: action.parent_action_id,
            deduplicate_id: action.deduplicate_id,
            name: action.name,
            layout: action.layout,
            body: action.body,
            action_type: action.action_type,
            sending_state: action.sending_state,
            from: action.from,
            from_id: action.from_id,
            reply_to: action.reply_to,
            reply_to_id: action.reply_to_id,
            preprocessor: action.preprocessor,
            recipient: action.recipient,
            subject: action.subject,
            bcc: action.bcc,
            fake_bcc: action.fake_bcc,
            preheader_text: action.preheader_text,
        })
    }
}

fn action_path(method: Method, campaign_id: &str, action_id: &str) -> RequestMetadata {
    RequestMetadata::new(method, "/v1/api/campaigns")
        .segment(campaign_id)
        .literal("actions")
        .segment(action_id)
}

impl BetaApiClient {
    /// Updates a campaign action's default-language content.
    ///
    /// Sends `PUT /v1/api/campaigns/{campaign_id}/actions/{action_id}`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use customerio::{BetaApiClient, UpdateCampaignActionRequest};
    ///
    /// # async fn example() -> Result<(), customerio::Error> {
    /// let client = BetaApiClient::new("app-api-key")?;
    /// let request = UpdateCampaignActionRequest {
    ///     subject: Some("Your order shipped".to_string()),
    ///     ..Default::default()
    /// };
    ///
    /// let action = client.update_campaign_action("12", "34", &request).await?;
    /// println!("{} last updated {}", action.name, action.updated);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn update_campaign_action(
        &self,
        campaign_id: impl AsRef<str>,
        action_id: impl AsRef<str>,
        request: &UpdateCampaignActionRequest,
    ) -> Result<CampaignAction> {
        let metadata = action_path(Method::PUT, campaign_id.as_ref(), action_id.as_ref());
        self.base.send(metadata, Some(request)).await?.decode()
    }

    /// Updates one language variant of a campaign action.
    ///
    /// Sends `PUT /v1/api/campaigns/{campaign_id}/actions/{action_id}/language/{locale}`.
    /// An empty `locale` targets the default language, exactly like
    /// [`update_campaign_action`](Self::update_campaign_action).
    pub async fn update_campaign_localized_action(
        &self,
        campaign_id: impl AsRef<str>,
        action_id: impl AsRef<str>,
        locale: impl AsRef<str>,
        request: &UpdateCampaignActionRequest,
    ) -> Result<CampaignAction> {
        let mut metadata = action_path(Method::PUT, campaign_id.as_ref(), action_id.as_ref());
        let locale = locale.as_ref();
        if !locale.is_empty() {
            metadata = metadata.literal("language").segment(locale);
        }

        self.base.send(metadata, Some(request)).await?.decode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_envelope_and_timestamps() {
        let action: CampaignAction = serde_json::from_value(json!({
            "action": {
                "id": "34",
                "campaign_id": 12,
                "name": "Welcome email",
                "type": "email",
                "created": 1_600_000_000,
                "updated": 1_700_000_000,
                "fake_bcc": true
            }
        }))
        .unwrap();

        assert_eq!(action.id, "34");
        assert_eq!(action.campaign_id, 12);
        assert_eq!(action.action_type, "email");
        assert_eq!(action.created.timestamp(), 1_600_000_000);
        assert_eq!(
            action.updated,
            "2023-11-14T22:13:20Z".parse::<DateTime<Utc>>().unwrap()
        );
        assert!(action.fake_bcc);
        assert_eq!(action.subject, "");
    }

    #[test]
    fn test_missing_timestamps_decode_to_epoch() {
        let action: CampaignAction =
            serde_json::from_value(json!({"action": {"id": "1"}})).unwrap();

        assert_eq!(action.created, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_out_of_range_timestamp_fails() {
        let result = serde_json::from_value::<CampaignAction>(json!({
            "action": {"created": i64::MAX}
        }));

        assert!(result.unwrap_err().to_string().contains("created timestamp out of range"));
    }

    #[test]
    fn test_action_reads_null_as_default() {
        let action: CampaignAction = serde_json::from_value(json!({
            "action": {
                "id": "1",
                "parent_action_id": null,
                "bcc": null,
                "type": null,
                "fake_bcc": null,
                "created": 1,
                "updated": null
            }
        }))
        .unwrap();

        assert_eq!(action.id, "1");
        assert_eq!(action.parent_action_id, 0);
        assert_eq!(action.bcc, "");
        assert_eq!(action.action_type, "");
        assert!(!action.fake_bcc);
        assert_eq!(action.created.timestamp(), 1);
        assert_eq!(action.updated, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_missing_envelope_fails() {
        assert!(serde_json::from_value::<CampaignAction>(json!({"id": "1"})).is_err());
    }

    #[test]
    fn test_request_serialization() {
        let mut headers = BTreeMap::new();
        headers.insert("X-Campaign".to_string(), "spring".to_string());
        let request = UpdateCampaignActionRequest {
            parent_action_id: Some(7),
            created: Some(DateTime::from_timestamp(1_600_000_000, 0).unwrap()),
            headers,
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "parent_action_id": 7,
                "created": "2020-09-13T12:26:40Z",
                "headers": {"X-Campaign": "spring"}
            })
        );
    }

    #[test]
    fn test_action_path_escapes_identifiers() {
        let metadata = action_path(Method::PUT, "1/2", "a b");

        assert_eq!(metadata.path, "/v1/api/campaigns/1%2F2/actions/a%20b");
    }
}
