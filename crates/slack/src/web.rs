use async_trait::async_trait;
use reacjilator_core::{RenderedBlock, ThreadMessage};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::blocks::{Block, MessageTemplate};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SlackApiError {
    #[error("slack request `{method}` failed: {message}")]
    Http { method: &'static str, message: String },
    #[error("slack method `{method}` returned error `{code}`")]
    Api { method: &'static str, code: String },
    #[error("slack response for `{method}` could not be decoded: {message}")]
    Decode { method: &'static str, message: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplyQuery {
    pub channel_id: String,
    pub ts: String,
    pub limit: u32,
    pub inclusive: bool,
}

impl ReplyQuery {
    /// The reacted-to message itself, with the thread metadata needed to reply to it.
    pub fn single(channel_id: impl Into<String>, ts: impl Into<String>) -> Self {
        Self { channel_id: channel_id.into(), ts: ts.into(), limit: 1, inclusive: true }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PostMessage {
    pub channel: String,
    pub thread_ts: String,
    pub text: String,
    pub blocks: Vec<Block>,
}

impl PostMessage {
    pub fn threaded(
        channel: impl Into<String>,
        thread_ts: impl Into<String>,
        template: MessageTemplate,
    ) -> Self {
        Self {
            channel: channel.into(),
            thread_ts: thread_ts.into(),
            text: template.fallback_text,
            blocks: template.blocks,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PostedMessage {
    pub channel: String,
    pub ts: String,
}

#[async_trait]
pub trait SlackApi: Send + Sync {
    async fn fetch_replies(&self, query: &ReplyQuery) -> Result<Vec<ThreadMessage>, SlackApiError>;
    async fn post_message(&self, message: &PostMessage) -> Result<PostedMessage, SlackApiError>;
}

/// Slack Web API over HTTPS, authenticated with the bot token.
pub struct SlackWebClient {
    http: Client,
    base_url: String,
    bot_token: SecretString,
}

impl SlackWebClient {
    pub fn new(http: Client, base_url: impl Into<String>, bot_token: SecretString) -> Self {
        Self { http, base_url: base_url.into(), bot_token }
    }

    fn method_url(&self, method: &str) -> String {
        method_url(&self.base_url, method)
    }
}

#[async_trait]
impl SlackApi for SlackWebClient {
    async fn fetch_replies(&self, query: &ReplyQuery) -> Result<Vec<ThreadMessage>, SlackApiError> {
        const METHOD: &str = "conversations.replies";

        let limit = query.limit.to_string();
        let inclusive = query.inclusive.to_string();
        let response = self
            .http
            .get(self.method_url(METHOD))
            .bearer_auth(self.bot_token.expose_secret())
            .query(&[
                ("channel", query.channel_id.as_str()),
                ("ts", query.ts.as_str()),
                ("limit", limit.as_str()),
                ("inclusive", inclusive.as_str()),
            ])
            .send()
            .await
            .map_err(|error| http_error(METHOD, error))?;

        let body = read_body(METHOD, response).await?;
        let replies: RepliesResponse = decode_api_response(METHOD, &body)?;
        debug!(
            event_name = "slack.web.replies_fetched",
            channel_id = %query.channel_id,
            message_ts = %query.ts,
            count = replies.messages.len(),
            "fetched thread messages"
        );

        Ok(replies.messages.into_iter().map(ApiMessage::into_thread_message).collect())
    }

    async fn post_message(&self, message: &PostMessage) -> Result<PostedMessage, SlackApiError> {
        const METHOD: &str = "chat.postMessage";

        let response = self
            .http
            .post(self.method_url(METHOD))
            .bearer_auth(self.bot_token.expose_secret())
            .json(message)
            .send()
            .await
            .map_err(|error| http_error(METHOD, error))?;

        let body = read_body(METHOD, response).await?;
        decode_api_response(METHOD, &body)
    }
}

pub(crate) fn method_url(base_url: &str, method: &str) -> String {
    format!("{}/{method}", base_url.trim_end_matches('/'))
}

pub(crate) fn http_error(method: &'static str, error: reqwest::Error) -> SlackApiError {
    SlackApiError::Http { method, message: error.to_string() }
}

pub(crate) async fn read_body(
    method: &'static str,
    response: reqwest::Response,
) -> Result<String, SlackApiError> {
    let status = response.status();
    let body = response.text().await.map_err(|error| http_error(method, error))?;
    if !status.is_success() {
        return Err(SlackApiError::Http { method, message: format!("HTTP {status}") });
    }
    Ok(body)
}

/// Slack answers HTTP 200 with `{ "ok": false, "error": "..." }` on failure.
pub(crate) fn decode_api_response<T>(method: &'static str, body: &str) -> Result<T, SlackApiError>
where
    T: DeserializeOwned,
{
    let value: Value = serde_json::from_str(body)
        .map_err(|error| SlackApiError::Decode { method, message: error.to_string() })?;

    if value.get("ok").and_then(Value::as_bool) != Some(true) {
        let code = value.get("error").and_then(Value::as_str).unwrap_or("unknown_error");
        return Err(SlackApiError::Api { method, code: code.to_owned() });
    }

    serde_json::from_value(value)
        .map_err(|error| SlackApiError::Decode { method, message: error.to_string() })
}

#[derive(Debug, Deserialize)]
struct RepliesResponse {
    #[serde(default)]
    messages: Vec<ApiMessage>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    text: Option<String>,
    ts: String,
    thread_ts: Option<String>,
    bot_id: Option<String>,
    subtype: Option<String>,
    #[serde(default)]
    blocks: Vec<ApiBlock>,
}

#[derive(Debug, Deserialize)]
struct ApiBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<Value>,
}

impl ApiMessage {
    fn into_thread_message(self) -> ThreadMessage {
        let bot_generated = self.bot_id.is_some() || self.subtype.as_deref() == Some("bot_message");
        ThreadMessage {
            text: self.text,
            ts: self.ts,
            thread_ts: self.thread_ts,
            bot_generated,
            blocks: self
                .blocks
                .into_iter()
                .map(|block| RenderedBlock {
                    block_type: block.block_type,
                    text: block
                        .text
                        .as_ref()
                        .and_then(|text| text.get("text"))
                        .and_then(Value::as_str)
                        .map(str::to_owned),
                })
                .collect(),
        }
    }
}
