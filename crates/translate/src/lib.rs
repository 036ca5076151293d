//! Google Cloud Translation (v2 REST) client behind the core `Translator` seam.

use std::{fmt, sync::Arc, time::Duration};

use async_trait::async_trait;
use gcp_auth::TokenProvider;
use reacjilator_core::{
    config::TranslateConfig, LanguageCode, TranslateError, TranslationResult, Translator,
};
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const TRANSLATE_PATH: &str = "/language/translate/v2";
const TRANSLATE_SCOPE: &str = "https://www.googleapis.com/auth/cloud-translation";

#[derive(Clone)]
pub enum GoogleCredential {
    /// Sent as the `key` query parameter.
    ApiKey(SecretString),
    /// OAuth bearer token, billed to the configured project. Never refreshed.
    AccessToken(SecretString),
    /// Service account or other application default credentials; `gcp_auth`
    /// caches the token and refreshes it before expiry.
    ApplicationDefault(Arc<dyn TokenProvider>),
}

impl fmt::Debug for GoogleCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey([REDACTED])"),
            Self::AccessToken(_) => f.write_str("AccessToken([REDACTED])"),
            Self::ApplicationDefault(_) => f.write_str("ApplicationDefault"),
        }
    }
}

impl GoogleCredential {
    async fn authorize(
        &self,
        request: RequestBuilder,
        project_id: &str,
    ) -> Result<RequestBuilder, TranslateError> {
        Ok(match self {
            Self::ApiKey(key) => request.query(&[("key", key.expose_secret())]),
            Self::AccessToken(token) => request
                .bearer_auth(token.expose_secret())
                .header("x-goog-user-project", project_id),
            Self::ApplicationDefault(provider) => {
                let token = provider
                    .token(&[TRANSLATE_SCOPE])
                    .await
                    .map_err(|error| TranslateError::Credential(error.to_string()))?;
                request.bearer_auth(token.as_str()).header("x-goog-user-project", project_id)
            }
        })
    }
}

/// Credential set explicitly in config; `None` means application default credentials.
fn configured_credential(config: &TranslateConfig) -> Option<GoogleCredential> {
    config
        .api_key
        .clone()
        .map(GoogleCredential::ApiKey)
        .or_else(|| config.access_token.clone().map(GoogleCredential::AccessToken))
}

pub struct GoogleTranslator {
    http: Client,
    base_url: String,
    project_id: String,
    credential: GoogleCredential,
}

impl GoogleTranslator {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        project_id: impl Into<String>,
        credential: GoogleCredential,
    ) -> Self {
        Self { http, base_url: base_url.into(), project_id: project_id.into(), credential }
    }

    pub async fn from_config(config: &TranslateConfig) -> Result<Self, TranslateError> {
        let credential = match configured_credential(config) {
            Some(credential) => credential,
            None => gcp_auth::provider()
                .await
                .map(GoogleCredential::ApplicationDefault)
                .map_err(|error| TranslateError::Credential(error.to_string()))?,
        };

        if matches!(credential, GoogleCredential::AccessToken(_)) {
            warn!(
                event_name = "translate.google.static_token",
                "static access token configured; it is not refreshed and expires after about an hour"
            );
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| TranslateError::Request(error.to_string()))?;

        Ok(Self::new(http, config.base_url.clone(), config.project_id.clone(), credential))
    }

    fn endpoint(&self) -> String {
        format!("{}{TRANSLATE_PATH}", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        target: LanguageCode,
    ) -> Result<TranslationResult, TranslateError> {
        debug!(
            event_name = "translate.google.request",
            target = %target,
            chars = text.chars().count(),
            "requesting translation"
        );

        let body = TranslateRequest { q: text, target: target.as_str(), format: "text" };
        let request = self.http.post(self.endpoint()).json(&body);
        let request = self.credential.authorize(request, &self.project_id).await?;

        let response =
            request.send().await.map_err(|error| TranslateError::Request(error.to_string()))?;
        let status = response.status().as_u16();
        let raw =
            response.text().await.map_err(|error| TranslateError::Request(error.to_string()))?;

        decode_response(status, &raw, target)
    }
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    target: &'a str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    #[serde(default)]
    translated_text: String,
    detected_source_language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: u16,
    #[serde(default)]
    message: String,
}

fn decode_response(
    status: u16,
    body: &str,
    target: LanguageCode,
) -> Result<TranslationResult, TranslateError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|error| error.error)
            .map(|error| (error.code, error.message))
            .unwrap_or_else(|_| (status, body.trim().to_owned()));
        return Err(TranslateError::Provider { code: message.0, message: message.1 });
    }

    let response = serde_json::from_str::<TranslateResponse>(body)
        .map_err(|error| TranslateError::Decode(error.to_string()))?;
    let translation =
        response.data.translations.into_iter().next().ok_or(TranslateError::EmptyResponse)?;

    Ok(TranslationResult {
        translated_text: translation.translated_text,
        target_language: target,
        detected_source_language: translation.detected_source_language,
    })
}
