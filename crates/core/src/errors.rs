use thiserror::Error;

/// Failure talking to the translation provider.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TranslateError {
    #[error("translation request failed: {0}")]
    Request(String),
    #[error("google credentials are unavailable: {0}")]
    Credential(String),
    #[error("translation provider rejected request ({code}): {message}")]
    Provider { code: u16, message: String },
    #[error("translation response could not be decoded: {0}")]
    Decode(String),
    #[error("translation provider returned no translations")]
    EmptyResponse,
}

impl TranslateError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Provider { code, .. } if (400..500).contains(code))
    }
}
