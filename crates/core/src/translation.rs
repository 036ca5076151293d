use async_trait::async_trait;

use crate::{errors::TranslateError, langcode::LanguageCode};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslationResult {
    pub translated_text: String,
    pub target_language: LanguageCode,
    pub detected_source_language: Option<String>,
}

impl TranslationResult {
    /// Providers answer unsupported or empty input with an empty translation.
    pub fn is_empty(&self) -> bool {
        self.translated_text.is_empty()
    }
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        target: LanguageCode,
    ) -> Result<TranslationResult, TranslateError>;
}
