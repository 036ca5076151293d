use std::sync::Arc;

use async_trait::async_trait;
use reacjilator_core::{
    already_posted, LanguageCode, ReactionResolver, ThreadMessage, TranslateError, Translator,
};
use tracing::{debug, info};

use crate::{
    blocks::{translation_message, unsupported_language_message, MessageTemplate},
    events::{
        EventContext, EventHandlerError, ReactionAddedEvent, ReactionItemType, ReactionService,
    },
    web::{PostMessage, ReplyQuery, SlackApi},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    NotAMessage,
    UnsupportedReaction,
    MessageNotFound,
    AlreadyPosted,
}

impl SkipReason {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotAMessage => "not_a_message",
            Self::UnsupportedReaction => "unsupported_reaction",
            Self::MessageNotFound => "message_not_found",
            Self::AlreadyPosted => "already_posted",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TranslationOutcome {
    Posted { channel_id: String, thread_ts: String, reply: MessageTemplate },
    Skipped(SkipReason),
}

/// Turns a flag reaction into a threaded translation of the reacted-to message.
pub struct ReactionTranslator {
    resolver: ReactionResolver,
    slack: Arc<dyn SlackApi>,
    translator: Arc<dyn Translator>,
}

impl ReactionTranslator {
    pub fn new(
        resolver: ReactionResolver,
        slack: Arc<dyn SlackApi>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Self { resolver, slack, translator }
    }

    async fn build_reply(
        &self,
        original: &ThreadMessage,
        reaction: &str,
        language: LanguageCode,
    ) -> Result<MessageTemplate, TranslateError> {
        let Some(text) = original.source_text() else {
            return Ok(unsupported_language_message());
        };

        let result = self.translator.translate(text, language).await?;
        if result.is_empty() {
            return Ok(unsupported_language_message());
        }

        Ok(translation_message(&result.translated_text, reaction, language))
    }
}

#[async_trait]
impl ReactionService for ReactionTranslator {
    async fn handle_reaction_added(
        &self,
        event: &ReactionAddedEvent,
        ctx: &EventContext,
    ) -> Result<TranslationOutcome, EventHandlerError> {
        if event.item_type != ReactionItemType::Message {
            return Ok(skipped(ctx, SkipReason::NotAMessage));
        }

        let Some(language) = self.resolver.resolve(&event.reaction) else {
            return Ok(skipped(ctx, SkipReason::UnsupportedReaction));
        };

        let query = ReplyQuery::single(&event.channel_id, &event.message_ts);
        let messages = self.slack.fetch_replies(&query).await.map_err(EventHandlerError::Fetch)?;
        let Some(original) = messages.first() else {
            return Ok(skipped(ctx, SkipReason::MessageNotFound));
        };

        let reply = self.build_reply(original, &event.reaction, language).await?;
        let candidate = reply.primary_text().unwrap_or(reply.fallback_text.as_str());
        if already_posted(&messages, candidate) {
            return Ok(skipped(ctx, SkipReason::AlreadyPosted));
        }

        let thread_ts = original.thread_anchor().to_owned();
        let message = PostMessage::threaded(&event.channel_id, &thread_ts, reply.clone());
        let posted = self.slack.post_message(&message).await.map_err(EventHandlerError::Post)?;

        info!(
            event_name = "translate.reply_posted",
            correlation_id = %ctx.correlation_id,
            channel_id = %event.channel_id,
            thread_ts = %thread_ts,
            reply_ts = %posted.ts,
            reaction = %event.reaction,
            lang = %language,
            "posted translation reply"
        );

        Ok(TranslationOutcome::Posted { channel_id: event.channel_id.clone(), thread_ts, reply })
    }
}

fn skipped(ctx: &EventContext, reason: SkipReason) -> TranslationOutcome {
    debug!(
        event_name = "translate.reaction_skipped",
        correlation_id = %ctx.correlation_id,
        reason = reason.label(),
        "reaction does not need a translation"
    );
    TranslationOutcome::Skipped(reason)
}
