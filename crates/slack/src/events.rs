use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use reacjilator_core::TranslateError;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::{
    blocks::MessageTemplate,
    translate::{SkipReason, TranslationOutcome},
    web::SlackApiError,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlackEnvelope {
    pub envelope_id: String,
    pub event: SlackEvent,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlackEvent {
    ReactionAdded(ReactionAddedEvent),
    Unsupported { event_type: String },
}

impl SlackEvent {
    pub fn event_type(&self) -> SlackEventType {
        match self {
            Self::ReactionAdded(_) => SlackEventType::ReactionAdded,
            Self::Unsupported { .. } => SlackEventType::Unsupported,
        }
    }

    /// Reads the `event` object of an `events_api` socket payload.
    pub fn from_events_api_payload(payload: &Value) -> Self {
        let Some(event) = payload.get("event") else {
            return Self::Unsupported { event_type: "missing_event".to_owned() };
        };
        let event_type = event.get("type").and_then(Value::as_str).unwrap_or("unknown");

        if event_type != "reaction_added" {
            return Self::Unsupported { event_type: event_type.to_owned() };
        }

        match ReactionAddedWire::deserialize(event) {
            Ok(wire) => Self::ReactionAdded(wire.into()),
            Err(_) => Self::Unsupported { event_type: "malformed_reaction_added".to_owned() },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SlackEventType {
    ReactionAdded,
    Unsupported,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionItemType {
    Message,
    File,
    FileComment,
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReactionAddedEvent {
    pub reaction: String,
    pub user_id: String,
    pub item_type: ReactionItemType,
    pub channel_id: String,
    pub message_ts: String,
}

#[derive(Debug, Deserialize)]
struct ReactionAddedWire {
    reaction: String,
    #[serde(default)]
    user: String,
    item: ReactionItemWire,
}

#[derive(Debug, Deserialize)]
struct ReactionItemWire {
    #[serde(rename = "type")]
    item_type: ReactionItemType,
    #[serde(default)]
    channel: String,
    #[serde(default)]
    ts: String,
}

impl From<ReactionAddedWire> for ReactionAddedEvent {
    fn from(wire: ReactionAddedWire) -> Self {
        Self {
            reaction: wire.reaction,
            user_id: wire.user,
            item_type: wire.item.item_type,
            channel_id: wire.item.channel,
            message_ts: wire.item.ts,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventContext {
    pub correlation_id: String,
}

impl Default for EventContext {
    fn default() -> Self {
        Self { correlation_id: "unknown-correlation-id".to_owned() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandlerResult {
    Responded(MessageTemplate),
    Processed(SkipReason),
    Ignored,
}

impl HandlerResult {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Responded(_) => "responded",
            Self::Processed(reason) => reason.label(),
            Self::Ignored => "ignored",
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EventHandlerError {
    #[error("could not fetch reacted message: {0}")]
    Fetch(#[source] SlackApiError),
    #[error(transparent)]
    Translate(#[from] TranslateError),
    #[error("could not post translation reply: {0}")]
    Post(#[source] SlackApiError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error(transparent)]
    Handler(#[from] EventHandlerError),
}

#[async_trait]
pub trait EventHandler: Send + Sync {
    fn event_type(&self) -> SlackEventType;
    async fn handle(
        &self,
        envelope: &SlackEnvelope,
        ctx: &EventContext,
    ) -> Result<HandlerResult, EventHandlerError>;
}

#[derive(Default)]
pub struct EventDispatcher {
    handlers: HashMap<SlackEventType, Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<H>(&mut self, handler: H)
    where
        H: EventHandler + 'static,
    {
        self.handlers.insert(handler.event_type(), Arc::new(handler));
    }

    pub async fn dispatch(
        &self,
        envelope: &SlackEnvelope,
        ctx: &EventContext,
    ) -> Result<HandlerResult, DispatchError> {
        let Some(handler) = self.handlers.get(&envelope.event.event_type()) else {
            return Ok(HandlerResult::Ignored);
        };

        handler.handle(envelope, ctx).await.map_err(DispatchError::from)
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

#[async_trait]
pub trait ReactionService: Send + Sync {
    async fn handle_reaction_added(
        &self,
        event: &ReactionAddedEvent,
        ctx: &EventContext,
    ) -> Result<TranslationOutcome, EventHandlerError>;
}

pub struct ReactionAddedHandler<S> {
    service: S,
}

impl<S> ReactionAddedHandler<S>
where
    S: ReactionService,
{
    pub fn new(service: S) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<S> EventHandler for ReactionAddedHandler<S>
where
    S: ReactionService + 'static,
{
    fn event_type(&self) -> SlackEventType {
        SlackEventType::ReactionAdded
    }

    async fn handle(
        &self,
        envelope: &SlackEnvelope,
        ctx: &EventContext,
    ) -> Result<HandlerResult, EventHandlerError> {
        let SlackEvent::ReactionAdded(event) = &envelope.event else {
            return Ok(HandlerResult::Ignored);
        };

        Ok(match self.service.handle_reaction_added(event, ctx).await? {
            TranslationOutcome::Posted { reply, .. } => HandlerResult::Responded(reply),
            TranslationOutcome::Skipped(reason) => HandlerResult::Processed(reason),
        })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::json;

    use super::{
        EventContext, EventDispatcher, EventHandlerError, HandlerResult, ReactionAddedEvent,
        ReactionAddedHandler, ReactionItemType, ReactionService, SlackEnvelope, SlackEvent,
    };
    use crate::{
        blocks::unsupported_language_message,
        translate::{SkipReason, TranslationOutcome},
        web::SlackApiError,
    };

    struct FixedReactionService(Result<TranslationOutcome, EventHandlerError>);

    #[async_trait]
    impl ReactionService for FixedReactionService {
        async fn handle_reaction_added(
            &self,
            _event: &ReactionAddedEvent,
            _ctx: &EventContext,
        ) -> Result<TranslationOutcome, EventHandlerError> {
            self.0.clone()
        }
    }

    fn reaction_envelope(reaction: &str) -> SlackEnvelope {
        SlackEnvelope {
            envelope_id: "env-1".to_owned(),
            event: SlackEvent::ReactionAdded(ReactionAddedEvent {
                reaction: reaction.to_owned(),
                user_id: "U1".to_owned(),
                item_type: ReactionItemType::Message,
                channel_id: "C1".to_owned(),
                message_ts: "1700000000.0001".to_owned(),
            }),
        }
    }

    #[test]
    fn parses_reaction_added_payload() {
        let payload = json!({
            "type": "event_callback",
            "event": {
                "type": "reaction_added",
                "user": "U1",
                "reaction": "flag-jp",
                "item_user": "U2",
                "item": { "type": "message", "channel": "C1", "ts": "1700000000.0001" },
                "event_ts": "1700000001.0000"
            }
        });

        let event = SlackEvent::from_events_api_payload(&payload);
        assert_eq!(
            event,
            SlackEvent::ReactionAdded(ReactionAddedEvent {
                reaction: "flag-jp".to_owned(),
                user_id: "U1".to_owned(),
                item_type: ReactionItemType::Message,
                channel_id: "C1".to_owned(),
                message_ts: "1700000000.0001".to_owned(),
            })
        );
    }

    #[test]
    fn file_reactions_parse_with_non_message_item_type() {
        let payload = json!({
            "event": {
                "type": "reaction_added",
                "user": "U1",
                "reaction": "jp",
                "item": { "type": "file", "file": "F1" }
            }
        });

        let SlackEvent::ReactionAdded(event) = SlackEvent::from_events_api_payload(&payload) else {
            panic!("expected reaction event");
        };
        assert_eq!(event.item_type, ReactionItemType::File);
        assert!(event.channel_id.is_empty());
    }

    #[test]
    fn unknown_item_types_fall_back_to_other() {
        let payload = json!({
            "event": {
                "type": "reaction_added",
                "reaction": "jp",
                "item": { "type": "canvas_section" }
            }
        });

        let SlackEvent::ReactionAdded(event) = SlackEvent::from_events_api_payload(&payload) else {
            panic!("expected reaction event");
        };
        assert_eq!(event.item_type, ReactionItemType::Other);
    }

    #[test]
    fn other_event_types_are_unsupported() {
        let payload = json!({ "event": { "type": "message", "text": "hi" } });
        assert_eq!(
            SlackEvent::from_events_api_payload(&payload),
            SlackEvent::Unsupported { event_type: "message".to_owned() }
        );

        let malformed = json!({ "event": { "type": "reaction_added" } });
        assert_eq!(
            SlackEvent::from_events_api_payload(&malformed),
            SlackEvent::Unsupported { event_type: "malformed_reaction_added".to_owned() }
        );
    }

    #[tokio::test]
    async fn dispatcher_returns_ignored_when_no_handler_registered() {
        let dispatcher = EventDispatcher::new();
        let result = dispatcher
            .dispatch(&reaction_envelope("flag-jp"), &EventContext::default())
            .await
            .expect("dispatch");

        assert_eq!(result, HandlerResult::Ignored);
    }

    #[tokio::test]
    async fn dispatcher_routes_reaction_to_registered_handler() {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(ReactionAddedHandler::new(FixedReactionService(Ok(
            TranslationOutcome::Posted {
                channel_id: "C1".to_owned(),
                thread_ts: "1700000000.0001".to_owned(),
                reply: unsupported_language_message(),
            },
        ))));
        assert_eq!(dispatcher.handler_count(), 1);

        let result = dispatcher
            .dispatch(&reaction_envelope("flag-jp"), &EventContext::default())
            .await
            .expect("dispatch");

        assert_eq!(result, HandlerResult::Responded(unsupported_language_message()));
        assert_eq!(result.label(), "responded");
    }

    #[tokio::test]
    async fn skipped_outcomes_map_to_processed() {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(ReactionAddedHandler::new(FixedReactionService(Ok(
            TranslationOutcome::Skipped(SkipReason::UnsupportedReaction),
        ))));

        let result = dispatcher
            .dispatch(&reaction_envelope("party-parrot"), &EventContext::default())
            .await
            .expect("dispatch");

        assert_eq!(result, HandlerResult::Processed(SkipReason::UnsupportedReaction));
        assert_eq!(result.label(), "unsupported_reaction");
    }

    #[tokio::test]
    async fn handler_errors_surface_as_dispatch_errors() {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(ReactionAddedHandler::new(FixedReactionService(Err(
            EventHandlerError::Fetch(SlackApiError::Api {
                method: "conversations.replies",
                code: "channel_not_found".to_owned(),
            }),
        ))));

        let error = dispatcher
            .dispatch(&reaction_envelope("flag-jp"), &EventContext::default())
            .await
            .expect_err("fetch failure should surface");

        assert!(error.to_string().contains("channel_not_found"));
    }
}
