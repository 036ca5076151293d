use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use futures_util::{
    stream::{SplitSink, SplitStream},
    SinkExt, StreamExt,
};
use reacjilator_core::config::SocketConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tokio::{net::TcpStream, sync::Mutex, task::JoinSet};
use tokio_tungstenite::{tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

use crate::{
    events::{
        DispatchError, EventContext, EventDispatcher, EventHandlerError, SlackEnvelope, SlackEvent,
    },
    web::{decode_api_response, http_error, method_url, read_body},
};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("transport failed to connect: {0}")]
    Connect(String),
    #[error("transport read failed: {0}")]
    Receive(String),
    #[error("transport ack failed: {0}")]
    Acknowledge(String),
    #[error("transport disconnect failed: {0}")]
    Disconnect(String),
}

#[derive(Debug, Error)]
pub enum SocketError {
    #[error("socket mode gave up after {attempts} consecutive failed attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: TransportError },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self { max_retries: 5, base_delay_ms: 250, max_delay_ms: 5_000 }
    }
}

impl From<&SocketConfig> for ReconnectPolicy {
    fn from(config: &SocketConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay_ms: config.base_delay_ms,
            max_delay_ms: config.max_delay_ms,
        }
    }
}

impl ReconnectPolicy {
    fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.min(16);
        let multiplier = 1_u64 << exponent;
        let delay_ms = self.base_delay_ms.saturating_mul(multiplier).min(self.max_delay_ms);
        Duration::from_millis(delay_ms)
    }
}

#[async_trait]
pub trait SocketTransport: Send + Sync {
    async fn connect(&self) -> Result<(), TransportError>;
    async fn next_envelope(&self) -> Result<Option<SlackEnvelope>, TransportError>;
    async fn acknowledge(&self, envelope_id: &str) -> Result<(), TransportError>;
    async fn disconnect(&self) -> Result<(), TransportError>;
}

/// Frames Slack sends over a Socket Mode connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SocketFrame {
    Hello,
    Disconnect { reason: String },
    Envelope(SlackEnvelope),
    Other { frame_type: String },
}

#[derive(Debug, Deserialize)]
struct RawFrame {
    #[serde(rename = "type")]
    frame_type: String,
    envelope_id: Option<String>,
    reason: Option<String>,
    #[serde(default)]
    payload: Value,
}

pub fn parse_socket_frame(text: &str) -> Result<SocketFrame, serde_json::Error> {
    let raw: RawFrame = serde_json::from_str(text)?;

    Ok(match (raw.frame_type.as_str(), raw.envelope_id) {
        ("hello", _) => SocketFrame::Hello,
        ("disconnect", _) => SocketFrame::Disconnect {
            reason: raw.reason.unwrap_or_else(|| "unknown".to_owned()),
        },
        ("events_api", Some(envelope_id)) => SocketFrame::Envelope(SlackEnvelope {
            envelope_id,
            event: SlackEvent::from_events_api_payload(&raw.payload),
        }),
        (_, Some(envelope_id)) => SocketFrame::Envelope(SlackEnvelope {
            envelope_id,
            event: SlackEvent::Unsupported { event_type: raw.frame_type },
        }),
        (_, None) => SocketFrame::Other { frame_type: raw.frame_type },
    })
}

#[derive(Debug, Deserialize)]
struct ConnectionsOpenResponse {
    url: String,
}

/// Socket Mode over a websocket opened with `apps.connections.open`.
pub struct SlackSocketTransport {
    http: Client,
    api_base_url: String,
    app_token: SecretString,
    writer: Mutex<Option<SplitSink<WsStream, Message>>>,
    reader: Mutex<Option<SplitStream<WsStream>>>,
}

impl SlackSocketTransport {
    pub fn new(http: Client, api_base_url: impl Into<String>, app_token: SecretString) -> Self {
        Self {
            http,
            api_base_url: api_base_url.into(),
            app_token,
            writer: Mutex::new(None),
            reader: Mutex::new(None),
        }
    }

    async fn open_connection_url(&self) -> Result<String, TransportError> {
        const METHOD: &str = "apps.connections.open";

        let response = self
            .http
            .post(method_url(&self.api_base_url, METHOD))
            .bearer_auth(self.app_token.expose_secret())
            .send()
            .await
            .map_err(|error| TransportError::Connect(http_error(METHOD, error).to_string()))?;
        let body = read_body(METHOD, response)
            .await
            .map_err(|error| TransportError::Connect(error.to_string()))?;
        let opened: ConnectionsOpenResponse = decode_api_response(METHOD, &body)
            .map_err(|error| TransportError::Connect(error.to_string()))?;

        Ok(opened.url)
    }

    async fn send(&self, message: Message) -> Result<(), TransportError> {
        let mut writer = self.writer.lock().await;
        let Some(sink) = writer.as_mut() else {
            return Err(TransportError::Acknowledge("socket is not connected".to_owned()));
        };
        sink.send(message).await.map_err(|error| TransportError::Acknowledge(error.to_string()))
    }
}

#[async_trait]
impl SocketTransport for SlackSocketTransport {
    async fn connect(&self) -> Result<(), TransportError> {
        let url = self.open_connection_url().await?;
        let (stream, _) = tokio_tungstenite::connect_async(url.as_str())
            .await
            .map_err(|error| TransportError::Connect(error.to_string()))?;
        let (sink, source) = stream.split();

        *self.writer.lock().await = Some(sink);
        *self.reader.lock().await = Some(source);
        Ok(())
    }

    async fn next_envelope(&self) -> Result<Option<SlackEnvelope>, TransportError> {
        let mut reader = self.reader.lock().await;
        let Some(source) = reader.as_mut() else {
            return Ok(None);
        };

        loop {
            let message = match source.next().await {
                Some(Ok(message)) => message,
                Some(Err(error)) => return Err(TransportError::Receive(error.to_string())),
                None => return Err(TransportError::Receive("socket stream ended".to_owned())),
            };

            match message {
                Message::Text(text) => match parse_socket_frame(text.as_str()) {
                    Ok(SocketFrame::Envelope(envelope)) => return Ok(Some(envelope)),
                    Ok(SocketFrame::Hello) => {
                        info!(event_name = "ingress.slack.hello", "socket mode session ready");
                    }
                    Ok(SocketFrame::Disconnect { reason }) => {
                        return Err(TransportError::Receive(format!(
                            "slack requested disconnect: {reason}"
                        )));
                    }
                    Ok(SocketFrame::Other { frame_type }) => {
                        debug!(frame_type = %frame_type, "ignoring socket mode frame");
                    }
                    Err(error) => {
                        warn!(error = %error, "discarding unparseable socket mode frame");
                    }
                },
                Message::Close(frame) => {
                    let reason = frame.map(|frame| frame.reason.to_string()).unwrap_or_default();
                    return Err(TransportError::Receive(format!(
                        "socket closed by server: {reason}"
                    )));
                }
                _ => {}
            }
        }
    }

    async fn acknowledge(&self, envelope_id: &str) -> Result<(), TransportError> {
        let ack = json!({ "envelope_id": envelope_id }).to_string();
        self.send(Message::Text(ack.into())).await
    }

    async fn disconnect(&self) -> Result<(), TransportError> {
        self.reader.lock().await.take();
        let Some(mut sink) = self.writer.lock().await.take() else {
            return Ok(());
        };
        sink.close().await.map_err(|error| TransportError::Disconnect(error.to_string()))
    }
}

pub struct SocketModeRunner {
    transport: Arc<dyn SocketTransport>,
    dispatcher: Arc<EventDispatcher>,
    reconnect_policy: ReconnectPolicy,
}

impl SocketModeRunner {
    pub fn new(
        transport: Arc<dyn SocketTransport>,
        dispatcher: Arc<EventDispatcher>,
        reconnect_policy: ReconnectPolicy,
    ) -> Self {
        Self { transport, dispatcher, reconnect_policy }
    }

    /// Runs until the transport closes cleanly. Fails once `max_retries` consecutive
    /// attempts have failed; a successful connect resets the count.
    pub async fn start(&self) -> Result<(), SocketError> {
        let mut failures = 0_u32;

        loop {
            let transport_error = match self.connect_and_pump(&mut failures).await {
                Ok(()) => return Ok(()),
                Err(transport_error) => transport_error,
            };

            warn!(
                event_name = "ingress.slack.transport_failed",
                attempt = failures,
                max_retries = self.reconnect_policy.max_retries,
                error = %transport_error,
                "socket mode transport failed"
            );

            if failures >= self.reconnect_policy.max_retries {
                error!(
                    event_name = "ingress.slack.retries_exhausted",
                    max_retries = self.reconnect_policy.max_retries,
                    "socket mode retries exhausted"
                );
                return Err(SocketError::RetriesExhausted {
                    attempts: failures + 1,
                    last_error: transport_error,
                });
            }

            let delay = self.reconnect_policy.backoff(failures);
            failures += 1;
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }

    async fn connect_and_pump(&self, failures: &mut u32) -> Result<(), TransportError> {
        info!(attempt = *failures, "opening socket mode transport connection");
        self.transport.connect().await?;
        *failures = 0;
        info!("socket mode transport connected");

        let mut inflight = JoinSet::new();
        match self.pump(&mut inflight).await {
            Ok(()) => {
                while inflight.join_next().await.is_some() {}
                self.transport.disconnect().await
            }
            Err(error) => {
                inflight.detach_all();
                Err(error)
            }
        }
    }

    async fn pump(&self, inflight: &mut JoinSet<()>) -> Result<(), TransportError> {
        loop {
            while inflight.try_join_next().is_some() {}

            let Some(envelope) = self.transport.next_envelope().await? else {
                info!("socket mode transport stream closed");
                return Ok(());
            };
            let (channel_id, message_ts) = correlation_fields(&envelope);

            info!(
                event_name = "ingress.slack.envelope_received",
                envelope_id = %envelope.envelope_id,
                event_type = ?envelope.event.event_type(),
                correlation_id = %envelope.envelope_id,
                channel_id = channel_id.unwrap_or("unknown"),
                message_ts = message_ts.unwrap_or("unknown"),
                "received slack envelope"
            );

            if let Err(error) = self.transport.acknowledge(&envelope.envelope_id).await {
                warn!(
                    event_name = "ingress.slack.ack_sent",
                    envelope_id = %envelope.envelope_id,
                    correlation_id = %envelope.envelope_id,
                    error = %error,
                    "failed to acknowledge slack envelope"
                );
            } else {
                debug!(
                    event_name = "ingress.slack.ack_sent",
                    envelope_id = %envelope.envelope_id,
                    correlation_id = %envelope.envelope_id,
                    "acknowledged slack envelope"
                );
            }

            let dispatcher = Arc::clone(&self.dispatcher);
            inflight.spawn(async move { dispatch_envelope(&dispatcher, envelope).await });
        }
    }
}

async fn dispatch_envelope(dispatcher: &EventDispatcher, envelope: SlackEnvelope) {
    let context = EventContext { correlation_id: envelope.envelope_id.clone() };
    let (channel_id, message_ts) = correlation_fields(&envelope);

    match dispatcher.dispatch(&envelope, &context).await {
        Ok(result) => {
            info!(
                event_name = "ingress.slack.envelope_handled",
                correlation_id = %context.correlation_id,
                channel_id = channel_id.unwrap_or("unknown"),
                message_ts = message_ts.unwrap_or("unknown"),
                outcome = result.label(),
                "slack envelope handled"
            );
        }
        Err(dispatch_error) => {
            let provider_rejected = matches!(
                &dispatch_error,
                DispatchError::Handler(EventHandlerError::Translate(error))
                    if error.is_client_error()
            );
            error!(
                event_name = "ingress.slack.envelope_failed",
                correlation_id = %context.correlation_id,
                channel_id = channel_id.unwrap_or("unknown"),
                message_ts = message_ts.unwrap_or("unknown"),
                provider_rejected,
                error = %dispatch_error,
                "event dispatch failed; continuing socket loop"
            );
        }
    }
}

fn correlation_fields(envelope: &SlackEnvelope) -> (Option<&str>, Option<&str>) {
    match &envelope.event {
        SlackEvent::ReactionAdded(event) => {
            (Some(event.channel_id.as_str()), Some(event.message_ts.as_str()))
        }
        SlackEvent::Unsupported { .. } => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Arc;

    use async_trait::async_trait;
    use reacjilator_core::config::SocketConfig;
    use serde_json::json;
    use reqwest::Client;
    use tokio::sync::Mutex;
    use wiremock::{
        matchers::{header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::{
        correlation_fields, parse_socket_frame, ReconnectPolicy, SlackSocketTransport,
        SocketError, SocketFrame, SocketModeRunner, SocketTransport, TransportError,
    };
    use crate::{
        events::{
            EventContext, EventDispatcher, EventHandler, EventHandlerError, HandlerResult,
            ReactionAddedEvent, ReactionItemType, SlackEnvelope, SlackEvent, SlackEventType,
        },
        web::SlackApiError,
    };

    #[derive(Default)]
    struct ScriptedTransport {
        state: Mutex<ScriptedState>,
    }

    #[derive(Default)]
    struct ScriptedState {
        connect_results: VecDeque<Result<(), TransportError>>,
        envelopes: VecDeque<Result<Option<SlackEnvelope>, TransportError>>,
        connect_attempts: usize,
        acknowledgements: Vec<String>,
        disconnect_calls: usize,
    }

    impl ScriptedTransport {
        fn with_script(
            connect_results: Vec<Result<(), TransportError>>,
            envelopes: Vec<Result<Option<SlackEnvelope>, TransportError>>,
        ) -> Self {
            Self {
                state: Mutex::new(ScriptedState {
                    connect_results: connect_results.into(),
                    envelopes: envelopes.into(),
                    ..ScriptedState::default()
                }),
            }
        }

        async fn connect_attempts(&self) -> usize {
            self.state.lock().await.connect_attempts
        }

        async fn acknowledgements(&self) -> Vec<String> {
            self.state.lock().await.acknowledgements.clone()
        }

        async fn disconnect_calls(&self) -> usize {
            self.state.lock().await.disconnect_calls
        }
    }

    #[async_trait]
    impl SocketTransport for ScriptedTransport {
        async fn connect(&self) -> Result<(), TransportError> {
            let mut state = self.state.lock().await;
            state.connect_attempts += 1;
            state.connect_results.pop_front().unwrap_or(Ok(()))
        }

        async fn next_envelope(&self) -> Result<Option<SlackEnvelope>, TransportError> {
            let mut state = self.state.lock().await;
            state.envelopes.pop_front().unwrap_or(Ok(None))
        }

        async fn acknowledge(&self, envelope_id: &str) -> Result<(), TransportError> {
            let mut state = self.state.lock().await;
            state.acknowledgements.push(envelope_id.to_owned());
            Ok(())
        }

        async fn disconnect(&self) -> Result<(), TransportError> {
            let mut state = self.state.lock().await;
            state.disconnect_calls += 1;
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct RecordingHandler {
        seen: Arc<Mutex<Vec<String>>>,
        fail_on: Option<&'static str>,
    }

    #[async_trait]
    impl EventHandler for RecordingHandler {
        fn event_type(&self) -> SlackEventType {
            SlackEventType::ReactionAdded
        }

        async fn handle(
            &self,
            envelope: &SlackEnvelope,
            ctx: &EventContext,
        ) -> Result<HandlerResult, EventHandlerError> {
            let entry = format!("{}/{}", envelope.envelope_id, ctx.correlation_id);
            self.seen.lock().await.push(entry);
            if self.fail_on == Some(envelope.envelope_id.as_str()) {
                return Err(EventHandlerError::Post(SlackApiError::Api {
                    method: "chat.postMessage",
                    code: "not_in_channel".to_owned(),
                }));
            }
            Ok(HandlerResult::Ignored)
        }
    }

    fn no_delay(max_retries: u32) -> ReconnectPolicy {
        ReconnectPolicy { max_retries, base_delay_ms: 0, max_delay_ms: 0 }
    }

    fn unsupported_envelope(envelope_id: &str) -> SlackEnvelope {
        SlackEnvelope {
            envelope_id: envelope_id.to_owned(),
            event: SlackEvent::Unsupported { event_type: "test".to_owned() },
        }
    }

    fn reaction_envelope(envelope_id: &str) -> SlackEnvelope {
        SlackEnvelope {
            envelope_id: envelope_id.to_owned(),
            event: SlackEvent::ReactionAdded(ReactionAddedEvent {
                reaction: "flag-jp".to_owned(),
                user_id: "U1".to_owned(),
                item_type: ReactionItemType::Message,
                channel_id: "C1".to_owned(),
                message_ts: "1700000000.0001".to_owned(),
            }),
        }
    }

    #[tokio::test]
    async fn reconnects_after_initial_connect_failure() {
        let transport = Arc::new(ScriptedTransport::with_script(
            vec![Err(TransportError::Connect("network down".to_owned())), Ok(())],
            vec![Ok(Some(unsupported_envelope("env-1"))), Ok(None)],
        ));

        let runner =
            SocketModeRunner::new(transport.clone(), Arc::new(EventDispatcher::new()), no_delay(2));

        runner.start().await.expect("runner should recover");

        assert_eq!(transport.connect_attempts().await, 2);
        assert_eq!(transport.acknowledgements().await, vec!["env-1"]);
        assert_eq!(transport.disconnect_calls().await, 1);
    }

    #[tokio::test]
    async fn exhausted_retries_are_reported_as_fatal() {
        let transport = Arc::new(ScriptedTransport::with_script(
            vec![
                Err(TransportError::Connect("fail-1".to_owned())),
                Err(TransportError::Connect("fail-2".to_owned())),
                Err(TransportError::Connect("fail-3".to_owned())),
            ],
            vec![],
        ));

        let runner =
            SocketModeRunner::new(transport.clone(), Arc::new(EventDispatcher::new()), no_delay(2));

        let error = runner.start().await.expect_err("retries should be exhausted");
        assert!(matches!(
            error,
            SocketError::RetriesExhausted {
                attempts: 3,
                last_error: TransportError::Connect(ref message),
            } if message == "fail-3"
        ));
        assert_eq!(transport.connect_attempts().await, 3);
    }

    #[tokio::test]
    async fn successful_connect_resets_failure_count() {
        let transport = Arc::new(ScriptedTransport::with_script(
            vec![
                Err(TransportError::Connect("fail-1".to_owned())),
                Ok(()),
                Err(TransportError::Connect("fail-2".to_owned())),
                Ok(()),
            ],
            vec![Err(TransportError::Receive("slack requested disconnect".to_owned())), Ok(None)],
        ));

        let runner =
            SocketModeRunner::new(transport.clone(), Arc::new(EventDispatcher::new()), no_delay(2));

        runner.start().await.expect("runner should keep reconnecting");
        assert_eq!(transport.connect_attempts().await, 4);
    }

    #[tokio::test]
    async fn acknowledges_and_dispatches_each_envelope() {
        let transport = Arc::new(ScriptedTransport::with_script(
            vec![Ok(())],
            vec![
                Ok(Some(reaction_envelope("env-1"))),
                Ok(Some(unsupported_envelope("env-2"))),
                Ok(Some(reaction_envelope("env-3"))),
                Ok(None),
            ],
        ));
        let handler = RecordingHandler::default();
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(handler.clone());

        let runner = SocketModeRunner::new(transport.clone(), Arc::new(dispatcher), no_delay(0));
        runner.start().await.expect("runner");

        assert_eq!(transport.acknowledgements().await, vec!["env-1", "env-2", "env-3"]);
        let mut seen = handler.seen.lock().await.clone();
        seen.sort();
        assert_eq!(seen, vec!["env-1/env-1", "env-3/env-3"]);
    }

    #[tokio::test]
    async fn handler_failure_does_not_stop_later_envelopes() {
        let transport = Arc::new(ScriptedTransport::with_script(
            vec![Ok(())],
            vec![
                Ok(Some(reaction_envelope("env-1"))),
                Ok(Some(reaction_envelope("env-2"))),
                Ok(Some(reaction_envelope("env-3"))),
                Ok(None),
            ],
        ));
        let handler = RecordingHandler { fail_on: Some("env-1"), ..RecordingHandler::default() };
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(handler.clone());

        let runner = SocketModeRunner::new(transport.clone(), Arc::new(dispatcher), no_delay(0));
        runner.start().await.expect("handler errors are not transport errors");

        assert_eq!(transport.connect_attempts().await, 1);
        assert_eq!(transport.acknowledgements().await, vec!["env-1", "env-2", "env-3"]);
        let mut seen = handler.seen.lock().await.clone();
        seen.sort();
        assert_eq!(seen, vec!["env-1/env-1", "env-2/env-2", "env-3/env-3"]);
        assert_eq!(transport.disconnect_calls().await, 1);
    }

    #[tokio::test]
    async fn connections_open_uses_app_token_and_returns_socket_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/apps.connections.open"))
            .and(header("authorization", "Bearer xapp-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "url": "wss://wss-primary.slack.com/link/?ticket=abc"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let transport =
            SlackSocketTransport::new(Client::new(), server.uri(), "xapp-test".to_owned().into());

        let url = transport.open_connection_url().await.expect("socket url");
        assert_eq!(url, "wss://wss-primary.slack.com/link/?ticket=abc");
    }

    #[tokio::test]
    async fn connections_open_rejection_is_a_connect_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/apps.connections.open"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "ok": false, "error": "invalid_auth" })),
            )
            .mount(&server)
            .await;

        let transport =
            SlackSocketTransport::new(Client::new(), server.uri(), "xapp-bad".to_owned().into());

        let error = transport.connect().await.expect_err("rejected token");
        assert!(
            matches!(&error, TransportError::Connect(message) if message.contains("invalid_auth")),
            "unexpected error: {error}"
        );
    }

    #[test]
    fn backoff_doubles_up_to_cap() {
        let policy = ReconnectPolicy::from(&SocketConfig {
            max_retries: 5,
            base_delay_ms: 250,
            max_delay_ms: 1_000,
        });

        assert_eq!(policy.backoff(0).as_millis(), 250);
        assert_eq!(policy.backoff(1).as_millis(), 500);
        assert_eq!(policy.backoff(2).as_millis(), 1_000);
        assert_eq!(policy.backoff(30).as_millis(), 1_000);
    }

    #[test]
    fn parses_hello_and_disconnect_frames() {
        let hello = json!({ "type": "hello", "num_connections": 1 }).to_string();
        assert_eq!(parse_socket_frame(&hello).expect("hello"), SocketFrame::Hello);

        let disconnect = json!({ "type": "disconnect", "reason": "refresh_requested" }).to_string();
        assert_eq!(
            parse_socket_frame(&disconnect).expect("disconnect"),
            SocketFrame::Disconnect { reason: "refresh_requested".to_owned() }
        );
    }

    #[test]
    fn parses_events_api_envelope() {
        let frame = json!({
            "envelope_id": "env-9",
            "type": "events_api",
            "accepts_response_payload": false,
            "payload": {
                "type": "event_callback",
                "event": {
                    "type": "reaction_added",
                    "user": "U1",
                    "reaction": "fr",
                    "item": { "type": "message", "channel": "C1", "ts": "1700000000.0001" }
                }
            }
        })
        .to_string();

        let SocketFrame::Envelope(envelope) = parse_socket_frame(&frame).expect("frame") else {
            panic!("expected envelope");
        };
        assert_eq!(envelope.envelope_id, "env-9");
        assert_eq!(envelope.event.event_type(), SlackEventType::ReactionAdded);
        assert_eq!(correlation_fields(&envelope), (Some("C1"), Some("1700000000.0001")));
    }

    #[test]
    fn other_envelope_types_are_unsupported_but_acknowledgeable() {
        let frame = json!({
            "envelope_id": "env-10",
            "type": "slash_commands",
            "payload": { "command": "/translate" }
        })
        .to_string();

        assert_eq!(
            parse_socket_frame(&frame).expect("frame"),
            SocketFrame::Envelope(SlackEnvelope {
                envelope_id: "env-10".to_owned(),
                event: SlackEvent::Unsupported { event_type: "slash_commands".to_owned() },
            })
        );
        assert!(parse_socket_frame("not json").is_err());
    }
}
