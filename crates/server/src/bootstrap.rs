use std::{sync::Arc, time::Duration};

use reacjilator_core::{
    config::{AppConfig, ConfigError},
    LanguageTable, ReactionResolver, TranslateError, Translator,
};
use reacjilator_slack::{
    events::{EventDispatcher, ReactionAddedHandler},
    socket::{ReconnectPolicy, SlackSocketTransport, SocketModeRunner},
    translate::ReactionTranslator,
    web::{SlackApi, SlackWebClient},
};
use reacjilator_translate::GoogleTranslator;
use reqwest::Client;
use thiserror::Error;
use tracing::info;

const SLACK_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub struct Application {
    pub config: AppConfig,
    pub handler_count: usize,
    pub slack_runner: SocketModeRunner,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("slack http client setup failed: {0}")]
    HttpClient(#[source] reqwest::Error),
    #[error("translation client setup failed: {0}")]
    Translator(#[source] TranslateError),
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let http =
        Client::builder().timeout(SLACK_HTTP_TIMEOUT).build().map_err(BootstrapError::HttpClient)?;
    let slack: Arc<dyn SlackApi> = Arc::new(SlackWebClient::new(
        http.clone(),
        &config.slack.api_base_url,
        config.slack.bot_token.clone(),
    ));
    let translator: Arc<dyn Translator> = Arc::new(
        GoogleTranslator::from_config(&config.translate)
            .await
            .map_err(BootstrapError::Translator)?,
    );

    let table = LanguageTable::builtin();
    info!(
        event_name = "system.bootstrap.language_table_loaded",
        correlation_id = "bootstrap",
        countries = table.len(),
        "language table loaded"
    );

    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(ReactionAddedHandler::new(ReactionTranslator::new(
        ReactionResolver::new(table),
        slack,
        translator,
    )));
    let handler_count = dispatcher.handler_count();

    let transport = Arc::new(SlackSocketTransport::new(
        http,
        &config.slack.api_base_url,
        config.slack.app_token.clone(),
    ));
    let slack_runner = SocketModeRunner::new(
        transport,
        Arc::new(dispatcher),
        ReconnectPolicy::from(&config.socket),
    );

    Ok(Application { config, handler_count, slack_runner })
}
