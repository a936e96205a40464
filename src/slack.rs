use crate::config::SlackConfig;
use crate::debug_log::{DebugLogger, ProtocolLog};
use crate::error::Result;
use slack_morphism::prelude::*;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, Span};

type CallbackResult<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// State shared with the socket-mode callbacks
#[derive(Clone)]
pub struct BotState {
    pub bot_token: SlackApiToken,
    pub channel_id: SlackChannelId,
    pub log: DebugLogger,
}

/// Socket Mode connection to Slack, not yet opened
pub struct SocketModeClient {
    app_token: SlackApiToken,
    state: BotState,
}

/// Build a Socket Mode client from configuration.
///
/// Pure construction: credentials are only checked by Slack once the
/// connection is opened in [`SocketModeClient::run_context`].
pub fn new_slack_client(config: &SlackConfig, span: &Span) -> SocketModeClient {
    let log = DebugLogger::scoped(span);

    let state = BotState {
        bot_token: SlackApiToken::new(SlackApiTokenValue::new(config.auth_token().to_string())),
        channel_id: SlackChannelId::new(config.channel_id().to_string()),
        log,
    };

    SocketModeClient {
        app_token: SlackApiToken::new(SlackApiTokenValue::new(config.app_token().to_string())),
        state,
    }
}

impl SocketModeClient {
    pub fn channel_id(&self) -> &SlackChannelId {
        &self.state.channel_id
    }

    /// Open the socket connection and serve events until `cancel` fires.
    ///
    /// Both tokens are checked against Slack before the listener starts and a
    /// rejection (or an unreachable API) is returned as `BotError::Slack`.
    /// Once serving, reconnects and keep-alives are handled by slack-morphism.
    /// Cancelling at any point returns `Ok(())`.
    pub async fn run_context(&self, cancel: CancellationToken) -> Result<()> {
        if cancel.is_cancelled() {
            return Ok(());
        }

        self.serve(cancel)
            .instrument(self.state.log.span().clone())
            .await
    }

    async fn serve(&self, cancel: CancellationToken) -> Result<()> {
        tracing::debug!("Opening Slack socket connection");

        let client = Arc::new(SlackClient::new(SlackClientHyperConnector::new()?));

        let app_session = client.open_session(&self.app_token);
        let open_request = SlackApiAppsConnectionOpenRequest::new();
        tokio::select! {
            result = app_session.apps_connections_open(&open_request) => {
                result?;
            }
            () = cancel.cancelled() => return Ok(()),
        }
        self.state.log.output(1, "app-level token accepted")?;

        let bot_session = client.open_session(&self.state.bot_token);
        let auth = tokio::select! {
            result = bot_session.auth_test() => result?,
            () = cancel.cancelled() => return Ok(()),
        };
        self.state.log.output(
            1,
            &format!("authenticated as {}, channel {}", auth.user_id.0, self.state.channel_id.0),
        )?;

        let environment = Arc::new(
            SlackClientEventsListenerEnvironment::new(client.clone())
                .with_error_handler(on_listener_error)
                .with_user_state(self.state.clone()),
        );

        let callbacks = SlackSocketModeListenerCallbacks::new()
            .with_push_events(on_push_event)
            .with_interaction_events(on_interaction_event);

        let listener = SlackClientSocketModeListener::new(
            &SlackClientSocketModeConfig::new(),
            environment,
            callbacks,
        );

        listener.listen_for(&self.app_token).await?;
        listener.start().await;
        cancel.cancelled().await;

        self.state.log.output(1, "shutting down socket listener")?;
        listener.shutdown().await;

        Ok(())
    }
}

async fn on_push_event(
    event: SlackPushEventCallback,
    _client: Arc<SlackHyperClient>,
    states: SlackClientEventsUserState,
) -> CallbackResult<()> {
    let states = states.read().await;
    if let Some(state) = states.get_user_state::<BotState>() {
        state.log.output(1, &format!("push event: {:?}", event.event))?;
    }
    Ok(())
}

async fn on_interaction_event(
    event: SlackInteractionEvent,
    _client: Arc<SlackHyperClient>,
    states: SlackClientEventsUserState,
) -> CallbackResult<()> {
    let states = states.read().await;
    if let Some(state) = states.get_user_state::<BotState>() {
        state.log.output(1, &format!("interaction event: {:?}", event))?;
    }
    Ok(())
}

fn on_listener_error(
    err: Box<dyn std::error::Error + Send + Sync>,
    _client: Arc<SlackHyperClient>,
    states: SlackClientEventsUserState,
) -> HttpStatusCode {
    let storage = states.try_read().ok();
    let state = storage
        .as_ref()
        .and_then(|storage| storage.get_user_state::<BotState>());
    report_listener_error(state, err.as_ref());
    HttpStatusCode::OK
}

fn report_listener_error(state: Option<&BotState>, err: &(dyn std::error::Error + Send + Sync)) {
    let message = format!("socket listener error: {}", err);
    match state {
        Some(state) => state.log.debug(&message),
        // State is briefly write-locked while the listener registers it
        None => tracing::debug!("{}", message),
    }
}
