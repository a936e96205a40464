use crate::error::Result;
use crate::slack::SocketModeClient;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::Span;

/// A long-running chat bot.
///
/// Implementations block in `run` until `cancel` fires or the underlying
/// connection gives up, and return whatever error ended the run.
#[async_trait]
pub trait Bot: Send + Sync {
    async fn run(&self, cancel: CancellationToken) -> Result<()>;
}

/// Bot backed by a Slack Socket Mode connection
pub struct SlackBot {
    client: SocketModeClient,
    span: Span,
}

pub fn new_slack_bot(client: SocketModeClient, span: Span) -> Box<dyn Bot> {
    Box::new(SlackBot { client, span })
}

#[async_trait]
impl Bot for SlackBot {
    async fn run(&self, cancel: CancellationToken) -> Result<()> {
        tracing::info!(parent: &self.span, "Starting Slack server");

        self.client.run_context(cancel).await
    }
}
