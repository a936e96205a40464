mod bot;
mod config;
mod debug_log;
mod error;
mod slack;
#[cfg(test)]
mod test_support;

use bot::new_slack_bot;
use config::load_config;
use slack::new_slack_client;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Protocol debug output stays on in every environment
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("slack_socket_bot=debug".parse()?)
                .add_directive("slack_morphism=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .init();

    tracing::info!("Starting slack-socket-bot v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    tracing::debug!(?config, "Loaded configuration");

    let span = tracing::info_span!("transport");
    let client = new_slack_client(&config, &span);
    tracing::info!("Slack client ready for channel {}", client.channel_id().0);
    let bot = new_slack_bot(client, span);

    let cancel = CancellationToken::new();
    spawn_signal_handler(cancel.clone());

    bot.run(cancel).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn spawn_signal_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = tokio::signal::ctrl_c() => tracing::info!("Received SIGINT, shutting down..."),
                        _ = sigterm.recv() => tracing::info!("Received SIGTERM, shutting down..."),
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to register SIGTERM handler: {}", e);
                    let _ = tokio::signal::ctrl_c().await;
                    tracing::info!("Received SIGINT, shutting down...");
                }
            }
        }
        #[cfg(not(unix))]
        {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        cancel.cancel();
    });
}
