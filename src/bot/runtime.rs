//! Bot runtime - long polling runner.
//!
//! Connection handling, retries, and update delivery all live in
//! teloxide; this just hands control to the dispatcher.

use teloxide::prelude::*;
use tracing::info;

use super::dispatcher::ThrottledBot;

/// Run the bot with long polling until shutdown.
pub async fn run(
    mut dispatcher: Dispatcher<ThrottledBot, anyhow::Error, teloxide::dispatching::DefaultKey>,
) {
    info!("Starting bot in polling mode...");
    dispatcher.dispatch().await;
}
