//! Parrot - Keyword auto-reply filter bot.
//!
//! Replies automatically in group chats when a configured trigger word or
//! phrase appears in a message. Filters are managed with chat commands and
//! persisted to a flat JSON file.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `storage` - JSON-file filter store
//! - `bot` - Core bot functionality (with Throttle for API rate limiting)
//! - `plugins` - Command handlers
//! - `events` - Passive message handlers (trigger scanning)
//! - `utils` - Utility functions

mod bot;
mod config;
mod events;
mod plugins;
mod storage;
mod utils;

use std::sync::Arc;

use parking_lot::Mutex;
use teloxide::adaptors::throttle::Limits;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use storage::FilterStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // Initialize logging with sensible defaults
    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("parrot=info,teloxide=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting Parrot bot...");

    // Load configuration; a missing or placeholder token is fatal
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!(
                "Please edit the .env file and replace 'your_token_here' \
                 with your actual Telegram bot token."
            );
            std::process::exit(1);
        }
    };
    info!("Configuration loaded successfully");

    // Load filters into memory
    let store = FilterStore::load(&config.filters_file);
    info!(
        "Filter store loaded from {} ({} chats)",
        config.filters_file.display(),
        store.chat_count()
    );
    let store = Arc::new(Mutex::new(store));

    // Initialize bot with Throttle for automatic rate limiting
    let bot = Bot::new(&config.bot_token).throttle(Limits::default());
    info!("Bot initialized with rate limiting (Throttle)");

    // Get bot info
    let me = bot.get_me().await?;
    info!("Bot username: @{}", me.username());

    // Build dispatcher
    let dispatcher = bot::build_dispatcher(bot, store);

    // Run the bot
    bot::run(dispatcher).await;

    Ok(())
}
