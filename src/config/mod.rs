//! Configuration module for the Parrot bot.
//!
//! Loads configuration from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::bail;

/// Default path of the persisted filter file, relative to the working
/// directory.
pub const DEFAULT_FILTERS_FILE: &str = "filters.json";

/// Placeholder value shipped in .env templates; treated the same as an
/// unset token.
const TOKEN_PLACEHOLDER: &str = "your_token_here";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot API token.
    pub bot_token: String,

    /// Path of the JSON file holding the filter store.
    pub filters_file: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Fails if `BOT_TOKEN` is unset, empty, or still the placeholder
    /// value; the caller treats that as a fatal startup condition.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let bot_token = match env::var("BOT_TOKEN") {
            Ok(token) if !token.is_empty() && token != TOKEN_PLACEHOLDER => token,
            _ => bail!("BOT_TOKEN is not set correctly."),
        };

        let filters_file = env::var("FILTERS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_FILTERS_FILE));

        Ok(Self {
            bot_token,
            filters_file,
        })
    }
}
