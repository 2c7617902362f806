//! One-off connectivity check against the Telegram API.
//!
//! Usage: cargo run --bin check_connectivity
//!
//! Loads BOT_TOKEN from the environment (or .env) and calls getMe. A
//! disposable diagnostic, not part of the bot runtime.

use teloxide::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let token = match std::env::var("BOT_TOKEN") {
        Ok(token) if !token.is_empty() => token,
        _ => {
            eprintln!("BOT_TOKEN is not set.");
            std::process::exit(1);
        }
    };

    println!("Checking connectivity with getMe (token hidden)...");

    let bot = Bot::new(token);
    match bot.get_me().await {
        Ok(me) => println!("OK: connected as @{}", me.username()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
