//! Plugin system for command handlers.
//!
//! Add new plugins by:
//! 1. Creating a new file in this directory
//! 2. Adding `pub mod your_plugin;` below
//! 3. Adding the handler to `command_handler()`

pub mod filters;
pub mod start;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

/// All bot commands.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Show usage")]
    Start,

    #[command(description = "Show usage")]
    Help,

    // Filter commands
    #[command(description = "Add an auto-reply filter")]
    Filter(String),

    #[command(description = "List filters in this chat")]
    Filters,

    #[command(description = "Remove a filter")]
    Stop(String),

    #[command(description = "Remove ALL filters in this chat")]
    Stopall,
}

/// Build the combined command handler.
pub fn command_handler() -> UpdateHandler<anyhow::Error> {
    use dptree::case;

    teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(start::start_handler))
        .branch(case![Command::Help].endpoint(start::start_handler))
        // Filters
        .branch(case![Command::Filter(args)].endpoint(filters::filter_command))
        .branch(case![Command::Filters].endpoint(filters::filters_command))
        .branch(case![Command::Stop(args)].endpoint(filters::stop_command))
        .branch(case![Command::Stopall].endpoint(filters::stopall_command))
}
