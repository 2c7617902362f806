//! Event handler system.
//!
//! Add new event handlers by:
//! 1. Creating a new file in this directory
//! 2. Adding `pub mod your_event;` below
//! 3. Adding the handler to `message_event_handler()`

pub mod filters;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

/// Build the passive message handler.
///
/// Fires for text and caption messages that are not commands; commands
/// are consumed by the command branch before this one.
pub fn message_event_handler() -> UpdateHandler<anyhow::Error> {
    dptree::filter(|msg: Message| {
        msg.text()
            .or_else(|| msg.caption())
            .map(|body| !body.starts_with('/'))
            .unwrap_or(false)
    })
    .endpoint(filters::check_filters)
}
