//! Message dispatcher setup.
//!
//! Builds the dispatcher with the command handlers and the passive
//! message scanner.

use std::sync::Arc;

use parking_lot::Mutex;
use teloxide::adaptors::Throttle;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

use crate::events;
use crate::plugins;
use crate::storage::FilterStore;

/// Bot type with Throttle adaptor for automatic rate limiting.
pub type ThrottledBot = Throttle<Bot>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Filter store. teloxide may dispatch updates concurrently, so the
    /// store is guarded by a mutex; handlers never hold the guard across
    /// an await point.
    pub store: Arc<Mutex<FilterStore>>,
}

/// Build the dispatcher with all handlers.
pub fn build_dispatcher(
    bot: ThrottledBot,
    store: Arc<Mutex<FilterStore>>,
) -> Dispatcher<ThrottledBot, anyhow::Error, teloxide::dispatching::DefaultKey> {
    let state = AppState { store };

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
}

/// Build the handler schema.
///
/// Commands are tried first; everything else falls through to the passive
/// trigger scan.
fn schema() -> UpdateHandler<anyhow::Error> {
    use teloxide::dispatching::UpdateFilterExt;

    let message_handler = Update::filter_message()
        .branch(plugins::command_handler())
        .branch(events::message_event_handler());

    dptree::entry().branch(message_handler)
}
