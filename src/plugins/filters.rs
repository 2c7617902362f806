//! Filter command handlers.
//!
//! Commands for managing auto-reply filters: /filter, /filters, /stop,
//! /stopall. All persistent state lives in the [`FilterStore`]; every
//! handler is stateless relative to prior updates.

use teloxide::prelude::*;
use teloxide::types::ReplyParameters;
use tracing::info;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::storage::{FilterEntry, FilterKind};
use crate::utils::split_args;

/// Handle /filter command - add or overwrite a filter.
///
/// Usage:
/// - /filter <trigger> <reply>
/// - /filter "multi word trigger" <reply>
/// - /filter <trigger>, as a reply to the message to resend
pub async fn filter_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
) -> anyhow::Result<()> {
    let chat_id = msg.chat.id;
    let text = msg.text().unwrap_or("");

    let parts = match split_args(text) {
        Ok(parts) => parts,
        Err(e) => {
            bot.send_message(chat_id, format!("Error parsing arguments: {e}"))
                .reply_parameters(ReplyParameters::new(msg.id))
                .await?;
            return Ok(());
        }
    };

    // parts[0] is the command itself
    if parts.len() < 2 {
        bot.send_message(
            chat_id,
            "Usage: /filter <trigger> <reply>\n\
             For multiple word filters, quote the trigger.\n\
             Or reply to a message with: /filter <trigger>",
        )
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;
        return Ok(());
    }

    let trigger = parts[1].to_lowercase();
    let reply = (parts.len() >= 3).then(|| parts[2..].join(" "));

    let entry = if let Some(reply_msg) = msg.reply_to_message() {
        match entry_from_message(reply_msg, reply) {
            Some(entry) => entry,
            None => {
                bot.send_message(chat_id, "Unsupported message type for filter reply.")
                    .reply_parameters(ReplyParameters::new(msg.id))
                    .await?;
                return Ok(());
            }
        }
    } else {
        match reply {
            Some(reply) => FilterEntry::text(reply),
            None => {
                bot.send_message(
                    chat_id,
                    "Please provide a reply text, or reply to a message \
                     to use it as the filter response.",
                )
                .reply_parameters(ReplyParameters::new(msg.id))
                .await?;
                return Ok(());
            }
        }
    };

    {
        let mut store = state.store.lock();
        store.set(&chat_id.to_string(), trigger.clone(), entry);
        store.save()?;
    }

    info!("Added filter '{}' in chat {}", trigger, chat_id);

    bot.send_message(chat_id, format!("Filter saved: '{trigger}'"))
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;

    Ok(())
}

/// Handle /filters command - list all filters of the chat.
pub async fn filters_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
) -> anyhow::Result<()> {
    let chat_id = msg.chat.id;

    let filters = state.store.lock().list(&chat_id.to_string());

    if filters.is_empty() {
        bot.send_message(chat_id, "No filters set in this chat.")
            .reply_parameters(ReplyParameters::new(msg.id))
            .await?;
        return Ok(());
    }

    let mut text = String::from("Filters in this chat:\n");
    for (trigger, kind) in filters {
        text.push_str(&format!("- {} ({})\n", trigger, kind.as_str()));
    }

    bot.send_message(chat_id, text)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;

    Ok(())
}

/// Handle /stop command - remove one filter.
pub async fn stop_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
) -> anyhow::Result<()> {
    let chat_id = msg.chat.id;
    let text = msg.text().unwrap_or("");

    let parts = match split_args(text) {
        Ok(parts) => parts,
        Err(e) => {
            bot.send_message(chat_id, format!("Error parsing arguments: {e}"))
                .reply_parameters(ReplyParameters::new(msg.id))
                .await?;
            return Ok(());
        }
    };

    if parts.len() < 2 {
        bot.send_message(chat_id, "Usage: /stop <trigger>")
            .reply_parameters(ReplyParameters::new(msg.id))
            .await?;
        return Ok(());
    }

    let trigger = parts[1].to_lowercase();

    let removed = {
        let mut store = state.store.lock();
        let removed = store.remove(&chat_id.to_string(), &trigger);
        if removed {
            store.save()?;
        }
        removed
    };

    if removed {
        info!("Removed filter '{}' from chat {}", trigger, chat_id);

        bot.send_message(chat_id, format!("Filter stopped: '{trigger}'"))
            .reply_parameters(ReplyParameters::new(msg.id))
            .await?;
    } else {
        bot.send_message(chat_id, format!("Filter not found: '{trigger}'"))
            .reply_parameters(ReplyParameters::new(msg.id))
            .await?;
    }

    Ok(())
}

/// Handle /stopall command - remove all filters of the chat.
pub async fn stopall_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
) -> anyhow::Result<()> {
    let chat_id = msg.chat.id;

    let had_filters = {
        let mut store = state.store.lock();
        let had_filters = store.has_filters(&chat_id.to_string());
        if had_filters {
            store.clear(&chat_id.to_string());
            store.save()?;
        }
        had_filters
    };

    if had_filters {
        info!("Cleared all filters from chat {}", chat_id);

        bot.send_message(chat_id, "All filters stopped in this chat.")
            .reply_parameters(ReplyParameters::new(msg.id))
            .await?;
    } else {
        bot.send_message(chat_id, "No filters to stop.")
            .reply_parameters(ReplyParameters::new(msg.id))
            .await?;
    }

    Ok(())
}

/// Derive a filter entry from a replied-to message.
///
/// Explicit reply text given alongside the command overrides the target
/// message entirely. Otherwise the entry mirrors the message's content:
/// its own text, or the file id of its media. Returns `None` for content
/// the bot cannot resend.
fn entry_from_message(msg: &Message, fallback_text: Option<String>) -> Option<FilterEntry> {
    if let Some(text) = fallback_text {
        return Some(FilterEntry::text(text));
    }
    if let Some(text) = msg.text() {
        return Some(FilterEntry::text(text));
    }
    if let Some(photo) = msg.photo() {
        let largest = photo.iter().max_by_key(|p| p.width * p.height)?;
        return Some(FilterEntry::new(FilterKind::Photo, largest.file.id.clone()));
    }
    if let Some(sticker) = msg.sticker() {
        return Some(FilterEntry::new(FilterKind::Sticker, sticker.file.id.clone()));
    }
    if let Some(video) = msg.video() {
        return Some(FilterEntry::new(FilterKind::Video, video.file.id.clone()));
    }
    if let Some(animation) = msg.animation() {
        return Some(FilterEntry::new(
            FilterKind::Animation,
            animation.file.id.clone(),
        ));
    }
    if let Some(document) = msg.document() {
        return Some(FilterEntry::new(
            FilterKind::Document,
            document.file.id.clone(),
        ));
    }
    if let Some(voice) = msg.voice() {
        return Some(FilterEntry::new(FilterKind::Voice, voice.file.id.clone()));
    }
    if let Some(audio) = msg.audio() {
        return Some(FilterEntry::new(FilterKind::Audio, audio.file.id.clone()));
    }
    None
}
