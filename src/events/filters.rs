//! Filter event handler.
//!
//! Scans incoming messages for filter triggers and re-emits the stored
//! response of the first match.

use teloxide::prelude::*;
use teloxide::types::{InputFile, MessageId, ReplyParameters};
use tracing::debug;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::storage::{FilterEntry, FilterKind};

/// Check a message body against the chat's filters.
///
/// The body (text or caption) is matched case-insensitively against the
/// triggers in storage order; the first substring hit fires and the scan
/// stops, so at most one response is sent per message.
pub async fn check_filters(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
) -> anyhow::Result<()> {
    let body = match msg.text().or_else(|| msg.caption()) {
        Some(body) => body,
        None => return Ok(()),
    };

    let chat_id = msg.chat.id;

    // Clone the hit out of the store so the guard is released before any
    // await
    let hit = {
        let store = state.store.lock();
        store
            .find_match(&chat_id.to_string(), body)
            .map(|(trigger, entry)| (trigger.to_string(), entry.clone()))
    };

    let Some((trigger, entry)) = hit else {
        return Ok(());
    };

    debug!("Filter '{}' matched in chat {}", trigger, chat_id);

    send_filter_response(&bot, chat_id, &entry, msg.id).await
}

/// Re-emit a stored entry with the send primitive matching its kind.
async fn send_filter_response(
    bot: &ThrottledBot,
    chat_id: ChatId,
    entry: &FilterEntry,
    reply_to: MessageId,
) -> anyhow::Result<()> {
    let reply = ReplyParameters::new(reply_to);
    let data = entry.data.clone();

    match entry.kind {
        FilterKind::Text => {
            bot.send_message(chat_id, data)
                .reply_parameters(reply)
                .await?;
        }
        FilterKind::Photo => {
            bot.send_photo(chat_id, InputFile::file_id(data))
                .reply_parameters(reply)
                .await?;
        }
        FilterKind::Sticker => {
            bot.send_sticker(chat_id, InputFile::file_id(data))
                .reply_parameters(reply)
                .await?;
        }
        FilterKind::Video => {
            bot.send_video(chat_id, InputFile::file_id(data))
                .reply_parameters(reply)
                .await?;
        }
        FilterKind::Animation => {
            bot.send_animation(chat_id, InputFile::file_id(data))
                .reply_parameters(reply)
                .await?;
        }
        FilterKind::Document => {
            bot.send_document(chat_id, InputFile::file_id(data))
                .reply_parameters(reply)
                .await?;
        }
        FilterKind::Voice => {
            bot.send_voice(chat_id, InputFile::file_id(data))
                .reply_parameters(reply)
                .await?;
        }
        FilterKind::Audio => {
            bot.send_audio(chat_id, InputFile::file_id(data))
                .reply_parameters(reply)
                .await?;
        }
    }

    Ok(())
}
