//! /start and /help command plugin.

use teloxide::prelude::*;
use teloxide::types::ReplyParameters;

use crate::bot::dispatcher::ThrottledBot;

const USAGE_TEXT: &str = "Make your chat more lively with filters; \
The bot will reply to certain words!\n\n\
Filters are case insensitive; every time someone says your trigger words, \
the bot will reply something else! Can be used to create your own commands, \
if desired.\n\n\
Commands :\n\
- /filter <trigger> <reply>: Every time someone says \"trigger\", the bot \
will reply with \"sentence\". For multiple word filters, quote the trigger.\n\
- /filters: List all chat filters.\n\
- /stop <trigger>: Stop the bot from replying to \"trigger\".\n\
- /stopall: Stop ALL filters in the current chat. This cannot be undone.";

/// Handle the /start and /help commands.
pub async fn start_handler(bot: ThrottledBot, msg: Message) -> anyhow::Result<()> {
    bot.send_message(msg.chat.id, USAGE_TEXT)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;

    Ok(())
}
