//! Handlers for /start and /help

use teloxide::{prelude::*, types::ChatId};

use crate::ui;

pub(super) async fn send_welcome(bot: &Bot, chat_id: ChatId) -> ResponseResult<()> {
    bot.send_message(chat_id, ui::welcome_text())
        .reply_markup(ui::main_menu())
        .await?;
    Ok(())
}

pub(super) async fn send_help(bot: &Bot, chat_id: ChatId) -> ResponseResult<()> {
    bot.send_message(chat_id, ui::help_text())
        .reply_markup(ui::main_menu())
        .await?;
    Ok(())
}
