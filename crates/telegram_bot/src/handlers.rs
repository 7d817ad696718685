use engine::Input;
use teloxide::{
    RequestError,
    dispatching::{HandlerExt, UpdateHandler},
    prelude::*,
};

use crate::{
    ConfigParameters,
    commands::UserCommands,
    parsing::{MenuAction, parse_menu},
    ui,
};

mod entry;
mod exports;
mod start;
mod statistics;

/// Slash commands first, then every other message.
pub(crate) fn schema() -> UpdateHandler<RequestError> {
    Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<UserCommands>()
                .endpoint(handle_command),
        )
        .branch(dptree::endpoint(handle_message))
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cfg: ConfigParameters,
    cmd: UserCommands,
) -> ResponseResult<()> {
    let chat_id = msg.chat.id;
    let Some(user_id) = msg.from.as_ref().map(|user| user.id) else {
        bot.send_message(chat_id, ui::UNKNOWN_USER).await?;
        return Ok(());
    };

    match cmd {
        UserCommands::Start => start::send_welcome(&bot, chat_id).await,
        UserCommands::Help => start::send_help(&bot, chat_id).await,
        UserCommands::Income => {
            let input = Input::Command(engine::Command::AddIncome);
            entry::handle_input(&bot, chat_id, &cfg, user_id, input).await
        }
        UserCommands::Expense => {
            let input = Input::Command(engine::Command::AddExpense);
            entry::handle_input(&bot, chat_id, &cfg, user_id, input).await
        }
        UserCommands::Cancel => {
            let input = Input::Command(engine::Command::Cancel);
            entry::handle_input(&bot, chat_id, &cfg, user_id, input).await
        }
        UserCommands::Report => statistics::send_report(&bot, chat_id, &cfg, user_id).await,
        UserCommands::Export => exports::send_export(&bot, chat_id, &cfg, user_id).await,
    }
}

async fn handle_message(bot: Bot, msg: Message, cfg: ConfigParameters) -> ResponseResult<()> {
    let chat_id = msg.chat.id;
    let Some(user_id) = msg.from.as_ref().map(|user| user.id) else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        tracing::info!("{user_id}: non-text message ignored");
        return Ok(());
    };

    match parse_menu(text) {
        Some(MenuAction::Dialogue(command)) => {
            entry::handle_input(&bot, chat_id, &cfg, user_id, Input::Command(command)).await
        }
        Some(MenuAction::Report) => statistics::send_report(&bot, chat_id, &cfg, user_id).await,
        Some(MenuAction::Export) => exports::send_export(&bot, chat_id, &cfg, user_id).await,
        None => entry::handle_input(&bot, chat_id, &cfg, user_id, Input::Text(text)).await,
    }
}
