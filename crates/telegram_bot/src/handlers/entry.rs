//! Income and expense dialogue

use chrono::Utc;
use engine::Input;
use teloxide::{
    prelude::*,
    types::{ChatId, UserId},
};

use crate::{
    ConfigParameters,
    ui::{self, Keyboard, Reply},
};

/// Feeds one input to the user's dialogue and answers with the outcome.
pub(super) async fn handle_input(
    bot: &Bot,
    chat_id: ChatId,
    cfg: &ConfigParameters,
    user_id: UserId,
    input: Input<'_>,
) -> ResponseResult<()> {
    let mut state = cfg.sessions.get(user_id).await;
    let outcome = cfg
        .engine
        .handle(&user_id.to_string(), &mut state, input, Utc::now())
        .await;
    cfg.sessions.set(user_id, state).await;

    match ui::outcome_reply(&outcome) {
        Some(reply) => send_reply(bot, chat_id, reply).await,
        None => {
            if let Input::Text(text) = input {
                log_unhandled(user_id, text);
            }
            Ok(())
        }
    }
}

/// Text no dialogue is waiting for is only logged.
fn log_unhandled(user_id: UserId, text: &str) {
    tracing::info!("{user_id}: message outside a dialogue: {text:?}");
}

async fn send_reply(bot: &Bot, chat_id: ChatId, reply: Reply) -> ResponseResult<()> {
    let request = bot.send_message(chat_id, reply.text);
    match reply.keyboard {
        Keyboard::Main => request.reply_markup(ui::main_menu()).await?,
        Keyboard::Categories(categories) => {
            request
                .reply_markup(ui::categories_menu(&categories))
                .await?
        }
        Keyboard::Keep => request.await?,
    };
    Ok(())
}
