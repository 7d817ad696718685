//! Handler for the report

use chrono::Utc;
use engine::EngineError;
use teloxide::{
    prelude::*,
    types::{ChatId, UserId},
};

use crate::{ConfigParameters, ui};

pub(super) async fn send_report(
    bot: &Bot,
    chat_id: ChatId,
    cfg: &ConfigParameters,
    user_id: UserId,
) -> ResponseResult<()> {
    let text = match cfg.engine.report(&user_id.to_string(), Utc::now()).await {
        Ok(report) => ui::render_report(&report),
        Err(EngineError::NoData) => ui::NO_DATA.to_string(),
        Err(err) => {
            tracing::error!("report for {user_id} failed: {err}");
            ui::REPORT_FAILED.to_string()
        }
    };

    bot.send_message(chat_id, text)
        .reply_markup(ui::main_menu())
        .await?;
    Ok(())
}
