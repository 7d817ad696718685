//! Handler for the spreadsheet export

use chrono::Utc;
use engine::EngineError;
use teloxide::{
    prelude::*,
    types::{ChatId, InputFile, UserId},
};

use crate::{
    ConfigParameters,
    export::{render_workbook, workbook_name},
    ui,
};

pub(super) async fn send_export(
    bot: &Bot,
    chat_id: ChatId,
    cfg: &ConfigParameters,
    user_id: UserId,
) -> ResponseResult<()> {
    let external_id = user_id.to_string();

    let data = match cfg.engine.export(&external_id, Utc::now()).await {
        Ok(data) => data,
        Err(EngineError::NoData) => {
            bot.send_message(chat_id, ui::NO_EXPORT_DATA).await?;
            return Ok(());
        }
        Err(err) => {
            tracing::error!("export for {user_id} failed: {err}");
            bot.send_message(chat_id, ui::EXPORT_FAILED).await?;
            return Ok(());
        }
    };

    let workbook = match render_workbook(&data) {
        Ok(workbook) => workbook,
        Err(err) => {
            tracing::error!("failed to render export for {user_id}: {err}");
            bot.send_message(chat_id, ui::EXPORT_FAILED).await?;
            return Ok(());
        }
    };

    bot.send_document(
        chat_id,
        InputFile::memory(workbook).file_name(workbook_name(&external_id)),
    )
    .caption("📊 Ваш отчёт в Excel")
    .await?;

    tracing::info!("export sent to {user_id}");
    Ok(())
}
