//! Slash commands

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum UserCommands {
    #[command(description = "Открыть главное меню.")]
    Start,
    #[command(description = "Показать справку.")]
    Help,
    #[command(description = "Добавить доход.")]
    Income,
    #[command(description = "Добавить расход.")]
    Expense,
    #[command(description = "Отменить текущую операцию.")]
    Cancel,
    #[command(description = "Показать отчёты.")]
    Report,
    #[command(description = "Выгрузить операции в файлы.")]
    Export,
}
