use engine::Command;

use crate::ui;

/// What a plain text message asks for, before it reaches the dialogue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MenuAction {
    Dialogue(Command),
    Report,
    Export,
}

/// Recognizes the main keyboard buttons and the cancel button.
///
/// Anything else is dialogue text: an amount or a category name.
pub(crate) fn parse_menu(text: &str) -> Option<MenuAction> {
    match text.trim() {
        ui::ADD_INCOME => Some(MenuAction::Dialogue(Command::AddIncome)),
        ui::ADD_EXPENSE => Some(MenuAction::Dialogue(Command::AddExpense)),
        ui::CANCEL => Some(MenuAction::Dialogue(Command::Cancel)),
        ui::REPORTS => Some(MenuAction::Report),
        ui::EXPORT => Some(MenuAction::Export),
        _ => None,
    }
}
