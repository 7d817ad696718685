use engine::{Outcome, Report, Summary, TransactionKind};
use teloxide::types::{KeyboardButton, KeyboardMarkup};

pub(crate) const ADD_INCOME: &str = "➕ Добавить доход";
pub(crate) const ADD_EXPENSE: &str = "➖ Добавить расход";
pub(crate) const REPORTS: &str = "📊 Отчёты";
pub(crate) const EXPORT: &str = "📥 Выгрузить Excel";
pub(crate) const CANCEL: &str = "❌ Отмена";

pub(crate) const NO_DATA: &str = "📭 Нет данных. Добавьте доход или расход.";
pub(crate) const NO_EXPORT_DATA: &str = "📭 Нет данных для выгрузки.";
pub(crate) const SAVE_FAILED: &str = "❌ Не удалось сохранить операцию. Попробуйте ещё раз.";
pub(crate) const REPORT_FAILED: &str = "❌ Не удалось сформировать отчёт. Попробуйте позже.";
pub(crate) const EXPORT_FAILED: &str = "❌ Не удалось создать файл выгрузки.";
pub(crate) const UNKNOWN_USER: &str = "Не удалось определить пользователя.";

/// Keyboard to attach to a reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Keyboard {
    Main,
    Categories(Vec<String>),
    Keep,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Reply {
    pub text: String,
    pub keyboard: Keyboard,
}

impl Reply {
    fn new(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard,
        }
    }
}

pub(crate) fn welcome_text() -> &'static str {
    "👋 Привет! Я помогу вести учёт доходов и расходов.\n\n\
     Добавляйте операции кнопками ниже, смотрите отчёты и выгружайте данные в файл."
}

pub(crate) fn help_text() -> &'static str {
    "Кнопки меню:\n\
     ➕ Добавить доход: записать поступление\n\
     ➖ Добавить расход: выбрать категорию и записать трату\n\
     📊 Отчёты: итоги за день, неделю и месяц\n\
     📥 Выгрузить Excel: все операции и сводка в одном файле\n\n\
     /cancel отменяет начатую операцию."
}

pub(crate) fn main_menu() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new(ADD_INCOME), KeyboardButton::new(ADD_EXPENSE)],
        vec![KeyboardButton::new(REPORTS), KeyboardButton::new(EXPORT)],
    ])
    .resize_keyboard()
}

/// One category per row, with a cancel button at the bottom.
pub(crate) fn categories_menu(categories: &[String]) -> KeyboardMarkup {
    let mut rows: Vec<Vec<KeyboardButton>> = categories
        .iter()
        .map(|c| vec![KeyboardButton::new(c.clone())])
        .collect();
    rows.push(vec![KeyboardButton::new(CANCEL)]);
    KeyboardMarkup::new(rows).resize_keyboard()
}

/// Reply for a dialogue outcome. `None` means the message is not answered.
pub(crate) fn outcome_reply(outcome: &Outcome) -> Option<Reply> {
    let reply = match outcome {
        Outcome::AskIncomeAmount => Reply::new(
            "Введите сумму дохода (только цифры, например: 15000.50):",
            Keyboard::Keep,
        ),
        Outcome::AskExpenseCategory(categories) => Reply::new(
            "Выберите категорию расхода:",
            Keyboard::Categories(categories.clone()),
        ),
        Outcome::AskExpenseAmount { category } => Reply::new(
            format!("Категория: {category}\nВведите сумму расхода:"),
            Keyboard::Keep,
        ),
        Outcome::Recorded(tx) => {
            let text = match tx.kind {
                TransactionKind::Income => format!("✅ Доход {} ₽ добавлен!", tx.amount),
                TransactionKind::Expense => format!(
                    "✅ Расход {} ₽ в категории '{}' добавлен!",
                    tx.amount, tx.category
                ),
            };
            Reply::new(text, Keyboard::Main)
        }
        Outcome::InvalidAmount(kind) => {
            let example = match kind {
                TransactionKind::Income => "25000",
                TransactionKind::Expense => "8500",
            };
            Reply::new(
                format!("❌ Неверный формат. Введите число, например: {example}"),
                Keyboard::Keep,
            )
        }
        Outcome::InvalidCategory(categories) => Reply::new(
            "Выберите категорию из списка:",
            Keyboard::Categories(categories.clone()),
        ),
        Outcome::StoreUnavailable => Reply::new(SAVE_FAILED, Keyboard::Keep),
        Outcome::Cancelled => Reply::new("Операция отменена.", Keyboard::Main),
        Outcome::Ignored => return None,
    };
    Some(reply)
}

pub fn render_report(report: &Report) -> String {
    let mut text = String::from("📊 Ваши финансовые отчёты\n");
    push_summary(&mut text, "Сегодня", &report.daily);
    push_summary(&mut text, "Последние 7 дней", &report.weekly);
    push_summary(&mut text, "Текущий месяц", &report.monthly);

    if !report.categories.is_empty() {
        text.push_str("\n🔹 Расходы по категориям\n");
        for c in &report.categories {
            text.push_str(&format!("• {}: {:.2} ₽\n", c.category, c.total));
        }
    }

    text
}

fn push_summary(text: &mut String, title: &str, summary: &Summary) {
    text.push_str(&format!(
        "\n🔹 {title}\nДоход: {:.2} ₽\nРасход: {:.2} ₽\nПрибыль: {:.2} ₽\n",
        summary.income,
        summary.expense,
        summary.profit()
    ));
}
