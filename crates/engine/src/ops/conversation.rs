use chrono::{DateTime, Utc};

use crate::{
    Amount, Command, DialogueState, EngineError, Input, LedgerStore, Outcome, ResultEngine,
    Transaction, TransactionKind,
};

use super::Engine;

impl<S: LedgerStore> Engine<S> {
    /// Advances the dialogue of `external_id` by one input.
    ///
    /// `state` is only written on a transition: invalid input and storage
    /// failures leave it as it was, so the user can simply answer again.
    pub async fn handle(
        &self,
        external_id: &str,
        state: &mut DialogueState,
        input: Input<'_>,
        now: DateTime<Utc>,
    ) -> Outcome {
        let text = match input {
            Input::Command(Command::AddIncome) => {
                *state = DialogueState::AwaitingIncomeAmount;
                return Outcome::AskIncomeAmount;
            }
            Input::Command(Command::AddExpense) => {
                *state = DialogueState::AwaitingExpenseCategory;
                return Outcome::AskExpenseCategory(self.categories.expense().to_vec());
            }
            Input::Command(Command::Cancel) => {
                *state = DialogueState::Idle;
                return Outcome::Cancelled;
            }
            Input::Text(text) => text,
        };

        match state {
            DialogueState::Idle => Outcome::Ignored,
            DialogueState::AwaitingIncomeAmount => {
                let recorded = match Amount::parse(text) {
                    Ok(amount) => self.income(external_id, amount, None, now).await,
                    Err(err) => Err(err),
                };
                self.finish(state, TransactionKind::Income, recorded)
            }
            DialogueState::AwaitingExpenseCategory => match self.categories.find_expense(text) {
                Some(category) => {
                    let category = category.to_string();
                    *state = DialogueState::AwaitingExpenseAmount {
                        category: category.clone(),
                    };
                    Outcome::AskExpenseAmount { category }
                }
                None => {
                    tracing::warn!("{external_id}: category {text:?} is not configured");
                    Outcome::InvalidCategory(self.categories.expense().to_vec())
                }
            },
            DialogueState::AwaitingExpenseAmount { category } => {
                let recorded = match Amount::parse(text) {
                    Ok(amount) => {
                        self.expense(external_id, amount, category, None, now)
                            .await
                    }
                    Err(err) => Err(err),
                };
                self.finish(state, TransactionKind::Expense, recorded)
            }
        }
    }

    fn finish(
        &self,
        state: &mut DialogueState,
        kind: TransactionKind,
        recorded: ResultEngine<Transaction>,
    ) -> Outcome {
        match recorded {
            Ok(tx) => {
                *state = DialogueState::Idle;
                Outcome::Recorded(tx)
            }
            Err(EngineError::InvalidAmount(reason)) => {
                tracing::warn!("rejected {} amount: {reason}", kind.as_str());
                Outcome::InvalidAmount(kind)
            }
            // The category was validated when the dialogue stored it, so
            // this only happens if the configuration changed in between.
            Err(EngineError::InvalidCategory(category)) => {
                tracing::warn!("category {category:?} is no longer configured");
                *state = DialogueState::AwaitingExpenseCategory;
                Outcome::InvalidCategory(self.categories.expense().to_vec())
            }
            Err(_) => Outcome::StoreUnavailable,
        }
    }
}
