//! Telegram bot.
//!
//! The bot is the transport in front of the ledger engine: it keeps each
//! user's dialogue in memory, turns menu buttons and slash commands into
//! engine calls and renders the results as text and an xlsx workbook.

use std::sync::Arc;

use engine::Engine;
use teloxide::{prelude::*, utils::command::BotCommands};

pub use export::{ExportError, render_workbook, workbook_name};
pub use ui::render_report;

mod commands;
mod export;
mod handlers;
mod parsing;
mod state;
mod ui;

#[derive(Clone)]
pub struct ConfigParameters {
    engine: Arc<Engine>,
    sessions: state::SessionStore,
}

pub struct Bot {
    token: String,
    engine: Arc<Engine>,
}

impl Bot {
    pub fn new(token: &str, engine: Arc<Engine>) -> Result<Self, String> {
        if token.trim().is_empty() {
            return Err("telegram token is empty".to_string());
        }

        Ok(Self {
            token: token.to_string(),
            engine,
        })
    }

    pub fn builder() -> BotBuilder {
        BotBuilder::default()
    }

    pub async fn run(&self) {
        tracing::info!("Starting telegram bot...");

        let bot = teloxide::Bot::new(&self.token);
        if let Err(err) = bot
            .set_my_commands(commands::UserCommands::bot_commands())
            .await
        {
            tracing::warn!("failed to register bot commands: {err}");
        }

        let parameters = ConfigParameters {
            engine: self.engine.clone(),
            sessions: state::SessionStore::default(),
        };

        Dispatcher::builder(bot, handlers::schema())
            .dependencies(dptree::deps![parameters])
            .default_handler(|upd| async move {
                tracing::debug!("Unhandled update: {:?}", upd.kind);
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}

#[derive(Default)]
pub struct BotBuilder {
    token: String,
    engine: Option<Arc<Engine>>,
}

impl BotBuilder {
    pub fn token(mut self, token: &str) -> BotBuilder {
        self.token = token.to_string();
        self
    }

    pub fn engine(mut self, engine: Arc<Engine>) -> BotBuilder {
        self.engine = Some(engine);
        self
    }

    pub fn build(self) -> Result<Bot, String> {
        tracing::info!("Initializing telegram bot...");
        let engine = self
            .engine
            .ok_or_else(|| "telegram bot needs a ledger engine".to_string())?;
        Bot::new(&self.token, engine)
    }
}
