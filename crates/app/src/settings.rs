//! Settings of the application.
//!
//! Sources, later ones winning:
//! - `settings.toml` in the working directory (or the file named by
//!   `CASHBOOK_SETTINGS`), optional
//! - `CASHBOOK_<SECTION>__<KEY>` environment variables
//! - `BOT_TOKEN` and `DATABASE_URL`

use std::env;

use config::{Config, ConfigError, Environment, File};
use engine::{Categories, DEFAULT_EXPENSE_CATEGORIES, DEFAULT_INCOME_CATEGORY, EngineError};
use serde::Deserialize;

const DEFAULT_SETTINGS_PATH: &str = "settings";
const DEFAULT_DATABASE_URL: &str = "sqlite:./cashbook.db?mode=rwc";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Database {
    pub url: String,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

impl Database {
    /// Connection string for sea-orm.
    ///
    /// `memory` selects an in-memory SQLite database and a bare path a SQLite
    /// file, created if missing. Full `sqlite:` and `postgres://` URLs are
    /// used as given.
    pub fn connection_url(&self) -> String {
        let url = self.url.trim();
        if url == "memory" {
            "sqlite::memory:".to_string()
        } else if url.starts_with("sqlite:")
            || url.starts_with("postgres://")
            || url.starts_with("postgresql://")
        {
            url.to_string()
        } else {
            format!("sqlite:{url}?mode=rwc")
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Telegram {
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Ledger {
    pub expense_categories: Vec<String>,
    pub income_category: String,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            expense_categories: DEFAULT_EXPENSE_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            income_category: DEFAULT_INCOME_CATEGORY.to_string(),
        }
    }
}

impl Ledger {
    pub fn categories(&self) -> Result<Categories, EngineError> {
        Categories::new(self.expense_categories.clone(), &self.income_category)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    #[serde(default)]
    pub database: Database,
    pub telegram: Option<Telegram>,
    #[serde(default)]
    pub ledger: Ledger,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let path =
            env::var("CASHBOOK_SETTINGS").unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_string());

        Config::builder()
            .add_source(File::with_name(&path).required(false))
            .add_source(
                Environment::with_prefix("CASHBOOK")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("ledger.expense_categories"),
            )
            .set_override_option("telegram.token", env::var("BOT_TOKEN").ok())?
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn from_toml(raw: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(raw, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn empty_file_uses_defaults() {
        let settings = from_toml("");

        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.database.connection_url(), DEFAULT_DATABASE_URL);
        assert!(settings.telegram.is_none());
        assert_eq!(
            settings.ledger.categories().unwrap(),
            Categories::default()
        );
    }

    #[test]
    fn sections_override_defaults() {
        let settings = from_toml(
            r#"
            [app]
            level = "debug"

            [telegram]
            token = "123:abc"

            [ledger]
            expense_categories = ["еда", "транспорт"]
            income_category = "зарплата"
            "#,
        );

        assert_eq!(settings.app.level, "debug");
        assert_eq!(settings.telegram.unwrap().token, "123:abc");
        let categories = settings.ledger.categories().unwrap();
        assert_eq!(categories.expense(), ["еда", "транспорт"]);
        assert_eq!(categories.income(), "зарплата");
    }

    #[test]
    fn empty_category_list_is_rejected() {
        let settings = from_toml("[ledger]\nexpense_categories = []\n");

        assert!(matches!(
            settings.ledger.categories(),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn database_urls_are_mapped() {
        let url = |raw: &str| {
            Database {
                url: raw.to_string(),
            }
            .connection_url()
        };

        assert_eq!(url("memory"), "sqlite::memory:");
        assert_eq!(url("data/cash.db"), "sqlite:data/cash.db?mode=rwc");
        assert_eq!(url("sqlite:x.db"), "sqlite:x.db");
        assert_eq!(
            url("postgres://u:p@localhost/cash"),
            "postgres://u:p@localhost/cash"
        );
    }
}
