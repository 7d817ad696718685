use std::sync::Arc;

use migration::{Migrator, MigratorTrait};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "cashbook={level},telegram_bot={level},engine={level},migration={level}",
            level = settings.app.level
        ))
        .init();

    let Some(telegram) = settings.telegram else {
        return Err("missing telegram token: set BOT_TOKEN or [telegram] token".into());
    };
    let categories = settings.ledger.categories()?;

    let db = connect_database(&settings.database).await?;
    let engine = engine::Engine::builder()
        .database(db)
        .categories(categories)
        .build()?;

    let bot = telegram_bot::Bot::builder()
        .token(&telegram.token)
        .engine(Arc::new(engine))
        .build()?;
    bot.run().await;

    Ok(())
}

async fn connect_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = config.connection_url();
    tracing::info!("Connecting to {}...", url.split('@').next_back().unwrap_or(&url));

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
