use std::{error::Error, fs, path::PathBuf};

use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use engine::{Amount, Categories, Engine, EngineError};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use telegram_bot::{render_report, render_workbook, workbook_name};

#[derive(Parser, Debug)]
#[command(name = "cashbook_admin")]
#[command(about = "Admin utilities for Cashbook (inspect and seed user ledgers)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./cashbook.db?mode=rwc"
    )]
    database_url: String,

    /// Expense categories accepted by `record`, comma separated.
    #[arg(long, value_delimiter = ',')]
    categories: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a chat user, printing its ledger id.
    User(UserArgs),
    /// Append one transaction to a user's ledger.
    Record(RecordArgs),
    /// Print the report the bot would send.
    Report(UserArgs),
    /// Write the export workbook into a directory.
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct UserArgs {
    #[arg(long)]
    external_id: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Income,
    Expense,
}

#[derive(Args, Debug)]
struct RecordArgs {
    #[arg(long)]
    external_id: String,
    #[arg(long, value_enum)]
    kind: Kind,
    #[arg(long)]
    amount: String,
    /// Required for expenses.
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[arg(long)]
    external_id: String,
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn build_engine(
    db: DatabaseConnection,
    categories: Vec<String>,
) -> Result<Engine, Box<dyn Error + Send + Sync>> {
    let mut builder = Engine::builder().database(db);
    if !categories.is_empty() {
        let defaults = Categories::default();
        builder = builder.categories(Categories::new(categories, defaults.income())?);
    }
    Ok(builder.build()?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = build_engine(db, cli.categories)?;

    match cli.command {
        Command::User(args) => {
            let user_id = engine.ensure_user(&args.external_id).await?;
            println!("user {} has ledger id {user_id}", args.external_id);
        }
        Command::Record(args) => {
            let amount = Amount::parse(&args.amount)?;
            let description = args.description.as_deref();
            let tx = match (args.kind, args.category.as_deref()) {
                (Kind::Income, _) => {
                    engine
                        .income(&args.external_id, amount, description, Utc::now())
                        .await?
                }
                (Kind::Expense, Some(category)) => {
                    engine
                        .expense(&args.external_id, amount, category, description, Utc::now())
                        .await?
                }
                (Kind::Expense, None) => {
                    eprintln!("--category is required for expenses");
                    std::process::exit(2);
                }
            };
            println!(
                "recorded {} {} in '{}' (#{})",
                tx.kind.as_str(),
                tx.amount,
                tx.category,
                tx.id
            );
        }
        Command::Report(args) => match engine.report(&args.external_id, Utc::now()).await {
            Ok(report) => println!("{}", render_report(&report)),
            Err(EngineError::NoData) => {
                eprintln!("no data for user: {}", args.external_id);
                std::process::exit(1);
            }
            Err(err) => return Err(err.into()),
        },
        Command::Export(args) => {
            let data = match engine.export(&args.external_id, Utc::now()).await {
                Ok(data) => data,
                Err(EngineError::NoData) => {
                    eprintln!("no data for user: {}", args.external_id);
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            };
            let workbook = render_workbook(&data)?;

            fs::create_dir_all(&args.out)?;
            let path = args.out.join(workbook_name(&args.external_id));
            fs::write(&path, workbook)?;

            println!("wrote {}", path.display());
        }
    }

    Ok(())
}
