use std::str::FromStr;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{
    Amount, CategoryTotal, Command, DialogueState, Engine, EngineError, Input, LedgerStore,
    NewTransaction, Outcome, Summary, TimeWindow, TransactionKind,
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db.clone()).build().unwrap();
    (engine, db)
}

fn dec(raw: &str) -> Decimal {
    Decimal::from_str(raw).unwrap()
}

fn amount(raw: &str) -> Amount {
    Amount::parse(raw).unwrap()
}

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn summary(income: &str, expense: &str) -> Summary {
    Summary {
        income: dec(income),
        expense: dec(expense),
    }
}

async fn count(db: &DatabaseConnection, table: &str) -> i64 {
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_string(
            backend,
            format!("SELECT COUNT(*) AS n FROM {table}"),
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get("", "n").unwrap()
}

#[tokio::test]
async fn ensure_user_is_idempotent() {
    let (engine, db) = engine_with_db().await;

    let first = engine.ensure_user("100500").await.unwrap();
    let second = engine.ensure_user("100500").await.unwrap();
    let other = engine.ensure_user("777").await.unwrap();

    assert_eq!(first, second);
    assert_ne!(first, other);
    assert_eq!(count(&db, "users").await, 2);
    assert_eq!(engine.resolve_internal_id("100500").await.unwrap(), Some(first));
}

#[tokio::test]
async fn concurrent_ensures_create_one_user() {
    let (engine, db) = engine_with_db().await;

    let (a, b, c) = tokio::join!(
        engine.ensure_user("42"),
        engine.ensure_user("42"),
        engine.ensure_user("42"),
    );

    assert_eq!(a.unwrap(), b.unwrap());
    assert_eq!(count(&db, "users").await, 1);
    assert!(c.is_ok());
}

#[tokio::test]
async fn unknown_user_resolves_to_none() {
    let (engine, db) = engine_with_db().await;

    assert_eq!(engine.resolve_internal_id("nobody").await.unwrap(), None);
    assert_eq!(count(&db, "users").await, 0);
}

#[tokio::test]
async fn append_creates_user_lazily() {
    let (engine, db) = engine_with_db().await;

    let tx = engine
        .expense("5", amount("120.40"), "продукты", Some(" хлеб "), Utc::now())
        .await
        .unwrap();

    let user_id = engine.resolve_internal_id("5").await.unwrap();
    assert_eq!(user_id, Some(tx.user_id));
    assert_eq!(tx.description.as_deref(), Some("хлеб"));
    assert_eq!(count(&db, "transactions").await, 1);
}

#[tokio::test]
async fn missing_description_is_stored_as_empty_text() {
    let (engine, db) = engine_with_db().await;

    let tx = engine
        .income("5", amount("10"), Some("   "), Utc::now())
        .await
        .unwrap();
    assert_eq!(tx.description, None);

    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_string(
            backend,
            "SELECT description FROM transactions".to_string(),
        ))
        .await
        .unwrap()
        .unwrap();
    let stored: String = row.try_get("", "description").unwrap();
    assert_eq!(stored, "");
}

#[tokio::test]
async fn amounts_round_trip_exactly() {
    let (engine, _db) = engine_with_db().await;

    engine
        .income("5", amount("1.23456"), None, Utc::now())
        .await
        .unwrap();
    let user_id = engine.require_user("5").await.unwrap();
    let rows = engine
        .store()
        .transactions(user_id, TimeWindow::all())
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount.value(), dec("1.23456"));
    assert_eq!(rows[0].kind, TransactionKind::Income);
}

#[tokio::test]
async fn expense_outside_category_set_is_rejected() {
    let (engine, db) = engine_with_db().await;

    let err = engine
        .expense("5", amount("10"), "casino", None, Utc::now())
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::InvalidCategory("casino".to_string()));
    assert_eq!(count(&db, "users").await, 0);
}

#[tokio::test]
async fn failed_insert_leaves_no_orphan_user() {
    let (engine, db) = engine_with_db().await;
    let backend = db.get_database_backend();
    db.execute(Statement::from_string(
        backend,
        "DROP TABLE transactions".to_string(),
    ))
    .await
    .unwrap();

    let err = engine
        .income("13", amount("10"), None, Utc::now())
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::StoreUnavailable);
    assert_eq!(count(&db, "users").await, 0);
}

#[tokio::test]
async fn windows_only_sum_their_rows() {
    let (engine, _db) = engine_with_db().await;
    let now = at(2025, 3, 10, 12);

    // today
    engine.income("1", amount("1000"), None, at(2025, 3, 10, 1)).await.unwrap();
    engine
        .expense("1", amount("200"), "аренда", None, at(2025, 3, 10, 11))
        .await
        .unwrap();
    // inside the week, same month
    engine.income("1", amount("50"), None, at(2025, 3, 3, 0)).await.unwrap();
    // outside the week, same month
    engine
        .expense("1", amount("30"), "прочее", None, at(2025, 3, 2, 23))
        .await
        .unwrap();
    // previous month
    engine.income("1", amount("7"), None, at(2025, 2, 28, 10)).await.unwrap();
    // another user
    engine.income("2", amount("99999"), None, at(2025, 3, 10, 2)).await.unwrap();

    let user_id = engine.require_user("1").await.unwrap();

    assert_eq!(
        engine.daily_summary(user_id, now).await.unwrap(),
        summary("1000", "200")
    );
    assert_eq!(
        engine.weekly_summary(user_id, now).await.unwrap(),
        summary("1050", "200")
    );
    assert_eq!(
        engine.monthly_summary(user_id, now).await.unwrap(),
        summary("1050", "230")
    );
    assert_eq!(
        engine.monthly_summary(user_id, now).await.unwrap().profit(),
        dec("820")
    );
}

#[tokio::test]
async fn empty_windows_are_zero() {
    let (engine, _db) = engine_with_db().await;
    engine
        .income("1", amount("10"), None, at(2024, 1, 1, 0))
        .await
        .unwrap();
    let user_id = engine.require_user("1").await.unwrap();
    let now = at(2025, 6, 15, 0);

    let zero = Summary::default();
    assert_eq!(engine.daily_summary(user_id, now).await.unwrap(), zero);
    assert_eq!(engine.weekly_summary(user_id, now).await.unwrap(), zero);
    assert_eq!(engine.monthly_summary(user_id, now).await.unwrap(), zero);
}

#[tokio::test]
async fn income_recorded_today_shows_in_daily_summary() {
    let (engine, _db) = engine_with_db().await;
    let now = Utc::now();
    let mut state = DialogueState::default();

    engine
        .handle("9", &mut state, Input::Command(Command::AddIncome), now)
        .await;
    let outcome = engine
        .handle("9", &mut state, Input::Text("15000.50"), now)
        .await;
    assert!(matches!(outcome, Outcome::Recorded(_)));

    let user_id = engine.require_user("9").await.unwrap();
    let daily = engine.daily_summary(user_id, now).await.unwrap();
    assert_eq!(daily.as_tuple(), (dec("15000.50"), dec("0"), dec("15000.50")));
}

#[tokio::test]
async fn rent_then_income_month_and_breakdown() {
    let (engine, _db) = engine_with_db().await;
    let now = Utc::now();

    engine
        .expense("3", amount("8500"), "аренда", None, now)
        .await
        .unwrap();
    engine.income("3", amount("20000"), None, now).await.unwrap();

    let user_id = engine.require_user("3").await.unwrap();
    let monthly = engine.monthly_summary(user_id, now).await.unwrap();
    assert_eq!(monthly.as_tuple(), (dec("20000"), dec("8500"), dec("11500")));

    assert_eq!(
        engine.category_breakdown(user_id).await.unwrap(),
        vec![CategoryTotal {
            category: "аренда".to_string(),
            total: dec("8500"),
        }]
    );
}

#[tokio::test]
async fn breakdown_covers_every_expense_once() {
    let (engine, _db) = engine_with_db().await;
    let base = at(2024, 5, 1, 0);
    let rows = [
        ("продукты", "12.5"),
        ("персонал", "3000"),
        ("продукты", "7.5"),
        ("реклама", "450"),
        ("персонал", "1000"),
    ];
    for (i, (category, value)) in rows.iter().enumerate() {
        engine
            .expense("8", amount(value), category, None, base + Duration::days(i as i64 * 40))
            .await
            .unwrap();
    }
    engine.income("8", amount("5000"), None, base).await.unwrap();

    let user_id = engine.require_user("8").await.unwrap();
    let breakdown = engine.category_breakdown(user_id).await.unwrap();

    let names: Vec<&str> = breakdown.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, ["персонал", "реклама", "продукты"]);
    let total: Decimal = breakdown.iter().map(|c| c.total).sum();
    assert_eq!(total, dec("4470"));
}

#[tokio::test]
async fn report_for_unknown_user_is_no_data() {
    let (engine, _db) = engine_with_db().await;

    assert_eq!(
        engine.report("404", Utc::now()).await.unwrap_err(),
        EngineError::NoData
    );
    assert_eq!(
        engine.export("404", Utc::now()).await.unwrap_err(),
        EngineError::NoData
    );
}

#[tokio::test]
async fn export_lists_operations_oldest_first() {
    let (engine, _db) = engine_with_db().await;
    let now = at(2025, 3, 20, 12);

    engine
        .store()
        .append(
            NewTransaction::new(
                "6",
                TransactionKind::Expense,
                amount("300"),
                "коммуналка",
                at(2025, 3, 15, 9),
            )
            .description("свет"),
        )
        .await
        .unwrap();
    engine.income("6", amount("900"), None, at(2025, 2, 1, 9)).await.unwrap();
    engine.income("6", amount("100"), None, at(2025, 3, 1, 0)).await.unwrap();

    let export = engine.export("6", now).await.unwrap();

    let when: Vec<DateTime<Utc>> = export.operations.iter().map(|r| r.created_at).collect();
    assert_eq!(
        when,
        [at(2025, 2, 1, 9), at(2025, 3, 1, 0), at(2025, 3, 15, 9)]
    );
    assert_eq!(export.operations[2].description, "свет");
    assert_eq!(export.operations[0].description, "");
    assert_eq!(export.operations[0].category, "доход");
    assert_eq!(export.month, summary("100", "300"));
    assert_eq!(export.categories.len(), 1);
}

#[tokio::test]
async fn report_collects_all_sections() {
    let (engine, _db) = engine_with_db().await;
    let now = Utc::now();
    engine
        .expense("11", amount("40"), "реклама", None, now)
        .await
        .unwrap();

    let report = engine.report("11", now).await.unwrap();

    assert_eq!(report.daily, summary("0", "40"));
    assert_eq!(report.weekly, summary("0", "40"));
    assert_eq!(report.monthly, summary("0", "40"));
    assert_eq!(report.categories[0].category, "реклама");
}
