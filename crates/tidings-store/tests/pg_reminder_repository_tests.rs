//! Integration tests for `PgReminderRepository`.

use chrono::{DateTime, TimeZone, Utc};
use sqlx::PgPool;
use tidings_core::cancellation::CancellationToken;
use tidings_core::error::DomainError;
use tidings_core::identity::UserId;
use tidings_core::repository::Repository;
use tidings_reminders::domain::reminder::Reminder;
use tidings_store::pg_reminder_repository::PgReminderRepository;
use uuid::Uuid;

/// Helper to build a `Reminder` with whole-second timestamps.
fn make_reminder(reminder_id: Uuid) -> Reminder {
    Reminder {
        reminder_id,
        user_id: UserId::new(),
        title: "water the plants".to_string(),
        remind_at: Utc.with_ymd_and_hms(2030, 1, 2, 9, 0, 0).unwrap(),
        created_at: Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap(),
    }
}

async fn count_rows(pool: &PgPool, reminder_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM reminders WHERE reminder_id = $1")
        .bind(reminder_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

// --- add ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_add_inserts_reminder_row(pool: PgPool) {
    let repo = PgReminderRepository::new(pool.clone());
    let reminder = make_reminder(Uuid::new_v4());

    repo.add(reminder.clone(), &CancellationToken::new())
        .await
        .unwrap();

    let (user_id, title, remind_at): (Uuid, String, DateTime<Utc>) = sqlx::query_as(
        "SELECT user_id, title, remind_at FROM reminders WHERE reminder_id = $1",
    )
    .bind(reminder.reminder_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(user_id, *reminder.user_id.as_uuid());
    assert_eq!(title, reminder.title);
    assert_eq!(remind_at, reminder.remind_at);
}

// --- idempotency ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_duplicate_add_keeps_single_row(pool: PgPool) {
    let repo = PgReminderRepository::new(pool.clone());
    let reminder = make_reminder(Uuid::new_v4());
    let token = CancellationToken::new();

    repo.add(reminder.clone(), &token).await.unwrap();
    let second = repo.add(reminder.clone(), &token).await;

    assert!(second.is_ok());
    assert_eq!(count_rows(&pool, reminder.reminder_id).await, 1);
}

// --- cancellation ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_cancelled_add_writes_nothing(pool: PgPool) {
    let repo = PgReminderRepository::new(pool.clone());
    let reminder = make_reminder(Uuid::new_v4());
    let token = CancellationToken::new();
    token.cancel();

    let result = repo.add(reminder.clone(), &token).await;

    assert!(matches!(result, Err(DomainError::Cancelled)));
    assert_eq!(count_rows(&pool, reminder.reminder_id).await, 0);
}

// --- error mapping ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_database_error_maps_to_persistence(pool: PgPool) {
    let repo = PgReminderRepository::new(pool.clone());
    sqlx::query("DROP TABLE reminders")
        .execute(&pool)
        .await
        .unwrap();

    let result = repo
        .add(make_reminder(Uuid::new_v4()), &CancellationToken::new())
        .await;

    match result {
        Err(DomainError::Persistence(message)) => {
            assert!(message.contains("reminder insert failed"));
        }
        other => panic!("expected Persistence, got {other:?}"),
    }
}

// --- schema ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_ensure_schema_is_idempotent_over_migrated_database(pool: PgPool) {
    let repo = PgReminderRepository::new(pool);

    repo.ensure_schema().await.unwrap();
    repo.ensure_schema().await.unwrap();
}
