//! `PostgreSQL` implementation of the `Repository` trait for reminders.

use async_trait::async_trait;
use sqlx::PgPool;
use tidings_core::cancellation::CancellationToken;
use tidings_core::error::DomainError;
use tidings_core::repository::Repository;
use tidings_reminders::domain::reminder::Reminder;
use tracing::debug;

use crate::schema::CREATE_REMINDERS_TABLE;

const INSERT_REMINDER: &str = r"
INSERT INTO reminders (reminder_id, user_id, title, remind_at, created_at)
VALUES ($1, $2, $3, $4, $5)
ON CONFLICT (reminder_id) DO NOTHING
";

/// PostgreSQL-backed reminder repository.
#[derive(Debug, Clone)]
pub struct PgReminderRepository {
    pool: PgPool,
}

impl PgReminderRepository {
    /// Creates a new `PgReminderRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the reminders table and its index if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Persistence` if the DDL fails.
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::raw_sql(CREATE_REMINDERS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Persistence(format!("schema setup failed: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl Repository<Reminder> for PgReminderRepository {
    async fn add(
        &self,
        reminder: Reminder,
        cancellation: &CancellationToken,
    ) -> Result<(), DomainError> {
        cancellation.check()?;

        let result = sqlx::query(INSERT_REMINDER)
            .bind(reminder.reminder_id)
            .bind(*reminder.user_id.as_uuid())
            .bind(&reminder.title)
            .bind(reminder.remind_at)
            .bind(reminder.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Persistence(format!("reminder insert failed: {e}")))?;

        if result.rows_affected() == 0 {
            debug!(reminder_id = %reminder.reminder_id, "reminder already stored, ignoring duplicate add");
        }
        Ok(())
    }
}
