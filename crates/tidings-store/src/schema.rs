//! Reminder store database schema.

/// SQL to create the reminders table.
pub const CREATE_REMINDERS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS reminders (
    reminder_id UUID PRIMARY KEY,
    user_id     UUID NOT NULL,
    title       VARCHAR(200) NOT NULL,
    remind_at   TIMESTAMPTZ NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_reminders_user_id
    ON reminders (user_id, remind_at);
";
