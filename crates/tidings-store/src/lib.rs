//! Repository implementations for Tidings.
//!
//! Both repositories are idempotent on entity identifier: adding an entity
//! whose identifier is already stored leaves the stored copy untouched and
//! succeeds, so redelivered events do not create duplicates.

pub mod in_memory;
pub mod pg_reminder_repository;
pub mod schema;
