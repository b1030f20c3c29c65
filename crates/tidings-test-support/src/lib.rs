//! Shared test doubles for Tidings.

mod authorizer;
mod clock;
mod repository;

pub use authorizer::DenyAllAuthorizer;
pub use clock::FixedClock;
pub use repository::{FAILING_REPOSITORY_MESSAGE, FailingRepository, RecordingRepository};
