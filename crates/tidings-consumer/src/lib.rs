//! Tidings — consumer-name resolution.
//!
//! Derives the stable, human-readable name a message-stream subscriber
//! registers under, from a declared name pattern. Resolution happens once per
//! subscriber at setup time, never per message.

pub mod declaration;
pub mod pattern;

pub use declaration::ConsumerDeclaration;
pub use pattern::{ConsumerName, ConsumerNamePattern, ResolutionContext, resolve_consumer_name};
