//! Consumer declarations.
//!
//! A declaration pairs a subscriber's type name with its name pattern. It is
//! an ordinary value handed to the mediator at registration time and read
//! once during setup.

use tidings_core::error::DomainError;
use tracing::debug;

use crate::pattern::{ConsumerName, ConsumerNamePattern, ResolutionContext};

/// Declares how a subscriber's durable consumer name is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumerDeclaration {
    declaring_type: &'static str,
    pattern: &'static str,
}

impl ConsumerDeclaration {
    /// Creates a declaration. Validation is deferred to [`Self::resolve`].
    #[must_use]
    pub const fn new(declaring_type: &'static str, pattern: &'static str) -> Self {
        Self {
            declaring_type,
            pattern,
        }
    }

    /// The declaring type's simple name.
    #[must_use]
    pub const fn declaring_type(&self) -> &'static str {
        self.declaring_type
    }

    /// The undecoded name pattern.
    #[must_use]
    pub const fn pattern(&self) -> &'static str {
        self.pattern
    }

    /// Resolves the consumer name for one handled action.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if the pattern is invalid or a
    /// placeholder it references cannot be resolved.
    pub fn resolve(
        &self,
        action: Option<&str>,
        version: Option<&str>,
    ) -> Result<ConsumerName, DomainError> {
        let pattern = ConsumerNamePattern::parse(self.pattern)?;
        let name = pattern.resolve(&ResolutionContext {
            controller: self.declaring_type,
            action,
            version,
        })?;
        debug!(
            declaring_type = self.declaring_type,
            pattern = self.pattern,
            consumer = %name,
            "resolved consumer name"
        );
        Ok(name)
    }
}
