//! Consumer-name patterns and their resolution.
//!
//! A pattern is literal text mixed with three placeholders:
//!
//! - `[controller]` — the declaring type's name, minus a conventional suffix
//! - `[action]` — the name of the message the subscriber handles
//! - `{version:apiVersion}` — the API version supplied by the host
//!
//! Anything else inside `[...]` or `{...}` is a configuration error.

use serde::Serialize;
use tidings_core::error::DomainError;

/// Suffixes stripped from the declaring type name, longest first.
pub const CONVENTIONAL_SUFFIXES: &[&str] = &["EventController", "Controller"];

const CONTROLLER_TOKEN: &str = "controller";
const ACTION_TOKEN: &str = "action";
const VERSION_TOKEN: &str = "version:apiVersion";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Controller,
    Action,
    Version,
}

/// A parsed, validated consumer-name pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerNamePattern {
    source: String,
    segments: Vec<Segment>,
}

/// Inputs a pattern is resolved against.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    /// Simple name of the declaring type, e.g. `OrderEventController`.
    pub controller: &'a str,
    /// Name of the handled message, if the pattern needs one.
    pub action: Option<&'a str>,
    /// API version supplied by the host, e.g. `1.0`.
    pub version: Option<&'a str>,
}

/// A resolved consumer name: non-empty and free of whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ConsumerName(String);

impl ConsumerName {
    /// Validates a resolved name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if `name` is empty or contains
    /// whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.is_empty() {
            return Err(configuration("resolved consumer name is empty"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(configuration(format!(
                "resolved consumer name {name:?} contains whitespace"
            )));
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConsumerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl ConsumerNamePattern {
    /// Parses and validates a pattern.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if the pattern is empty, contains
    /// an unterminated placeholder or a stray closing bracket, or references
    /// an unrecognized token.
    pub fn parse(pattern: &str) -> Result<Self, DomainError> {
        if pattern.is_empty() {
            return Err(configuration("consumer name pattern is empty"));
        }

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.char_indices();

        while let Some((offset, open)) = chars.next() {
            let close = match open {
                '[' => ']',
                '{' => '}',
                ']' | '}' => {
                    return Err(configuration(format!(
                        "unmatched {open:?} at offset {offset} in pattern {pattern:?}"
                    )));
                }
                other => {
                    literal.push(other);
                    continue;
                }
            };

            let mut token = String::new();
            let mut terminated = false;
            for (_, next) in chars.by_ref() {
                if next == close {
                    terminated = true;
                    break;
                }
                token.push(next);
            }
            if !terminated {
                return Err(configuration(format!(
                    "unterminated placeholder at offset {offset} in pattern {pattern:?}"
                )));
            }

            let segment = match (open, token.as_str()) {
                ('[', CONTROLLER_TOKEN) => Segment::Controller,
                ('[', ACTION_TOKEN) => Segment::Action,
                ('{', VERSION_TOKEN) => Segment::Version,
                _ => {
                    return Err(configuration(format!(
                        "unrecognized token {open}{token}{close} in pattern {pattern:?}"
                    )));
                }
            };

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(segment);
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: pattern.to_owned(),
            segments,
        })
    }

    /// Returns the pattern text as declared.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns `true` if the pattern contains `[action]`.
    #[must_use]
    pub fn requires_action(&self) -> bool {
        self.segments.contains(&Segment::Action)
    }

    /// Returns `true` if the pattern contains `{version:apiVersion}`.
    #[must_use]
    pub fn requires_version(&self) -> bool {
        self.segments.contains(&Segment::Version)
    }

    /// Resolves the pattern into a consumer name.
    ///
    /// Resolution is a pure function of the pattern and `context`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if a referenced placeholder has no
    /// value, the declaring type name is nothing but a conventional suffix,
    /// the version is malformed, or the result is not a valid consumer name.
    pub fn resolve(&self, context: &ResolutionContext<'_>) -> Result<ConsumerName, DomainError> {
        let mut resolved = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => resolved.push_str(text),
                Segment::Controller => resolved.push_str(controller_name(context.controller)?),
                Segment::Action => {
                    let action = context
                        .action
                        .filter(|action| !action.is_empty())
                        .ok_or_else(|| {
                            configuration(format!(
                                "pattern {:?} references [action] but no action was supplied",
                                self.source
                            ))
                        })?;
                    resolved.push_str(action);
                }
                Segment::Version => {
                    let version = context.version.ok_or_else(|| {
                        configuration(format!(
                            "pattern {:?} references {{version:apiVersion}} but no version was supplied",
                            self.source
                        ))
                    })?;
                    resolved.push_str(&format_api_version(version)?);
                }
            }
        }
        ConsumerName::new(resolved)
    }
}

/// Parses `pattern` and resolves it in one step.
///
/// # Errors
///
/// Returns `DomainError::Configuration` for any parse or resolution failure.
pub fn resolve_consumer_name(
    type_name: &str,
    action: Option<&str>,
    version: Option<&str>,
    pattern: &str,
) -> Result<ConsumerName, DomainError> {
    ConsumerNamePattern::parse(pattern)?.resolve(&ResolutionContext {
        controller: type_name,
        action,
        version,
    })
}

/// Reduces a (possibly path-qualified) type name to its base name.
fn controller_name(type_name: &str) -> Result<&str, DomainError> {
    let simple = type_name.rsplit("::").next().unwrap_or(type_name);
    if simple.is_empty() {
        return Err(configuration("declaring type name is empty"));
    }

    for suffix in CONVENTIONAL_SUFFIXES {
        if let Some(base) = simple.strip_suffix(suffix) {
            if base.is_empty() {
                return Err(configuration(format!(
                    "declaring type {simple:?} has no name left after removing {suffix:?}"
                )));
            }
            return Ok(base);
        }
    }
    Ok(simple)
}

/// Formats an API version for use inside a consumer name.
///
/// Trailing zero components are dropped and the rest joined with `_`, so
/// `1.0` becomes `1` and `2.1` becomes `2_1`.
fn format_api_version(version: &str) -> Result<String, DomainError> {
    let trimmed = version.trim();
    if trimmed.is_empty() {
        return Err(configuration("api version is empty"));
    }

    let mut components: Vec<&str> = trimmed.split('.').collect();
    if components
        .iter()
        .any(|c| c.is_empty() || !c.chars().all(|ch| ch.is_ascii_alphanumeric()))
    {
        return Err(configuration(format!("api version {version:?} is malformed")));
    }

    while components.len() > 1
        && components
            .last()
            .is_some_and(|c| c.chars().all(|ch| ch == '0'))
    {
        components.pop();
    }

    Ok(components.join("_"))
}

fn configuration(message: impl Into<String>) -> DomainError {
    DomainError::Configuration(message.into())
}
