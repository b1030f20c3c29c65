//! Tidings Core — shared dispatch and domain abstractions.
//!
//! This crate defines the traits and value types that the mediator, the
//! consumer-name resolver and every bounded context depend on. It contains
//! no infrastructure code.

pub mod cancellation;
pub mod clock;
pub mod error;
pub mod event;
pub mod identity;
pub mod repository;
pub mod request;
