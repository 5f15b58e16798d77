//! Core domain concepts shared across all subdomains.
//!
//! - [`context::ContextMap`]: the per-request context threaded between agents
//! - [`error::DomainError`]: domain-level errors

pub mod context;
pub mod error;
