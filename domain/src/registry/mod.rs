//! Capability registry subdomain
//!
//! A static table of specialized agents and what they can handle. Built once
//! at startup from configuration and shared read-only afterwards.

pub mod capability_registry;
pub mod descriptor;
