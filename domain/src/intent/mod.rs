//! Intent subdomain
//!
//! - [`parsed::ParsedIntent`]: the structured form of a user request
//! - [`rules::IntentRuleSet`]: data-driven keyword classification

pub mod parsed;
pub mod rules;
