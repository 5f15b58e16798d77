//! Multi-agent orchestration domain
//!
//! Everything needed to turn a [`ParsedIntent`](crate::ParsedIntent) into an
//! executable plan, plus the result types produced by executing it.

pub mod backend;
pub mod complexity;
pub mod pattern;
pub mod plan;
pub mod planner;
pub mod result;
pub mod selection;
