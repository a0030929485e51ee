//! Data model for the AI pipeline.
//!
//! Provider profiles, generator rows, the audit-history row, and the
//! request/reply types of the orchestrator operations. Row lifecycle is
//! owned by the surrounding application; this crate reads profiles, mutates
//! generator configs, and appends history.

mod generator;
mod provider;
mod request;

pub use generator::*;
pub use provider::*;
pub use request::*;
