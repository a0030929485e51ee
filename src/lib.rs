//! atelier-ai
//!
//! AI provider bridge and generator-config synthesis core for the atelier
//! studio platform. This crate owns the provider-agnostic request pipeline:
//! per-vendor request construction and auth, the bounded-timeout HTTP call,
//! response-path extraction, structured-output recovery, and the
//! generator-config synthesis flow with its audit trail. The surrounding
//! application (admin screens, relational store, HTTP routes) talks to it
//! through the `store` traits and the [`orchestrator::Orchestrator`].
#![deny(unsafe_code)]

pub mod accessor;
pub mod adapters;
pub mod error;
pub mod extract;
pub mod http;
pub mod orchestrator;
pub mod store;
pub mod types;
pub mod validate;

pub use error::AiError;
pub use orchestrator::Orchestrator;
