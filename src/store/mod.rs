//! Store traits for the relational collaborator.
//!
//! The application owns the database; this crate sees three narrow async
//! interfaces. Counter updates are specified as atomic increments
//! (`SET total_requests = total_requests + n`), never read-modify-write, so
//! concurrent pipeline calls against one provider cannot lose updates. The
//! generator mutation and the history append are two independent writes by
//! contract — implementations must not wrap them in one transaction.

mod memory;

pub use memory::MemoryStore;

use crate::error::AiError;
use crate::types::{
    EditHistoryRecord, GeneratorRecord, NewEditHistory, NewGenerator, ProbeOutcome,
    ProviderProfile, UsageDelta,
};
use async_trait::async_trait;

/// Read access to provider profiles plus counter/probe write-back.
/// All lookups consider active rows only.
#[async_trait]
pub trait ProviderStore: Send + Sync {
    async fn find_active_by_id(&self, id: &str) -> Result<Option<ProviderProfile>, AiError>;

    async fn find_active_by_slug(&self, slug: &str) -> Result<Option<ProviderProfile>, AiError>;

    /// The single active profile flagged as default, if any.
    async fn find_active_default(&self) -> Result<Option<ProviderProfile>, AiError>;

    /// Atomically add to the usage counters of a provider row.
    async fn record_usage(&self, id: &str, delta: UsageDelta) -> Result<(), AiError>;

    /// Record the outcome of the most recent vendor call.
    async fn record_probe(&self, id: &str, outcome: ProbeOutcome) -> Result<(), AiError>;
}

/// Generator rows: the synthesis pipeline's primary mutation target.
#[async_trait]
pub trait GeneratorStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<GeneratorRecord>, AiError>;

    async fn slug_exists(&self, slug: &str) -> Result<bool, AiError>;

    /// Insert a create-mode row; returns the generated id.
    async fn insert(&self, generator: NewGenerator) -> Result<String, AiError>;

    /// Overwrite an existing row's config document.
    async fn update_config(&self, id: &str, config: serde_json::Value) -> Result<(), AiError>;
}

/// Append-only audit trail of synthesis attempts.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(&self, record: NewEditHistory) -> Result<EditHistoryRecord, AiError>;
}
