//! In-memory store implementation.
//!
//! Backs the crate's own tests and doubles as a harness for embedders. One
//! lock guards each table; `record_usage` increments under the lock, which
//! satisfies the atomic-increment contract the SQL-backed store meets with
//! `UPDATE ... SET x = x + n`.

use super::{GeneratorStore, HistoryStore, ProviderStore};
use crate::error::AiError;
use crate::types::{
    EditHistoryRecord, GeneratorRecord, NewEditHistory, NewGenerator, ProbeOutcome,
    ProviderProfile, UsageDelta,
};
use async_trait::async_trait;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct MemoryStore {
    providers: Mutex<Vec<ProviderProfile>>,
    generators: Mutex<Vec<GeneratorRecord>>,
    history: Mutex<Vec<EditHistoryRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_provider(&self, profile: ProviderProfile) {
        self.providers.lock().await.push(profile);
    }

    pub async fn add_generator(&self, generator: GeneratorRecord) {
        self.generators.lock().await.push(generator);
    }

    pub async fn provider(&self, id: &str) -> Option<ProviderProfile> {
        self.providers
            .lock()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub async fn generator(&self, id: &str) -> Option<GeneratorRecord> {
        self.generators
            .lock()
            .await
            .iter()
            .find(|g| g.id == id)
            .cloned()
    }

    pub async fn generator_count(&self) -> usize {
        self.generators.lock().await.len()
    }

    pub async fn history_for(&self, generator_id: &str) -> Vec<EditHistoryRecord> {
        self.history
            .lock()
            .await
            .iter()
            .filter(|h| h.generator_id == generator_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ProviderStore for MemoryStore {
    async fn find_active_by_id(&self, id: &str) -> Result<Option<ProviderProfile>, AiError> {
        Ok(self
            .providers
            .lock()
            .await
            .iter()
            .find(|p| p.is_active && p.id == id)
            .cloned())
    }

    async fn find_active_by_slug(&self, slug: &str) -> Result<Option<ProviderProfile>, AiError> {
        Ok(self
            .providers
            .lock()
            .await
            .iter()
            .find(|p| p.is_active && p.slug == slug)
            .cloned())
    }

    async fn find_active_default(&self) -> Result<Option<ProviderProfile>, AiError> {
        Ok(self
            .providers
            .lock()
            .await
            .iter()
            .find(|p| p.is_active && p.is_default)
            .cloned())
    }

    async fn record_usage(&self, id: &str, delta: UsageDelta) -> Result<(), AiError> {
        let mut providers = self.providers.lock().await;
        let row = providers
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AiError::PersistenceError(format!("provider {id} not found")))?;
        row.total_requests += delta.requests;
        row.total_tokens_used += delta.tokens;
        Ok(())
    }

    async fn record_probe(&self, id: &str, outcome: ProbeOutcome) -> Result<(), AiError> {
        let mut providers = self.providers.lock().await;
        let row = providers
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AiError::PersistenceError(format!("provider {id} not found")))?;
        row.last_test_at = Some(outcome.at);
        row.last_test_success = Some(outcome.success);
        row.last_error = outcome.error;
        Ok(())
    }
}

#[async_trait]
impl GeneratorStore for MemoryStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<GeneratorRecord>, AiError> {
        Ok(self
            .generators
            .lock()
            .await
            .iter()
            .find(|g| g.id == id)
            .cloned())
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, AiError> {
        Ok(self.generators.lock().await.iter().any(|g| g.slug == slug))
    }

    async fn insert(&self, generator: NewGenerator) -> Result<String, AiError> {
        let id = uuid::Uuid::new_v4().to_string();
        self.generators.lock().await.push(GeneratorRecord {
            id: id.clone(),
            name: generator.name,
            slug: generator.slug,
            generator_type: generator.generator_type,
            status: generator.status,
            config: generator.config,
        });
        Ok(id)
    }

    async fn update_config(&self, id: &str, config: serde_json::Value) -> Result<(), AiError> {
        let mut generators = self.generators.lock().await;
        let row = generators
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| AiError::PersistenceError(format!("generator {id} not found")))?;
        row.config = config;
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for MemoryStore {
    async fn append(&self, record: NewEditHistory) -> Result<EditHistoryRecord, AiError> {
        let row = EditHistoryRecord {
            id: uuid::Uuid::new_v4().to_string(),
            generator_id: record.generator_id,
            provider_id: record.provider_id,
            old_config: record.old_config,
            new_config: record.new_config,
            user_prompt: record.user_prompt,
            ai_response: record.ai_response,
            tokens_used: record.tokens_used,
            processing_time_ms: record.processing_time_ms,
            success: record.success,
            attachments: record.attachments,
            created_at: chrono::Utc::now(),
        };
        self.history.lock().await.push(row.clone());
        Ok(row)
    }
}
