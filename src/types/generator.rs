//! Generator rows and the edit-history audit trail.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A persisted, parameterized content-template record. Its behavior is
/// driven entirely by the opaque `config` document; for AI-created rows the
/// only guaranteed shape is `{dimensions:{width,height}, features,
/// form_fields?}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorRecord {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub generator_type: String,
    pub status: String,
    pub config: Value,
}

/// Insert payload for a create-mode synthesis.
#[derive(Debug, Clone)]
pub struct NewGenerator {
    pub name: String,
    pub slug: String,
    pub generator_type: String,
    pub description: String,
    pub status: String,
    pub config: Value,
    /// Provenance marker, `"ai-created"` for this pipeline
    pub installed_via: String,
    pub installed_at: chrono::DateTime<chrono::Utc>,
}

/// Attachment metadata kept on history rows. Name and MIME type only; raw
/// bytes never reach the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttachmentMeta {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// One immutable audit row per synthesis attempt that produced a usable
/// config. Appended best-effort; never updated or deleted by this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditHistoryRecord {
    pub id: String,
    pub generator_id: String,
    pub provider_id: String,
    pub old_config: Value,
    pub new_config: Value,
    pub user_prompt: String,
    pub ai_response: String,
    pub tokens_used: Option<u64>,
    pub processing_time_ms: u64,
    pub success: bool,
    pub attachments: Vec<AttachmentMeta>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Append payload for [`crate::store::HistoryStore`].
#[derive(Debug, Clone)]
pub struct NewEditHistory {
    pub generator_id: String,
    pub provider_id: String,
    pub old_config: Value,
    pub new_config: Value,
    pub user_prompt: String,
    pub ai_response: String,
    pub tokens_used: Option<u64>,
    pub processing_time_ms: u64,
    pub success: bool,
    pub attachments: Vec<AttachmentMeta>,
}
