use serde::{Deserialize, Serialize};

use super::record_id::RecordId;

/// A PDF template uploaded by an agent.
///
/// Templates are never edited after upload; the only mutation is delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Identifier of the fillable cast behind this template, when the backend exposes it.
    #[serde(default)]
    pub anvil_template_eid: Option<String>,
    #[serde(default)]
    pub owner_id: Option<RecordId>,
}

impl Template {
    /// Key used in `/api/templates/{key}/fields` and `/api/templates/{key}/submissions`.
    pub fn form_key(&self) -> String {
        self.anvil_template_eid
            .as_ref()
            .filter(|eid| !eid.is_empty())
            .cloned()
            .unwrap_or_else(|| self.id.to_string())
    }
}
