use automem_core::{HostEvent, StoredMemory};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What the host posts to a hook endpoint.
///
/// `user` is kept loose: a missing or malformed user makes the hooks pass the
/// body through rather than reject the request.
#[derive(Debug, Clone, Deserialize)]
pub struct HookRequest {
    pub body: Value,
    #[serde(default)]
    pub user: Value,
    #[serde(default)]
    pub chat_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookResponse {
    pub body: Value,
    /// Status/citation events raised while handling the hook.
    #[serde(default)]
    pub events: Vec<HostEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddMemoryResponse {
    pub stored: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<StoredMemory>,
    #[serde(default)]
    pub events: Vec<HostEvent>,
}
