//! Acting user as handed over by the host.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-user display preferences ("user valves").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Emit status events while memories are processed.
    #[serde(default = "default_show_status")]
    pub show_status: bool,
}

const fn default_show_status() -> bool {
    true
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self { show_status: default_show_status() }
    }
}

/// Identity of the user a hook runs for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub valves: UserPreferences,
}

impl UserIdentity {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), name: None, role: None, valves: UserPreferences::default() }
    }

    #[must_use]
    pub const fn with_preferences(mut self, valves: UserPreferences) -> Self {
        self.valves = valves;
        self
    }

    /// Lenient conversion from the host's user object.
    ///
    /// Returns `None` unless there is a non-empty string `id`. Malformed or null
    /// `valves` fall back to defaults instead of rejecting the user.
    #[must_use]
    pub fn from_host(value: &Value) -> Option<Self> {
        let id = value.get("id").and_then(Value::as_str).map(str::trim).filter(|s| !s.is_empty())?;
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(ToOwned::to_owned);
        let valves = value
            .get("valves")
            .and_then(|v| serde_json::from_value::<UserPreferences>(v.clone()).ok())
            .unwrap_or_default();
        Some(Self { id: id.to_owned(), name: text("name"), role: text("role"), valves })
    }
}
