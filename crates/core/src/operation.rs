//! Memory operations requested by the model.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::tags::normalize_tags;

/// Kind of change requested against long-term memory
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationKind {
    /// Store a new memory
    New,
    /// Replace an existing memory (delete + insert, the id changes)
    Update,
    /// Remove an existing memory
    Delete,
}

impl OperationKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::New => "NEW",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }

    /// Whether this kind must reference an existing memory id.
    #[must_use]
    pub const fn requires_id(&self) -> bool {
        matches!(*self, Self::Update | Self::Delete)
    }

    /// Whether this kind must carry memory content.
    #[must_use]
    pub const fn requires_content(&self) -> bool {
        matches!(*self, Self::New | Self::Update)
    }
}

impl Display for OperationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NEW" => Ok(Self::New),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            _ => Err(CoreError::InvalidOperation(s.to_owned())),
        }
    }
}

/// A requested change to a user's long-term memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryOperation {
    pub operation: OperationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl MemoryOperation {
    #[must_use]
    pub fn new_memory(content: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            operation: OperationKind::New,
            id: None,
            content: Some(content.into()),
            tags: normalize_tags(tags),
        }
    }

    #[must_use]
    pub fn update(id: impl Into<String>, content: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            operation: OperationKind::Update,
            id: Some(id.into()),
            content: Some(content.into()),
            tags: normalize_tags(tags),
        }
    }

    #[must_use]
    pub fn delete(id: impl Into<String>) -> Self {
        Self { operation: OperationKind::Delete, id: Some(id.into()), content: None, tags: Vec::new() }
    }

    /// Id with surrounding whitespace removed, `None` when absent or blank.
    #[must_use]
    pub fn target_id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    /// Content with surrounding whitespace removed, `None` when absent or blank.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.content.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }

    /// Structural validation: required fields present for the operation kind.
    ///
    /// # Errors
    /// Returns `CoreError::MissingField` naming the first missing field.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.operation.requires_id() && self.target_id().is_none() {
            return Err(CoreError::MissingField { operation: self.operation.as_str(), field: "id" });
        }
        if self.operation.requires_content() && self.body().is_none() {
            return Err(CoreError::MissingField {
                operation: self.operation.as_str(),
                field: "content",
            });
        }
        Ok(())
    }

    /// Build an operation from one untrusted element of a model reply.
    ///
    /// Accepts string or numeric ids, skips non-string tags, and normalizes the
    /// rest. The result is validated before it is returned.
    ///
    /// # Errors
    /// Returns an error when the element is not an object, the operation kind is
    /// unknown, or a required field is missing.
    pub fn from_model_value(value: &Value) -> Result<Self, CoreError> {
        let obj = value
            .as_object()
            .ok_or_else(|| CoreError::InvalidInput(format!("operation is not an object: {value}")))?;

        let kind = obj
            .get("operation")
            .and_then(Value::as_str)
            .ok_or_else(|| CoreError::InvalidOperation(format!("{:?}", obj.get("operation"))))?
            .parse::<OperationKind>()?;

        let id = match obj.get("id") {
            Some(Value::String(s)) => Some(s.trim().to_owned()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        let content = obj.get("content").and_then(Value::as_str).map(|c| c.trim().to_owned());
        let tags = obj
            .get("tags")
            .and_then(Value::as_array)
            .map(|arr| normalize_tags(arr.iter().filter_map(Value::as_str)))
            .unwrap_or_default();

        let op = Self {
            operation: kind,
            id: if kind.requires_id() { id } else { None },
            content: if kind.requires_content() { content } else { None },
            tags,
        };
        op.validate()?;
        Ok(op)
    }
}
