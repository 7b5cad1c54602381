//! Event payloads pushed back to the host UI.
//!
//! Serialized as `{"type": <kind>, "data": {...}}`, the shape the host's event
//! emitter expects.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum HostEvent {
    Status(StatusData),
    Citation(CitationData),
    Visual(VisualData),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusData {
    pub description: String,
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationData {
    pub source: CitationSource,
    pub document: Vec<String>,
    pub metadata: Vec<CitationMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationSource {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationMetadata {
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualData {
    #[serde(rename = "type")]
    pub kind: String,
    pub icon: String,
    pub title: String,
    pub description: String,
    pub status: String,
}

impl HostEvent {
    #[must_use]
    pub fn status(description: impl Into<String>, done: bool) -> Self {
        Self::Status(StatusData { description: description.into(), done })
    }

    /// Citation attached to a message, used to surface an error to the user.
    #[must_use]
    pub fn citation(
        name: impl Into<String>,
        document: impl Into<String>,
        origin: impl Into<String>,
    ) -> Self {
        Self::Citation(CitationData {
            source: CitationSource { name: name.into() },
            document: vec![document.into()],
            metadata: vec![CitationMetadata { source: origin.into() }],
        })
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match *self {
            Self::Status(_) => "status",
            Self::Citation(_) => "citation",
            Self::Visual(_) => "visual",
        }
    }
}
