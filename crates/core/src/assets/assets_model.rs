//! Asset domain models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reference to a taxonomy-typed field on an asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementReference {
    pub id: String,
}

/// Reference to a taxonomy term, as stored in an element value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TermReference {
    pub id: String,
}

impl TermReference {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A taxonomy element slot on an asset and the terms assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetElement {
    pub element: ElementReference,
    #[serde(default)]
    pub value: Vec<TermReference>,
}

impl AssetElement {
    pub fn new(element_id: impl Into<String>, term_ids: &[&str]) -> Self {
        Self {
            element: ElementReference {
                id: element_id.into(),
            },
            value: term_ids.iter().map(|id| TermReference::new(*id)).collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.element.id
    }
}

/// An asset as returned by the management API.
///
/// Fields this tool does not interpret are kept in `extra` so that a
/// replacement payload is a faithful copy of the original representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub elements: Vec<AssetElement>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Asset {
    pub fn new(id: impl Into<String>, codename: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            codename: Some(codename.into()),
            title: None,
            url: None,
            elements: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_element(mut self, element: AssetElement) -> Self {
        self.elements.push(element);
        self
    }

    /// Codename, or an empty string for assets without one.
    pub fn codename_or_empty(&self) -> &str {
        self.codename.as_deref().unwrap_or("")
    }

    /// Human-readable label: title, falling back to codename, then id.
    pub fn display_name(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .or(self.codename.as_deref())
            .unwrap_or(&self.id)
    }

    /// Find an element slot by element id.
    pub fn element(&self, element_id: &str) -> Option<&AssetElement> {
        self.elements.iter().find(|e| e.element.id == element_id)
    }

    /// Shallow copy with only `elements` replaced.
    pub fn with_elements(&self, elements: Vec<AssetElement>) -> Asset {
        Asset {
            elements,
            ..self.clone()
        }
    }
}
