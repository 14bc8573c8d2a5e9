use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A selectable configuration of the inference service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    pub label: String,
}

/// Entry of the `models` list; the service sends either bare ids or objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelDescriptor {
    Id(String),
    Described {
        #[serde(alias = "name")]
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

impl ModelDescriptor {
    /// Resolves a display label: the service's own label first, then the
    /// configured table, then the bare id.
    pub fn into_model(self, labels: &HashMap<String, String>) -> Model {
        let (id, label) = match self {
            ModelDescriptor::Id(id) => (id, None),
            ModelDescriptor::Described { id, label } => (id, label),
        };
        let label = label
            .or_else(|| labels.get(&id).cloned())
            .unwrap_or_else(|| id.clone());
        Model { id, label }
    }
}

/// Body of `GET /models`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCatalog {
    #[serde(default)]
    pub models: Vec<ModelDescriptor>,
    #[serde(default)]
    pub current_model: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSelectionState {
    pub available: Vec<Model>,
    pub current: String,
}

impl ModelSelectionState {
    pub fn from_catalog(catalog: ModelCatalog, labels: &HashMap<String, String>) -> Self {
        Self {
            available: catalog
                .models
                .into_iter()
                .map(|descriptor| descriptor.into_model(labels))
                .collect(),
            current: catalog.current_model.unwrap_or_default(),
        }
    }

    pub fn find(&self, id: &str) -> Option<&Model> {
        self.available.iter().find(|model| model.id == id)
    }
}
