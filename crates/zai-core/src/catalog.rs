use serde::{Deserialize, Serialize};

/// A single model record as returned by `GET /models`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub id: String,
    pub object: String,
    pub created: u64,
    pub owned_by: String,
}

impl ModelEntry {
    pub fn new(id: impl Into<String>, created: u64, owned_by: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            object: "model".to_owned(),
            created,
            owned_by: owned_by.into(),
        }
    }
}

/// Body of `GET /models`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelList {
    pub object: String,
    pub data: Vec<ModelEntry>,
}

/// Read-only table of advertised models
///
/// Built once at start-up; lookups are exact-match on the model id and
/// listing preserves insertion order.
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    entries: Vec<ModelEntry>,
}

impl ModelCatalog {
    pub fn new(entries: Vec<ModelEntry>) -> Self {
        Self { entries }
    }

    /// All entries, in the order they were registered
    pub fn list(&self) -> &[ModelEntry] {
        &self.entries
    }

    /// Look up an entry by its exact id
    pub fn get(&self, id: &str) -> Option<&ModelEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot the catalog as a `GET /models` body
    pub fn to_list(&self) -> ModelList {
        ModelList {
            object: "list".to_owned(),
            data: self.entries.clone(),
        }
    }
}
