use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A menu section products are grouped under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub nome: String,
    #[serde(default)]
    pub descricao: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a new category.
#[derive(Debug, Clone)]
pub struct CategoryCreate {
    pub nome: String,
    pub descricao: String,
}

/// Payload for updating an existing category.
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub nome: Option<String>,
    pub descricao: Option<String>,
}

impl CategoryCreate {
    pub fn new(nome: impl Into<String>) -> Self {
        Self {
            nome: nome.into(),
            descricao: String::new(),
        }
    }
}
