use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a menu item in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub nome: String,
    #[serde(default)]
    pub descricao: String,
    pub preco: f64,
    pub categoria_id: String,
    #[serde(default)]
    pub imagem_url: Option<String>,
    #[serde(default)]
    pub imagem_path: Option<String>,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a new product. New products start active.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub nome: String,
    pub descricao: String,
    pub preco: f64,
    pub categoria_id: String,
    pub imagem_url: Option<String>,
    pub imagem_path: Option<String>,
}

/// Payload for updating an existing product.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub preco: Option<f64>,
    pub categoria_id: Option<String>,
    pub imagem_url: Option<String>,
    pub imagem_path: Option<String>,
}

impl ProductCreate {
    pub fn new(nome: impl Into<String>, preco: f64, categoria_id: impl Into<String>) -> Self {
        Self {
            nome: nome.into(),
            descricao: String::new(),
            preco,
            categoria_id: categoria_id.into(),
            imagem_url: None,
            imagem_path: None,
        }
    }
}
