use chrono::{DateTime, Utc};

use crate::actor_framework::Entity;
use crate::domain::{Category, CategoryCreate, CategoryPatch};

use super::CategoryError;

fn validate_name(nome: &str) -> Result<String, CategoryError> {
    let trimmed = nome.trim();
    if trimmed.is_empty() {
        return Err(CategoryError::ValidationError("nome is required".to_string()));
    }
    Ok(trimmed.to_string())
}

impl Entity for Category {
    const NAME: &'static str = "categorias";

    type Id = String;
    type CreatePayload = CategoryCreate;
    type Patch = CategoryPatch;
    type Action = ();
    type ActionResult = ();
    type Error = CategoryError;
    type SortKey = (String, String);

    fn id(&self) -> &String {
        &self.id
    }

    fn sort_key(&self) -> (String, String) {
        (self.nome.to_lowercase(), self.id.clone())
    }

    fn from_create(id: String, params: CategoryCreate, now: DateTime<Utc>) -> Result<Self, CategoryError> {
        Ok(Self {
            id,
            nome: validate_name(&params.nome)?,
            descricao: params.descricao.trim().to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    fn on_update(&mut self, patch: CategoryPatch) -> Result<(), CategoryError> {
        if let Some(nome) = patch.nome {
            self.nome = validate_name(&nome)?;
        }
        if let Some(descricao) = patch.descricao {
            self.descricao = descricao.trim().to_string();
        }
        Ok(())
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    /// No custom actions are defined for categories.
    fn handle_action(&mut self, _action: ()) -> Result<(), CategoryError> {
        Ok(())
    }
}
