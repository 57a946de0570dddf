use chrono::{DateTime, Utc};

use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductPatch};

use super::{ProductAction, ProductError};

fn validate_name(nome: &str) -> Result<String, ProductError> {
    let trimmed = nome.trim();
    if trimmed.is_empty() {
        return Err(ProductError::ValidationError("nome is required".to_string()));
    }
    Ok(trimmed.to_string())
}

fn validate_price(preco: f64) -> Result<f64, ProductError> {
    if !preco.is_finite() || preco <= 0.0 {
        return Err(ProductError::ValidationError(format!(
            "preco must be greater than zero, got {}",
            preco
        )));
    }
    Ok(preco)
}

fn validate_category(categoria_id: &str) -> Result<String, ProductError> {
    if categoria_id.trim().is_empty() {
        return Err(ProductError::ValidationError("categoriaId is required".to_string()));
    }
    Ok(categoria_id.to_string())
}

impl Entity for Product {
    const NAME: &'static str = "produtos";

    type Id = String;
    type CreatePayload = ProductCreate;
    type Patch = ProductPatch;
    type Action = ProductAction;
    type ActionResult = bool;
    type Error = ProductError;
    type SortKey = (String, String);

    fn id(&self) -> &String {
        &self.id
    }

    /// Alphabetical, case-insensitive.
    fn sort_key(&self) -> (String, String) {
        (self.nome.to_lowercase(), self.id.clone())
    }

    /// Creates a new, active product.
    ///
    /// # Errors
    /// Rejects a blank name, a non-positive price or a missing category.
    fn from_create(id: String, params: ProductCreate, now: DateTime<Utc>) -> Result<Self, ProductError> {
        Ok(Self {
            id,
            nome: validate_name(&params.nome)?,
            descricao: params.descricao.trim().to_string(),
            preco: validate_price(params.preco)?,
            categoria_id: validate_category(&params.categoria_id)?,
            imagem_url: params.imagem_url,
            imagem_path: params.imagem_path,
            ativo: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies the same rules as creation to every field present in the patch.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), ProductError> {
        if let Some(nome) = patch.nome {
            self.nome = validate_name(&nome)?;
        }
        if let Some(descricao) = patch.descricao {
            self.descricao = descricao.trim().to_string();
        }
        if let Some(preco) = patch.preco {
            self.preco = validate_price(preco)?;
        }
        if let Some(categoria_id) = patch.categoria_id {
            self.categoria_id = validate_category(&categoria_id)?;
        }
        if patch.imagem_url.is_some() {
            self.imagem_url = patch.imagem_url;
        }
        if patch.imagem_path.is_some() {
            self.imagem_path = patch.imagem_path;
        }
        Ok(())
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn handle_action(&mut self, action: ProductAction) -> Result<bool, ProductError> {
        match action {
            ProductAction::SetActive(ativo) => {
                let changed = self.ativo != ativo;
                self.ativo = ativo;
                Ok(changed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_trims_and_activates() {
        let mut params = ProductCreate::new("  Pizza Margherita ", 45.0, "cat_1");
        params.descricao = " molho, muçarela ".into();
        let product = Product::from_create("p1".into(), params, Utc::now()).unwrap();
        assert_eq!(product.nome, "Pizza Margherita");
        assert_eq!(product.descricao, "molho, muçarela");
        assert!(product.ativo);
    }

    #[test]
    fn create_rejects_bad_input() {
        let cases = [
            ProductCreate::new("   ", 10.0, "cat_1"),
            ProductCreate::new("Suco", 0.0, "cat_1"),
            ProductCreate::new("Suco", f64::NAN, "cat_1"),
            ProductCreate::new("Suco", 8.0, ""),
        ];
        for params in cases {
            let result = Product::from_create("p".into(), params, Utc::now());
            assert!(matches!(result, Err(ProductError::ValidationError(_))));
        }
    }

    #[test]
    fn toggle_reports_whether_anything_changed() {
        let mut product =
            Product::from_create("p1".into(), ProductCreate::new("Suco", 8.0, "c"), Utc::now()).unwrap();
        assert_eq!(product.handle_action(ProductAction::SetActive(true)), Ok(false));
        assert_eq!(product.handle_action(ProductAction::SetActive(false)), Ok(true));
        assert!(!product.ativo);
    }
}
