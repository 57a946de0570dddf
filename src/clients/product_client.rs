use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{Product, ProductCreate, ProductPatch};
use crate::product_actor::{ProductAction, ProductError};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductError, product, products);

impl ProductClient {
    #[instrument(skip(self, product), fields(nome = %product.nome))]
    pub async fn create_product(&self, product: ProductCreate) -> Result<String, ProductError> {
        debug!("Sending request");
        self.inner.create(product).await.map_err(ProductError::from)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_product(&self, id: String, patch: ProductPatch) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(ProductError::from)
    }

    /// Returns whether the flag actually changed.
    #[instrument(skip(self))]
    pub async fn toggle_product_active(&self, id: String, ativo: bool) -> Result<bool, ProductError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, ProductAction::SetActive(ativo))
            .await
            .map_err(ProductError::from)
    }

    #[instrument(skip(self))]
    pub async fn list_products_by_category(&self, categoria_id: String) -> Result<Vec<Product>, ProductError> {
        let products = self.list_products().await?;
        Ok(products
            .into_iter()
            .filter(|p| p.categoria_id == categoria_id)
            .collect())
    }
}
