use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::category_actor::CategoryError;
use crate::domain::{Category, CategoryCreate, CategoryPatch};

/// Client for interacting with the Category actor.
#[derive(Clone)]
pub struct CategoryClient {
    inner: ResourceClient<Category>,
}

impl_basic_client!(CategoryClient, Category, CategoryError, category, categories);

impl CategoryClient {
    #[instrument(skip(self, category), fields(nome = %category.nome))]
    pub async fn create_category(&self, category: CategoryCreate) -> Result<String, CategoryError> {
        debug!("Sending request");
        self.inner.create(category).await.map_err(CategoryError::from)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_category(&self, id: String, patch: CategoryPatch) -> Result<Category, CategoryError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(CategoryError::from)
    }
}
