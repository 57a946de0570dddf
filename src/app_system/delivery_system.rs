use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};
use uuid::Uuid;

use crate::actor_framework::ResourceActor;
use crate::clients::{CategoryClient, OrderClient, ProductClient, SettingsClient};
use crate::config::AppConfig;
use crate::domain::{Category, Order, Product, StoreSettings, SETTINGS_ID};
use crate::feed::{FeedHandle, FeedService, Notifier};
use crate::order_actor::OrderError;

use super::SystemError;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// The application system: one store actor per collection plus the clients
/// wired to them.
///
/// Responsible for starting up actors and handling shutdown.
pub struct DeliverySystem {
    pub order_client: OrderClient,
    pub product_client: ProductClient,
    pub category_client: CategoryClient,
    pub settings_client: SettingsClient,
    config: AppConfig,
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl DeliverySystem {
    pub fn new(config: AppConfig) -> Self {
        let capacity = config.channel_capacity;

        let (order_actor, order_inner) = ResourceActor::<Order>::new(capacity, new_id);
        let order_client = OrderClient::new(order_inner);
        let order_handle = tokio::spawn(order_actor.run());

        let (product_actor, product_inner) = ResourceActor::<Product>::new(capacity, new_id);
        let product_client = ProductClient::new(product_inner);
        let product_handle = tokio::spawn(product_actor.run());

        let (category_actor, category_inner) = ResourceActor::<Category>::new(capacity, new_id);
        let category_client = CategoryClient::new(category_inner);
        let category_handle = tokio::spawn(category_actor.run());

        // Single document under a fixed id.
        let (settings_actor, settings_inner) =
            ResourceActor::<StoreSettings>::new(capacity, || SETTINGS_ID.to_string());
        let settings_client = SettingsClient::new(settings_inner);
        let settings_handle = tokio::spawn(settings_actor.run());

        info!(capacity, timezone = %config.timezone, "Delivery system started");

        Self {
            order_client,
            product_client,
            category_client,
            settings_client,
            config,
            handles: vec![
                ("pedidos", order_handle),
                ("produtos", product_handle),
                ("categorias", category_handle),
                ("configuracoes", settings_handle),
            ],
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Subscribes to the orders collection and starts a feed over it.
    pub async fn start_order_feed(&self, notifier: Arc<dyn Notifier>) -> Result<FeedHandle, OrderError> {
        let subscription = self.order_client.subscribe().await?;
        Ok(FeedService::start(subscription, notifier, self.config.toast_duration))
    }

    /// Drops the clients, which closes every actor's mailbox, then waits for
    /// the actors to finish.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        drop(self.order_client);
        drop(self.product_client);
        drop(self.category_client);
        drop(self.settings_client);

        for (name, handle) in self.handles {
            if let Err(source) = handle.await {
                error!(actor = name, error = %source, "Actor task failed");
                return Err(SystemError::ActorTask { name, source });
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
