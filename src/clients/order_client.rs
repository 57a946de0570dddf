use tracing::{debug, info, instrument, warn};

use crate::actor_framework::{ResourceClient, Subscription};
use crate::domain::{Order, OrderCreate, OrderStatus};
use crate::order_actor::{OrderAction, OrderError, StatusChange};

/// Client for placing orders and driving them through their status.
///
/// Every status command is a store action, so the transition table is checked
/// by the store actor against the order as it is when the write lands.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl_basic_client!(OrderClient, Order, OrderError, order, orders);

impl OrderClient {
    #[instrument(skip(self, order), fields(cliente = %order.cliente_nome))]
    pub async fn create_order(&self, order: OrderCreate) -> Result<String, OrderError> {
        debug!("Sending request");
        self.inner.create(order).await.map_err(OrderError::from)
    }

    /// Direct status write, as issued by the status picker.
    ///
    /// Writing `recusado` here records no reason; use [`Self::reject_order`]
    /// for that.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn set_order_status(&self, id: String, status: OrderStatus) -> Result<StatusChange, OrderError> {
        debug!("Sending request");
        let change = self
            .inner
            .perform_action(id, OrderAction::SetStatus(status))
            .await
            .map_err(OrderError::from)?;
        info!(from = %change.from, to = %change.to, "Order status changed");
        Ok(change)
    }

    /// Accepts a pending order and moves it straight into preparation.
    ///
    /// These are two separate writes, `aceito` then `em_preparo`, and each
    /// produces its own snapshot. If the second one fails the order is left
    /// `aceito` and that error is returned.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn accept_order(&self, id: String) -> Result<(), OrderError> {
        self.set_order_status(id.clone(), OrderStatus::Aceito).await?;
        if let Err(e) = self.set_order_status(id, OrderStatus::EmPreparo).await {
            warn!(error = %e, "Order accepted but not moved to preparation");
            return Err(e);
        }
        Ok(())
    }

    /// Refuses a pending order. The reason is stored as given, even if empty.
    #[instrument(skip(self, reason), fields(order_id = %id))]
    pub async fn reject_order(&self, id: String, reason: String) -> Result<(), OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::Reject { reason })
            .await
            .map_err(OrderError::from)?;
        info!("Order refused");
        Ok(())
    }

    /// Live feed of every order, newest first.
    ///
    /// Keep reading the subscription or drop it: unread snapshots queue up.
    #[instrument(skip(self))]
    pub async fn subscribe(&self) -> Result<Subscription<Order>, OrderError> {
        debug!("Sending request");
        self.inner.subscribe().await.map_err(OrderError::from)
    }
}
