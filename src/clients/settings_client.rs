use tracing::{debug, info, instrument};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::domain::{SettingsPatch, StoreSettings, SETTINGS_ID};
use crate::settings_actor::{SettingsAction, SettingsError};

/// Client for the single settings document.
///
/// The settings store must be started with an id function that always yields
/// [`SETTINGS_ID`].
#[derive(Clone)]
pub struct SettingsClient {
    inner: ResourceClient<StoreSettings>,
}

impl SettingsClient {
    pub fn new(inner: ResourceClient<StoreSettings>) -> Self {
        Self { inner }
    }

    /// Reads the settings, writing the defaults first if none exist yet.
    #[instrument(skip(self))]
    pub async fn get_settings(&self) -> Result<StoreSettings, SettingsError> {
        debug!("Sending request");
        if let Some(settings) = self.inner.get(SETTINGS_ID.to_string()).await? {
            return Ok(settings);
        }
        info!("No settings stored yet, writing defaults");
        match self.inner.create(StoreSettings::default()).await {
            // Another caller wrote them between our read and our create.
            Ok(_) | Err(FrameworkError::AlreadyExists(_)) => {}
            Err(e) => return Err(e.into()),
        }
        self.inner
            .get(SETTINGS_ID.to_string())
            .await?
            .ok_or_else(|| SettingsError::NotFound(SETTINGS_ID.to_string()))
    }

    #[instrument(skip(self, patch))]
    pub async fn update_settings(&self, patch: SettingsPatch) -> Result<StoreSettings, SettingsError> {
        self.get_settings().await?;
        debug!("Sending request");
        Ok(self.inner.update(SETTINGS_ID.to_string(), patch).await?)
    }

    #[instrument(skip(self))]
    pub async fn set_accepting_orders(&self, open: bool) -> Result<(), SettingsError> {
        self.get_settings().await?;
        debug!("Sending request");
        self.inner
            .perform_action(SETTINGS_ID.to_string(), SettingsAction::SetAcceptingOrders(open))
            .await?;
        info!(open, "Order intake updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::ResourceActor;
    use crate::mock_framework::{create_mock_client, expect_create, expect_get};

    #[tokio::test]
    async fn test_get_settings_returns_stored_document() {
        let (inner, mut rx) = create_mock_client::<StoreSettings>(10);
        let client = SettingsClient::new(inner);

        let task = tokio::spawn(async move { client.get_settings().await });

        let (id, responder) = expect_get(&mut rx).await.expect("Expected settings read");
        assert_eq!(id, SETTINGS_ID);
        let mut stored = StoreSettings::default();
        stored.aceita_pedidos = false;
        responder.send(Ok(Some(stored.clone()))).unwrap();

        assert_eq!(task.await.unwrap(), Ok(stored));
        // A document was found, so nothing gets created.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_get_settings_rereads_after_losing_the_create_race() {
        let (inner, mut rx) = create_mock_client::<StoreSettings>(10);
        let client = SettingsClient::new(inner);

        let task = tokio::spawn(async move { client.get_settings().await });

        let (_, responder) = expect_get(&mut rx).await.expect("Expected first read");
        responder.send(Ok(None)).unwrap();

        let (_, responder) = expect_create(&mut rx).await.expect("Expected defaults write");
        responder
            .send(Err(FrameworkError::AlreadyExists(SETTINGS_ID.to_string())))
            .unwrap();

        // The winner's document is returned, not the defaults.
        let (id, responder) = expect_get(&mut rx).await.expect("Expected re-read");
        assert_eq!(id, SETTINGS_ID);
        let mut winner = StoreSettings::default();
        winner.valor_frete = 9.0;
        responder.send(Ok(Some(winner.clone()))).unwrap();

        assert_eq!(task.await.unwrap(), Ok(winner));
    }

    #[tokio::test]
    async fn test_stale_defaults_write_keeps_operator_changes() {
        let (actor, inner) = ResourceActor::<StoreSettings>::new(10, || SETTINGS_ID.to_string());
        tokio::spawn(actor.run());
        let client = SettingsClient::new(inner.clone());

        client.set_accepting_orders(false).await.unwrap();

        // A caller that read "no settings" earlier now tries to write defaults.
        let stale = inner.create(StoreSettings::default()).await;
        assert_eq!(stale, Err(FrameworkError::AlreadyExists(SETTINGS_ID.to_string())));

        let settings = client.get_settings().await.unwrap();
        assert!(!settings.aceita_pedidos);
    }
}
