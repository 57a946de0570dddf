use chrono::{DateTime, Utc};

use crate::actor_framework::Entity;
use crate::domain::{SettingsPatch, StoreSettings};

use super::{SettingsAction, SettingsError};

impl StoreSettings {
    /// Checks the cross-field rules of the settings screen.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.nome_estabelecimento.trim().is_empty() {
            return Err(SettingsError::ValidationError(
                "nomeEstabelecimento is required".to_string(),
            ));
        }
        for (field, value) in [
            ("valorFrete", self.valor_frete),
            ("freteGratis", self.frete_gratis),
            ("raioEntrega", self.raio_entrega),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::ValidationError(format!(
                    "{} must be zero or more, got {}",
                    field, value
                )));
            }
        }
        if self.tempo_entrega_min > self.tempo_entrega_max {
            return Err(SettingsError::ValidationError(format!(
                "tempoEntregaMin ({}) exceeds tempoEntregaMax ({})",
                self.tempo_entrega_min, self.tempo_entrega_max
            )));
        }
        for (day, hours) in self.horario_funcionamento.days() {
            if hours.aberto && hours.inicio >= hours.fim {
                return Err(SettingsError::ValidationError(format!(
                    "{}: opening time must be before closing time",
                    day
                )));
            }
        }
        Ok(())
    }
}

impl Entity for StoreSettings {
    const NAME: &'static str = "configuracoes";

    type Id = String;
    type CreatePayload = StoreSettings;
    type Patch = SettingsPatch;
    type Action = SettingsAction;
    type ActionResult = ();
    type Error = SettingsError;
    type SortKey = String;

    fn id(&self) -> &String {
        &self.id
    }

    fn sort_key(&self) -> String {
        self.id.clone()
    }

    fn from_create(id: String, payload: StoreSettings, _now: DateTime<Utc>) -> Result<Self, SettingsError> {
        let settings = StoreSettings { id, ..payload };
        settings.validate()?;
        Ok(settings)
    }

    fn on_update(&mut self, patch: SettingsPatch) -> Result<(), SettingsError> {
        macro_rules! apply {
            ($target:expr, $patch:ident; $($field:ident),* $(,)?) => {
                $(if let Some(value) = $patch.$field {
                    $target.$field = value;
                })*
            };
        }
        apply!(
            self, patch;
            nome_estabelecimento,
            endereco,
            telefone,
            horario_funcionamento,
            valor_frete,
            frete_gratis,
            raio_entrega,
            tempo_entrega_min,
            tempo_entrega_max,
            logo_url,
            logo_path,
            cor_primaria,
            cor_secundaria,
            instagram,
            facebook,
        );
        self.validate()
    }

    fn handle_action(&mut self, action: SettingsAction) -> Result<(), SettingsError> {
        match action {
            SettingsAction::SetAcceptingOrders(open) => {
                self.aceita_pedidos = open;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(StoreSettings::default().validate(), Ok(()));
    }

    #[test]
    fn delivery_window_must_be_ordered() {
        let mut settings = StoreSettings::default();
        let patch = SettingsPatch {
            tempo_entrega_min: Some(90),
            ..Default::default()
        };
        assert!(matches!(
            settings.on_update(patch),
            Err(SettingsError::ValidationError(_))
        ));
    }

    #[test]
    fn closed_days_skip_the_hours_check() {
        let mut settings = StoreSettings::default();
        let mut hours = settings.horario_funcionamento;
        hours.domingo.inicio = NaiveTime::from_hms_opt(20, 0, 0).unwrap();
        hours.domingo.fim = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let patch = SettingsPatch {
            horario_funcionamento: Some(hours),
            ..Default::default()
        };
        assert_eq!(settings.on_update(patch), Ok(()));

        hours.domingo.aberto = true;
        let patch = SettingsPatch {
            horario_funcionamento: Some(hours),
            ..Default::default()
        };
        assert!(settings.on_update(patch).is_err());
    }

    #[test]
    fn negative_fee_is_rejected() {
        let mut settings = StoreSettings::default();
        let patch = SettingsPatch {
            valor_frete: Some(-1.0),
            ..Default::default()
        };
        assert!(settings.on_update(patch).is_err());
    }
}
