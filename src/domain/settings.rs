use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Document id of the single settings record.
pub const SETTINGS_ID: &str = "estabelecimento";

/// Opening hours of one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayHours {
    pub aberto: bool,
    pub inicio: NaiveTime,
    pub fim: NaiveTime,
}

impl DayHours {
    fn open(inicio: (u32, u32), fim: (u32, u32)) -> Self {
        Self {
            aberto: true,
            inicio: hm(inicio),
            fim: hm(fim),
        }
    }

    fn closed(inicio: (u32, u32), fim: (u32, u32)) -> Self {
        Self {
            aberto: false,
            ..Self::open(inicio, fim)
        }
    }
}

fn hm((hour, minute): (u32, u32)) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyHours {
    pub segunda: DayHours,
    pub terca: DayHours,
    pub quarta: DayHours,
    pub quinta: DayHours,
    pub sexta: DayHours,
    pub sabado: DayHours,
    pub domingo: DayHours,
}

impl WeeklyHours {
    pub fn days(&self) -> [(&'static str, &DayHours); 7] {
        [
            ("segunda", &self.segunda),
            ("terca", &self.terca),
            ("quarta", &self.quarta),
            ("quinta", &self.quinta),
            ("sexta", &self.sexta),
            ("sabado", &self.sabado),
            ("domingo", &self.domingo),
        ]
    }
}

impl Default for WeeklyHours {
    fn default() -> Self {
        let weekday = DayHours::open((8, 0), (22, 0));
        Self {
            segunda: weekday,
            terca: weekday,
            quarta: weekday,
            quinta: weekday,
            sexta: weekday,
            sabado: DayHours::open((9, 0), (23, 0)),
            domingo: DayHours::closed((9, 0), (18, 0)),
        }
    }
}

/// Store configuration shown on the settings screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    pub id: String,
    pub nome_estabelecimento: String,
    pub endereco: String,
    pub telefone: String,
    pub horario_funcionamento: WeeklyHours,
    pub valor_frete: f64,
    pub frete_gratis: f64,
    /// Kilometres.
    pub raio_entrega: f64,
    /// Minutes.
    pub tempo_entrega_min: u32,
    pub tempo_entrega_max: u32,
    pub aceita_pedidos: bool,
    pub logo_url: String,
    pub logo_path: String,
    pub cor_primaria: String,
    pub cor_secundaria: String,
    pub instagram: String,
    pub facebook: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            id: SETTINGS_ID.to_string(),
            nome_estabelecimento: "Meu Estabelecimento".to_string(),
            endereco: "Rua Exemplo, 123 - Centro".to_string(),
            telefone: "(11) 99999-9999".to_string(),
            horario_funcionamento: WeeklyHours::default(),
            valor_frete: 5.0,
            frete_gratis: 50.0,
            raio_entrega: 5.0,
            tempo_entrega_min: 30,
            tempo_entrega_max: 60,
            aceita_pedidos: true,
            logo_url: String::new(),
            logo_path: String::new(),
            cor_primaria: "#e74c3c".to_string(),
            cor_secundaria: "#2c3e50".to_string(),
            instagram: String::new(),
            facebook: String::new(),
        }
    }
}

/// Partial update of the settings document.
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub nome_estabelecimento: Option<String>,
    pub endereco: Option<String>,
    pub telefone: Option<String>,
    pub horario_funcionamento: Option<WeeklyHours>,
    pub valor_frete: Option<f64>,
    pub frete_gratis: Option<f64>,
    pub raio_entrega: Option<f64>,
    pub tempo_entrega_min: Option<u32>,
    pub tempo_entrega_max: Option<u32>,
    pub logo_url: Option<String>,
    pub logo_path: Option<String>,
    pub cor_primaria: Option<String>,
    pub cor_secundaria: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
}
