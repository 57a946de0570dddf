use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an order. Serialized with the values the stored
/// documents use (`pendente`, `em_preparo`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pendente,
    Aceito,
    EmPreparo,
    SaiuParaEntrega,
    ProntoParaRetirada,
    Concluido,
    Recusado,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pendente,
        OrderStatus::Aceito,
        OrderStatus::EmPreparo,
        OrderStatus::SaiuParaEntrega,
        OrderStatus::ProntoParaRetirada,
        OrderStatus::Concluido,
        OrderStatus::Recusado,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pendente => "pendente",
            OrderStatus::Aceito => "aceito",
            OrderStatus::EmPreparo => "em_preparo",
            OrderStatus::SaiuParaEntrega => "saiu_para_entrega",
            OrderStatus::ProntoParaRetirada => "pronto_para_retirada",
            OrderStatus::Concluido => "concluido",
            OrderStatus::Recusado => "recusado",
        }
    }

    /// Text shown on the status badge.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pendente => "Aguardando Confirmação",
            OrderStatus::Aceito => "Pedido Aceito",
            OrderStatus::EmPreparo => "Em Preparo",
            OrderStatus::SaiuParaEntrega => "Saiu para Entrega",
            OrderStatus::ProntoParaRetirada => "Pronto para Retirada",
            OrderStatus::Concluido => "Concluído",
            OrderStatus::Recusado => "Recusado",
        }
    }

    /// Badge colour.
    pub fn color(&self) -> &'static str {
        match self {
            OrderStatus::Pendente => "#f39c12",
            OrderStatus::Aceito => "#3498db",
            OrderStatus::EmPreparo => "#9b59b6",
            OrderStatus::SaiuParaEntrega => "#1abc9c",
            OrderStatus::ProntoParaRetirada => "#16a085",
            OrderStatus::Concluido => "#27ae60",
            OrderStatus::Recusado => "#e74c3c",
        }
    }

    /// `concluido` and `recusado` accept no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Concluido | OrderStatus::Recusado)
    }

    /// Accepted but not yet finished.
    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            OrderStatus::Aceito
                | OrderStatus::EmPreparo
                | OrderStatus::SaiuParaEntrega
                | OrderStatus::ProntoParaRetirada
        )
    }

    /// Statuses whose orders count as sales on the dashboard.
    pub fn counts_as_sale(&self) -> bool {
        self.is_in_progress() || *self == OrderStatus::Concluido
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery to an address or pickup at the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentType {
    Entrega,
    Retirada,
}

impl FulfillmentType {
    pub fn label(&self) -> &'static str {
        match self {
            FulfillmentType::Entrega => "Entrega",
            FulfillmentType::Retirada => "Retirada no Local",
        }
    }
}

/// A line of an order: older documents store bare product names, newer ones
/// a structured item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineItem {
    Name(String),
    Detailed {
        #[serde(default)]
        nome: Option<String>,
        #[serde(default)]
        quantidade: Option<u32>,
        #[serde(default)]
        preco: Option<f64>,
    },
}

impl LineItem {
    pub fn name(&self) -> Option<&str> {
        match self {
            LineItem::Name(name) => Some(name.as_str()),
            LineItem::Detailed { nome, .. } => nome.as_deref(),
        }
    }
}

/// Represents a customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub cliente_nome: String,
    pub cliente_telefone: String,
    #[serde(default)]
    pub endereco: Option<String>,
    #[serde(default)]
    pub itens: Vec<LineItem>,
    pub valor_total: f64,
    pub tipo_retirada: FulfillmentType,
    #[serde(default)]
    pub forma_pagamento: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivo_recusa: Option<String>,
}

/// Payload for placing a new order. Status and timestamps are assigned by the
/// store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub cliente_nome: String,
    pub cliente_telefone: String,
    #[serde(default)]
    pub endereco: Option<String>,
    #[serde(default)]
    pub itens: Vec<LineItem>,
    pub valor_total: f64,
    pub tipo_retirada: FulfillmentType,
    #[serde(default)]
    pub forma_pagamento: String,
}

impl Order {
    /// Address line, or the pickup placeholder.
    pub fn delivery_address(&self) -> &str {
        self.endereco
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or("Retirada no local")
    }
}

#[cfg(test)]
impl Order {
    /// A delivery order at a fixed point in time, for tests elsewhere in the crate.
    pub(crate) fn fixture(id: &str, status: OrderStatus, created_secs: i64) -> Self {
        let at = DateTime::from_timestamp(1_700_000_000 + created_secs, 0).unwrap_or_default();
        Self {
            id: id.to_string(),
            status,
            created_at: at,
            updated_at: at,
            cliente_nome: "Cliente".to_string(),
            cliente_telefone: String::new(),
            endereco: Some("Rua das Flores, 10".to_string()),
            itens: Vec::new(),
            valor_total: 30.0,
            tipo_retirada: FulfillmentType::Entrega,
            forma_pagamento: "Pix".to_string(),
            motivo_recusa: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_stored_document_with_mixed_items() {
        let json = r#"{
            "id": "abc",
            "status": "em_preparo",
            "createdAt": "2024-05-01T12:00:00Z",
            "updatedAt": "2024-05-01T12:05:00Z",
            "clienteNome": "Ana",
            "clienteTelefone": "(11) 91234-5678",
            "itens": ["Pizza Calabresa", {"nome": "Refrigerante", "quantidade": 2}, {"preco": 3.5}],
            "valorTotal": 59.9,
            "tipoRetirada": "retirada",
            "formaPagamento": "Pix"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::EmPreparo);
        assert_eq!(order.tipo_retirada, FulfillmentType::Retirada);
        assert_eq!(order.itens[0].name(), Some("Pizza Calabresa"));
        assert_eq!(order.itens[1].name(), Some("Refrigerante"));
        assert_eq!(order.itens[2].name(), None);
        assert_eq!(order.motivo_recusa, None);
        assert_eq!(order.delivery_address(), "Retirada no local");
    }

    #[test]
    fn status_serializes_to_document_values() {
        let encoded = serde_json::to_string(&OrderStatus::ProntoParaRetirada).unwrap();
        assert_eq!(encoded, "\"pronto_para_retirada\"");
        for status in OrderStatus::ALL {
            assert_eq!(format!("\"{}\"", status), serde_json::to_string(&status).unwrap());
        }
    }

    #[test]
    fn in_progress_and_terminal_sets_are_disjoint() {
        for status in OrderStatus::ALL {
            assert!(!(status.is_terminal() && status.is_in_progress()), "{status}");
        }
        assert!(OrderStatus::Concluido.counts_as_sale());
        assert!(!OrderStatus::Recusado.counts_as_sale());
        assert!(!OrderStatus::Pendente.counts_as_sale());
    }
}
