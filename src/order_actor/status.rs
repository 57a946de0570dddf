//! Order status state machine.
//!
//! ```text
//! pendente ─► aceito ─► em_preparo ─┬─► saiu_para_entrega ────┬─► concluido
//!    │                              └─► pronto_para_retirada ─┘
//!    └─► recusado
//! ```
//!
//! The middle "ready" status depends on the order's [`FulfillmentType`].
//! Writes may skip ahead along the path but never go back, and nothing leaves
//! `concluido` or `recusado`.

use crate::domain::{FulfillmentType, Order, OrderStatus};

use super::OrderError;

/// The forward path an order of the given fulfillment type walks through.
pub fn fulfillment_path(tipo: FulfillmentType) -> [OrderStatus; 5] {
    let ready = match tipo {
        FulfillmentType::Entrega => OrderStatus::SaiuParaEntrega,
        FulfillmentType::Retirada => OrderStatus::ProntoParaRetirada,
    };
    [
        OrderStatus::Pendente,
        OrderStatus::Aceito,
        OrderStatus::EmPreparo,
        ready,
        OrderStatus::Concluido,
    ]
}

impl OrderStatus {
    fn path_position(self, tipo: FulfillmentType) -> Option<usize> {
        fulfillment_path(tipo).iter().position(|s| *s == self)
    }

    /// Whether a write from `self` to `to` is legal for an order of type `tipo`.
    pub fn can_transition_to(self, to: OrderStatus, tipo: FulfillmentType) -> bool {
        if self.is_terminal() {
            return false;
        }
        if to == OrderStatus::Recusado {
            return self == OrderStatus::Pendente;
        }
        match (self.path_position(tipo), to.path_position(tipo)) {
            (Some(from), Some(target)) => target > from,
            _ => false,
        }
    }

    /// Targets offered by the status picker, in path order.
    pub fn next_options(self, tipo: FulfillmentType) -> Vec<OrderStatus> {
        OrderStatus::ALL
            .into_iter()
            .filter(|to| self.can_transition_to(*to, tipo))
            .collect()
    }
}

impl Order {
    /// Apply a status write, rejecting anything the state machine forbids.
    pub fn apply_status(&mut self, to: OrderStatus) -> Result<OrderStatus, OrderError> {
        let from = self.status;
        if !from.can_transition_to(to, self.tipo_retirada) {
            return Err(OrderError::InvalidTransition { from, to });
        }
        self.status = to;
        Ok(from)
    }
}
