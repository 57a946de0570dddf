use std::cmp::Reverse;

use chrono::{DateTime, Utc};

use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderStatus};

use super::{OrderAction, OrderError, StatusChange};

impl Entity for Order {
    const NAME: &'static str = "pedidos";

    type Id = String;
    type CreatePayload = OrderCreate;
    type Patch = (); // Order contents are immutable once placed
    type Action = OrderAction;
    type ActionResult = StatusChange;
    type Error = OrderError;
    type SortKey = (Reverse<DateTime<Utc>>, Reverse<String>);

    fn id(&self) -> &String {
        &self.id
    }

    /// Newest first.
    fn sort_key(&self) -> Self::SortKey {
        (Reverse(self.created_at), Reverse(self.id.clone()))
    }

    /// Places a new order. Every order starts out `pendente`.
    fn from_create(id: String, params: OrderCreate, now: DateTime<Utc>) -> Result<Self, OrderError> {
        if !params.valor_total.is_finite() || params.valor_total < 0.0 {
            return Err(OrderError::ValidationError(format!(
                "valorTotal must be a non-negative amount, got {}",
                params.valor_total
            )));
        }
        Ok(Self {
            id,
            status: OrderStatus::Pendente,
            created_at: now,
            updated_at: now,
            cliente_nome: params.cliente_nome,
            cliente_telefone: params.cliente_telefone,
            endereco: params.endereco,
            itens: params.itens,
            valor_total: params.valor_total,
            tipo_retirada: params.tipo_retirada,
            forma_pagamento: params.forma_pagamento,
            motivo_recusa: None,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), OrderError> {
        Ok(())
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    /// Status writes. Illegal transitions are rejected here, at the store,
    /// whatever the caller's UI allowed.
    fn handle_action(&mut self, action: OrderAction) -> Result<StatusChange, OrderError> {
        match action {
            OrderAction::SetStatus(to) => {
                let from = self.apply_status(to)?;
                Ok(StatusChange { from, to })
            }
            OrderAction::Reject { reason } => {
                let from = self.apply_status(OrderStatus::Recusado)?;
                self.motivo_recusa = Some(reason);
                Ok(StatusChange {
                    from,
                    to: OrderStatus::Recusado,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FulfillmentType;

    fn placed() -> Order {
        let payload = OrderCreate {
            cliente_nome: "Bruno".into(),
            cliente_telefone: "11 5555-0000".into(),
            endereco: Some("Rua A, 1".into()),
            itens: vec![],
            valor_total: 42.0,
            tipo_retirada: FulfillmentType::Entrega,
            forma_pagamento: "Dinheiro".into(),
        };
        Order::from_create("p1".into(), payload, Utc::now()).unwrap()
    }

    #[test]
    fn new_orders_are_pending() {
        let order = placed();
        assert_eq!(order.status, OrderStatus::Pendente);
        assert_eq!(order.created_at, order.updated_at);
    }

    #[test]
    fn negative_total_is_rejected() {
        let payload = OrderCreate {
            cliente_nome: "X".into(),
            cliente_telefone: String::new(),
            endereco: None,
            itens: vec![],
            valor_total: -1.0,
            tipo_retirada: FulfillmentType::Retirada,
            forma_pagamento: String::new(),
        };
        let result = Order::from_create("p2".into(), payload, Utc::now());
        assert!(matches!(result, Err(OrderError::ValidationError(_))));
    }

    #[test]
    fn reject_keeps_empty_reason() {
        let mut order = placed();
        let change = order
            .handle_action(OrderAction::Reject { reason: String::new() })
            .unwrap();
        assert_eq!(change.from, OrderStatus::Pendente);
        assert_eq!(order.status, OrderStatus::Recusado);
        assert_eq!(order.motivo_recusa, Some(String::new()));
    }

    #[test]
    fn illegal_write_leaves_status_alone() {
        let mut order = placed();
        let result = order.handle_action(OrderAction::SetStatus(OrderStatus::ProntoParaRetirada));
        assert_eq!(
            result,
            Err(OrderError::InvalidTransition {
                from: OrderStatus::Pendente,
                to: OrderStatus::ProntoParaRetirada,
            })
        );
        assert_eq!(order.status, OrderStatus::Pendente);
    }
}
