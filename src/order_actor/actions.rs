use crate::domain::OrderStatus;

/// Status writes against a stored order. Every variant goes through the
/// transition guard inside the store actor.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// Move to `status`.
    SetStatus(OrderStatus),
    /// Move to `recusado` and record the reason, empty or not.
    Reject { reason: String },
}

/// Result of a status write.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub from: OrderStatus,
    pub to: OrderStatus,
}
