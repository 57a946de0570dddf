use crate::domain::{Order, OrderStatus};

/// Status tab selected on the orders screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => order.status == *status,
        }
    }
}

/// Keeps the orders matching `filter`, preserving feed order.
pub fn filter_orders<'a>(orders: &'a [Order], filter: StatusFilter) -> Vec<&'a Order> {
    orders.iter().filter(|o| filter.matches(o)).collect()
}

/// Header counters of the orders screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeedCounters {
    pub pending: usize,
    pub in_progress: usize,
}

impl FeedCounters {
    pub fn from_orders(orders: &[Order]) -> Self {
        orders.iter().fold(Self::default(), |mut acc, order| {
            if order.status == OrderStatus::Pendente {
                acc.pending += 1;
            } else if order.status.is_in_progress() {
                acc.in_progress += 1;
            }
            acc
        })
    }
}
