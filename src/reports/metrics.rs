use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, Timelike};
use chrono_tz::Tz;

use crate::domain::{FulfillmentType, Order, OrderStatus};

use super::{DateRange, Period, PeriodError};

pub const UNSPECIFIED_PAYMENT: &str = "Não informado";
pub const NO_PAYMENT: &str = "Nenhum";
pub const UNNAMED_PRODUCT: &str = "Produto";

/// Headline figures of the dashboard.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SalesMetrics {
    pub total_orders: usize,
    pub total_sales: f64,
    pub average_ticket: f64,
    pub completed: usize,
    pub in_progress: usize,
    pub top_payment_method: String,
    pub payment_methods: BTreeMap<String, usize>,
    pub deliveries: usize,
    pub pickups: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DaySales {
    pub date: NaiveDate,
    pub total: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourSales {
    /// `"HH:00"`
    pub hour: String,
    pub total: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCount {
    pub nome: String,
    pub quantidade: usize,
}

/// Orders created inside `range` whose status counts as a sale.
pub fn orders_in_range(orders: &[Order], range: &DateRange) -> Vec<Order> {
    orders
        .iter()
        .filter(|o| o.status.counts_as_sale() && range.contains(&o.created_at))
        .cloned()
        .collect()
}

/// Ties go to the key seen first.
fn most_frequent(counts: &[(String, usize)]) -> Option<&str> {
    let mut best: Option<&(String, usize)> = None;
    for entry in counts {
        if best.map_or(true, |b| entry.1 > b.1) {
            best = Some(entry);
        }
    }
    best.map(|(name, _)| name.as_str())
}

/// Counts in first-seen order.
fn tally<'a>(names: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for name in names {
        match index.get(name) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(name, counts.len());
                counts.push((name.to_string(), 1));
            }
        }
    }
    counts
}

pub fn compute_metrics(orders: &[Order]) -> SalesMetrics {
    let total_orders = orders.len();
    let total_sales: f64 = orders.iter().map(|o| o.valor_total).sum();
    let average_ticket = if total_orders > 0 {
        total_sales / total_orders as f64
    } else {
        0.0
    };

    let payments = tally(orders.iter().map(|o| {
        let method = o.forma_pagamento.trim();
        if method.is_empty() {
            UNSPECIFIED_PAYMENT
        } else {
            method
        }
    }));
    let top_payment_method = most_frequent(&payments).unwrap_or(NO_PAYMENT).to_string();

    SalesMetrics {
        total_orders,
        total_sales,
        average_ticket,
        completed: orders.iter().filter(|o| o.status == OrderStatus::Concluido).count(),
        in_progress: orders.iter().filter(|o| o.status.is_in_progress()).count(),
        top_payment_method,
        payment_methods: payments.into_iter().collect(),
        deliveries: orders
            .iter()
            .filter(|o| o.tipo_retirada == FulfillmentType::Entrega)
            .count(),
        pickups: orders
            .iter()
            .filter(|o| o.tipo_retirada == FulfillmentType::Retirada)
            .count(),
    }
}

/// Daily totals, by local calendar day, oldest first. Days without sales are
/// omitted.
pub fn sales_by_day(orders: &[Order], tz: Tz) -> Vec<DaySales> {
    let mut days: BTreeMap<NaiveDate, DaySales> = BTreeMap::new();
    for order in orders {
        let date = order.created_at.with_timezone(&tz).date_naive();
        let day = days.entry(date).or_insert(DaySales {
            date,
            total: 0.0,
            count: 0,
        });
        day.total += order.valor_total;
        day.count += 1;
    }
    days.into_values().collect()
}

/// One bucket per local hour, all 24 present.
pub fn sales_by_hour(orders: &[Order], tz: Tz) -> Vec<HourSales> {
    let mut hours: Vec<HourSales> = (0..24)
        .map(|h| HourSales {
            hour: format!("{:02}:00", h),
            total: 0.0,
            count: 0,
        })
        .collect();
    for order in orders {
        let hour = order.created_at.with_timezone(&tz).hour() as usize;
        hours[hour].total += order.valor_total;
        hours[hour].count += 1;
    }
    hours
}

/// Most frequent line items. Each line counts once, whatever its quantity.
pub fn top_products(orders: &[Order], limit: usize) -> Vec<ProductCount> {
    let mut counts = tally(
        orders
            .iter()
            .flat_map(|o| o.itens.iter())
            .map(|item| item.name().unwrap_or(UNNAMED_PRODUCT)),
    );
    // Stable: equal counts keep first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(limit)
        .map(|(nome, quantidade)| ProductCount { nome, quantidade })
        .collect()
}

/// Percentage change from `previous` to `current`; zero when there is no
/// previous value to compare against.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}

/// Everything the dashboard shows for one period.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardReport {
    pub label: String,
    pub range: DateRange,
    pub metrics: SalesMetrics,
    pub by_day: Vec<DaySales>,
    pub by_hour: Vec<HourSales>,
    pub top_products: Vec<ProductCount>,
    /// Metrics of the preceding period of the same length, when requested.
    pub previous: Option<SalesMetrics>,
}

pub const TOP_PRODUCTS_LIMIT: usize = 5;

impl DashboardReport {
    pub fn build(
        orders: &[Order],
        period: Period,
        today: NaiveDate,
        tz: Tz,
        compare: bool,
    ) -> Result<Self, PeriodError> {
        let range = period.range(today, tz)?;
        let sales = orders_in_range(orders, &range);
        let previous = if compare {
            let before = range.previous()?;
            Some(compute_metrics(&orders_in_range(orders, &before)))
        } else {
            None
        };
        Ok(Self {
            label: period.label(&range),
            range,
            metrics: compute_metrics(&sales),
            by_day: sales_by_day(&sales, tz),
            by_hour: sales_by_hour(&sales, tz),
            top_products: top_products(&sales, TOP_PRODUCTS_LIMIT),
            previous,
        })
    }
}
