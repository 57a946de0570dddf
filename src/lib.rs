//! Admin core of a food-delivery ordering platform.
//!
//! Each collection (orders, products, categories, settings) lives in a
//! [`actor_framework::ResourceActor`] that emits the full sorted collection to
//! its subscribers after every write. On top of that:
//!
//! - [`order_actor::status`] is the order status state machine, enforced
//!   inside the order store;
//! - [`feed`] reconciles successive order snapshots and raises one alert per
//!   batch of newly arrived pending orders;
//! - [`reports`] computes the sales dashboard.

pub mod actor_framework;
pub mod app_system;
pub mod category_actor;
pub mod clients;
pub mod config;
pub mod domain;
pub mod feed;
pub mod format;
pub mod order_actor;
pub mod product_actor;
pub mod reports;
pub mod settings_actor;

#[cfg(test)]
mod mock_framework;
