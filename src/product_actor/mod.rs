//! Catalog products, including the active/inactive toggle.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
