//! Typed clients over the store actors.

#[macro_use]
mod macros;

pub mod category_client;
pub mod order_client;
pub mod product_client;
pub mod settings_client;

pub use category_client::*;
pub use order_client::*;
pub use product_client::*;
pub use settings_client::*;
