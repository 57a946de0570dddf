//! Order documents: the status state machine and the store hooks that enforce it.

mod actions;
pub mod entity;
pub mod error;
pub mod status;

pub use actions::*;
pub use error::*;
