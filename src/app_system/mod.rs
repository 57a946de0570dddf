//! System orchestration, startup, and shutdown logic.

pub mod delivery_system;
pub mod error;
pub mod tracing;

pub use delivery_system::*;
pub use error::*;
pub use self::tracing::*;
