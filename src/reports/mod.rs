//! Sales dashboard: period ranges and the figures computed over them.

pub mod metrics;
pub mod period;

pub use metrics::*;
pub use period::*;
