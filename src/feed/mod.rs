//! Live orders feed: snapshot reconciliation, new-order alerts and the
//! orders-screen view.

pub mod notifier;
pub mod reconciler;
pub mod service;
pub mod view;

pub use notifier::*;
pub use reconciler::*;
pub use service::*;
pub use view::*;
