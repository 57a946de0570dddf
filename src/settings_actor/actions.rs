/// Custom actions for the settings document.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsAction {
    /// Opens or pauses the storefront for new orders.
    SetAcceptingOrders(bool),
}
