/// Custom actions for Product entities.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    /// Shows or hides the product on the menu.
    ///
    /// Yields `true` when the flag actually changed.
    SetActive(bool),
}
