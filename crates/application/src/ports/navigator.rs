//! Navigation port

/// Port for the client's current location and programmatic navigation.
///
/// Navigation replaces the current entry, the same way a redirect does.
pub trait Navigator: Send + Sync {
    /// Path of the view currently shown, including any query string.
    fn current_path(&self) -> String;

    /// Navigates to `path`.
    fn navigate(&self, path: &str);
}
