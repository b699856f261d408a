//! In-process navigation history.

use std::sync::{Mutex, MutexGuard, PoisonError};

use guesthouse_application::ports::Navigator;
use tracing::debug;

/// Navigator backed by an in-memory history stack.
///
/// Used by the command-line front end, where "navigating" only records the
/// view the user would be looking at.
#[derive(Debug)]
pub struct HistoryNavigator {
    history: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    /// Starts at `path`.
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self {
            history: Mutex::new(vec![path.to_string()]),
        }
    }

    /// Every path visited, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for HistoryNavigator {
    fn current_path(&self) -> String {
        self.lock().last().cloned().unwrap_or_else(|| "/".to_string())
    }

    fn navigate(&self, path: &str) {
        debug!(path, "Navigate");
        self.lock().push(path.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_navigate_moves_current_path() {
        let navigator = HistoryNavigator::default();
        navigator.navigate("/my-bookings");
        navigator.navigate("/login?returnTo=%2Fmy-bookings");

        assert_eq!(navigator.current_path(), "/login?returnTo=%2Fmy-bookings");
        assert_eq!(
            navigator.history(),
            vec!["/", "/my-bookings", "/login?returnTo=%2Fmy-bookings"]
        );
    }
}
