//! Router seam: guards and the watchdog emit navigation side effects only

/// Navigation sink the external router implements
pub trait Navigator: Send + Sync {
    /// Navigate to a path, optionally carrying query parameters
    fn navigate(&self, path: &str, query: &[(&str, &str)]);
}

/// Navigator that only records the intent in the log.
/// Useful for headless runs where no real router is attached.
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, path: &str, query: &[(&str, &str)]) {
        if query.is_empty() {
            log::info!("Navigating to {}", path);
        } else {
            let query_string = query
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect::<Vec<_>>()
                .join("&");
            log::info!("Navigating to {}?{}", path, query_string);
        }
    }
}
