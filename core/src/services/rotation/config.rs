//! Configuration for the rotation coordinator

use std::time::Duration;

/// Default bound on a single store call
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the rotation coordinator
#[derive(Debug, Clone)]
pub struct RotationConfig {
    /// Upper bound on each ledger or credential store call; `None` waits
    /// indefinitely
    pub store_timeout: Option<Duration>,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            store_timeout: Some(DEFAULT_STORE_TIMEOUT),
        }
    }
}

impl RotationConfig {
    /// No timeout on store calls
    pub fn unbounded() -> Self {
        Self { store_timeout: None }
    }

    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = Some(timeout);
        self
    }
}
