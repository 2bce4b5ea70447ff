//! Internal diagnostic channel for configuration failures
//!
//! Chaining methods never fail towards the caller. Whatever goes wrong while
//! applying a change is reported here instead: handed to an injected
//! callback (or written to stderr when none is set) and remembered as the
//! instance's last configuration error.

use super::error::ConfigError;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Callback invoked for every swallowed configuration error
pub type DiagnosticCallback = Arc<dyn Fn(&ConfigError) + Send + Sync>;

#[derive(Default)]
pub struct Diagnostics {
    callback: Option<DiagnosticCallback>,
    last_error: Mutex<Option<ConfigError>>,
}

impl Diagnostics {
    pub fn new(callback: Option<DiagnosticCallback>) -> Self {
        Self {
            callback,
            last_error: Mutex::new(None),
        }
    }

    /// Diagnostics for a derived logger: same callback, empty error slot
    pub fn fork(&self) -> Self {
        Self::new(self.callback.clone())
    }

    pub fn report(&self, error: ConfigError) {
        match self.callback {
            Some(ref callback) => callback(&error),
            None => eprintln!("[LOGGER ERROR] {}", error),
        }
        *self.last_error.lock() = Some(error);
    }

    pub fn last_error(&self) -> Option<ConfigError> {
        self.last_error.lock().clone()
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("has_callback", &self.callback.is_some())
            .field("last_error", &*self.last_error.lock())
            .finish()
    }
}
