//! Process-wide root logger

use super::logger::Logger;
use std::sync::{Arc, OnceLock};

static ROOT: OnceLock<Arc<Logger>> = OnceLock::new();

/// The shared root logger, created with the default configuration on first
/// use
///
/// Chaining on the root derives a private copy, so call sites can configure
/// freely without affecting each other:
///
/// ```
/// use rust_chain_logger::prelude::*;
///
/// let audit = root().cat("audit").level(LogLevel::Notice);
/// assert!(audit.is_derived());
/// assert_eq!(root().min_level(), LogLevel::Debug);
/// ```
pub fn root() -> &'static Arc<Logger> {
    ROOT.get_or_init(|| Arc::new(Logger::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_shared() {
        assert!(Arc::ptr_eq(root(), root()));
        assert!(!root().is_derived());
    }
}
