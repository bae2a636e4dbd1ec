//! Cooperative cancellation for in-progress searches.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A simple cooperative-cancellation token backed by an [`AtomicBool`].
///
/// Clones share the same flag. The token is `Send`, so a UI thread or signal
/// handler can fire it while the search loop polls it between expansions.
#[derive(Clone, Debug)]
pub struct CancelToken {
    canceled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        Self {
            canceled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::Relaxed);
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancelToken::new();
        let view = token.clone();
        assert!(!view.is_canceled());
        token.cancel();
        assert!(view.is_canceled());
    }

    #[test]
    fn cancel_is_sticky() {
        let token = CancelToken::new();
        token.cancel();
        token.cancel();
        assert!(token.is_canceled());
    }
}
