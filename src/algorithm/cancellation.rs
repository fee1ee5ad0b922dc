use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Flag observed by carving and solving at every step
///
/// Clones share the same flag. Cancelling is one-way.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create an active token
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag every clone of this token as cancelled
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether `cancel` has been called on any clone
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Whether the owning session may keep mutating its grid
    pub fn is_active(&self) -> bool {
        !self.is_cancelled()
    }
}
