use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag answering "may this process receive traffic".
///
/// Opened by the lifecycle once the database answers, closed again as the
/// first step of shutdown. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct ReadinessGate {
    open: Arc<AtomicBool>,
}

impl ReadinessGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self) {
        self.open.store(true, Ordering::SeqCst);
    }

    pub fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}
