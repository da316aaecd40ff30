use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Flag shared between a controller and its in-flight continuations.
///
/// Starts live and is ended exactly once at teardown. Continuations check it
/// before touching state, so a response that lands after teardown is dropped
/// instead of applied. Requests themselves are never cancelled.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_live(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// End liveness. Returns `true` if this call performed the transition.
    pub fn end(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}
