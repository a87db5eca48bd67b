//! Generation counter tying background completions to the controller's
//! lifetime.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Current generation of a controller; advanced on dispose.
#[derive(Debug, Default)]
pub struct Liveness {
    generation: AtomicU64,
    disposed: AtomicBool,
}

/// Generation captured when a submission starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LivenessToken {
    generation: u64,
}

impl Liveness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current generation.
    pub fn token(&self) -> LivenessToken {
        LivenessToken {
            generation: self.generation.load(Ordering::SeqCst),
        }
    }

    /// Whether `token` still belongs to a live controller.
    pub fn is_current(&self, token: &LivenessToken) -> bool {
        !self.is_disposed() && self.generation.load(Ordering::SeqCst) == token.generation
    }

    /// End the current generation; outstanding tokens become stale.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}
