//! Browsing-session scoped flags.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Per-session storage for the "bar dismissed" flag.
///
/// The flag lives as long as the browsing session and survives navigation
/// between pages, i.e. between widget mounts.
pub trait SessionFlags {
    fn is_dismissed(&self) -> bool;

    fn mark_dismissed(&self);
}

/// In-process session flags. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionFlags {
    dismissed: Arc<AtomicBool>,
}

impl MemorySessionFlags {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionFlags for MemorySessionFlags {
    fn is_dismissed(&self) -> bool {
        self.dismissed.load(Ordering::SeqCst)
    }

    fn mark_dismissed(&self) {
        self.dismissed.store(true, Ordering::SeqCst);
    }
}
