//! Single-slot rebuild queue.

use std::sync::{Mutex, PoisonError};

/// Whether a build pass is currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Idle,
    Building,
}

#[derive(Debug, Default)]
struct Inner {
    state: GateState,
    dirty: bool,
}

/// Admits at most one build in flight and remembers at most one more.
///
/// A caller that gets `true` from [`request`](Self::request) owns the build
/// and must call [`finish`](Self::finish) after every pass, running another
/// pass for as long as `finish` returns `true`.
#[derive(Debug, Default)]
pub struct RebuildGate {
    inner: Mutex<Inner>,
}

impl RebuildGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a rebuild. Returns `true` when the caller should start one;
    /// otherwise the request is folded into the running build.
    pub fn request(&self) -> bool {
        let mut inner = self.lock();
        match inner.state {
            GateState::Idle => {
                inner.state = GateState::Building;
                true
            }
            GateState::Building => {
                inner.dirty = true;
                false
            }
        }
    }

    /// Report a finished pass. Returns `true` when requests arrived during the
    /// pass and one more pass must run.
    pub fn finish(&self) -> bool {
        let mut inner = self.lock();
        if inner.dirty {
            inner.dirty = false;
            true
        } else {
            inner.state = GateState::Idle;
            false
        }
    }

    pub fn state(&self) -> GateState {
        self.lock().state
    }

    /// Whether a follow-up pass is queued.
    pub fn is_dirty(&self) -> bool {
        self.lock().dirty
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
