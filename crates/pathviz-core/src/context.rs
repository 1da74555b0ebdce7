//! [`Context`] — a cooperative cancellation token.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Longest uninterrupted sleep inside [`Context::pause`].
const PAUSE_SLICE: Duration = Duration::from_millis(5);

/// A simple cooperative-cancellation token backed by an [`AtomicBool`].
///
/// Clones share the same flag. A context created with
/// [`linked`](Context::linked) is also done once the context it was linked to
/// is done, however deep the chain of links.
#[derive(Clone, Debug)]
pub struct Context {
    done: Arc<AtomicBool>,
    /// Flags of every context this one inherits cancellation from.
    parents: Vec<Arc<AtomicBool>>,
}

impl Context {
    /// Create a new, non-cancelled context.
    pub fn new() -> Self {
        Self {
            done: Arc::new(AtomicBool::new(false)),
            parents: Vec::new(),
        }
    }

    /// A context sharing this one's flag that also reports done whenever
    /// `self` or `other` does. Cancelling the result cancels `self`, never
    /// `other`.
    pub fn linked(&self, other: &Context) -> Self {
        let mut parents = self.parents.clone();
        for flag in std::iter::once(&other.done).chain(&other.parents) {
            if !parents.iter().any(|p| Arc::ptr_eq(p, flag)) && !Arc::ptr_eq(&self.done, flag) {
                parents.push(Arc::clone(flag));
            }
        }
        Self {
            done: Arc::clone(&self.done),
            parents,
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Acquire) || self.parents.iter().any(|p| p.load(Ordering::Acquire))
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Release);
    }

    /// Sleep for `d`, waking early if the context is cancelled.
    ///
    /// Returns `true` if the full duration elapsed.
    pub fn pause(&self, d: Duration) -> bool {
        if d.is_zero() {
            return !self.is_done();
        }
        let deadline = Instant::now() + d;
        loop {
            if self.is_done() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep((deadline - now).min(PAUSE_SLICE));
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
