//! Evaluation Context
//!
//! A derived signal is "evaluating" while its compute function runs and its
//! notifications go out. The flag is held by a guard so it is released on
//! every exit path, including an error returned by the compute function or a
//! panic unwinding through it.

use std::sync::atomic::{AtomicBool, Ordering};

/// Guard that clears a node's evaluating flag when dropped.
pub(crate) struct EvaluationGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> EvaluationGuard<'a> {
    /// Mark the node as evaluating.
    ///
    /// Returns `None` if it already is, in which case the caller must not
    /// evaluate again.
    pub(crate) fn enter(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for EvaluationGuard<'_> {
    fn drop(&mut self) {
        let was = self.flag.swap(false, Ordering::AcqRel);
        debug_assert!(was, "evaluation guard released twice");
    }
}
