//! Best-known solution shared by every engine run of one solve.
//!
//! The length lives in an `AtomicUsize` so the prune check can read it
//! without locking. The path itself sits behind a `Mutex` and is the source
//! of truth: installation re-reads the length under the lock and replaces
//! only on strict improvement, so two racing improvements can never let the
//! worse one win.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use knights_core::{Cell, Solution};

#[derive(Debug, Default)]
struct Incumbent {
    path: Option<Vec<Cell>>,
    improvements: Vec<usize>,
}

#[derive(Debug)]
pub struct BestSolution {
    /// Move count of the incumbent, or `upper_bound + 1` while undefined.
    length: AtomicUsize,
    upper_bound: usize,
    inner: Mutex<Incumbent>,
}

impl BestSolution {
    /// Starts out undefined, with the sentinel length `upper_bound + 1`.
    pub fn new(upper_bound: usize) -> Self {
        Self {
            length: AtomicUsize::new(upper_bound.saturating_add(1)),
            upper_bound,
            inner: Mutex::new(Incumbent::default()),
        }
    }

    /// Current best length. A relaxed read: it may lag a concurrent
    /// install, which only makes pruning slightly less eager.
    #[inline]
    pub fn length(&self) -> usize {
        self.length.load(Ordering::Relaxed)
    }

    pub fn upper_bound(&self) -> usize {
        self.upper_bound
    }

    pub fn is_defined(&self) -> bool {
        self.lock().path.is_some()
    }

    /// Installs `path` if it is strictly shorter than the incumbent.
    /// Returns `true` when it was installed.
    pub fn try_install(&self, path: &[Cell]) -> bool {
        debug_assert!(!path.is_empty());
        let candidate = path.len() - 1;

        // cheap reject without the lock
        if candidate >= self.length() {
            return false;
        }

        let mut guard = self.lock();
        // another thread may have installed while we waited
        if candidate >= self.length.load(Ordering::Relaxed) {
            return false;
        }
        guard.path = Some(path.to_vec());
        guard.improvements.push(candidate);
        self.length.store(candidate, Ordering::Relaxed);
        true
    }

    pub fn snapshot(&self) -> Option<Vec<Cell>> {
        self.lock().path.clone()
    }

    /// Every length ever installed, oldest first. Strictly decreasing.
    pub fn improvements(&self) -> Vec<usize> {
        self.lock().improvements.clone()
    }

    pub fn to_solution(&self) -> Solution {
        match self.snapshot() {
            Some(path) => Solution::found(path),
            None => Solution::unsolved(self.upper_bound),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Incumbent> {
        // never left half-written while held
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
