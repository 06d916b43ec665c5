//! Condition variable over a `spin::Mutex`.
//!
//! Parking a thread is the scheduler's business, so it is reached through the
//! [`WaitQueue`] trait. [`Condvar`] adds the part the scheduler cannot know
//! about: releasing the caller's lock and parking happen as one step with
//! respect to `notify_all`, so a notification sent after the waiter checked its
//! condition (under the lock) is never lost.

use core::sync::atomic::{AtomicU64, Ordering};
use spin::{Mutex, MutexGuard};

/// A queue of parked threads.
pub trait WaitQueue: Send + Sync {
    /// Blocks the current thread until `condition` returns true.
    ///
    /// The condition is checked before parking and after every wakeup; a
    /// `notify_all` racing with the check must not be missed.
    fn wait_until<F: Fn() -> bool>(&self, condition: F);

    /// Wakes every thread parked on this queue.
    fn notify_all(&self);
}

#[cfg(any(test, feature = "std"))]
mod hosted {
    use super::WaitQueue;
    use std::sync::{Condvar, Mutex};

    /// Queue that parks OS threads.
    #[derive(Default)]
    pub struct StdWaitQueue {
        lock: Mutex<()>,
        cond: Condvar,
    }

    impl WaitQueue for StdWaitQueue {
        fn wait_until<F: Fn() -> bool>(&self, condition: F) {
            let mut guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
            while !condition() {
                guard = self.cond.wait(guard).unwrap_or_else(|e| e.into_inner());
            }
        }

        fn notify_all(&self) {
            let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
            self.cond.notify_all();
        }
    }
}

#[cfg(any(test, feature = "std"))]
pub use hosted::StdWaitQueue;

/// Condition variable paired with a `spin::Mutex`.
pub struct Condvar<Q> {
    /// Bumped by every notification; read by waiters while they still hold
    /// the mutex.
    seq: AtomicU64,
    queue: Q,
}

impl<Q: WaitQueue> Condvar<Q> {
    pub const fn new(queue: Q) -> Self {
        Self {
            seq: AtomicU64::new(0),
            queue,
        }
    }

    /// Releases `guard`, blocks until the next notification and reacquires
    /// `mutex`. Wakeups may be spurious: callers recheck their condition.
    pub fn wait<'a, T>(
        &self,
        mutex: &'a Mutex<T>,
        guard: MutexGuard<'a, T>,
    ) -> MutexGuard<'a, T> {
        let seq = self.seq.load(Ordering::Acquire);
        drop(guard);
        self.queue.wait_until(|| self.seq.load(Ordering::Acquire) != seq);
        mutex.lock()
    }

    /// Wakes every waiter. Call it with the mutex held.
    pub fn notify_all(&self) {
        self.seq.fetch_add(1, Ordering::Release);
        self.queue.notify_all();
    }
}
