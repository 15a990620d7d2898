//! # Wait condition shared between endpoints and a waiting consumer.
//!
//! A [`WaitCondition`] is a mutex + condition variable pair owned by whatever
//! implements "wait for any of several events". Endpoints hold an `Arc` to it
//! and only ever lock, signal and release it.
//!
//! ## Protocol
//! ```text
//! consumer (waiter)                     transport (recorder)
//! ─────────────────                     ────────────────────
//! lock(cond)                            lock(data); set flag; unlock(data)
//! if any has_event() → return           lock(cond)      ◄── blocks while the waiter checks
//! condvar.wait(cond)  (atomic unlock)   notify_all()
//! ...woken, re-check                    unlock(cond)
//! ```
//!
//! The waiter checks flags and goes to sleep while holding the condition lock,
//! and the recorder signals while holding the same lock after its flag write.
//! So a waiter either sees the flag or is already asleep when the signal fires.

use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex, MutexGuard};

/// Mutex + condition variable pair used by the check-then-sleep protocol.
#[derive(Debug, Default)]
pub struct WaitCondition {
    mutex: Mutex<()>,
    condvar: Condvar,
}

impl WaitCondition {
    /// Creates an unlocked condition with no waiters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the condition lock, wakes every waiter, and releases the lock.
    ///
    /// Called once per recorded event, with or without waiters.
    pub fn signal(&self) {
        let _guard = self.mutex.lock();
        self.condvar.notify_all();
    }

    /// Acquires the condition lock.
    ///
    /// For wait implementations that drive the condvar themselves through
    /// [`WaitCondition::wait_on`].
    pub fn lock(&self) -> MutexGuard<'_, ()> {
        self.mutex.lock()
    }

    /// Sleeps on the condvar, releasing `guard` while asleep.
    ///
    /// Returns `false` if `deadline` passed before a signal arrived.
    /// Spurious wakeups are possible; callers re-check their predicate.
    pub fn wait_on(&self, guard: &mut MutexGuard<'_, ()>, deadline: Option<Instant>) -> bool {
        match deadline {
            None => {
                self.condvar.wait(guard);
                true
            }
            Some(at) => !self.condvar.wait_until(guard, at).timed_out(),
        }
    }

    /// Blocks until `ready` returns `true` or `timeout` elapses.
    ///
    /// `ready` is evaluated under the condition lock, first before sleeping and
    /// again after every wakeup. `None` waits indefinitely.
    /// Returns the last value of `ready`.
    pub fn wait_until<F>(&self, timeout: Option<Duration>, mut ready: F) -> bool
    where
        F: FnMut() -> bool,
    {
        let deadline = timeout.map(|t| Instant::now() + t);
        let mut guard = self.mutex.lock();
        loop {
            if ready() {
                return true;
            }
            if !self.wait_on(&mut guard, deadline) {
                return ready();
            }
        }
    }
}
