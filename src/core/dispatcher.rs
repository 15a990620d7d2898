//! # Callback delivery with a backlog for late registration.
//!
//! [`CallbackDispatcher`] forwards "an event occurred" signals to at most one
//! registered callback. While nothing is registered it counts occurrences, and
//! hands the count to the next callback that registers.
//!
//! ## Rules
//! - `notify()` with a callback registered → `callback(&user_data, 1)`, synchronously.
//! - `notify()` with nothing registered → buffered counter += 1.
//! - `set_callback()` with a non-zero counter → `callback(&user_data, n)` once
//!   ([`Backlog::Replay`]) or the counter is dropped ([`Backlog::Discard`]),
//!   then the callback becomes active. The counter is zero afterwards.
//! - The counter is always zero while a callback is registered.
//! - Everything runs under one lock, held while the callback runs. A callback
//!   must not call any method of the same dispatcher (`set_callback`,
//!   `clear_callback`, `notify`, `has_callback`, `unread_count`): it deadlocks.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use qos_events::{Backlog, CallbackDispatcher};
//!
//! let dispatcher = CallbackDispatcher::new(Backlog::Replay);
//! dispatcher.notify();
//! dispatcher.notify();
//!
//! let seen = Arc::new(AtomicUsize::new(0));
//! dispatcher.set_callback(Arc::clone(&seen), |seen: &Arc<AtomicUsize>, n| {
//!     seen.fetch_add(n, Ordering::Relaxed);
//! });
//! assert_eq!(seen.load(Ordering::Relaxed), 2);
//!
//! dispatcher.notify();
//! assert_eq!(seen.load(Ordering::Relaxed), 3);
//! ```

use parking_lot::Mutex;

use super::config::Backlog;

/// Registered callback with its user data already bound.
type Target = Box<dyn Fn(usize) + Send>;

/// State guarded by the dispatcher lock.
#[derive(Default)]
struct Notification {
    target: Option<Target>,
    unread: usize,
}

/// Delivers occurrence counts to an optional callback.
pub struct CallbackDispatcher {
    state: Mutex<Notification>,
    backlog: Backlog,
}

impl CallbackDispatcher {
    /// Creates a dispatcher with no callback and an empty backlog.
    pub fn new(backlog: Backlog) -> Self {
        Self {
            state: Mutex::new(Notification::default()),
            backlog,
        }
    }

    /// Registers `callback`, replacing any previous one.
    ///
    /// `user_data` is passed back to every invocation unchanged. Occurrences
    /// buffered while nothing was registered are handled per the [`Backlog`]
    /// policy before this call returns.
    pub fn set_callback<U, F>(&self, user_data: U, callback: F)
    where
        U: Send + 'static,
        F: Fn(&U, usize) + Send + 'static,
    {
        self.set_callback_with(self.backlog, user_data, callback);
    }

    /// Like [`CallbackDispatcher::set_callback`], with `backlog` overriding
    /// the dispatcher's policy for this registration only.
    pub fn set_callback_with<U, F>(&self, backlog: Backlog, user_data: U, callback: F)
    where
        U: Send + 'static,
        F: Fn(&U, usize) + Send + 'static,
    {
        let target: Target = Box::new(move |count| callback(&user_data, count));

        let mut state = self.state.lock();
        // Taken before the flush so a panicking callback cannot see it twice.
        let pending = std::mem::take(&mut state.unread);
        if pending > 0 {
            match backlog {
                Backlog::Replay => {
                    tracing::debug!(pending, "replaying buffered events to new callback");
                    target(pending);
                }
                Backlog::Discard => {
                    tracing::debug!(pending, "discarding buffered events");
                }
            }
        }
        let old = state.target.replace(target);
        drop(state);
        drop(old);
    }

    /// Drops the registered callback and its user data.
    ///
    /// Later occurrences are buffered again.
    pub fn clear_callback(&self) {
        let old = self.state.lock().target.take();
        // User data may run arbitrary Drop code; drop it outside the lock.
        drop(old);
    }

    /// Reports one occurrence.
    pub fn notify(&self) {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        match &state.target {
            Some(target) => target(1),
            None => state.unread += 1,
        }
    }

    /// True if a callback is registered.
    pub fn has_callback(&self) -> bool {
        self.state.lock().target.is_some()
    }

    /// Occurrences buffered while no callback was registered.
    pub fn unread_count(&self) -> usize {
        self.state.lock().unread
    }
}

impl Default for CallbackDispatcher {
    fn default() -> Self {
        Self::new(Backlog::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::Arc;
    use std::thread;

    type Calls = Arc<Mutex<Vec<usize>>>;

    /// Records every count a callback receives.
    fn recorder() -> (Calls, fn(&Calls, usize)) {
        fn push(calls: &Calls, n: usize) {
            calls.lock().push(n);
        }
        (Arc::new(Mutex::new(Vec::new())), push)
    }

    #[test]
    fn test_backlog_is_flushed_once_on_registration() {
        let d = CallbackDispatcher::new(Backlog::Replay);
        for _ in 0..5 {
            d.notify();
        }
        assert_eq!(d.unread_count(), 5);

        let (calls, cb) = recorder();
        d.set_callback(Arc::clone(&calls), cb);
        assert_eq!(*calls.lock(), vec![5]);
        assert_eq!(d.unread_count(), 0);

        d.notify();
        assert_eq!(*calls.lock(), vec![5, 1]);
    }

    #[test]
    fn test_no_flush_when_backlog_empty() {
        let d = CallbackDispatcher::default();
        let (calls, cb) = recorder();
        d.set_callback(Arc::clone(&calls), cb);
        assert!(calls.lock().is_empty());
        assert!(d.has_callback());
    }

    #[test]
    fn test_each_notify_delivers_one() {
        let d = CallbackDispatcher::default();
        let (calls, cb) = recorder();
        d.set_callback(Arc::clone(&calls), cb);
        for _ in 0..3 {
            d.notify();
        }
        assert_eq!(*calls.lock(), vec![1, 1, 1]);
        assert_eq!(d.unread_count(), 0);
    }

    #[test]
    fn test_clear_then_reregister_flushes_new_backlog() {
        let d = CallbackDispatcher::default();
        let (calls, cb) = recorder();
        d.set_callback(Arc::clone(&calls), cb);
        d.notify();

        d.clear_callback();
        assert!(!d.has_callback());
        for _ in 0..4 {
            d.notify();
        }

        let (later, cb) = recorder();
        d.set_callback(Arc::clone(&later), cb);
        assert_eq!(*calls.lock(), vec![1]);
        assert_eq!(*later.lock(), vec![4]);
    }

    #[test]
    fn test_discard_policy_drops_backlog() {
        let d = CallbackDispatcher::new(Backlog::Discard);
        d.notify();
        d.notify();

        let (calls, cb) = recorder();
        d.set_callback(Arc::clone(&calls), cb);
        assert!(calls.lock().is_empty());
        assert_eq!(d.unread_count(), 0);

        d.notify();
        assert_eq!(*calls.lock(), vec![1]);
    }

    #[test]
    fn test_per_call_backlog_overrides_default() {
        let d = CallbackDispatcher::new(Backlog::Replay);
        d.notify();
        d.notify();

        let (calls, cb) = recorder();
        d.set_callback_with(Backlog::Discard, Arc::clone(&calls), cb);
        assert!(calls.lock().is_empty());

        d.clear_callback();
        d.notify();
        let (later, cb) = recorder();
        d.set_callback(Arc::clone(&later), cb);
        assert_eq!(*later.lock(), vec![1]);

        let d = CallbackDispatcher::new(Backlog::Discard);
        d.notify();
        let (replayed, cb) = recorder();
        d.set_callback_with(Backlog::Replay, Arc::clone(&replayed), cb);
        assert_eq!(*replayed.lock(), vec![1]);
    }

    #[test]
    fn test_user_data_dropped_on_clear() {
        let d = CallbackDispatcher::default();
        let token = Arc::new(());
        d.set_callback(Arc::clone(&token), |_: &Arc<()>, _| {});
        assert_eq!(Arc::strong_count(&token), 2);

        d.clear_callback();
        assert_eq!(Arc::strong_count(&token), 1);
    }

    #[test]
    fn test_panicking_callback_releases_lock() {
        let d = CallbackDispatcher::default();
        d.notify();

        let res = panic::catch_unwind(AssertUnwindSafe(|| {
            d.set_callback((), |_: &(), _| panic!("boom"));
        }));
        assert!(res.is_err());

        // Lock usable again, backlog consumed, failed registration not stored.
        assert_eq!(d.unread_count(), 0);
        assert!(!d.has_callback());
        d.notify();
        assert_eq!(d.unread_count(), 1);
    }

    #[test]
    fn test_registration_race_loses_no_occurrence() {
        let d = CallbackDispatcher::default();
        let (calls, cb) = recorder();
        let total = 2_000;

        thread::scope(|s| {
            s.spawn(|| {
                for _ in 0..total {
                    d.notify();
                }
            });
            d.set_callback(Arc::clone(&calls), cb);
        });

        let delivered: usize = calls.lock().iter().sum();
        assert_eq!(delivered + d.unread_count(), total);
        assert_eq!(d.unread_count(), 0);
    }
}
