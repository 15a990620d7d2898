//! # Endpoint facade: one aggregator plus one dispatcher.
//!
//! [`EndpointEvents`] is what a transport listener and an application consumer
//! share for a single reader or writer. It sequences every recorded event as
//!
//! ```text
//! on_*(source, &status)
//!   ├─► StatusAggregator::record()   data lock, then condition lock
//!   └─► CallbackDispatcher::notify() dispatcher lock, after both are released
//! ```
//!
//! so a callback that observes an occurrence can call [`EndpointEvents::take`]
//! and see the committed record.

use std::any::Any;
use std::borrow::Cow;
use std::sync::Arc;

use super::aggregator::StatusAggregator;
use super::builder::EndpointEventsBuilder;
use super::condition::WaitCondition;
use super::config::{Backlog, Config};
use super::dispatcher::CallbackDispatcher;
use crate::events::{
    DeadlineMissedStatus, EndpointKind, EventKind, EventStatus, LivelinessChangedStatus,
    LivelinessLostStatus,
};
use crate::listeners::{ReaderListener, WriterListener};

/// Status events of one reader or writer.
pub struct EndpointEvents {
    name: Cow<'static, str>,
    aggregator: StatusAggregator,
    dispatcher: CallbackDispatcher,
}

impl EndpointEvents {
    /// Starts building the event state of an endpoint of type `endpoint`.
    pub fn builder(endpoint: EndpointKind) -> EndpointEventsBuilder {
        EndpointEventsBuilder::new(endpoint)
    }

    pub(crate) fn new_internal(
        name: Cow<'static, str>,
        endpoint: EndpointKind,
        cfg: Config,
        condition: Option<Arc<WaitCondition>>,
    ) -> Self {
        Self {
            name,
            aggregator: StatusAggregator::new(endpoint, condition),
            dispatcher: CallbackDispatcher::new(cfg.backlog),
        }
    }

    /// Name used in log records.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Endpoint type.
    pub fn endpoint(&self) -> EndpointKind {
        self.aggregator.endpoint()
    }

    /// Whether this endpoint reports `kind`.
    #[inline]
    pub fn supports(&self, kind: EventKind) -> bool {
        self.endpoint().supports(kind)
    }

    /// Folds a status update in, wakes waiters, and notifies the callback.
    ///
    /// An update of a kind this endpoint does not report breaks the transport
    /// contract; it is logged and dropped.
    pub fn record(&self, update: &EventStatus) {
        let kind = update.kind();
        if !self.aggregator.record(update) {
            tracing::warn!(
                endpoint = %self.name,
                kind = %kind,
                "dropping status update of unsupported kind"
            );
            return;
        }
        tracing::trace!(endpoint = %self.name, kind = %kind, "status recorded");
        self.dispatcher.notify();
    }

    /// True if `kind` occurred since the last [`EndpointEvents::take`].
    ///
    /// Lock-free. `false` for unsupported kinds.
    #[inline]
    pub fn has_event(&self, kind: EventKind) -> bool {
        self.aggregator.has_event(kind)
    }

    /// Returns the accumulated status for `kind` and resets its deltas.
    ///
    /// `None` for unsupported kinds.
    pub fn take(&self, kind: EventKind) -> Option<EventStatus> {
        let out = self.aggregator.take(kind);
        if out.is_some() {
            tracing::trace!(endpoint = %self.name, kind = %kind, "status taken");
        }
        out
    }

    /// Registers the notification callback. See [`CallbackDispatcher::set_callback`].
    ///
    /// The callback runs under the dispatcher lock. It may call `take` and
    /// `has_event`, but must not call `set_callback`, `clear_callback`,
    /// `has_callback`, `unread_count`, `record` or any `on_*` handler of this
    /// endpoint: those take the same lock and deadlock.
    pub fn set_callback<U, F>(&self, user_data: U, callback: F)
    where
        U: Send + 'static,
        F: Fn(&U, usize) + Send + 'static,
    {
        tracing::debug!(endpoint = %self.name, "event callback registered");
        self.dispatcher.set_callback(user_data, callback);
    }

    /// Registers the notification callback, applying `backlog` to events
    /// buffered so far instead of the configured policy.
    ///
    /// Same reentrancy rules as [`EndpointEvents::set_callback`].
    pub fn set_callback_with<U, F>(&self, backlog: Backlog, user_data: U, callback: F)
    where
        U: Send + 'static,
        F: Fn(&U, usize) + Send + 'static,
    {
        tracing::debug!(endpoint = %self.name, ?backlog, "event callback registered");
        self.dispatcher.set_callback_with(backlog, user_data, callback);
    }

    /// Unregisters the notification callback; later events are buffered.
    pub fn clear_callback(&self) {
        tracing::debug!(endpoint = %self.name, "event callback cleared");
        self.dispatcher.clear_callback();
    }

    /// True if a notification callback is registered.
    pub fn has_callback(&self) -> bool {
        self.dispatcher.has_callback()
    }

    /// Events buffered while no callback was registered.
    pub fn unread_count(&self) -> usize {
        self.dispatcher.unread_count()
    }

    /// Signals `condition` on every later record.
    pub fn attach_condition(&self, condition: Arc<WaitCondition>) {
        self.aggregator.attach_condition(condition);
    }

    /// Stops signalling; returns the previously attached condition.
    pub fn detach_condition(&self) -> Option<Arc<WaitCondition>> {
        self.aggregator.detach_condition()
    }
}

impl ReaderListener for EndpointEvents {
    fn on_requested_deadline_missed(&self, _reader: &dyn Any, status: &DeadlineMissedStatus) {
        self.record(&EventStatus::RequestedDeadlineMissed(*status));
    }

    fn on_liveliness_changed(&self, _reader: &dyn Any, status: &LivelinessChangedStatus) {
        self.record(&EventStatus::LivelinessChanged(*status));
    }
}

impl WriterListener for EndpointEvents {
    fn on_offered_deadline_missed(&self, _writer: &dyn Any, status: &DeadlineMissedStatus) {
        self.record(&EventStatus::OfferedDeadlineMissed(*status));
    }

    fn on_liveliness_lost(&self, _writer: &dyn Any, status: &LivelinessLostStatus) {
        self.record(&EventStatus::LivelinessLost(*status));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::thread;
    use std::time::Duration;

    type Calls = Arc<Mutex<Vec<(u32, usize)>>>;

    fn reader() -> Arc<EndpointEvents> {
        EndpointEvents::builder(EndpointKind::Subscription)
            .name("reader")
            .build()
    }

    fn missed(total: i32, change: i32) -> DeadlineMissedStatus {
        DeadlineMissedStatus {
            total_count: total,
            total_count_change: change,
        }
    }

    /// Callback that records `(user_data, count)` pairs.
    fn register(ep: &EndpointEvents, tag: u32) -> Calls {
        let calls: Calls = Arc::default();
        let sink = Arc::clone(&calls);
        ep.set_callback(tag, move |tag: &u32, n| sink.lock().push((*tag, n)));
        calls
    }

    #[test]
    fn test_deadline_record_then_take() {
        let ep = reader();
        ep.on_requested_deadline_missed(&(), &missed(5, 5));
        assert!(ep.has_event(EventKind::RequestedDeadlineMissed));

        let got = ep.take(EventKind::RequestedDeadlineMissed).unwrap();
        assert_eq!(got, EventStatus::RequestedDeadlineMissed(missed(5, 5)));
        assert!(!ep.has_event(EventKind::RequestedDeadlineMissed));
    }

    #[test]
    fn test_liveliness_deltas_sum_and_absolute_overwrites() {
        let ep = reader();
        ep.on_liveliness_changed(
            &(),
            &LivelinessChangedStatus {
                alive_count: 3,
                not_alive_count: 1,
                alive_count_change: 1,
                not_alive_count_change: 0,
            },
        );
        ep.on_liveliness_changed(
            &(),
            &LivelinessChangedStatus {
                alive_count: 5,
                not_alive_count: 1,
                alive_count_change: 2,
                not_alive_count_change: 0,
            },
        );

        let got = ep.take(EventKind::LivelinessChanged).unwrap();
        let live = got.as_liveliness_changed().unwrap();
        assert_eq!(live.alive_count_change, 3);
        assert_eq!(live.alive_count, 5);
        assert_eq!(live.not_alive_count, 1);
    }

    #[test]
    fn test_late_callback_receives_backlog_then_live_events() {
        let ep = reader();
        for i in 1..=3 {
            ep.on_requested_deadline_missed(&(), &missed(i, 1));
        }
        assert_eq!(ep.unread_count(), 3);

        let calls = register(&ep, 7);
        assert_eq!(*calls.lock(), vec![(7, 3)]);

        ep.on_requested_deadline_missed(&(), &missed(4, 1));
        assert_eq!(*calls.lock(), vec![(7, 3), (7, 1)]);
    }

    #[test]
    fn test_registered_callback_fires_once_per_record() {
        let ep = reader();
        let calls = register(&ep, 1);
        for i in 0..4 {
            ep.on_liveliness_changed(
                &(),
                &LivelinessChangedStatus {
                    alive_count: i,
                    ..Default::default()
                },
            );
            assert_eq!(calls.lock().len(), (i + 1) as usize);
        }
        assert!(calls.lock().iter().all(|&(_, n)| n == 1));
    }

    #[test]
    fn test_unregister_then_reregister_flushes_count() {
        let ep = reader();
        let first = register(&ep, 1);
        ep.clear_callback();

        for i in 0..6 {
            ep.on_requested_deadline_missed(&(), &missed(i, 1));
        }
        let second = register(&ep, 2);

        assert!(first.lock().is_empty());
        assert_eq!(*second.lock(), vec![(2, 6)]);
    }

    #[test]
    fn test_registration_can_skip_previous_events() {
        let ep = reader();
        for i in 1..=3 {
            ep.on_requested_deadline_missed(&(), &missed(i, 1));
        }

        let calls: Calls = Arc::default();
        let sink = Arc::clone(&calls);
        ep.set_callback_with(Backlog::Discard, 9, move |tag: &u32, n| {
            sink.lock().push((*tag, n))
        });
        assert!(calls.lock().is_empty());
        assert_eq!(ep.unread_count(), 0);

        // Records are still there for polling; only the callback backlog went.
        assert!(ep.has_event(EventKind::RequestedDeadlineMissed));
        ep.on_requested_deadline_missed(&(), &missed(4, 1));
        assert_eq!(*calls.lock(), vec![(9, 1)]);
    }

    #[test]
    fn test_callback_can_take_committed_status() {
        let ep = reader();
        let seen: Arc<Mutex<Vec<EventStatus>>> = Arc::default();
        {
            let weak = Arc::downgrade(&ep);
            let seen = Arc::clone(&seen);
            ep.set_callback((), move |_: &(), _| {
                if let Some(ep) = weak.upgrade() {
                    if let Some(st) = ep.take(EventKind::RequestedDeadlineMissed) {
                        seen.lock().push(st);
                    }
                }
            });
        }

        ep.on_requested_deadline_missed(&(), &missed(1, 1));
        ep.on_requested_deadline_missed(&(), &missed(2, 1));

        assert_eq!(
            *seen.lock(),
            vec![
                EventStatus::RequestedDeadlineMissed(missed(1, 1)),
                EventStatus::RequestedDeadlineMissed(missed(2, 1)),
            ]
        );
        assert!(!ep.has_event(EventKind::RequestedDeadlineMissed));
    }

    #[test]
    fn test_unsupported_update_is_dropped() {
        let ep = reader();
        ep.on_liveliness_lost(
            &(),
            &LivelinessLostStatus {
                total_count: 1,
                total_count_change: 1,
            },
        );
        assert_eq!(ep.unread_count(), 0);
        assert!(!ep.has_event(EventKind::LivelinessLost));
        assert_eq!(ep.take(EventKind::LivelinessLost), None);
    }

    #[test]
    fn test_publication_endpoint_handlers() {
        let ep = EndpointEvents::builder(EndpointKind::Publication).build();
        ep.on_offered_deadline_missed(&(), &missed(2, 2));
        ep.on_liveliness_lost(
            &(),
            &LivelinessLostStatus {
                total_count: 1,
                total_count_change: 1,
            },
        );

        assert!(ep.has_event(EventKind::OfferedDeadlineMissed));
        assert!(ep.has_event(EventKind::LivelinessLost));
        assert!(!ep.has_event(EventKind::RequestedDeadlineMissed));
        assert_eq!(ep.unread_count(), 2);

        let lost = ep.take(EventKind::LivelinessLost).unwrap();
        assert_eq!(lost.as_liveliness_lost().unwrap().total_count_change, 1);
    }

    #[test]
    fn test_concurrent_kinds_and_late_registration() {
        let ep = reader();
        let per_thread = 500;
        let delivered: Arc<Mutex<usize>> = Arc::default();

        thread::scope(|s| {
            s.spawn(|| {
                for i in 0..per_thread {
                    ep.on_requested_deadline_missed(&(), &missed(i, 1));
                }
            });
            s.spawn(|| {
                for i in 0..per_thread {
                    ep.on_liveliness_changed(
                        &(),
                        &LivelinessChangedStatus {
                            alive_count: i,
                            alive_count_change: 1,
                            ..Default::default()
                        },
                    );
                }
            });
            let sink = Arc::clone(&delivered);
            ep.set_callback((), move |_: &(), n| *sink.lock() += n);
        });

        assert_eq!(*delivered.lock(), 2 * per_thread as usize);

        let dl = ep.take(EventKind::RequestedDeadlineMissed).unwrap();
        let lv = ep.take(EventKind::LivelinessChanged).unwrap();
        assert_eq!(dl.as_deadline_missed().unwrap().total_count_change, per_thread);
        assert_eq!(
            lv.as_liveliness_changed().unwrap().alive_count_change,
            per_thread
        );
    }

    #[test]
    fn test_waiter_on_shared_condition_wakes_for_any_endpoint() {
        let cond = Arc::new(WaitCondition::new());
        let a = EndpointEvents::builder(EndpointKind::Subscription)
            .with_condition(Arc::clone(&cond))
            .build();
        let b = EndpointEvents::builder(EndpointKind::Publication)
            .with_condition(Arc::clone(&cond))
            .build();

        thread::scope(|s| {
            let waiter = s.spawn(|| {
                cond.wait_until(Some(Duration::from_secs(5)), || {
                    a.has_event(EventKind::LivelinessChanged)
                        || b.has_event(EventKind::LivelinessLost)
                })
            });
            thread::sleep(Duration::from_millis(20));
            b.on_liveliness_lost(
                &(),
                &LivelinessLostStatus {
                    total_count: 1,
                    total_count_change: 1,
                },
            );
            assert!(waiter.join().unwrap());
        });
    }
}
