//! # Late Callback Example
//!
//! Shows a reader whose executor attaches after the transport already reported
//! status changes, and a consumer thread blocked on the shared wait condition.
//!
//! Flow:
//! - Transport threads report missed deadlines and liveliness changes
//! - Nobody listens yet, so the endpoint buffers the occurrence count
//! - A waiter wakes on the shared condition and drains the statuses
//! - The executor registers its callback and receives the backlog in one call
//! - Further events are delivered live, one per occurrence
//!
//! ## Run
//! ```bash
//! RUST_LOG=qos_events=trace cargo run --example late_callback
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use qos_events::{
    DeadlineMissedStatus, EndpointEvents, EndpointKind, EventKind, LivelinessChangedStatus,
    ReaderListener, WaitCondition,
};
use tracing_subscriber::EnvFilter;

/// Stand-in for an executor queue: counts ready events.
struct Executor {
    name: &'static str,
    ready: AtomicUsize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cond = Arc::new(WaitCondition::new());
    let reader = EndpointEvents::builder(EndpointKind::Subscription)
        .name("sensors/temperature")
        .with_condition(Arc::clone(&cond))
        .build();

    // Consumer: sleep until the reader has anything to report.
    let waiter = {
        let cond = Arc::clone(&cond);
        let reader = Arc::clone(&reader);
        thread::spawn(move || {
            let woke = cond.wait_until(Some(Duration::from_secs(2)), || {
                reader.has_event(EventKind::RequestedDeadlineMissed)
                    || reader.has_event(EventKind::LivelinessChanged)
            });
            println!("[waiter] woke={woke}");
        })
    };

    // Transport: two threads, one per event kind.
    let deadlines = {
        let reader = Arc::clone(&reader);
        thread::spawn(move || {
            for i in 1..=3 {
                reader.on_requested_deadline_missed(
                    &(),
                    &DeadlineMissedStatus {
                        total_count: i,
                        total_count_change: 1,
                    },
                );
                thread::sleep(Duration::from_millis(10));
            }
        })
    };
    let liveliness = {
        let reader = Arc::clone(&reader);
        thread::spawn(move || {
            reader.on_liveliness_changed(
                &(),
                &LivelinessChangedStatus {
                    alive_count: 1,
                    not_alive_count: 0,
                    alive_count_change: 1,
                    not_alive_count_change: 0,
                },
            );
        })
    };

    deadlines.join().expect("deadline transport thread panicked");
    liveliness.join().expect("liveliness transport thread panicked");
    waiter.join().expect("waiter thread panicked");

    println!("[reader] buffered before registration: {}", reader.unread_count());
    for kind in EndpointKind::Subscription.kinds() {
        if reader.has_event(kind) {
            println!("[reader] {kind}: {:?}", reader.take(kind));
        }
    }

    // Executor attaches late; receives the backlog in a single call.
    let executor = Arc::new(Executor {
        name: "main-executor",
        ready: AtomicUsize::new(0),
    });
    reader.set_callback(Arc::clone(&executor), |ex: &Arc<Executor>, n| {
        let total = ex.ready.fetch_add(n, Ordering::Relaxed) + n;
        println!("[{}] +{n} ready (total {total})", ex.name);
    });

    // Live events now go straight to the callback.
    reader.on_requested_deadline_missed(
        &(),
        &DeadlineMissedStatus {
            total_count: 4,
            total_count_change: 1,
        },
    );

    println!(
        "[reader] {:?}",
        reader.take(EventKind::RequestedDeadlineMissed)
    );
    println!(
        "[{}] ready events: {}",
        executor.name,
        executor.ready.load(Ordering::Relaxed)
    );
}
