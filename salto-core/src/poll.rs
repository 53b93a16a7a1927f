//! Interval-driven recomputation of the program snapshot.
//!
//! One repeating 1-second tick recomputes every session's reveal state
//! and publishes the result wholesale; readers never observe a partially
//! updated program. This is the only concurrency construct in the crate.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::reveal::{Clock, ProgramSnapshot, RevealSettings};
use crate::session::Session;

/// Fixed polling period.
pub const POLL_PERIOD: StdDuration = StdDuration::from_secs(1);

/// Handle to the background polling task.
///
/// The task is aborted on [`RevealPoller::stop`] and on drop, so a
/// torn-down consumer never leaks the recurring tick.
pub struct RevealPoller {
    snapshots: watch::Receiver<ProgramSnapshot>,
    preloads: mpsc::UnboundedReceiver<String>,
    handle: JoinHandle<()>,
}

impl RevealPoller {
    /// Start polling. The first snapshot is computed synchronously, so
    /// subscribers always observe a value.
    pub fn spawn(
        sessions: Vec<Session>,
        clock: Arc<dyn Clock>,
        settings: RevealSettings,
    ) -> RevealPoller {
        let initial = ProgramSnapshot::compute(&sessions, clock.now(), settings);
        let (snapshot_tx, snapshot_rx) = watch::channel(initial.clone());
        let (preload_tx, preload_rx) = mpsc::unbounded_channel();

        // Sessions already inside the preload window count as notified.
        let mut notified: BTreeSet<String> = BTreeSet::new();
        for id in &initial.preload_ready {
            notified.insert(id.clone());
            let _ = preload_tx.send(id.clone());
        }

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(POLL_PERIOD);
            // The first tick of an interval completes immediately.
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let snapshot = ProgramSnapshot::compute(&sessions, clock.now(), settings);
                for id in &snapshot.preload_ready {
                    if notified.insert(id.clone()) {
                        let _ = preload_tx.send(id.clone());
                    }
                }
                let _ = snapshot_tx.send(snapshot);
            }
        });

        RevealPoller {
            snapshots: snapshot_rx,
            preloads: preload_rx,
            handle,
        }
    }

    /// Subscribe to snapshot updates. Every published value is a complete
    /// replacement of the previous one.
    pub fn snapshots(&self) -> watch::Receiver<ProgramSnapshot> {
        self.snapshots.clone()
    }

    /// Preload notifications: each session id is delivered at most once,
    /// when it first enters the preload window.
    pub fn preloads_mut(&mut self) -> &mut mpsc::UnboundedReceiver<String> {
        &mut self.preloads
    }

    /// Stop polling. Idempotent; also happens on drop.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for RevealPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::EventDay;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Advances one second per `now()` call, mirroring the 1 Hz tick.
    struct SteppingClock {
        base: DateTime<Utc>,
        calls: AtomicI64,
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            self.base + Duration::seconds(n)
        }
    }

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 14, 18, 0, 0).unwrap()
    }

    fn session_starting_in(secs: i64) -> Session {
        Session {
            id: "s1".to_string(),
            speaker: Some("João Heuldes".to_string()),
            start: base() + Duration::seconds(secs),
            end: base() + Duration::seconds(secs + 3600),
            description: None,
            day: EventDay::Sexta,
            silhouette_image: "pregador_1_placeholder.png".to_string(),
            revealed_image: "joao_heuldes.png".to_string(),
        }
    }

    fn settings() -> RevealSettings {
        RevealSettings {
            lead: Duration::seconds(2),
            preload_lead: Duration::seconds(5),
        }
    }

    fn poller_for(start_in_secs: i64) -> RevealPoller {
        let clock = Arc::new(SteppingClock {
            base: base(),
            calls: AtomicI64::new(0),
        });
        RevealPoller::spawn(vec![session_starting_in(start_in_secs)], clock, settings())
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_fresh_snapshots_until_the_reveal() {
        let poller = poller_for(10);
        let mut rx = poller.snapshots();

        assert!(!rx.borrow().get("s1").unwrap().is_revealed);

        let mut revealed = false;
        for _ in 0..30 {
            rx.changed().await.unwrap();
            let state = *rx.borrow().get("s1").unwrap();
            if state.is_revealed {
                revealed = true;
                break;
            }
        }
        assert!(revealed, "the poller should cross the reveal boundary");

        poller.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn preload_notification_fires_exactly_once() {
        let mut poller = poller_for(10);

        let id = poller.preloads_mut().recv().await.unwrap();
        assert_eq!(id, "s1");

        // Keep ticking; the window stays open but no duplicate arrives.
        let mut rx = poller.snapshots();
        for _ in 0..5 {
            rx.changed().await.unwrap();
        }
        assert!(matches!(
            poller.preloads_mut().try_recv(),
            Err(mpsc::error::TryRecvError::Empty)
        ));

        poller.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn sessions_already_in_the_window_are_notified_at_spawn() {
        let mut poller = poller_for(3);
        let id = poller.preloads_mut().try_recv().unwrap();
        assert_eq!(id, "s1");
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_the_polling_task() {
        let poller = poller_for(10);
        let mut rx = poller.snapshots();
        rx.changed().await.unwrap();

        poller.stop();

        let mut closed = false;
        for _ in 0..3 {
            if rx.changed().await.is_err() {
                closed = true;
                break;
            }
        }
        assert!(closed, "the snapshot sender should be gone after stop");
    }
}
