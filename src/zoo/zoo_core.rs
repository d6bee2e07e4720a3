//! Clock core: the day/night state machine and its ticker.
//!
//! Responsibilities:
//! - Owns the shared zoo state (phase of day + both animals) behind a mutex.
//! - Runs a background ticker thread that flips the phase on a fixed cadence.
//! - Re-derives each animal's sleep flag from its polarity on every flip.
//! - Notifies an explicit subscriber list after each mutation.
//!
//! Key invariants:
//! - After construction and after every flip, each animal's sleep flag equals
//!   `polarity.sleeps_during(is_daytime)`; exactly one animal is asleep.
//! - Every flip bumps the generation counter by one and notifies every
//!   subscriber exactly once, with the state lock already released.
//! - Dropping the clock stops and joins the ticker thread.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use parking_lot::Mutex;

use super::{AnimalState, SleepPolarity, ZooSnapshot};

/// Callback invoked after every state mutation, with the post-flip snapshot.
/// Runs on the mutating thread; must not call `subscribe` re-entrantly.
type Subscriber = Box<dyn Fn(&ZooSnapshot) + Send + 'static>;

/// How often the ticker re-checks the shutdown flag and the flip deadline.
/// Also bounds how long `Drop` can block on the join.
const TICKER_POLL: Duration = Duration::from_millis(25);

// -----------------------------------------------------------------------------
// Shared state (guarded by a mutex)
// -----------------------------------------------------------------------------
struct SharedState {
    is_daytime: bool,
    racoon: AnimalState,
    parrot: AnimalState,

    // Flip counter; the UI keys redundant-work checks on it
    generation: u64,

    // HUD countdown; re-anchored by the ticker on each flip
    next_flip_at: Instant,
}

impl SharedState {
    fn new(cycle_period: Duration) -> Self {
        Self {
            is_daytime: true,
            racoon: AnimalState::new("Racoon", SleepPolarity::Nocturnal, true),
            parrot: AnimalState::new("Parrot", SleepPolarity::Diurnal, false),
            generation: 0,
            next_flip_at: Instant::now() + cycle_period,
        }
    }

    fn to_snapshot(&self) -> ZooSnapshot {
        ZooSnapshot {
            is_daytime: self.is_daytime,
            racoon: self.racoon.clone(),
            parrot: self.parrot.clone(),
            generation: self.generation,
            time_to_flip: self.next_flip_at.saturating_duration_since(Instant::now()),
        }
    }
}

// -----------------------------------------------------------------------------
// Public clock API (used by UI and tests)
// -----------------------------------------------------------------------------
pub struct ZooClock {
    shared: Arc<Mutex<SharedState>>,
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
    cycle_period: Duration,
    ticker_should_run: Arc<AtomicBool>,
    ticker_thread: Option<thread::JoinHandle<()>>,
}

impl ZooClock {
    /// Create the clock in the daytime state and start the ticker thread.
    pub fn new(cycle_period: Duration) -> Self {
        // Floor the period so a zero config cannot spin the ticker.
        let cycle_period = cycle_period.max(Duration::from_millis(10));

        let mut clock = Self {
            shared: Arc::new(Mutex::new(SharedState::new(cycle_period))),
            subscribers: Arc::new(Mutex::new(Vec::new())),
            cycle_period,
            ticker_should_run: Arc::new(AtomicBool::new(true)),
            ticker_thread: None,
        };
        clock.start_ticker_thread();
        clock
    }

    fn start_ticker_thread(&mut self) {
        let shared = Arc::clone(&self.shared);
        let subscribers = Arc::clone(&self.subscribers);
        let running_flag = Arc::clone(&self.ticker_should_run);
        let period = self.cycle_period;

        let handle = thread::spawn(move || {
            tracing::debug!(?period, "zoo ticker started");
            let mut next_flip = Instant::now() + period;

            loop {
                if !running_flag.load(Ordering::Relaxed) {
                    break;
                }

                if Instant::now() >= next_flip {
                    // Anchor to the previous deadline so notification latency
                    // never accumulates; clamp to now so a long stall does not
                    // replay missed cycles as a burst.
                    next_flip = (next_flip + period).max(Instant::now());
                    flip_and_notify(&shared, &subscribers, Some(next_flip));
                }

                thread::sleep(TICKER_POLL.min(period));
            }
            tracing::debug!("zoo ticker stopped");
        });
        self.ticker_thread = Some(handle);
    }

    // ---------------------------------------------------------------------
    // Public operations
    // ---------------------------------------------------------------------

    /// Flip day/night and re-derive both animals' sleep flags, then notify
    /// every subscriber once. The ticker is the only caller in the running
    /// app; the timer cadence is unaffected by manual calls.
    #[allow(dead_code)]
    pub fn toggle_daytime(&self) {
        flip_and_notify(&self.shared, &self.subscribers, None);
    }

    /// Cheap cloned copy of the full state for the UI.
    pub fn snapshot(&self) -> ZooSnapshot {
        self.shared.lock().to_snapshot()
    }

    /// Register a callback to run after every flip.
    pub fn subscribe(&self, callback: impl Fn(&ZooSnapshot) + Send + 'static) {
        self.subscribers.lock().push(Box::new(callback));
    }

    pub fn cycle_period(&self) -> Duration {
        self.cycle_period
    }
}

impl Drop for ZooClock {
    fn drop(&mut self) {
        self.ticker_should_run.store(false, Ordering::Relaxed);
        if let Some(handle) = self.ticker_thread.take() {
            let _ = handle.join();
        }
    }
}

/// Flip the phase of day, re-derive both sleep flags, then notify subscribers
/// with the post-flip snapshot. The state lock is released before any
/// callback runs.
fn flip_and_notify(
    shared: &Mutex<SharedState>,
    subscribers: &Mutex<Vec<Subscriber>>,
    next_flip_at: Option<Instant>,
) {
    let snapshot = {
        let mut s = shared.lock();
        s.is_daytime = !s.is_daytime;
        let is_daytime = s.is_daytime;
        s.racoon.apply_daylight(is_daytime);
        s.parrot.apply_daylight(is_daytime);
        s.generation = s.generation.saturating_add(1);
        if let Some(deadline) = next_flip_at {
            s.next_flip_at = deadline;
        }
        s.to_snapshot()
    };

    tracing::debug!(
        is_daytime = snapshot.is_daytime,
        generation = snapshot.generation,
        "day/night flipped"
    );

    let subs = subscribers.lock();
    for notify in subs.iter() {
        notify(&snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    // Long enough that the ticker never fires on its own mid-test.
    const QUIET: Duration = Duration::from_secs(3600);

    #[test]
    fn construction_state() {
        let clock = ZooClock::new(QUIET);
        let snap = clock.snapshot();
        assert!(snap.is_daytime);
        assert!(snap.racoon.is_sleeping());
        assert!(!snap.parrot.is_sleeping());
        assert_eq!(snap.generation, 0);
        assert_eq!(snap.racoon.name(), "Racoon");
        assert_eq!(snap.parrot.name(), "Parrot");
    }

    #[test]
    fn single_toggle_flips_everything() {
        let clock = ZooClock::new(QUIET);
        clock.toggle_daytime();
        let snap = clock.snapshot();
        assert!(!snap.is_daytime);
        assert!(!snap.racoon.is_sleeping());
        assert!(snap.parrot.is_sleeping());
        assert_eq!(snap.generation, 1);
    }

    #[test]
    fn double_toggle_returns_to_start() {
        let clock = ZooClock::new(QUIET);
        let before = clock.snapshot();
        clock.toggle_daytime();
        clock.toggle_daytime();
        let after = clock.snapshot();
        assert_eq!(before.is_daytime, after.is_daytime);
        assert_eq!(before.racoon, after.racoon);
        assert_eq!(before.parrot, after.parrot);
    }

    #[test]
    fn daytime_parity_over_many_toggles() {
        let clock = ZooClock::new(QUIET);
        for n in 1..=25u64 {
            clock.toggle_daytime();
            let snap = clock.snapshot();
            assert_eq!(snap.is_daytime, n % 2 == 0);
            assert_eq!(snap.generation, n);
        }
    }

    #[test]
    fn exactly_one_animal_sleeps_in_any_state() {
        let clock = ZooClock::new(QUIET);
        for _ in 0..10 {
            let snap = clock.snapshot();
            assert_eq!(snap.racoon.is_sleeping(), snap.is_daytime);
            assert_eq!(snap.parrot.is_sleeping(), !snap.is_daytime);
            assert_ne!(snap.racoon.is_sleeping(), snap.parrot.is_sleeping());
            clock.toggle_daytime();
        }
    }

    #[test]
    fn names_survive_toggling() {
        let clock = ZooClock::new(QUIET);
        for _ in 0..6 {
            clock.toggle_daytime();
        }
        let snap = clock.snapshot();
        assert_eq!(snap.racoon.name(), "Racoon");
        assert_eq!(snap.parrot.name(), "Parrot");
    }

    #[test]
    fn one_notification_per_toggle() {
        let clock = ZooClock::new(QUIET);
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_by_callback = Arc::clone(&seen);
        clock.subscribe(move |_| {
            seen_by_callback.fetch_add(1, Ordering::SeqCst);
        });

        for expected in 1..=5usize {
            clock.toggle_daytime();
            assert_eq!(seen.load(Ordering::SeqCst), expected);
        }
    }

    #[test]
    fn notification_carries_post_flip_state() {
        let clock = ZooClock::new(QUIET);
        let observed = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&observed);
        clock.subscribe(move |snap| sink.lock().push((snap.is_daytime, snap.generation)));

        clock.toggle_daytime();
        clock.toggle_daytime();

        assert_eq!(*observed.lock(), vec![(false, 1), (true, 2)]);
    }

    #[test]
    fn every_subscriber_is_notified() {
        let clock = ZooClock::new(QUIET);
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        for counter in [&first, &second] {
            let counter = Arc::clone(counter);
            clock.subscribe(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }

        clock.toggle_daytime();
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn ticker_fires_on_its_own() {
        let clock = ZooClock::new(Duration::from_millis(50));
        let deadline = Instant::now() + Duration::from_secs(5);
        while clock.snapshot().generation < 2 {
            assert!(Instant::now() < deadline, "ticker never fired");
            thread::sleep(Duration::from_millis(10));
        }
        let snap = clock.snapshot();
        assert_eq!(snap.racoon.is_sleeping(), snap.is_daytime);
        assert_eq!(snap.parrot.is_sleeping(), !snap.is_daytime);
    }

    #[test]
    fn drop_joins_ticker() {
        let clock = ZooClock::new(Duration::from_millis(50));
        thread::sleep(Duration::from_millis(10));
        // Must return promptly rather than hang on the worker thread.
        drop(clock);
    }
}
