//! Live countdown of the remaining time.
//!
//! A `Countdown` owns a background task that recomputes the breakdown on a
//! fixed period and publishes it on a `watch` channel. The task lives exactly
//! as long as the `Countdown`: `stop()` or dropping it aborts the timer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::clock::Clock;
use crate::person::Person;
use crate::time_utils::RemainingTime;

pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

pub struct Countdown {
    rx: watch::Receiver<RemainingTime>,
    handle: Option<JoinHandle<()>>,
}

impl Countdown {
    /// Publishes the current breakdown immediately, then once per `period`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(person: Person, clock: Arc<dyn Clock>, period: Duration) -> Self {
        let (tx, rx) = watch::channel(person.remaining_time(clock.now()));

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // the first tick fires immediately and the initial value is already out
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let remaining = person.remaining_time(clock.now());
                if tx.send(remaining).is_err() {
                    break;
                }
            }
        });

        debug!(?period, "countdown started");
        Self {
            rx,
            handle: Some(handle),
        }
    }

    pub fn current(&self) -> RemainingTime {
        *self.rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<RemainingTime> {
        self.rx.clone()
    }

    /// Waits for the next tick. `None` once the countdown has stopped.
    pub async fn changed(&mut self) -> Option<RemainingTime> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("countdown stopped");
        }
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::time_utils::add_years;
    use chrono::{DateTime, TimeZone, Utc};

    /// Wall clock driven by tokio's (pausable) time.
    struct TokioClock {
        start: DateTime<Utc>,
        origin: tokio::time::Instant,
    }

    impl Clock for TokioClock {
        fn now(&self) -> DateTime<Utc> {
            let elapsed = chrono::Duration::from_std(self.origin.elapsed()).unwrap();
            self.start + elapsed
        }
    }

    fn start_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    /// Someone with exactly 100 seconds left at `start_instant()`.
    fn almost_done() -> Person {
        let death = start_instant() + chrono::Duration::seconds(100);
        Person::new(add_years(death, -1), 1)
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_initial_value_then_ticks() {
        let clock = Arc::new(TokioClock {
            start: start_instant(),
            origin: tokio::time::Instant::now(),
        });
        let mut countdown = Countdown::start(almost_done(), clock, DEFAULT_PERIOD);

        let initial = countdown.current();
        assert_eq!((initial.minutes, initial.seconds), (1, 40));

        let next = countdown.changed().await.unwrap();
        assert_eq!((next.minutes, next.seconds), (1, 39));

        let next = countdown.changed().await.unwrap();
        assert_eq!((next.minutes, next.seconds), (1, 38));
        assert!(countdown.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn reaches_zero_and_stays_there() {
        let clock = Arc::new(TokioClock {
            start: start_instant(),
            origin: tokio::time::Instant::now(),
        });
        let mut countdown = Countdown::start(almost_done(), clock, Duration::from_secs(60));

        let after_one = countdown.changed().await.unwrap();
        assert_eq!((after_one.minutes, after_one.seconds), (0, 40));
        assert!(countdown.changed().await.unwrap().is_zero());
        assert!(countdown.changed().await.unwrap().is_zero());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_ends_the_stream() {
        let clock = Arc::new(FixedClock(start_instant()));
        let mut countdown = Countdown::start(almost_done(), clock, DEFAULT_PERIOD);
        countdown.stop();

        assert!(!countdown.is_running());
        assert_eq!(countdown.changed().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_countdown_releases_the_timer() {
        let clock = Arc::new(FixedClock(start_instant()));
        let countdown = Countdown::start(almost_done(), clock, DEFAULT_PERIOD);
        let mut rx = countdown.subscribe();
        drop(countdown);

        assert!(rx.changed().await.is_err());
    }
}
