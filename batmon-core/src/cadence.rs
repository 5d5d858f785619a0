//! Fixed period deadlines
//!
//! Every deadline is derived from the previous deadline, never from the time the task got
//! around to asking. Late wakeups therefore shorten the following period instead of pushing
//! the whole schedule back.

use embassy_time::{Duration, Instant};

/// Deadline generator for a periodic task
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    deadline: Instant,
    period: Duration,
}

impl Cadence {
    /// Starts the schedule at `start`; the first deadline is one period later
    pub const fn starting_at(start: Instant, period: Duration) -> Self {
        Self {
            deadline: start,
            period,
        }
    }

    /// Moves on to the next deadline and returns it
    ///
    /// A deadline that has already passed is still returned, waiting for it completes at once.
    pub fn advance(&mut self) -> Instant {
        self.deadline += self.period;
        self.deadline
    }

    /// Most recently issued deadline
    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;
    use embassy_futures::join::join;
    use embassy_futures::yield_now;
    use embassy_time::{MockDriver, Timer};

    use super::*;

    const PERIOD: Duration = Duration::from_millis(100);

    #[test]
    fn first_deadline_is_one_period_after_start() {
        let start = Instant::from_millis(250);
        let mut cadence = Cadence::starting_at(start, PERIOD);
        assert_eq!(cadence.deadline(), start);
        assert_eq!(cadence.advance(), Instant::from_millis(350));
    }

    #[test]
    fn deadlines_do_not_drift_under_jitter() {
        let start = Instant::from_millis(1_000);
        let mut cadence = Cadence::starting_at(start, PERIOD);
        let mut now = start;

        for k in 1..=10u32 {
            let deadline = cadence.advance();
            assert_eq!(deadline, start + PERIOD * k);

            // woken late by the scheduler, then busy for a while before asking again
            let jitter = Duration::from_millis(u64::from(k % 4) * 7 + 1);
            now = now.max(deadline) + jitter;
            assert!(now > deadline);
        }

        assert_eq!(cadence.deadline(), Instant::from_millis(2_000));
    }

    #[test]
    fn timer_loop_stays_on_schedule() {
        let driver = MockDriver::get();
        let start = Instant::now();
        let mut cadence = Cadence::starting_at(start, PERIOD);
        let mut wakes = Vec::new();
        let step = Duration::from_millis(30);

        block_on(join(
            async {
                for _ in 0..10 {
                    let deadline = cadence.advance();
                    Timer::at(deadline).await;
                    wakes.push((deadline, Instant::now()));
                }
            },
            async {
                // the clock only moves in 30ms steps, so every wakeup is late by up to 30ms
                for _ in 0..40 {
                    driver.advance(step);
                    yield_now().await;
                }
            },
        ));

        assert_eq!(wakes.len(), 10);
        for (k, (deadline, woke)) in (1..=10u32).zip(wakes) {
            assert_eq!(deadline, start + PERIOD * k);
            assert!(woke >= deadline && woke < deadline + step, "tick {k} woke at {woke:?}");
        }
    }

    #[test]
    fn overrun_deadlines_are_not_skipped() {
        let start = Instant::from_millis(0);
        let mut cadence = Cadence::starting_at(start, PERIOD);
        // a tick overran by several periods, the missed deadlines still come in order
        let now = start + PERIOD * 3 + PERIOD / 2;
        let first = cadence.advance();
        let second = cadence.advance();
        assert!(first < now && second < now);
        assert_eq!(second - first, PERIOD);
    }
}
