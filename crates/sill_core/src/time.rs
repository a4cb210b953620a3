//! Fixed-period frame pacing for the run loop.
//!
//! Every loop iteration is bracketed by `begin_frame()` / `end_frame()`. If the
//! iteration's work finished inside the budget, `end_frame()` sleeps for the
//! remainder so the iteration lasts at least one interval. An iteration that
//! already overran the budget is never slept; it is only counted.

use std::time::{Duration, Instant};

/// Default budget: ~30 iterations per second.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(33);

const WORK_SAMPLE_COUNT: usize = 30;

pub struct FramePacer {
    interval: Duration,
    frame_start: Instant,
    pub frame_count: u64,
    pub overrun_count: u64,

    work_samples: [f64; WORK_SAMPLE_COUNT],
    work_sample_index: usize,
    /// Average time spent working (excluding the pacing sleep) over the last
    /// few frames.
    pub smoothed_work_ms: f64,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            frame_start: Instant::now(),
            frame_count: 0,
            overrun_count: 0,
            work_samples: [0.0; WORK_SAMPLE_COUNT],
            work_sample_index: 0,
            smoothed_work_ms: 0.0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn begin_frame(&mut self) {
        self.frame_start = Instant::now();
        self.frame_count += 1;
    }

    /// Sleep the rest of the budget. Returns how long it slept.
    pub fn end_frame(&mut self) -> Duration {
        let work = self.frame_start.elapsed();
        self.record_work(work);

        match remaining_budget(self.interval, work) {
            Some(rest) => {
                std::thread::sleep(rest);
                rest
            }
            None => {
                self.overrun_count += 1;
                log::trace!(
                    "Frame {} took {:.1}ms, over the {}ms budget",
                    self.frame_count,
                    work.as_secs_f64() * 1000.0,
                    self.interval.as_millis()
                );
                Duration::ZERO
            }
        }
    }

    fn record_work(&mut self, work: Duration) {
        self.work_samples[self.work_sample_index] = work.as_secs_f64() * 1000.0;
        self.work_sample_index = (self.work_sample_index + 1) % WORK_SAMPLE_COUNT;
        let filled = (self.frame_count as usize).clamp(1, WORK_SAMPLE_COUNT);
        let sum: f64 = self.work_samples.iter().take(filled).sum();
        self.smoothed_work_ms = sum / filled as f64;
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}

/// Time left in the budget after `elapsed`, or `None` when nothing is left.
pub fn remaining_budget(interval: Duration, elapsed: Duration) -> Option<Duration> {
    interval.checked_sub(elapsed).filter(|rest| !rest.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_budget_under_and_over() {
        let budget = Duration::from_millis(33);
        assert_eq!(
            remaining_budget(budget, Duration::from_millis(10)),
            Some(Duration::from_millis(23))
        );
        assert_eq!(remaining_budget(budget, Duration::from_millis(33)), None);
        assert_eq!(remaining_budget(budget, Duration::from_millis(50)), None);
    }

    #[test]
    fn short_frame_lasts_at_least_the_interval() {
        let mut pacer = FramePacer::new(Duration::from_millis(20));
        let start = Instant::now();
        pacer.begin_frame();
        let slept = pacer.end_frame();
        assert!(start.elapsed() >= Duration::from_millis(20));
        assert!(slept > Duration::ZERO);
        assert_eq!(pacer.overrun_count, 0);
    }

    #[test]
    fn long_frame_is_not_slept() {
        let mut pacer = FramePacer::new(Duration::from_millis(5));
        pacer.begin_frame();
        std::thread::sleep(Duration::from_millis(15));
        let slept = pacer.end_frame();
        assert_eq!(slept, Duration::ZERO);
        assert_eq!(pacer.overrun_count, 1);
    }

    #[test]
    fn frame_count_and_smoothing() {
        let mut pacer = FramePacer::new(Duration::from_millis(1));
        for _ in 0..3 {
            pacer.begin_frame();
            pacer.end_frame();
        }
        assert_eq!(pacer.frame_count, 3);
        assert!(pacer.smoothed_work_ms >= 0.0);
    }

    #[test]
    fn default_interval_is_33ms() {
        assert_eq!(FramePacer::default().interval(), Duration::from_millis(33));
    }
}
