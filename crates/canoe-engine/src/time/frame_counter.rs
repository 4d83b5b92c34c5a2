use std::time::{Duration, Instant};

/// Frame rate over one reporting interval.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameReport {
    /// Frames presented during the interval.
    pub frames: u64,

    /// Actual length of the interval (at least the configured one).
    pub elapsed: Duration,

    /// Average frames per second over `elapsed`.
    pub fps: f64,
}

/// Counts presented frames and reports the average rate once per interval.
///
/// Takes timestamps from the caller so it can be driven deterministically.
#[derive(Debug, Clone)]
pub struct FrameCounter {
    interval: Duration,
    window_start: Option<Instant>,
    frames: u64,
    total_frames: u64,
}

impl FrameCounter {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        Self::with_interval(Self::DEFAULT_INTERVAL)
    }

    pub fn with_interval(interval: Duration) -> Self {
        debug_assert!(!interval.is_zero());
        Self {
            interval,
            window_start: None,
            frames: 0,
            total_frames: 0,
        }
    }

    /// Frames counted since construction.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Records one presented frame at `now`.
    ///
    /// The first call only starts the interval. Returns a report when at least
    /// one interval has elapsed since the interval started, then begins a new
    /// one at `now`.
    pub fn tick(&mut self, now: Instant) -> Option<FrameReport> {
        self.total_frames = self.total_frames.wrapping_add(1);

        let Some(start) = self.window_start else {
            self.window_start = Some(now);
            return None;
        };

        self.frames += 1;
        let elapsed = now.saturating_duration_since(start);
        if elapsed < self.interval {
            return None;
        }

        let report = FrameReport {
            frames: self.frames,
            elapsed,
            fps: self.frames as f64 / elapsed.as_secs_f64(),
        };
        self.window_start = Some(now);
        self.frames = 0;
        Some(report)
    }
}

impl Default for FrameCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_starts_the_interval() {
        let mut counter = FrameCounter::new();
        assert_eq!(counter.tick(Instant::now()), None);
        assert_eq!(counter.total_frames(), 1);
    }

    #[test]
    fn reports_once_per_interval() {
        let mut counter = FrameCounter::new();
        let t0 = Instant::now();
        counter.tick(t0);

        let step = Duration::from_millis(10);
        let mut reports = Vec::new();
        for i in 1..=100u32 {
            if let Some(r) = counter.tick(t0 + step * i) {
                reports.push(r);
            }
        }

        assert_eq!(reports.len(), 1);
        let r = reports[0];
        assert_eq!(r.frames, 100);
        assert_eq!(r.elapsed, Duration::from_secs(1));
        assert!((r.fps - 100.0).abs() < 1e-9);
    }

    #[test]
    fn counting_restarts_after_a_report() {
        let mut counter = FrameCounter::with_interval(Duration::from_millis(100));
        let t0 = Instant::now();
        counter.tick(t0);

        assert!(counter.tick(t0 + Duration::from_millis(150)).is_some());
        assert!(counter.tick(t0 + Duration::from_millis(200)).is_none());

        let r = counter.tick(t0 + Duration::from_millis(250)).unwrap();
        assert_eq!(r.frames, 2);
        assert_eq!(r.elapsed, Duration::from_millis(100));
    }
}
