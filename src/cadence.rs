/// A fixed-interval tick source fed with variable frame times.
#[derive(Clone, Debug)]
pub struct Cadence {
    interval: f32,
    accumulated: f32,
    max_per_frame: u32,
}

impl Cadence {
    /// Ticks owed beyond this many in one frame are dropped, so a long stall does
    /// not turn into a burst of catch-up ticks.
    pub const DEFAULT_MAX_PER_FRAME: u32 = 8;

    pub fn from_millis(interval_ms: u64) -> Self {
        Self {
            interval: interval_ms.max(1) as f32 / 1000.0,
            accumulated: 0.0,
            max_per_frame: Self::DEFAULT_MAX_PER_FRAME,
        }
    }

    pub fn with_max_per_frame(mut self, max_per_frame: u32) -> Self {
        self.max_per_frame = max_per_frame.max(1);
        self
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Number of ticks due after `dt` more seconds.
    pub fn due(&mut self, dt: f32) -> u32 {
        self.accumulated += dt.max(0.0);
        let mut ticks = 0;
        while self.accumulated >= self.interval && ticks < self.max_per_frame {
            self.accumulated -= self.interval;
            ticks += 1;
        }
        if ticks == self.max_per_frame && self.accumulated >= self.interval {
            tracing::trace!(dropped = self.accumulated / self.interval, "cadence fell behind");
            self.accumulated %= self.interval;
        }
        ticks
    }

    /// Forget any partial interval, e.g. when a tick source is (re)started.
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}
