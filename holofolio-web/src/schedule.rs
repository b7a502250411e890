//! Host-independent timing for animation loops
//!
//! The browser hands every animation frame callback a millisecond timestamp.
//! These helpers turn that stream of timestamps into "render now" and
//! "periodic job due" decisions, so scenes can be ticked from any host
//! (including plain unit tests).

/// Throttles a frame callback to a target frame rate
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval_ms: f64,
    last: Option<f64>,
}

impl FrameClock {
    /// Create a clock admitting at most `fps` frames per second
    pub fn new(fps: u32) -> Self {
        Self {
            interval_ms: 1000.0 / fps.max(1) as f64,
            last: None,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Returns true when a frame should be rendered at `now_ms`.
    ///
    /// The first call only records the starting time. The remainder of the
    /// elapsed time is carried over so the average rate holds even when
    /// the host calls back at a different cadence.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        let last = *self.last.get_or_insert(now_ms);
        let delta = now_ms - last;
        if delta > self.interval_ms {
            self.last = Some(now_ms - delta % self.interval_ms);
            true
        } else {
            false
        }
    }
}

/// A fixed-period job driven by polled timestamps
#[derive(Debug, Clone)]
pub struct Interval {
    period_ms: f64,
    next_due: Option<f64>,
}

impl Interval {
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            next_due: None,
        }
    }

    /// Returns true once per elapsed period.
    ///
    /// The first poll arms the interval. Missed periods (a backgrounded
    /// tab, for example) collapse into a single firing.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.next_due {
            None => {
                self.next_due = Some(now_ms + self.period_ms);
                false
            }
            Some(due) if now_ms >= due => {
                let next = due + self.period_ms;
                self.next_due = Some(if next <= now_ms {
                    now_ms + self.period_ms
                } else {
                    next
                });
                true
            }
            Some(_) => false,
        }
    }
}
