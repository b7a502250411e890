//! Scroll-triggered count-up counters

use crate::config::INFINITY_SENTINEL;

/// Number of steps a counter takes to reach its target
const STEPS: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting to become visible
    Idle,
    /// Counting towards the target
    Running,
    /// Showing the terminal value; never changes again
    Done,
}

/// A single animated counter
#[derive(Debug, Clone, PartialEq)]
pub struct Counter {
    target: u32,
    current: u32,
    phase: Phase,
}

impl Counter {
    pub fn new(target: u32) -> Self {
        Self {
            target,
            current: 0,
            phase: Phase::Idle,
        }
    }

    /// Parse the target from a `data-target` attribute value
    pub fn from_attribute(value: &str) -> Option<Self> {
        value.trim().parse().ok().map(Self::new)
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Start counting. Returns false if the counter already started, so
    /// repeated visibility events are harmless.
    pub fn trigger(&mut self) -> bool {
        if self.phase == Phase::Idle {
            self.phase = Phase::Running;
            true
        } else {
            false
        }
    }

    /// Advance one step while running and return the text to display.
    ///
    /// Returns `None` when idle or already done.
    pub fn step(&mut self) -> Option<String> {
        if self.phase != Phase::Running {
            return None;
        }
        if self.current < self.target {
            let increment = self.target as f64 / STEPS;
            let next = (self.current as f64 + increment).ceil() as u32;
            self.current = next.clamp(self.current, self.target);
            Some(self.current.to_string())
        } else {
            self.phase = Phase::Done;
            Some(self.terminal_text())
        }
    }

    /// Final display form of the target
    pub fn terminal_text(&self) -> String {
        terminal_text(self.target)
    }
}

/// Whether any counter still needs the stepping timer
pub fn any_running<'a>(counters: impl IntoIterator<Item = &'a Counter>) -> bool {
    counters
        .into_iter()
        .any(|counter| counter.phase() == Phase::Running)
}

/// Final display form: the infinity glyph for the sentinel, a `+` suffix
/// above one hundred, the bare number otherwise.
pub fn terminal_text(target: u32) -> String {
    if target == INFINITY_SENTINEL {
        "∞".to_string()
    } else if target > 100 {
        format!("{target}+")
    } else {
        target.to_string()
    }
}
