//! Floating skill labels
//!
//! Same bounce rule as the neural field, but labels keep a margin from the
//! canvas edges so the text stays readable.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::SkillConfig;
use crate::field::{Bounds, bounce};

/// A drifting text label
#[derive(Debug, Clone, PartialEq)]
pub struct SkillLabel {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

/// Padded travel range on one axis. Collapses to the center line when the
/// canvas is too small for the padding.
fn axis_range(extent: f32, padding: f32) -> (f32, f32) {
    if extent >= padding * 2.0 {
        (padding, extent - padding)
    } else {
        (extent / 2.0, extent / 2.0)
    }
}

/// The set of skill labels drifting on one canvas
pub struct SkillField {
    labels: Vec<SkillLabel>,
    bounds: Bounds,
    config: SkillConfig,
}

impl SkillField {
    /// One label per skill, placed randomly inside the padded area
    pub fn new<S: AsRef<str>>(skills: &[S], bounds: Bounds, config: SkillConfig, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let (min_x, max_x) = axis_range(bounds.width, config.padding);
        let (min_y, max_y) = axis_range(bounds.height, config.padding);

        let labels = skills
            .iter()
            .map(|skill| SkillLabel {
                text: skill.as_ref().to_string(),
                x: min_x + rng.random::<f32>() * (max_x - min_x),
                y: min_y + rng.random::<f32>() * (max_y - min_y),
                vx: (rng.random::<f32>() - 0.5) * config.speed,
                vy: (rng.random::<f32>() - 0.5) * config.speed,
            })
            .collect();

        Self {
            labels,
            bounds,
            config,
        }
    }

    pub fn labels(&self) -> &[SkillLabel] {
        &self.labels
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Advance every label by one frame
    pub fn step(&mut self) {
        let (min_x, max_x) = axis_range(self.bounds.width, self.config.padding);
        let (min_y, max_y) = axis_range(self.bounds.height, self.config.padding);

        for label in &mut self.labels {
            bounce(&mut label.x, &mut label.vx, min_x, max_x);
            bounce(&mut label.y, &mut label.vy, min_y, max_y);
        }
    }
}
