//! Neural particle field
//!
//! A fixed set of drifting nodes that bounce off the canvas edges, linked to
//! their neighbours when close enough, with golden pulses travelling between
//! random node pairs. Everything here is plain data driven by [`NeuralField::tick`];
//! drawing lives in [`crate::canvas2d`].

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::FieldConfig;
use crate::schedule::{FrameClock, Interval};

/// Logical drawing size of a canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

/// Move one coordinate and reflect its velocity at `[min, max]`.
///
/// The position is clamped onto the bound it crossed, so it never leaves
/// the range. Velocity is pointed back inward rather than blindly negated,
/// which keeps a point that starts outside the range from jittering.
pub(crate) fn bounce(pos: &mut f32, vel: &mut f32, min: f32, max: f32) {
    *pos += *vel;
    if *pos < min {
        *pos = min;
        *vel = vel.abs();
    } else if *pos > max {
        *pos = max;
        *vel = -vel.abs();
    }
}

/// A drifting point in the field
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Radius for rendering
    pub radius: f32,
}

impl Node {
    fn random(rng: &mut SmallRng, bounds: Bounds, config: &FieldConfig) -> Self {
        let radius_span = (config.max_radius - config.min_radius).max(0.0);
        Self {
            x: rng.random::<f32>() * bounds.width,
            y: rng.random::<f32>() * bounds.height,
            vx: (rng.random::<f32>() - 0.5) * config.speed,
            vy: (rng.random::<f32>() - 0.5) * config.speed,
            radius: config.min_radius + rng.random::<f32>() * radius_span,
        }
    }

    fn advance(&mut self, bounds: Bounds) {
        bounce(&mut self.x, &mut self.vx, 0.0, bounds.width);
        bounce(&mut self.y, &mut self.vy, 0.0, bounds.height);
    }

    fn distance(&self, other: &Node) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A proximity link between two nodes (indices into the node array, `a < b`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Link {
    pub a: usize,
    pub b: usize,
}

/// A point travelling from one node's position to another's
#[derive(Debug, Clone, PartialEq)]
pub struct Pulse {
    pub from: (f32, f32),
    pub to: (f32, f32),
    /// Fraction of the journey completed, in `[0, 1)` while alive
    pub progress: f32,
    pub speed: f32,
}

impl Pulse {
    /// Advance by one step; returns false once the pulse has arrived
    pub fn advance(&mut self) -> bool {
        self.progress += self.speed;
        self.progress < 1.0
    }

    /// Current screen position (linear interpolation)
    pub fn position(&self) -> (f32, f32) {
        let t = self.progress;
        (
            self.from.0 + (self.to.0 - self.from.0) * t,
            self.from.1 + (self.to.1 - self.from.1) * t,
        )
    }
}

/// The animated neural background
pub struct NeuralField {
    nodes: Vec<Node>,
    links: Vec<Link>,
    pulses: Vec<Pulse>,
    bounds: Bounds,
    config: FieldConfig,
    rng: SmallRng,
    clock: FrameClock,
    relink: Interval,
    spawn: Interval,
}

impl NeuralField {
    /// Create a field with randomly placed nodes and compute initial links
    pub fn new(config: FieldConfig, bounds: Bounds, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let nodes = (0..config.node_count)
            .map(|_| Node::random(&mut rng, bounds, &config))
            .collect();

        let mut field = Self {
            nodes,
            links: Vec::new(),
            pulses: Vec::new(),
            bounds,
            clock: FrameClock::new(config.fps),
            relink: Interval::new(config.link_refresh_ms),
            spawn: Interval::new(config.pulse_interval_ms),
            config,
            rng,
        };
        field.connect();
        field
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Update the drawing size. Nodes are not moved here; any node left
    /// outside the new bounds is clamped back on its next step.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Bounds::new(width, height);
    }

    /// Drive the field from a host frame callback.
    ///
    /// Runs due periodic jobs (link refresh, pulse spawn) and returns true
    /// when the frame clock admits a new frame, in which case the field has
    /// been stepped and should be redrawn.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if self.relink.poll(now_ms) {
            self.connect();
        }
        if self.spawn.poll(now_ms) {
            self.spawn_pulse();
        }
        if self.clock.poll(now_ms) {
            self.step();
            true
        } else {
            false
        }
    }

    /// Advance nodes and pulses by one frame
    pub fn step(&mut self) {
        let bounds = self.bounds;
        for node in &mut self.nodes {
            node.advance(bounds);
        }
        self.pulses.retain_mut(Pulse::advance);
    }

    /// Recompute proximity links. Each unordered pair is evaluated once.
    pub fn connect(&mut self) {
        self.links.clear();
        let threshold = self.config.link_distance;
        let n = self.nodes.len();

        for i in 0..n {
            for j in (i + 1)..n {
                if self.nodes[i].distance(&self.nodes[j]) < threshold {
                    self.links.push(Link { a: i, b: j });
                }
            }
        }
    }

    /// Start a pulse between two random nodes.
    ///
    /// Returns `None` when the draw picked the same node twice or the field
    /// has fewer than two nodes; that spawn is simply skipped.
    pub fn spawn_pulse(&mut self) -> Option<&Pulse> {
        let n = self.nodes.len();
        if n < 2 {
            return None;
        }
        let a = self.rng.random_range(0..n);
        let b = self.rng.random_range(0..n);
        if a == b {
            return None;
        }

        let (from, to) = (&self.nodes[a], &self.nodes[b]);
        self.pulses.push(Pulse {
            from: (from.x, from.y),
            to: (to.x, to.y),
            progress: 0.0,
            speed: self.config.pulse_speed,
        });
        self.pulses.last()
    }
}
