//! Tunables for the page components
//!
//! The particle field is the only component whose budget depends on the
//! device: constrained devices get fewer nodes, slower motion, a lower
//! frame rate and sparser pulses.

use std::sync::LazyLock;

use regex::Regex;

/// Viewport width (CSS pixels) at or below which the sidebar auto-closes
/// after a link is selected.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Delay between counter steps, in milliseconds
pub const COUNTER_STEP_MS: i32 = 20;

/// Counter target that is displayed as an infinity glyph
pub const INFINITY_SENTINEL: u32 = 999;

static MOBILE_AGENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)iPhone|iPad|iPod|Android").expect("valid regex"));

/// Coarse performance classification of the host device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceClass {
    #[default]
    Desktop,
    Mobile,
}

impl DeviceClass {
    /// Classify a device from its user agent string
    pub fn from_user_agent(user_agent: &str) -> Self {
        if MOBILE_AGENT.is_match(user_agent) {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == DeviceClass::Mobile
    }
}

/// Configuration for the neural particle field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Number of nodes created at startup
    pub node_count: usize,
    /// Maximum absolute velocity component is `speed / 2`
    pub speed: f32,
    /// Node radius range `[min_radius, max_radius)`
    pub min_radius: f32,
    pub max_radius: f32,
    /// Nodes closer than this are linked
    pub link_distance: f32,
    /// Wall-clock period between link refreshes
    pub link_refresh_ms: f64,
    /// Wall-clock period between pulse spawn attempts
    pub pulse_interval_ms: f64,
    /// Progress added to a pulse on every advanced frame
    pub pulse_speed: f32,
    /// Target frames per second
    pub fps: u32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::for_device(DeviceClass::Desktop)
    }
}

impl FieldConfig {
    /// Configuration sized for the given device class
    pub fn for_device(device: DeviceClass) -> Self {
        let mobile = device.is_mobile();
        Self {
            node_count: if mobile { 40 } else { 80 },
            speed: if mobile { 0.3 } else { 0.5 },
            min_radius: 1.0,
            max_radius: 4.0,
            link_distance: 180.0,
            link_refresh_ms: 12_000.0,
            pulse_interval_ms: if mobile { 600.0 } else { 300.0 },
            pulse_speed: 0.025,
            fps: if mobile { 30 } else { 60 },
        }
    }
}

/// Configuration for the skill label field
#[derive(Debug, Clone, PartialEq)]
pub struct SkillConfig {
    /// Labels never travel closer than this to a canvas edge
    pub padding: f32,
    /// Maximum absolute velocity component is `speed / 2`
    pub speed: f32,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            padding: 50.0,
            speed: 0.4,
        }
    }
}

/// Configuration for the holographic portrait frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameConfig {
    pub width: u32,
    pub height: u32,
    /// Distance of the outermost rectangle from the canvas edge
    pub inset: f32,
    /// Peak offset per layer index
    pub amplitude: f32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            width: 300,
            height: 400,
            inset: 10.0,
            amplitude: 12.0,
        }
    }
}
