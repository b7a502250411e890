//! Holographic portrait frame
//!
//! Three concentric rectangles whose offsets breathe with time. There is no
//! state between frames: the layers are a pure function of the clock.

use crate::config::FrameConfig;

/// Number of rectangles drawn around the portrait
pub const LAYER_COUNT: usize = 3;

/// One stroked rectangle of the frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameLayer {
    pub alpha: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Compute the frame layers at `t_seconds`
pub fn layers(t_seconds: f64, config: &FrameConfig) -> [FrameLayer; LAYER_COUNT] {
    let inset = config.inset as f64;
    let amplitude = config.amplitude as f64;
    let (width, height) = (config.width as f64, config.height as f64);

    std::array::from_fn(|i| {
        let i = i as f64;
        let offset = i * amplitude * (t_seconds + i).sin();
        FrameLayer {
            alpha: 0.3 + i * 0.15,
            x: inset + offset,
            y: inset + offset,
            width: width - 2.0 * inset - 2.0 * offset,
            height: height - 2.0 * inset - 2.0 * offset,
        }
    })
}
