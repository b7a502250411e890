//! 2D Canvas rendering for the decorative scenes
//!
//! Each scene model is plain data; this module turns it into draw calls on
//! an HTML canvas.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::{PortfolioError, PortfolioResult};
use crate::field::NeuralField;
use crate::frame::FrameLayer;
use crate::skills::SkillField;

const CYAN: &str = "#0ff";

/// A canvas and its 2D context
pub struct Surface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Surface {
    /// Wrap a canvas, failing when it has no 2D context
    pub fn new(canvas: HtmlCanvasElement) -> PortfolioResult<Self> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| PortfolioError::Js("2d context not available".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| PortfolioError::Js("failed to cast to CanvasRenderingContext2d".to_string()))?;

        Ok(Self { canvas, ctx })
    }

    pub fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    pub fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    /// Set the backing store size; this also clears the canvas
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    /// Cover the canvas with a translucent fill, leaving fading trails
    fn wash(&self, style: &str) {
        self.ctx.set_fill_style_str(style);
        self.ctx.fill_rect(0.0, 0.0, self.width(), self.height());
    }

    fn glow(&self, blur: f64, color: &str) {
        self.ctx.set_shadow_blur(blur);
        self.ctx.set_shadow_color(color);
    }

    fn dot(&self, x: f64, y: f64, radius: f64) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(x, y, radius, 0.0, TAU);
        self.ctx.fill();
    }

    /// Render the neural field: links, then nodes, then pulses
    pub fn draw_field(&self, field: &NeuralField) {
        self.wash("rgba(0,0,0,0.05)");

        let nodes = field.nodes();

        // Draw links first (behind nodes)
        self.ctx.set_stroke_style_str("rgba(0,255,255,0.15)");
        self.ctx.set_line_width(1.0);
        self.glow(0.0, "transparent");
        for link in field.links() {
            let (a, b) = (&nodes[link.a], &nodes[link.b]);
            self.ctx.begin_path();
            self.ctx.move_to(a.x as f64, a.y as f64);
            self.ctx.line_to(b.x as f64, b.y as f64);
            self.ctx.stroke();
        }

        self.ctx.set_fill_style_str(CYAN);
        self.glow(15.0, CYAN);
        for node in nodes {
            self.dot(node.x as f64, node.y as f64, node.radius as f64);
        }

        self.ctx.set_fill_style_str("rgba(255,215,0,0.9)");
        self.glow(25.0, "gold");
        for pulse in field.pulses() {
            let (x, y) = pulse.position();
            self.dot(x as f64, y as f64, 6.0);
        }
    }

    /// Render the portrait frame layers
    pub fn draw_frame(&self, layers: &[FrameLayer]) {
        self.ctx.clear_rect(0.0, 0.0, self.width(), self.height());
        self.ctx.set_stroke_style_str(CYAN);
        self.ctx.set_line_width(2.0);
        self.glow(20.0, CYAN);

        for layer in layers {
            self.ctx.set_global_alpha(layer.alpha);
            self.ctx
                .stroke_rect(layer.x, layer.y, layer.width, layer.height);
        }
        self.ctx.set_global_alpha(1.0);
    }

    /// Render the floating skill labels
    pub fn draw_skills(&self, skills: &SkillField) {
        self.wash("rgba(0,0,0,0.1)");
        self.ctx.set_fill_style_str(CYAN);
        self.ctx.set_font("18px Rajdhani");
        self.glow(10.0, CYAN);

        for label in skills.labels() {
            let _ = self
                .ctx
                .fill_text(&label.text, label.x as f64, label.y as f64);
        }
    }
}
