//! `Surface` backed by a browser canvas 2D context

use anyhow::{Context, Result, anyhow};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::Surface;

/// A canvas's 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow!("getContext failed: {e:?}"))?
            .context("canvas has no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| anyhow!("2d context has unexpected type"))?;
        Ok(Self { ctx })
    }
}

impl Surface for CanvasSurface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.clear_rect(x, y, w, h);
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.ctx.set_stroke_style_str(style);
    }

    fn set_fill_style(&mut self, style: &str) {
        self.ctx.set_fill_style_str(style);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        // Negative radius throws
        if let Err(e) = self.ctx.arc(x, y, radius, start, end) {
            log::warn!("arc failed: {:?}", e);
        }
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        match self.ctx.measure_text(text) {
            Ok(metrics) => metrics.width(),
            Err(e) => {
                log::warn!("measureText failed: {:?}", e);
                0.0
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, max_width: f64) {
        if let Err(e) = self.ctx.fill_text_with_max_width(text, x, y, max_width) {
            log::warn!("fillText failed: {:?}", e);
        }
    }
}
