// Renderer struct that handles 2d canvas calls for the particle field:
// clearing the frame, filled dots and thin connector lines.

use std::f64::consts::PI;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::color::Color;
use crate::error::FieldError;
use crate::surface::DrawingSurface;

pub struct CanvasRenderer {
    pub canvas: HtmlCanvasElement,
    pub context: CanvasRenderingContext2d,
    // Last colours handed to the context, so unchanged styles aren't re-parsed
    fill_style: Option<Color>,
    stroke_style: Option<Color>,
}

impl CanvasRenderer {
    // Grabs the 2d context from the canvas on the DOM
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, FieldError> {
        let context = canvas
            .get_context("2d")
            .map_err(FieldError::from)?
            .ok_or(FieldError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FieldError::ContextUnavailable)?;

        Ok(CanvasRenderer {
            canvas,
            context,
            fill_style: None,
            stroke_style: None,
        })
    }

    // Resizing the backing store also resets the context state
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.fill_style = None;
        self.stroke_style = None;
    }

    #[allow(deprecated)]
    fn use_fill(&mut self, color: &Color) {
        if self.fill_style != Some(*color) {
            self.context
                .set_fill_style(&JsValue::from_str(&color.to_css()));
            self.fill_style = Some(*color);
        }
    }

    #[allow(deprecated)]
    fn use_stroke(&mut self, color: &Color) {
        if self.stroke_style != Some(*color) {
            self.context
                .set_stroke_style(&JsValue::from_str(&color.to_css()));
            self.stroke_style = Some(*color);
        }
    }
}

impl DrawingSurface for CanvasRenderer {
    fn clear(&mut self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_disk(&mut self, center: [f64; 2], radius: f64, color: &Color) {
        self.use_fill(color);
        self.context.begin_path();
        if let Err(err) = self.context.arc(center[0], center[1], radius, 0.0, PI * 2.0) {
            log::warn!("failed to draw particle at {:?}: {:?}", center, err);
            return;
        }
        self.context.fill();
    }

    fn line(&mut self, from: [f64; 2], to: [f64; 2], width: f64, color: &Color) {
        self.use_stroke(color);
        self.context.set_line_width(width);
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.stroke();
    }
}
