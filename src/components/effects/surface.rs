//! Canvas sizing and context acquisition.

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::error::EffectError;
use super::types::{Bounds, Point, SurfaceFit};

/// Current `innerWidth` x `innerHeight`, if there is a window.
pub fn viewport_size() -> Option<Bounds> {
	let window = web_sys::window()?;
	Some(Bounds::new(
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// A canvas kept sized to a fraction of the viewport, plus its 2D context.
pub struct Surface {
	canvas: HtmlCanvasElement,
	context: CanvasRenderingContext2d,
	fit: SurfaceFit,
	bounds: Bounds,
}

impl Surface {
	/// Acquire the 2D context and size the canvas to the viewport.
	pub fn setup(canvas: HtmlCanvasElement, fit: SurfaceFit) -> Result<Self, EffectError> {
		let context = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
			.ok_or(EffectError::ContextUnavailable)?;

		let viewport = viewport_size().unwrap_or(Bounds::new(800.0, 600.0));
		let mut surface = Self {
			canvas,
			context,
			fit,
			bounds: Bounds::default(),
		};
		surface.apply(fit.bounds_for(viewport));
		Ok(surface)
	}

	/// Refit the canvas to the current viewport. The backing store is only
	/// touched when the size actually changed, since that also wipes it.
	pub fn resize(&mut self) -> Bounds {
		if let Some(viewport) = viewport_size() {
			let bounds = self.fit.bounds_for(viewport);
			if bounds != self.bounds {
				self.apply(bounds);
			}
		}
		self.bounds
	}

	fn apply(&mut self, bounds: Bounds) {
		self.canvas.set_width(bounds.width as u32);
		self.canvas.set_height(bounds.height as u32);
		self.bounds = bounds;
		debug!("surface: {}x{}", bounds.width, bounds.height);
	}

	pub fn bounds(&self) -> Bounds {
		self.bounds
	}

	pub fn canvas(&self) -> &HtmlCanvasElement {
		&self.canvas
	}

	pub fn context_mut(&mut self) -> &mut CanvasRenderingContext2d {
		&mut self.context
	}

	/// Map client (viewport) coordinates onto the canvas.
	pub fn to_surface(&self, client_x: f64, client_y: f64) -> Point {
		let rect = self.canvas.get_bounding_client_rect();
		Point::new(client_x - rect.left(), client_y - rect.top())
	}
}
