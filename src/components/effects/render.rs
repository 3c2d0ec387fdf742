//! Drawing for the particle effects.
//!
//! Effects paint through the [`Painter`] trait so the simulation can run
//! against a recording painter in tests. The browser implementation maps each
//! call onto `CanvasRenderingContext2d`:
//! - circles use `globalAlpha` for the particle's opacity
//! - trails are round-capped polylines

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::fireworks::{Firework, Fragment};
use super::snow::Snowflake;
use super::theme::Color;
use super::types::{Bounds, Point};

/// Minimal 2D drawing surface used by the effects.
pub trait Painter {
	/// Reset the whole surface to transparent.
	fn clear_surface(&mut self, bounds: Bounds);
	/// Paint `color` over the whole surface, blending with what is there.
	fn fill_surface(&mut self, bounds: Bounds, color: Color);
	/// Filled circle; `color.a` is applied as the global alpha.
	fn fill_circle(&mut self, center: Point, radius: f64, color: Color);
	/// Open polyline through `points` with round caps.
	fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Color);
}

impl Painter for CanvasRenderingContext2d {
	fn clear_surface(&mut self, bounds: Bounds) {
		self.clear_rect(0.0, 0.0, bounds.width, bounds.height);
	}

	fn fill_surface(&mut self, bounds: Bounds, color: Color) {
		self.set_fill_style_str(&color.to_css());
		self.fill_rect(0.0, 0.0, bounds.width, bounds.height);
	}

	fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
		self.save();
		self.set_global_alpha(color.a);
		self.begin_path();
		let _ = self.arc(center.x, center.y, radius, 0.0, PI * 2.0);
		self.set_fill_style_str(&color.with_alpha(1.0).to_css());
		self.fill();
		self.restore();
	}

	fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Color) {
		let Some((first, rest)) = points.split_first() else {
			return;
		};
		self.save();
		self.begin_path();
		self.move_to(first.x, first.y);
		for p in rest {
			self.line_to(p.x, p.y);
		}
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.set_line_cap("round");
		self.stroke();
		self.restore();
	}
}

/// Darken the previous frame instead of clearing it, leaving motion trails.
pub fn fade<P: Painter + ?Sized>(painter: &mut P, bounds: Bounds, alpha: f64) {
	painter.fill_surface(bounds, Color::BLACK.with_alpha(alpha));
}

pub fn draw_snowflake<P: Painter + ?Sized>(painter: &mut P, flake: &Snowflake, height: f64) {
	painter.fill_circle(
		flake.position,
		flake.size,
		Color::WHITE.with_alpha(flake.opacity_at(height)),
	);
}

/// Streak through the firework's recent positions. A fresh firework with no
/// history is drawn as a dot.
pub fn draw_trail<P: Painter + ?Sized>(painter: &mut P, firework: &Firework) {
	let trail = firework.trail();
	if trail.len() > 1 {
		let points: Vec<Point> = trail.iter().copied().collect();
		painter.stroke_polyline(&points, firework.size, firework.color);
	} else {
		let p = firework.position;
		painter.stroke_polyline(&[p, p], firework.size, firework.color);
	}
}

pub fn draw_fragment<P: Painter + ?Sized>(painter: &mut P, fragment: &Fragment) {
	painter.fill_circle(
		fragment.position,
		fragment.size,
		fragment.color.with_alpha(fragment.alpha),
	);
}

#[cfg(test)]
pub(crate) mod recording {
	use super::*;

	/// One recorded painter call.
	#[derive(Clone, Debug, PartialEq)]
	pub enum DrawOp {
		Clear(Bounds),
		Fill(Bounds, Color),
		Circle {
			center: Point,
			radius: f64,
			color: Color,
		},
		Polyline {
			points: Vec<Point>,
			width: f64,
			color: Color,
		},
	}

	/// Painter that records calls instead of drawing.
	#[derive(Debug, Default)]
	pub struct RecordingPainter {
		pub ops: Vec<DrawOp>,
	}

	impl RecordingPainter {
		pub fn circles(&self) -> impl Iterator<Item = &DrawOp> {
			self.ops
				.iter()
				.filter(|op| matches!(op, DrawOp::Circle { .. }))
		}

		pub fn polylines(&self) -> impl Iterator<Item = &DrawOp> {
			self.ops
				.iter()
				.filter(|op| matches!(op, DrawOp::Polyline { .. }))
		}

		pub fn reset(&mut self) {
			self.ops.clear();
		}
	}

	impl Painter for RecordingPainter {
		fn clear_surface(&mut self, bounds: Bounds) {
			self.ops.push(DrawOp::Clear(bounds));
		}

		fn fill_surface(&mut self, bounds: Bounds, color: Color) {
			self.ops.push(DrawOp::Fill(bounds, color));
		}

		fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
			self.ops.push(DrawOp::Circle {
				center,
				radius,
				color,
			});
		}

		fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Color) {
			self.ops.push(DrawOp::Polyline {
				points: points.to_vec(),
				width,
				color,
			});
		}
	}
}

#[cfg(test)]
mod tests {
	use super::recording::{DrawOp, RecordingPainter};
	use super::*;

	#[test]
	fn fade_paints_translucent_black() {
		let mut painter = RecordingPainter::default();
		let bounds = Bounds::new(800.0, 600.0);
		fade(&mut painter, bounds, 0.3);
		assert_eq!(
			painter.ops,
			vec![DrawOp::Fill(bounds, Color::rgba(0, 0, 0, 0.3))]
		);
	}

	#[test]
	fn animated_flake_opacity_follows_height() {
		let mut painter = RecordingPainter::default();
		let flake = Snowflake {
			position: Point::new(10.0, 150.0),
			size: 2.0,
			speed: 1.0,
			opacity: None,
		};
		draw_snowflake(&mut painter, &flake, 200.0);
		let DrawOp::Circle { color, radius, .. } = &painter.ops[0] else {
			panic!("expected a circle");
		};
		assert_eq!(*radius, 2.0);
		assert!((color.a - 0.25).abs() < 1e-9);
	}
}
