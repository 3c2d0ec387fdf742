//! Snowfall overlay: a fixed population of flakes that fall, sway and wrap
//! back to the top edge. Flakes are never destroyed.

use rand::Rng;

use super::animation::ParticleEffect;
use super::config::{SnowConfig, Span};
use super::render::{self, Painter};
use super::types::{Bounds, Point};

/// How a new flake is placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnMode {
	/// Anywhere on the surface, with a fixed random opacity.
	Static,
	/// Above the top edge, staggered by `index` so flakes enter one after another.
	/// Opacity is derived from height at draw time.
	Animated { index: usize },
}

/// A single snowflake.
#[derive(Clone, Debug, PartialEq)]
pub struct Snowflake {
	pub position: Point,
	/// Radius in pixels.
	pub size: f64,
	/// Fall distance per tick.
	pub speed: f64,
	/// Fixed opacity, or `None` to fade out towards the bottom of the surface.
	pub opacity: Option<f64>,
}

impl Snowflake {
	pub fn spawn<R: Rng + ?Sized>(
		bounds: Bounds,
		config: &SnowConfig,
		mode: SpawnMode,
		rng: &mut R,
	) -> Self {
		let x = Span::new(0.0, bounds.width).sample(rng);
		let y = match mode {
			SpawnMode::Static => Span::new(0.0, bounds.height).sample(rng),
			SpawnMode::Animated { index } => {
				let stagger = bounds.height / config.count.max(1) as f64;
				-config.spawn_offset - index as f64 * stagger
			}
		};
		let size = config.size.sample(rng);
		let speed = config.speed.sample(rng);
		let opacity = match mode {
			SpawnMode::Static => Some(config.static_opacity.sample(rng)),
			SpawnMode::Animated { .. } => None,
		};

		Self {
			position: Point::new(x, y),
			size,
			speed,
			opacity,
		}
	}

	/// Fall one tick, sway with the fall progress, and wrap to the top edge
	/// at a new column once below the surface.
	pub fn advance<R: Rng + ?Sized>(&mut self, bounds: Bounds, config: &SnowConfig, rng: &mut R) {
		self.position.y += self.speed;
		self.position.x += (self.position.y / config.drift_period).sin() * config.drift_amplitude;

		if self.position.y > bounds.height {
			self.position.y = 0.0;
			self.position.x = Span::new(0.0, bounds.width).sample(rng);
		}
	}

	/// Opacity to paint with on a surface of the given height.
	pub fn opacity_at(&self, height: f64) -> f64 {
		match self.opacity {
			Some(o) => o,
			None if height > 0.0 => (1.0 - self.position.y / height).clamp(0.0, 1.0),
			None => 0.0,
		}
	}
}

/// The snow overlay effect.
pub struct SnowField {
	config: SnowConfig,
	bounds: Bounds,
	flakes: Vec<Snowflake>,
}

impl SnowField {
	pub fn new(config: SnowConfig) -> Self {
		Self {
			flakes: Vec::with_capacity(config.count),
			config,
			bounds: Bounds::default(),
		}
	}

	pub fn flakes(&self) -> &[Snowflake] {
		&self.flakes
	}

	pub fn bounds(&self) -> Bounds {
		self.bounds
	}

	/// Replace the population with `count` freshly spawned flakes.
	fn populate<R: Rng + ?Sized>(&mut self, animated: bool, rng: &mut R) {
		let (bounds, config) = (self.bounds, &self.config);
		self.flakes = (0..config.count)
			.map(|index| {
				let mode = if animated {
					SpawnMode::Animated { index }
				} else {
					SpawnMode::Static
				};
				Snowflake::spawn(bounds, config, mode, rng)
			})
			.collect();
	}
}

impl ParticleEffect for SnowField {
	fn resize(&mut self, bounds: Bounds) {
		self.bounds = bounds;
	}

	fn begin_animation<R: Rng + ?Sized>(&mut self, rng: &mut R) {
		self.populate(true, rng);
	}

	fn tick<P: Painter + ?Sized, R: Rng + ?Sized>(&mut self, painter: &mut P, rng: &mut R) {
		painter.clear_surface(self.bounds);
		for flake in &mut self.flakes {
			flake.advance(self.bounds, &self.config, rng);
			render::draw_snowflake(painter, flake, self.bounds.height);
		}
	}

	fn render_static<P: Painter + ?Sized, R: Rng + ?Sized>(
		&mut self,
		painter: &mut P,
		rng: &mut R,
	) {
		self.populate(false, rng);
		self.draw(painter);
	}

	fn draw<P: Painter + ?Sized>(&self, painter: &mut P) {
		painter.clear_surface(self.bounds);
		for flake in &self.flakes {
			render::draw_snowflake(painter, flake, self.bounds.height);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::effects::render::recording::{DrawOp, RecordingPainter};
	use crate::components::effects::rng;

	fn field(width: f64, height: f64) -> SnowField {
		let mut f = SnowField::new(SnowConfig::default());
		f.resize(Bounds::new(width, height));
		f
	}

	#[test]
	fn animation_starts_with_fifty_flakes_above_the_top_edge() {
		let mut rng = rng::seeded(1);
		let mut f = field(800.0, 600.0);
		f.begin_animation(&mut rng);

		assert_eq!(f.flakes().len(), 50);
		for flake in f.flakes() {
			assert!(flake.position.y <= 0.0);
			assert!(flake.opacity.is_none());
			assert!((0.0..800.0).contains(&flake.position.x));
		}
	}

	#[test]
	fn animated_spawn_is_staggered_by_index() {
		let mut rng = rng::seeded(2);
		let cfg = SnowConfig::default();
		let bounds = Bounds::new(800.0, 600.0);
		let first = Snowflake::spawn(bounds, &cfg, SpawnMode::Animated { index: 0 }, &mut rng);
		let tenth = Snowflake::spawn(bounds, &cfg, SpawnMode::Animated { index: 10 }, &mut rng);
		assert_eq!(first.position.y, -20.0);
		assert_eq!(tenth.position.y, -20.0 - 10.0 * 600.0 / 50.0);
	}

	#[test]
	fn spawned_attributes_respect_configured_ranges() {
		let mut rng = rng::seeded(3);
		let cfg = SnowConfig::default();
		let bounds = Bounds::new(640.0, 180.0);
		for _ in 0..500 {
			let flake = Snowflake::spawn(bounds, &cfg, SpawnMode::Static, &mut rng);
			assert!(cfg.size.contains(flake.size));
			assert!(cfg.speed.contains(flake.speed));
			assert!((0.0..180.0).contains(&flake.position.y));
			let opacity = flake.opacity.unwrap();
			assert!(cfg.static_opacity.contains(opacity));
		}
	}

	#[test]
	fn flakes_never_fall_below_the_surface() {
		let mut rng = rng::seeded(4);
		let mut f = field(800.0, 180.0);
		f.begin_animation(&mut rng);
		let mut painter = RecordingPainter::default();
		let mut wrapped = vec![false; f.flakes().len()];

		for _ in 0..3000 {
			let before: Vec<f64> = f.flakes().iter().map(|fl| fl.position.y).collect();
			f.tick(&mut painter, &mut rng);
			for (i, flake) in f.flakes().iter().enumerate() {
				if flake.position.y < before[i] {
					wrapped[i] = true;
				}
				assert!(flake.position.y <= 180.0);
				if wrapped[i] {
					assert!(flake.position.y >= 0.0);
				}
			}
			painter.reset();
		}
		assert!(wrapped.iter().all(|&w| w), "every flake should have looped");
		assert_eq!(f.flakes().len(), 50);
	}

	#[test]
	fn advance_falls_and_sways() {
		let mut rng = rng::seeded(5);
		let cfg = SnowConfig::default();
		let mut flake = Snowflake {
			position: Point::new(100.0, 10.0),
			size: 2.0,
			speed: 5.0,
			opacity: None,
		};
		flake.advance(Bounds::new(800.0, 600.0), &cfg, &mut rng);
		assert_eq!(flake.position.y, 15.0);
		assert!((flake.position.x - (100.0 + (0.5f64).sin() * 0.5)).abs() < 1e-12);
	}

	#[test]
	fn wrap_resets_to_top_edge() {
		let mut rng = rng::seeded(6);
		let mut flake = Snowflake {
			position: Point::new(100.0, 99.5),
			size: 2.0,
			speed: 1.0,
			opacity: None,
		};
		flake.advance(Bounds::new(300.0, 100.0), &SnowConfig::default(), &mut rng);
		assert_eq!(flake.position.y, 0.0);
		assert!((0.0..300.0).contains(&flake.position.x));
	}

	#[test]
	fn tick_clears_then_draws_every_flake() {
		let mut rng = rng::seeded(7);
		let mut f = field(800.0, 600.0);
		f.begin_animation(&mut rng);
		let mut painter = RecordingPainter::default();
		f.tick(&mut painter, &mut rng);

		assert_eq!(painter.ops[0], DrawOp::Clear(Bounds::new(800.0, 600.0)));
		assert_eq!(painter.circles().count(), 50);
	}

	#[test]
	fn static_render_paints_once_with_fixed_opacity() {
		let mut rng = rng::seeded(8);
		let mut f = field(800.0, 180.0);
		let mut painter = RecordingPainter::default();
		f.render_static(&mut painter, &mut rng);

		assert_eq!(painter.circles().count(), 50);
		assert!(f.flakes().iter().all(|fl| fl.opacity.is_some()));
	}

	#[test]
	fn resize_does_not_move_flakes() {
		let mut rng = rng::seeded(9);
		let mut f = field(800.0, 600.0);
		f.begin_animation(&mut rng);
		let before = f.flakes().to_vec();
		f.resize(Bounds::new(400.0, 300.0));
		assert_eq!(f.flakes(), &before[..]);
		assert_eq!(f.bounds(), Bounds::new(400.0, 300.0));
	}

	#[test]
	fn derived_opacity_is_clamped() {
		let mut flake = Snowflake {
			position: Point::new(0.0, -40.0),
			size: 1.0,
			speed: 1.0,
			opacity: None,
		};
		assert_eq!(flake.opacity_at(100.0), 1.0);
		flake.position.y = 100.0;
		assert_eq!(flake.opacity_at(100.0), 0.0);
		assert_eq!(flake.opacity_at(0.0), 0.0);
	}
}
