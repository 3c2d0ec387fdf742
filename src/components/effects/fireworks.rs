//! Fireworks show: ascending rockets that burst into fading fragments.
//!
//! Rockets live in one active set and fragments in another. A rocket leaves
//! its set on the tick it bursts, and a fragment leaves its set on the tick
//! its alpha reaches zero, so nothing dead is ever painted.

use std::collections::VecDeque;
use std::f64::consts::{FRAC_PI_2, TAU};

use log::trace;
use rand::Rng;

use super::animation::ParticleEffect;
use super::config::{ExplosionConfig, FireworksConfig, Span};
use super::render::{self, Painter};
use super::theme::Color;
use super::types::{Bounds, Point};

/// An ascending rocket.
#[derive(Clone, Debug)]
pub struct Firework {
	pub position: Point,
	pub vx: f64,
	pub vy: f64,
	/// Height at which the rocket bursts.
	pub target_y: f64,
	pub color: Color,
	/// Trail line width.
	pub size: f64,
	/// Deceleration of the ascent per tick.
	pub gravity: f64,
	trail: VecDeque<Point>,
	trail_length: usize,
	exploded: bool,
}

impl Firework {
	/// Launch from `origin` roughly straight up, with the angle jittered by
	/// the configured amount and a random trail length.
	pub fn launch<R: Rng + ?Sized>(
		origin: Point,
		target_y: f64,
		speed: f64,
		size: f64,
		color: Color,
		config: &FireworksConfig,
		rng: &mut R,
	) -> Self {
		let angle = -FRAC_PI_2 + Span::new(-config.angle_jitter, config.angle_jitter).sample(rng);
		let trail_length = config.trail_length.sample(rng);

		Self {
			position: origin,
			vx: angle.cos() * speed,
			vy: angle.sin() * speed,
			target_y,
			color,
			size,
			gravity: config.ascent_gravity,
			trail: VecDeque::with_capacity(trail_length + 1),
			trail_length,
			exploded: false,
		}
	}

	/// Positions from previous ticks, oldest first.
	pub fn trail(&self) -> &VecDeque<Point> {
		&self.trail
	}

	/// Maximum number of trail points kept, fixed at launch.
	pub fn trail_length(&self) -> usize {
		self.trail_length
	}

	pub fn is_exploded(&self) -> bool {
		self.exploded
	}

	/// Advance one tick. Returns `false` once the ascent is over: either the
	/// rocket stopped climbing or it reached its target height.
	pub fn ascend(&mut self) -> bool {
		self.trail.push_back(self.position);
		while self.trail.len() > self.trail_length {
			self.trail.pop_front();
		}

		self.position.x += self.vx;
		self.position.y += self.vy;
		self.vy += self.gravity;

		!(self.vy >= 0.0 || self.position.y <= self.target_y)
	}

	/// Burst into fragments at the current position. Only the first call
	/// produces anything.
	pub fn explode<R: Rng + ?Sized>(
		&mut self,
		config: &ExplosionConfig,
		rng: &mut R,
	) -> Vec<Fragment> {
		if self.exploded {
			return Vec::new();
		}
		self.exploded = true;

		let count = config.fragments.sample(rng);
		(0..count)
			.map(|_| Fragment::burst(self.position, self.color, config, rng))
			.collect()
	}
}

/// A short-lived particle thrown out by a burst.
#[derive(Clone, Debug)]
pub struct Fragment {
	pub position: Point,
	pub vx: f64,
	pub vy: f64,
	pub color: Color,
	/// Radius in pixels.
	pub size: f64,
	/// Starts at 1 and drops by `decay` every tick.
	pub alpha: f64,
	decay: f64,
	gravity: f64,
	friction: f64,
}

impl Fragment {
	/// Fragment flying from `origin` in a uniformly random direction.
	pub fn burst<R: Rng + ?Sized>(
		origin: Point,
		color: Color,
		config: &ExplosionConfig,
		rng: &mut R,
	) -> Self {
		let direction = Span::new(0.0, TAU).sample(rng);
		let speed = config.speed.sample(rng);
		let size = config.size.sample(rng);
		let decay = config.decay.sample(rng);

		Self {
			position: origin,
			vx: direction.cos() * speed,
			vy: direction.sin() * speed,
			color,
			size,
			alpha: 1.0,
			decay,
			gravity: config.gravity,
			friction: config.friction,
		}
	}

	pub fn decay(&self) -> f64 {
		self.decay
	}

	pub fn update(&mut self) {
		self.vx *= self.friction;
		self.vy *= self.friction;
		self.vy += self.gravity;
		self.position.x += self.vx;
		self.position.y += self.vy;
		self.alpha -= self.decay;
	}

	pub fn is_alive(&self) -> bool {
		self.alpha > 0.0
	}
}

/// The fireworks effect: both active sets plus the surface bounds they use.
pub struct FireworkShow {
	config: FireworksConfig,
	bounds: Bounds,
	fireworks: Vec<Firework>,
	fragments: Vec<Fragment>,
}

impl FireworkShow {
	pub fn new(config: FireworksConfig) -> Self {
		Self {
			config,
			bounds: Bounds::default(),
			fireworks: Vec::new(),
			fragments: Vec::new(),
		}
	}

	pub fn fireworks(&self) -> &[Firework] {
		&self.fireworks
	}

	pub fn fragments(&self) -> &[Fragment] {
		&self.fragments
	}

	pub fn config(&self) -> &FireworksConfig {
		&self.config
	}

	/// Launch a rocket from a random column at the bottom edge towards the
	/// configured burst band near the top.
	pub fn launch_random<R: Rng + ?Sized>(&mut self, rng: &mut R) {
		let Bounds { width, height } = self.bounds;
		let origin = Point::new(self.config.launch_x.sample(rng) * width, height);
		let target_y = self.config.target_height.sample(rng) * height;
		let color = Color::vivid(rng);
		let speed = self.config.launch_speed.sample(rng);
		let size = self.config.launch_size.sample(rng);

		self.fireworks.push(Firework::launch(
			origin,
			target_y,
			speed,
			size,
			color,
			&self.config,
			rng,
		));
	}

	/// Launch a rocket from the bottom edge below `at` that bursts at `at.y`.
	pub fn launch_toward<R: Rng + ?Sized>(&mut self, at: Point, rng: &mut R) {
		let origin = Point::new(at.x, self.bounds.height);
		let color = Color::vivid(rng);
		let speed = self.config.click_speed.sample(rng);
		let size = self.config.click_size.sample(rng);

		self.fireworks.push(Firework::launch(
			origin,
			at.y,
			speed,
			size,
			color,
			&self.config,
			rng,
		));
	}

	/// Drop every rocket and fragment.
	pub fn reset(&mut self) {
		self.fireworks.clear();
		self.fragments.clear();
	}
}

impl ParticleEffect for FireworkShow {
	fn resize(&mut self, bounds: Bounds) {
		self.bounds = bounds;
	}

	fn begin_animation<R: Rng + ?Sized>(&mut self, rng: &mut R) {
		self.reset();
		self.launch_random(rng);
	}

	fn tick<P: Painter + ?Sized, R: Rng + ?Sized>(&mut self, painter: &mut P, rng: &mut R) {
		render::fade(painter, self.bounds, self.config.fade_alpha);

		let explosion = &self.config.explosion;
		let fragments = &mut self.fragments;
		self.fireworks.retain_mut(|firework| {
			if firework.ascend() {
				render::draw_trail(painter, firework);
				true
			} else {
				let burst = firework.explode(explosion, rng);
				trace!("fireworks: burst of {} fragments", burst.len());
				fragments.extend(burst);
				false
			}
		});

		self.fragments.retain_mut(|fragment| {
			fragment.update();
			if fragment.is_alive() {
				render::draw_fragment(painter, fragment);
				true
			} else {
				false
			}
		});
	}

	fn render_static<P: Painter + ?Sized, R: Rng + ?Sized>(
		&mut self,
		painter: &mut P,
		_rng: &mut R,
	) {
		self.reset();
		self.draw(painter);
	}

	fn draw<P: Painter + ?Sized>(&self, painter: &mut P) {
		painter.clear_surface(self.bounds);
		for firework in &self.fireworks {
			render::draw_trail(painter, firework);
		}
		for fragment in &self.fragments {
			render::draw_fragment(painter, fragment);
		}
	}

	fn spawn_interval(&self) -> Option<Span<f64>> {
		Some(self.config.launch_interval_ms)
	}

	fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) {
		self.launch_random(rng);
	}

	fn pointer<R: Rng + ?Sized>(&mut self, at: Point, rng: &mut R) {
		self.launch_toward(at, rng);
	}
}
