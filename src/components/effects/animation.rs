//! Simulation loop shared by every effect.
//!
//! A [`Driver`] owns one [`ParticleEffect`] and two [`ScheduledLoop`]s: the per-frame
//! tick loop and the spawn timer. Both loops are single-shot callbacks that
//! re-arm themselves after running, so the driver can tear either of them
//! down by cancelling the one outstanding callback. The scheduling backend is
//! behind the [`Scheduler`] trait; the browser uses `requestAnimationFrame`
//! and `setTimeout`.

use std::fmt;

use log::info;
use rand::Rng;

use super::config::Span;
use super::render::Painter;
use super::rng::EffectRng;
use super::types::{Bounds, Point};

/// A particle effect driven by the simulation loop.
pub trait ParticleEffect {
	/// Adopt new surface bounds. Particles are left untouched.
	fn resize(&mut self, bounds: Bounds);

	/// Reset the particles for a fresh animated run.
	fn begin_animation<R: Rng + ?Sized>(&mut self, rng: &mut R);

	/// Advance every particle one tick and paint the result.
	fn tick<P: Painter + ?Sized, R: Rng + ?Sized>(&mut self, painter: &mut P, rng: &mut R);

	/// Paint a single motionless frame.
	fn render_static<P: Painter + ?Sized, R: Rng + ?Sized>(&mut self, painter: &mut P, rng: &mut R);

	/// Repaint the current particles without advancing them.
	fn draw<P: Painter + ?Sized>(&self, painter: &mut P);

	/// Delay range between spawn timer callbacks, if the effect spawns on a timer.
	fn spawn_interval(&self) -> Option<Span<f64>> {
		None
	}

	fn spawn<R: Rng + ?Sized>(&mut self, _rng: &mut R) {}

	/// React to a click at surface coordinates.
	fn pointer<R: Rng + ?Sized>(&mut self, _at: Point, _rng: &mut R) {}
}

/// Whether effects animate or paint a single still frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionMode {
	Static,
	Animated,
}

impl MotionMode {
	pub fn from_reduced_motion(reduced: bool) -> Self {
		if reduced {
			Self::Static
		} else {
			Self::Animated
		}
	}
}

/// Host facility that runs a callback once after a delay.
///
/// Each implementation is bound to one callback; `schedule` queues it and
/// returns a handle that `cancel` accepts. `None` means the host refused.
pub trait Scheduler {
	type Handle: Copy + fmt::Debug + PartialEq;

	fn schedule(&mut self, delay_ms: f64) -> Option<Self::Handle>;

	fn cancel(&mut self, handle: Self::Handle);
}

/// A self-rescheduling callback with at most one pending invocation.
#[derive(Debug)]
pub struct ScheduledLoop<S: Scheduler> {
	scheduler: S,
	armed: bool,
	pending: Option<S::Handle>,
	fired: u64,
}

impl<S: Scheduler> ScheduledLoop<S> {
	pub fn new(scheduler: S) -> Self {
		Self {
			scheduler,
			armed: false,
			pending: None,
			fired: 0,
		}
	}

	/// Start the loop, replacing any pending callback.
	pub fn arm(&mut self, delay_ms: f64) {
		self.disarm();
		self.armed = true;
		self.pending = self.scheduler.schedule(delay_ms);
	}

	/// Stop the loop and cancel the pending callback.
	pub fn disarm(&mut self) {
		self.armed = false;
		if let Some(handle) = self.pending.take() {
			self.scheduler.cancel(handle);
		}
	}

	/// Called when the scheduled callback runs. Returns whether the loop
	/// body should execute.
	pub fn fire(&mut self) -> bool {
		self.pending = None;
		if !self.armed {
			return false;
		}
		self.fired += 1;
		true
	}

	/// Queue the next invocation after the body ran.
	pub fn rearm(&mut self, delay_ms: f64) {
		if self.armed && self.pending.is_none() {
			self.pending = self.scheduler.schedule(delay_ms);
		}
	}

	pub fn is_armed(&self) -> bool {
		self.armed
	}

	pub fn pending(&self) -> Option<S::Handle> {
		self.pending
	}

	/// Number of times the loop body has run.
	pub fn fired(&self) -> u64 {
		self.fired
	}

	pub fn scheduler(&self) -> &S {
		&self.scheduler
	}
}

/// Owns an effect and decides when it ticks, spawns and repaints.
pub struct Driver<E, F: Scheduler, T: Scheduler> {
	effect: E,
	frames: ScheduledLoop<F>,
	spawner: ScheduledLoop<T>,
	mode: Option<MotionMode>,
	rng: EffectRng,
}

impl<E: ParticleEffect, F: Scheduler, T: Scheduler> Driver<E, F, T> {
	pub fn new(effect: E, frames: F, spawner: T, rng: EffectRng) -> Self {
		Self {
			effect,
			frames: ScheduledLoop::new(frames),
			spawner: ScheduledLoop::new(spawner),
			mode: None,
			rng,
		}
	}

	/// Switch mode for a motion preference. The previous mode's callbacks are
	/// cancelled before the new mode starts.
	pub fn set_reduced_motion<P: Painter + ?Sized>(
		&mut self,
		reduced: bool,
		painter: &mut P,
	) -> MotionMode {
		let mode = MotionMode::from_reduced_motion(reduced);
		self.halt();
		self.mode = Some(mode);
		info!("effects: entering {:?} mode", mode);

		match mode {
			MotionMode::Static => self.effect.render_static(painter, &mut self.rng),
			MotionMode::Animated => {
				self.effect.begin_animation(&mut self.rng);
				self.frames.arm(0.0);
				if let Some(interval) = self.effect.spawn_interval() {
					self.spawner.arm(interval.sample(&mut self.rng));
				}
			}
		}
		mode
	}

	/// Frame callback: tick the effect, then queue the next frame.
	pub fn on_frame<P: Painter + ?Sized>(&mut self, painter: &mut P) -> bool {
		if !self.frames.fire() {
			return false;
		}
		self.effect.tick(painter, &mut self.rng);
		self.frames.rearm(0.0);
		true
	}

	/// Spawn timer callback: spawn once, then queue the next spawn after a
	/// fresh random delay.
	pub fn on_spawn_timer(&mut self) -> bool {
		if !self.spawner.fire() {
			return false;
		}
		self.effect.spawn(&mut self.rng);
		if let Some(interval) = self.effect.spawn_interval() {
			self.spawner.rearm(interval.sample(&mut self.rng));
		}
		true
	}

	/// Forward a click to the effect. Ignored unless animating.
	pub fn pointer(&mut self, at: Point) -> bool {
		if self.mode != Some(MotionMode::Animated) {
			return false;
		}
		self.effect.pointer(at, &mut self.rng);
		true
	}

	/// Adopt new bounds. A static frame is repainted since resizing the
	/// surface wipes it.
	pub fn resize<P: Painter + ?Sized>(&mut self, bounds: Bounds, painter: &mut P) {
		self.effect.resize(bounds);
		if self.mode == Some(MotionMode::Static) {
			self.effect.draw(painter);
		}
	}

	/// Cancel every outstanding callback.
	pub fn halt(&mut self) {
		self.frames.disarm();
		self.spawner.disarm();
	}

	pub fn mode(&self) -> Option<MotionMode> {
		self.mode
	}

	/// Ticks run so far.
	pub fn ticks(&self) -> u64 {
		self.frames.fired()
	}

	pub fn effect(&self) -> &E {
		&self.effect
	}

	pub fn frames(&self) -> &ScheduledLoop<F> {
		&self.frames
	}

	pub fn spawner(&self) -> &ScheduledLoop<T> {
		&self.spawner
	}
}
