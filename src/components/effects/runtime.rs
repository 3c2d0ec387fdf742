//! Browser side of the simulation loop.
//!
//! `mount` wires a [`ParticleEffect`] to a canvas: frames come from
//! `requestAnimationFrame`, spawns from `setTimeout`, and the window's resize
//! event and the reduced-motion media query feed the driver. Every callback
//! holds a weak reference, so dropping the returned [`MountedEffect`] cancels
//! the pending callbacks and detaches the listeners.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use super::animation::{Driver, MotionMode, ParticleEffect, Scheduler};
use super::error::EffectError;
use super::motion::MotionWatch;
use super::rng;
use super::surface::Surface;
use super::types::SurfaceFit;

type CallbackSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Schedules the frame callback with `requestAnimationFrame`.
pub struct AnimationFrames {
	callback: CallbackSlot,
}

impl Scheduler for AnimationFrames {
	type Handle = i32;

	fn schedule(&mut self, _delay_ms: f64) -> Option<i32> {
		let window = web_sys::window()?;
		let slot = self.callback.borrow();
		let cb = slot.as_ref()?;
		window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.ok()
	}

	fn cancel(&mut self, handle: i32) {
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(handle);
		}
	}
}

/// Schedules the spawn callback with `setTimeout`.
pub struct Timeouts {
	callback: CallbackSlot,
}

impl Scheduler for Timeouts {
	type Handle = i32;

	fn schedule(&mut self, delay_ms: f64) -> Option<i32> {
		let window = web_sys::window()?;
		let slot = self.callback.borrow();
		let cb = slot.as_ref()?;
		window
			.set_timeout_with_callback_and_timeout_and_arguments_0(
				cb.as_ref().unchecked_ref(),
				delay_ms.round() as i32,
			)
			.ok()
	}

	fn cancel(&mut self, handle: i32) {
		if let Some(window) = web_sys::window() {
			window.clear_timeout_with_handle(handle);
		}
	}
}

/// A window event listener, removed on drop.
struct WindowListener {
	event: &'static str,
	callback: Closure<dyn FnMut()>,
}

impl WindowListener {
	fn attach(event: &'static str, callback: impl FnMut() + 'static) -> Option<Self> {
		let window = web_sys::window()?;
		let callback = Closure::<dyn FnMut()>::new(callback);
		window
			.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
			.ok()?;
		Some(Self { event, callback })
	}
}

impl Drop for WindowListener {
	fn drop(&mut self) {
		if let Some(window) = web_sys::window() {
			let _ = window.remove_event_listener_with_callback(
				self.event,
				self.callback.as_ref().unchecked_ref(),
			);
		}
	}
}

/// Everything a running effect owns.
struct EffectHost<E: ParticleEffect> {
	driver: Driver<E, AnimationFrames, Timeouts>,
	surface: Surface,
	#[allow(dead_code, reason = "held so the listener stays attached")]
	resize: Option<WindowListener>,
	#[allow(dead_code, reason = "held so the listener stays attached")]
	motion: Option<MotionWatch>,
}

impl<E: ParticleEffect> EffectHost<E> {
	fn on_frame(&mut self) {
		self.driver.on_frame(self.surface.context_mut());
	}

	fn on_spawn_timer(&mut self) {
		self.driver.on_spawn_timer();
	}

	fn on_resize(&mut self) {
		let bounds = self.surface.resize();
		self.driver.resize(bounds, self.surface.context_mut());
	}

	fn set_reduced_motion(&mut self, reduced: bool) {
		self.driver.set_reduced_motion(reduced, self.surface.context_mut());
	}
}

impl<E: ParticleEffect> Drop for EffectHost<E> {
	fn drop(&mut self) {
		self.driver.halt();
	}
}

/// Handle to an effect running on a canvas. Dropping it stops the effect.
pub struct MountedEffect<E: ParticleEffect + 'static> {
	host: Rc<RefCell<EffectHost<E>>>,
}

impl<E: ParticleEffect + 'static> MountedEffect<E> {
	/// Forward a click given in client coordinates.
	pub fn click(&self, client_x: f64, client_y: f64) -> bool {
		let mut host = self.host.borrow_mut();
		let at = host.surface.to_surface(client_x, client_y);
		host.driver.pointer(at)
	}

	pub fn mode(&self) -> Option<MotionMode> {
		self.host.borrow().driver.mode()
	}

	/// Ticks run so far.
	pub fn ticks(&self) -> u64 {
		self.host.borrow().driver.ticks()
	}
}

/// Start `effect` on `canvas`, in the mode the current motion preference
/// asks for.
pub fn mount<E: ParticleEffect + 'static>(
	canvas: HtmlCanvasElement,
	fit: SurfaceFit,
	mut effect: E,
) -> Result<MountedEffect<E>, EffectError> {
	let surface = Surface::setup(canvas, fit)?;
	effect.resize(surface.bounds());

	let frame_slot: CallbackSlot = Rc::new(RefCell::new(None));
	let spawn_slot: CallbackSlot = Rc::new(RefCell::new(None));
	let driver = Driver::new(
		effect,
		AnimationFrames {
			callback: frame_slot.clone(),
		},
		Timeouts {
			callback: spawn_slot.clone(),
		},
		rng::from_host_entropy(),
	);
	let host = Rc::new(RefCell::new(EffectHost {
		driver,
		surface,
		resize: None,
		motion: None,
	}));

	let weak = Rc::downgrade(&host);
	*frame_slot.borrow_mut() = Some(Closure::new(move || {
		if let Some(host) = weak.upgrade() {
			host.borrow_mut().on_frame();
		}
	}));

	let weak = Rc::downgrade(&host);
	*spawn_slot.borrow_mut() = Some(Closure::new(move || {
		if let Some(host) = weak.upgrade() {
			host.borrow_mut().on_spawn_timer();
		}
	}));

	let weak = Rc::downgrade(&host);
	let resize = WindowListener::attach("resize", move || {
		if let Some(host) = weak.upgrade() {
			host.borrow_mut().on_resize();
		}
	});

	let weak = Rc::downgrade(&host);
	let motion = MotionWatch::new(move |reduced| {
		if let Some(host) = weak.upgrade() {
			host.borrow_mut().set_reduced_motion(reduced);
		}
	});
	let reduced = motion.as_ref().is_some_and(MotionWatch::prefers_reduced);

	{
		let mut h = host.borrow_mut();
		h.resize = resize;
		h.motion = motion;
		h.set_reduced_motion(reduced);
	}

	Ok(MountedEffect { host })
}
