//! Live `prefers-reduced-motion` preference.

use wasm_bindgen::prelude::*;
use web_sys::{MediaQueryList, MediaQueryListEvent};

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Subscription to the reduced-motion media query. The listener is removed
/// on drop.
pub struct MotionWatch {
	query: MediaQueryList,
	on_change: Closure<dyn FnMut(MediaQueryListEvent)>,
}

impl MotionWatch {
	/// Call `on_change` with the new preference whenever it flips.
	/// Returns `None` when the host has no `matchMedia`.
	pub fn new(mut on_change: impl FnMut(bool) + 'static) -> Option<Self> {
		let query = web_sys::window()?.match_media(REDUCED_MOTION_QUERY).ok()??;
		let on_change = Closure::<dyn FnMut(MediaQueryListEvent)>::new(
			move |event: MediaQueryListEvent| on_change(event.matches()),
		);
		query
			.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
			.ok()?;
		Some(Self { query, on_change })
	}

	pub fn prefers_reduced(&self) -> bool {
		self.query.matches()
	}
}

impl Drop for MotionWatch {
	fn drop(&mut self) {
		let _ = self
			.query
			.remove_event_listener_with_callback("change", self.on_change.as_ref().unchecked_ref());
	}
}
