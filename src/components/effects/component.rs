//! Leptos components hosting the effects.
//!
//! Each component renders a canvas and, once it is in the DOM, mounts its
//! effect on it. The mounted effect lives as long as the component.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use web_sys::{HtmlCanvasElement, MouseEvent};

use super::animation::ParticleEffect;
use super::config::{FireworksConfig, SnowConfig};
use super::fireworks::FireworkShow;
use super::runtime::{self, MountedEffect};
use super::snow::SnowField;
use super::types::SurfaceFit;

type Slot<E> = Rc<RefCell<Option<MountedEffect<E>>>>;

/// Mount `effect` on the canvas unless it already runs there. A missing 2D
/// context leaves the canvas blank.
fn mount_once<E: ParticleEffect + 'static>(
	slot: &Slot<E>,
	canvas: HtmlCanvasElement,
	fit: SurfaceFit,
	effect: E,
) {
	if slot.borrow().is_some() {
		return;
	}
	match runtime::mount(canvas, fit, effect) {
		Ok(mounted) => *slot.borrow_mut() = Some(mounted),
		Err(e) => warn!("effects: not starting: {}", e),
	}
}

/// Falling snow across the top of the viewport.
///
/// Paints a still frame instead when the user prefers reduced motion.
#[component]
pub fn SnowOverlay(#[prop(optional)] config: SnowConfig) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let slot: Slot<SnowField> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let fit = SurfaceFit::top_band(config.height_fraction);
		mount_once(&slot, canvas.into(), fit, SnowField::new(config.clone()));
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="snow-overlay"
			style="position: fixed; top: 0; left: 0; pointer-events: none; z-index: 1;"
		/>
	}
}

/// Full-viewport fireworks. Rockets launch on a timer; clicking launches one
/// that bursts at the clicked height.
#[component]
pub fn FireworksCanvas(#[prop(optional)] config: FireworksConfig) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let slot: Slot<FireworkShow> = Rc::new(RefCell::new(None));
	let slot_click = slot.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		mount_once(&slot, canvas.into(), SurfaceFit::FULL, FireworkShow::new(config.clone()));
	});

	let on_click = move |ev: MouseEvent| {
		if let Some(ref show) = *slot_click.borrow() {
			show.click(ev.client_x() as f64, ev.client_y() as f64);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="fireworks-canvas"
			on:click=on_click
			style="position: fixed; top: 0; left: 0; display: block; background: #000;"
		/>
	}
}
