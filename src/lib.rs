//! festive-canvas: snowfall and firework particle effects for the browser.
//!
//! This crate provides WASM canvas components that animate a snowfall overlay
//! and a fireworks show, falling back to a still frame when the user prefers
//! reduced motion.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::effects::{
	EffectsConfig, FireworksCanvas, FireworksConfig, SnowConfig, SnowOverlay,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("festive-canvas: logging initialized");
}

/// Parse effect settings from JSON text.
pub fn parse_effects_config(json_text: &str) -> Result<EffectsConfig, serde_json::Error> {
	serde_json::from_str(json_text)
}

/// Load effect settings from a script element with id="effects-config".
/// Absent or malformed settings fall back to defaults.
fn load_effects_config() -> Option<EffectsConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("effects-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match parse_effects_config(&json_text) {
		Ok(config) => {
			info!(
				"festive-canvas: loaded config (snow: {}, fireworks: {})",
				config.snow.enabled, config.fireworks.enabled
			);
			Some(config)
		}
		Err(e) => {
			warn!("festive-canvas: failed to parse effects config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads effect settings from the DOM and renders the enabled effects.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let EffectsConfig { snow, fireworks } = load_effects_config().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Happy Holidays" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="festive-scene">
			{fireworks.enabled.then(|| view! { <FireworksCanvas config=fireworks /> })}
			{snow.enabled.then(|| view! { <SnowOverlay config=snow /> })}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_page_config() {
		let cfg =
			parse_effects_config(r#"{ "snow": { "enabled": false, "count": 120 } }"#).unwrap();
		assert!(!cfg.snow.enabled);
		assert_eq!(cfg.snow.count, 120);
		assert!(cfg.fireworks.enabled);
	}

	#[test]
	fn rejects_malformed_config() {
		assert!(parse_effects_config(r#"{ "snow": { "count": "many" } }"#).is_err());
	}
}
