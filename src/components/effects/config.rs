//! Effect tuning, loaded from JSON embedded in the page.
//!
//! Every field has a default, so a page can override only what it needs:
//!
//! ```json
//! { "snow": { "count": 80 }, "fireworks": { "fade_alpha": 0.2 } }
//! ```

use rand::Rng;
use serde::Deserialize;

/// Inclusive range that particle attributes are drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Span<T> {
	pub min: T,
	pub max: T,
}

impl<T> Span<T> {
	pub const fn new(min: T, max: T) -> Self {
		Self { min, max }
	}
}

impl Span<f64> {
	/// Uniform draw from `[min, max)`. Empty or inverted spans yield `min`.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
		if self.max > self.min {
			rng.gen_range(self.min..self.max)
		} else {
			self.min
		}
	}

	pub fn contains(&self, value: f64) -> bool {
		value >= self.min && value <= self.max
	}
}

impl Span<usize> {
	/// Uniform draw from `[min, max]`. Inverted spans yield `min`.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
		if self.max > self.min {
			rng.gen_range(self.min..=self.max)
		} else {
			self.min
		}
	}

	pub fn contains(&self, value: usize) -> bool {
		value >= self.min && value <= self.max
	}
}

/// Settings for both effects.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
	pub snow: SnowConfig,
	pub fireworks: FireworksConfig,
}

/// Snowfall overlay settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SnowConfig {
	pub enabled: bool,
	/// Fixed population size.
	pub count: usize,
	/// Flake radius in pixels.
	pub size: Span<f64>,
	/// Fall distance per tick in pixels.
	pub speed: Span<f64>,
	/// Share of the viewport height covered by the overlay.
	pub height_fraction: f64,
	/// Opacity range for flakes painted in static mode.
	pub static_opacity: Span<f64>,
	/// Distance above the top edge where the first animated flake starts.
	pub spawn_offset: f64,
	/// Vertical distance of one drift radian.
	pub drift_period: f64,
	/// Horizontal drift per tick at the crest of the sway.
	pub drift_amplitude: f64,
}

impl Default for SnowConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			count: 50,
			size: Span::new(1.0, 4.0),
			speed: Span::new(0.2, 1.2),
			height_fraction: 0.3,
			static_opacity: Span::new(0.2, 0.7),
			spawn_offset: 20.0,
			drift_period: 30.0,
			drift_amplitude: 0.5,
		}
	}
}

/// Fragment fan-out produced when a firework bursts.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExplosionConfig {
	pub fragments: Span<usize>,
	pub speed: Span<f64>,
	pub size: Span<f64>,
	/// Downward acceleration added to vertical velocity each tick.
	pub gravity: f64,
	/// Per-tick velocity multiplier, below 1.
	pub friction: f64,
	/// Alpha lost per tick, fixed per fragment.
	pub decay: Span<f64>,
}

impl Default for ExplosionConfig {
	fn default() -> Self {
		Self {
			fragments: Span::new(50, 150),
			speed: Span::new(2.0, 7.0),
			size: Span::new(1.0, 5.0),
			gravity: 0.05,
			friction: 0.98,
			decay: Span::new(0.005, 0.02),
		}
	}
}

/// Fireworks show settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FireworksConfig {
	pub enabled: bool,
	/// Opacity of the black overlay painted each tick instead of clearing.
	pub fade_alpha: f64,
	/// Delay between automatic launches.
	pub launch_interval_ms: Span<f64>,
	/// Launch column as a fraction of the surface width.
	pub launch_x: Span<f64>,
	/// Burst height as a fraction of the surface height.
	pub target_height: Span<f64>,
	pub launch_speed: Span<f64>,
	pub launch_size: Span<f64>,
	pub click_speed: Span<f64>,
	pub click_size: Span<f64>,
	/// Maximum deviation from straight up, in radians.
	pub angle_jitter: f64,
	/// Deceleration applied to the ascent each tick.
	pub ascent_gravity: f64,
	pub trail_length: Span<usize>,
	pub explosion: ExplosionConfig,
}

impl Default for FireworksConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			fade_alpha: 0.3,
			launch_interval_ms: Span::new(300.0, 800.0),
			launch_x: Span::new(0.1, 0.9),
			target_height: Span::new(0.14, 0.14),
			launch_speed: Span::new(5.0, 10.0),
			launch_size: Span::new(3.0, 5.0),
			click_speed: Span::new(4.0, 8.0),
			click_size: Span::new(2.0, 5.0),
			angle_jitter: 0.3,
			ascent_gravity: 0.02,
			trail_length: Span::new(10, 25),
			explosion: ExplosionConfig::default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::effects::rng;

	#[test]
	fn partial_json_keeps_defaults() {
		let json = r#"{ "snow": { "count": 80 }, "fireworks": { "enabled": false } }"#;
		let cfg: EffectsConfig = serde_json::from_str(json).unwrap();
		assert_eq!(cfg.snow.count, 80);
		assert_eq!(cfg.snow.speed, Span::new(0.2, 1.2));
		assert!(!cfg.fireworks.enabled);
		assert_eq!(cfg.fireworks.explosion, ExplosionConfig::default());
	}

	#[test]
	fn empty_json_is_default() {
		let cfg: EffectsConfig = serde_json::from_str("{}").unwrap();
		assert_eq!(cfg, EffectsConfig::default());
	}

	#[test]
	fn nested_span_override() {
		let cfg: EffectsConfig = serde_json::from_str(
			r#"{ "fireworks": { "explosion": { "fragments": { "min": 5, "max": 10 } } } }"#,
		)
		.unwrap();
		assert_eq!(cfg.fireworks.explosion.fragments, Span::new(5, 10));
		assert_eq!(cfg.fireworks.explosion.friction, 0.98);
	}

	#[test]
	fn float_samples_stay_in_span() {
		let mut rng = rng::seeded(7);
		let span = Span::new(0.005, 0.02);
		for _ in 0..1000 {
			assert!(span.contains(span.sample(&mut rng)));
		}
	}

	#[test]
	fn integer_samples_cover_both_ends() {
		let mut rng = rng::seeded(11);
		let span = Span::new(10usize, 12);
		let draws: Vec<usize> = (0..500).map(|_| span.sample(&mut rng)).collect();
		assert!(draws.iter().all(|&d| span.contains(d)));
		assert!(draws.contains(&10));
		assert!(draws.contains(&12));
	}

	#[test]
	fn degenerate_spans_return_min() {
		let mut rng = rng::seeded(3);
		assert_eq!(Span::new(0.14, 0.14).sample(&mut rng), 0.14);
		assert_eq!(Span::new(9.0, 2.0).sample(&mut rng), 9.0);
		assert_eq!(Span::new(4usize, 1).sample(&mut rng), 4);
	}
}
