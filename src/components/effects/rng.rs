//! Random source for particle spawning.
//!
//! Effects are generic over [`rand::Rng`], so tests hand them a seeded
//! generator and the browser hands them one seeded from host entropy.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generator owned by a running effect.
pub type EffectRng = ChaCha8Rng;

/// Deterministic generator for a fixed seed.
pub fn seeded(seed: u64) -> EffectRng {
	ChaCha8Rng::seed_from_u64(seed)
}

/// Generator seeded from `Math.random()` and the wall clock.
pub fn from_host_entropy() -> EffectRng {
	let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
	let clock = js_sys::Date::now() as u64;
	seeded((noise << 32) ^ clock)
}
