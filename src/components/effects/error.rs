//! Effect setup errors.

use thiserror::Error;

/// Why an effect could not start.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum EffectError {
	/// The host cannot provide a 2D rendering context for the canvas.
	#[error("2d canvas context is unavailable")]
	ContextUnavailable,
}
