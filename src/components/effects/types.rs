//! Surface-space geometry shared by every effect.

/// A position in surface pixels, origin at the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Width and height of a drawing surface (or of the viewport it is fitted to).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
	pub width: f64,
	pub height: f64,
}

impl Bounds {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// True when the surface has no drawable area.
	pub fn is_empty(&self) -> bool {
		self.width <= 0.0 || self.height <= 0.0
	}
}

/// How a surface is sized relative to the viewport.
///
/// The snow overlay covers the full width and the top 30% of the viewport;
/// fireworks cover all of it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceFit {
	pub width_fraction: f64,
	pub height_fraction: f64,
}

impl SurfaceFit {
	pub const FULL: Self = Self {
		width_fraction: 1.0,
		height_fraction: 1.0,
	};

	/// Full width, `fraction` of the viewport height.
	pub const fn top_band(fraction: f64) -> Self {
		Self {
			width_fraction: 1.0,
			height_fraction: fraction,
		}
	}

	/// Surface bounds for a viewport, truncated to whole pixels the way the
	/// canvas backing store is.
	pub fn bounds_for(&self, viewport: Bounds) -> Bounds {
		Bounds {
			width: (viewport.width * self.width_fraction).max(0.0).floor(),
			height: (viewport.height * self.height_fraction).max(0.0).floor(),
		}
	}
}
