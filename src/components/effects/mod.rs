//! Canvas particle effects: a snowfall overlay and a fireworks show.
//!
//! Both effects share one simulation loop:
//! - a per-frame tick that advances, prunes and paints particles
//! - an optional spawn timer (fireworks launch on it)
//! - a still-frame fallback when the user prefers reduced motion
//!
//! The simulation itself (`snow`, `fireworks`, `animation`) is plain Rust
//! drawing through the [`Painter`] trait; `runtime` and `component` bind it to
//! the browser.
//!
//! # Example
//!
//! ```ignore
//! use festive_canvas::{FireworksCanvas, SnowOverlay};
//!
//! view! {
//!     <FireworksCanvas />
//!     <SnowOverlay />
//! }
//! ```

pub mod animation;
mod component;
pub mod config;
mod error;
pub mod fireworks;
mod motion;
pub mod render;
pub mod rng;
mod runtime;
pub mod snow;
mod surface;
pub mod theme;
mod types;

pub use animation::{Driver, MotionMode, ParticleEffect, ScheduledLoop, Scheduler};
pub use component::{FireworksCanvas, SnowOverlay};
pub use config::{EffectsConfig, ExplosionConfig, FireworksConfig, SnowConfig, Span};
pub use error::EffectError;
pub use fireworks::{Firework, FireworkShow, Fragment};
pub use motion::{MotionWatch, REDUCED_MOTION_QUERY};
pub use render::Painter;
pub use runtime::{MountedEffect, mount};
pub use snow::{SnowField, Snowflake, SpawnMode};
pub use surface::{Surface, viewport_size};
pub use types::{Bounds, Point, SurfaceFit};
