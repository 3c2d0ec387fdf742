//! Canvas components.

pub mod effects;
