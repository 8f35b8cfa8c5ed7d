//! Core 2-D particle field simulation and software rendering library.
//!
//! Main components:
//! - [`particle`] — particles and field generation.
//! - [`phases`] — per-frame simulation phases / pipeline.
//! - [`surface`] — persistent RGBA surface with the painting primitives.
//! - [`render`] — frame painting (trail fade, particles, links, glow).
//! - [`config`] — global configuration for the simulation and palette.
//! - [`color`] — HSL palette handling.
//! - [`types`] — shared type aliases and small state types.

pub mod color;
pub mod config;
pub mod particle;
pub mod phases;
pub mod render;
pub mod surface;
pub mod types;
