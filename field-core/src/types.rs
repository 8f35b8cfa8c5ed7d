use glam::Vec2;

/// Identifier for a particle in a field.
///
/// This is an index into the particle vector, and is only meaningful
/// within the lifetime of a given particle set (the set is regenerated
/// wholesale on resize or reset).
pub type ParticleId = usize;

/// Last-known pointer position in surface coordinates.
///
/// Starts at the origin and keeps its most recent value when the
/// pointer leaves the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
    pub pos: Vec2,
}
