use crate::config::FieldConfig;
use glam::Vec2;
use rand::Rng;

/// Which of the two accent hues a particle renders with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hue {
    Primary,
    Secondary,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub opacity: f32,
    pub hue: Hue,
}

impl Particle {
    /// Creates one particle with attributes randomized per the config ranges.
    pub fn random(bounds: Vec2, cfg: &FieldConfig, rng: &mut impl Rng) -> Self {
        let pos = Vec2::new(
            rng.random::<f32>() * bounds.x,
            rng.random::<f32>() * bounds.y,
        );
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * 2.0 * cfg.max_start_speed,
            (rng.random::<f32>() - 0.5) * 2.0 * cfg.max_start_speed,
        );
        let hue = if rng.random_bool(0.5) {
            Hue::Primary
        } else {
            Hue::Secondary
        };

        Self {
            pos,
            vel,
            size: sample_range(cfg.size_min, cfg.size_max, rng),
            opacity: sample_range(cfg.opacity_min, cfg.opacity_max, rng),
            hue,
        }
    }
}

/// Generates a fresh particle set for a surface of the given size.
///
/// Positions are uniform over the surface, velocities uniform over
/// `[-max_start_speed, max_start_speed]` per axis, sizes and opacities
/// uniform over their configured ranges, and the hue is a fair coin
/// flip between the two accents.
pub fn spawn_field(
    count: usize,
    bounds: Vec2,
    cfg: &FieldConfig,
    rng: &mut impl Rng,
) -> Vec<Particle> {
    (0..count).map(|_| Particle::random(bounds, cfg, rng)).collect()
}

/// Uniform sample over `[lo, hi)`; a degenerate range collapses to `lo`.
fn sample_range(lo: f32, hi: f32, rng: &mut impl Rng) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}
