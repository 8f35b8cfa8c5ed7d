//! Per-frame simulation phases for the particle field.
//!
//! The typical update loop looks like:
//! 1. [`attraction_phase`] — the pointer adjusts the velocity of every
//!    particle inside its interaction radius.
//! 2. [`motion_phase`] — particles integrate velocity, lose speed to
//!    friction, and reflect off the surface boundaries.
//! 3. [`link_phase`] — nearby particle pairs are collected so they can
//!    be rendered as connecting lines.

use crate::{
    config::FieldConfig,
    particle::Particle,
    types::{ParticleId, Pointer},
};
use glam::Vec2;

/// Applies the pointer interaction to every particle.
///
/// For each particle:
///
/// 1. Compute the displacement to the last-known pointer position.
/// 2. If the Euclidean distance is strictly below `cfg.attract_radius`,
///    scale the normalized displacement by
///    `(attract_radius - distance) / attract_radius`, then by
///    `cfg.attract_strength`, and subtract it from the velocity.
/// 3. A distance of exactly zero applies no force; there is no usable
///    direction there.
///
/// ### Parameters
/// - `particles` - The particle set; velocities are updated in place.
/// - `pointer` - Last-known pointer position in surface coordinates.
/// - `cfg` - Global configuration, providing the interaction radius and
///   the force coefficient.
pub fn attraction_phase(particles: &mut [Particle], pointer: Pointer, cfg: &FieldConfig) {
    for p in particles.iter_mut() {
        let delta = pointer.pos - p.pos;
        let dist = delta.length();

        if dist > 0.0 && dist < cfg.attract_radius {
            // Stronger the closer the particle is to the pointer.
            let force = (cfg.attract_radius - dist) / cfg.attract_radius;
            p.vel -= delta / dist * force * cfg.attract_strength;
        }
    }
}

/// Moves every particle and reflects it off the surface boundaries.
///
/// For each particle, in order:
///
/// 1. Integrate: `pos += vel`.
/// 2. Damp: `vel *= cfg.friction`.
/// 3. Reflect: if the position has crossed either boundary of an axis,
///    flip the sign of that axis' velocity component.
///
/// Reflection never touches the position, so a particle can overshoot
/// the surface by at most one frame's displacement before the flipped
/// velocity carries it back.
///
/// ### Parameters
/// - `particles` - The particle set; positions and velocities are
///   updated in place.
/// - `bounds` - Current surface dimensions.
/// - `cfg` - Global configuration, providing the friction factor.
pub fn motion_phase(particles: &mut [Particle], bounds: Vec2, cfg: &FieldConfig) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.vel *= cfg.friction;

        if p.pos.x < 0.0 || p.pos.x > bounds.x {
            p.vel.x = -p.vel.x;
        }
        if p.pos.y < 0.0 || p.pos.y > bounds.y {
            p.vel.y = -p.vel.y;
        }
    }
}

/// A connecting line between two nearby particles.
///
/// `strength` is `1 - distance / link_radius`: close to 1 when the
/// particles touch, 0 at the link radius. It scales the rendered alpha
/// of the line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub a: ParticleId,
    pub b: ParticleId,
    pub strength: f32,
}

/// Collects all particle pairs close enough to draw a connecting line.
///
/// Every unordered pair `(i, j)` with `i < j` is considered exactly
/// once. A pair contributes a [`Link`] when its distance is strictly
/// below `cfg.link_radius`; a pair at exactly the radius does not.
///
/// ### Parameters
/// - `particles` - The particle set; only read access is required.
/// - `cfg` - Global configuration, providing the link radius.
/// - `out` - Scratch vector the links are collected into; cleared at
///   the start so it can be reused across frames.
pub fn link_phase(particles: &[Particle], cfg: &FieldConfig, out: &mut Vec<Link>) {
    out.clear();

    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            let dist = (particles[i].pos - particles[j].pos).length();
            if dist < cfg.link_radius {
                out.push(Link {
                    a: i,
                    b: j,
                    strength: 1.0 - dist / cfg.link_radius,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::{Hue, spawn_field};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn particle_at(x: f32, y: f32) -> Particle {
        Particle {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            size: 2.0,
            opacity: 0.5,
            hue: Hue::Primary,
        }
    }

    #[test]
    fn attraction_phase_applies_force_inside_radius() {
        let cfg = FieldConfig::default();
        let mut particles = [particle_at(0.0, 0.0)];
        let pointer = Pointer {
            pos: Vec2::new(100.0, 0.0),
        };

        attraction_phase(&mut particles, pointer, &cfg);

        // Distance 100 inside radius 150: force = 50/150, direction (1, 0).
        let expected = -(50.0 / 150.0) * 0.02;
        assert_eq!(particles[0].vel, Vec2::new(expected, 0.0));
    }

    #[test]
    fn attraction_phase_ignores_particles_outside_radius() {
        let cfg = FieldConfig::default();
        let mut particles = [particle_at(0.0, 0.0)];
        let pointer = Pointer {
            pos: Vec2::new(200.0, 0.0),
        };

        attraction_phase(&mut particles, pointer, &cfg);

        assert_eq!(particles[0].vel, Vec2::ZERO);
    }

    #[test]
    fn attraction_phase_threshold_is_strict() {
        let cfg = FieldConfig::default();
        let mut particles = [particle_at(0.0, 0.0)];
        let pointer = Pointer {
            pos: Vec2::new(cfg.attract_radius, 0.0),
        };

        attraction_phase(&mut particles, pointer, &cfg);

        // Exactly at the radius: no force.
        assert_eq!(particles[0].vel, Vec2::ZERO);
    }

    #[test]
    fn attraction_phase_guards_the_zero_distance_case() {
        let cfg = FieldConfig::default();
        let mut particles = [particle_at(40.0, 40.0)];
        particles[0].vel = Vec2::new(0.125, -0.25);
        let pointer = Pointer {
            pos: Vec2::new(40.0, 40.0),
        };

        attraction_phase(&mut particles, pointer, &cfg);

        // The pointer sits on the particle: velocity must be untouched.
        assert_eq!(particles[0].vel, Vec2::new(0.125, -0.25));
    }

    #[test]
    fn motion_phase_integrates_then_damps() {
        let cfg = FieldConfig::default();
        let mut particles = [particle_at(10.0, 10.0)];
        particles[0].vel = Vec2::new(1.0, -2.0);

        motion_phase(&mut particles, Vec2::new(100.0, 100.0), &cfg);

        assert_eq!(particles[0].pos, Vec2::new(11.0, 8.0));
        assert_eq!(particles[0].vel, Vec2::new(1.0, -2.0) * cfg.friction);
    }

    #[test]
    fn motion_phase_reflects_past_the_right_boundary() {
        let cfg = FieldConfig::default();
        let mut particles = [particle_at(99.75, 50.0)];
        particles[0].vel = Vec2::new(0.5, 0.0);

        motion_phase(&mut particles, Vec2::new(100.0, 100.0), &cfg);

        // Overshoots to 100.25, position is left alone, velocity flips.
        assert_eq!(particles[0].pos.x, 100.25);
        assert_eq!(particles[0].vel.x, -(0.5 * cfg.friction));
    }

    #[test]
    fn motion_phase_reflects_past_the_low_boundaries() {
        let cfg = FieldConfig::default();
        let mut particles = [particle_at(0.25, 0.5)];
        particles[0].vel = Vec2::new(-1.0, -1.0);

        motion_phase(&mut particles, Vec2::new(100.0, 100.0), &cfg);

        assert_eq!(particles[0].pos, Vec2::new(-0.75, -0.5));
        assert_eq!(particles[0].vel, Vec2::new(cfg.friction, cfg.friction));
    }

    #[test]
    fn motion_phase_does_not_reflect_on_the_boundary_itself() {
        let cfg = FieldConfig::default();
        let mut particles = [particle_at(99.5, 50.0)];
        particles[0].vel = Vec2::new(0.5, 0.0);

        motion_phase(&mut particles, Vec2::new(100.0, 100.0), &cfg);

        // Landing exactly on the edge is still in bounds.
        assert_eq!(particles[0].pos.x, 100.0);
        assert_eq!(particles[0].vel.x, 0.5 * cfg.friction);
    }

    #[test]
    fn link_phase_collects_each_close_pair_once() {
        let cfg = FieldConfig::default();
        let particles = [
            particle_at(0.0, 0.0),
            particle_at(100.0, 0.0),
            particle_at(500.0, 0.0),
        ];

        let mut links = Vec::new();
        link_phase(&particles, &cfg, &mut links);

        assert_eq!(
            links,
            vec![Link {
                a: 0,
                b: 1,
                strength: 1.0 - 100.0 / 120.0,
            }]
        );
    }

    #[test]
    fn link_phase_threshold_is_strict() {
        let cfg = FieldConfig::default();
        let particles = [particle_at(0.0, 0.0), particle_at(120.0, 0.0)];

        let mut links = Vec::new();
        link_phase(&particles, &cfg, &mut links);

        // Exactly at the link radius: no line.
        assert!(links.is_empty());
    }

    #[test]
    fn link_phase_keeps_a_barely_closer_pair() {
        let cfg = FieldConfig::default();
        let particles = [particle_at(0.0, 0.0), particle_at(119.999, 0.0)];

        let mut links = Vec::new();
        link_phase(&particles, &cfg, &mut links);

        assert_eq!(links.len(), 1);
        // Just inside the radius: present, but nearly invisible.
        assert!(links[0].strength > 0.0);
        assert!(links[0].strength < 1e-4);
    }

    #[test]
    fn link_phase_clears_the_scratch_buffer() {
        let cfg = FieldConfig::default();
        let particles = [particle_at(0.0, 0.0)];

        let mut links = vec![Link {
            a: 7,
            b: 9,
            strength: 0.5,
        }];
        link_phase(&particles, &cfg, &mut links);

        // A single particle has no pairs; stale entries must be gone.
        assert!(links.is_empty());
    }

    #[test]
    fn long_runs_stay_near_the_surface() {
        let cfg = FieldConfig::default();
        let bounds = Vec2::new(640.0, 360.0);
        let mut rng = StdRng::seed_from_u64(11);
        let mut particles = spawn_field(cfg.particle_count(bounds.x), bounds, &cfg, &mut rng);

        // Thousands of frames with the pointer sweeping a circle
        // through the middle of the field.
        for frame in 0..4000 {
            let angle = frame as f32 * 0.01;
            let pointer = Pointer {
                pos: Vec2::new(320.0, 180.0) + Vec2::new(angle.cos(), angle.sin()) * 150.0,
            };
            attraction_phase(&mut particles, pointer, &cfg);
            motion_phase(&mut particles, bounds, &cfg);
        }

        for p in &particles {
            assert!(p.pos.x.is_finite() && p.pos.y.is_finite());
            // Reflection never moves a particle back inside, so a small
            // excursion past an edge is fine; escaping the field is not.
            assert!(p.pos.x >= -10.0 && p.pos.x <= bounds.x + 10.0);
            assert!(p.pos.y >= -10.0 && p.pos.y <= bounds.y + 10.0);
            // Friction caps the speed the pointer can pump in.
            assert!(p.vel.length() <= 3.0);
        }
    }

    #[test]
    fn equal_seeds_evolve_identically() {
        let cfg = FieldConfig::default();
        let bounds = Vec2::new(400.0, 300.0);
        let mut a = spawn_field(20, bounds, &cfg, &mut StdRng::seed_from_u64(7));
        let mut b = spawn_field(20, bounds, &cfg, &mut StdRng::seed_from_u64(7));

        let mut links_a = Vec::new();
        let mut links_b = Vec::new();
        for frame in 0..200 {
            let pointer = Pointer {
                pos: Vec2::new((frame % 400) as f32, (frame % 300) as f32),
            };
            attraction_phase(&mut a, pointer, &cfg);
            motion_phase(&mut a, bounds, &cfg);
            link_phase(&a, &cfg, &mut links_a);
            attraction_phase(&mut b, pointer, &cfg);
            motion_phase(&mut b, bounds, &cfg);
            link_phase(&b, &cfg, &mut links_b);
        }

        assert_eq!(a, b);
        assert_eq!(links_a, links_b);
    }
}
