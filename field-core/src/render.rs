//! Painting one simulation frame onto a [`Surface`].
//!
//! Layers, back to front: the trail fade, every particle as a filled
//! circle, connecting lines between close pairs, and the pointer glow.

use crate::{
    color::{self, Rgb8},
    config::FieldConfig,
    particle::{Hue, Particle},
    phases::Link,
    surface::Surface,
    types::Pointer,
};

/// Saturation shared by every palette entry.
const PALETTE_SATURATION: f32 = 1.0;
/// Lightness of the particle discs.
const PARTICLE_LIGHTNESS: f32 = 0.6;
/// Lightness of the accent used for links and the pointer glow.
const ACCENT_LIGHTNESS: f32 = 0.5;

/// Fill color of a particle disc.
pub fn particle_color(hue: Hue, cfg: &FieldConfig) -> Rgb8 {
    let h = match hue {
        Hue::Primary => cfg.hue_primary,
        Hue::Secondary => cfg.hue_secondary,
    };
    color::hsl(h, PALETTE_SATURATION, PARTICLE_LIGHTNESS)
}

/// Accent color shared by the connecting lines and the pointer glow.
pub fn accent_color(cfg: &FieldConfig) -> Rgb8 {
    color::hsl(cfg.hue_primary, PALETTE_SATURATION, ACCENT_LIGHTNESS)
}

/// The configured background as a drawable color.
pub fn background_color(cfg: &FieldConfig) -> Rgb8 {
    Rgb8::new(cfg.background[0], cfg.background[1], cfg.background[2])
}

/// Paints one frame of the field.
///
/// The previous frame is not cleared. It is faded toward the
/// background color instead, so recent motion stays visible as a
/// trail.
///
/// ### Parameters
/// - `surface` - Target surface, usually still holding the previous
///   frame.
/// - `particles` - Particle set as advanced by the simulation phases.
/// - `links` - Close pairs collected by
///   [`link_phase`](crate::phases::link_phase) for this frame.
/// - `pointer` - Last-known pointer position, the glow center.
/// - `cfg` - Global configuration.
///
/// ### Panics
///
/// Panics if a link references a particle index outside `particles`.
pub fn paint_frame(
    surface: &mut Surface,
    particles: &[Particle],
    links: &[Link],
    pointer: Pointer,
    cfg: &FieldConfig,
) {
    surface.fade(background_color(cfg), cfg.fade_alpha);

    for p in particles {
        surface.fill_circle(p.pos, p.size, particle_color(p.hue, cfg), p.opacity);
    }

    let accent = accent_color(cfg);
    for link in links {
        surface.stroke_line(
            particles[link.a].pos,
            particles[link.b].pos,
            accent,
            cfg.link_alpha * link.strength * cfg.link_width,
        );
    }

    surface.radial_glow(pointer.pos, cfg.glow_radius, accent, cfg.glow_alpha);
}
