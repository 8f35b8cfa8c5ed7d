use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Global configuration for the particle field.
///
/// The defaults reproduce the palette and motion constants the field
/// was designed around: a near-black backdrop with cyan/violet accents,
/// slow drift, and short-range pointer interaction. Missing fields in a
/// loaded file fall back to these defaults.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    // Field population
    pub max_count: usize,
    pub width_per_particle: f32,

    // Initial particle attributes
    pub max_start_speed: f32,
    pub size_min: f32,
    pub size_max: f32,
    pub opacity_min: f32,
    pub opacity_max: f32,

    // Pointer interaction
    pub attract_radius: f32,
    pub attract_strength: f32,

    // Motion
    pub friction: f32,

    // Links between nearby particles
    pub link_radius: f32,
    pub link_alpha: f32,
    pub link_width: f32,

    // Pointer glow
    pub glow_radius: f32,
    pub glow_alpha: f32,

    // Trail fade and backdrop
    pub fade_alpha: f32,
    pub background: [u8; 3],

    // Accent hues in degrees
    pub hue_primary: f32,
    pub hue_secondary: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            max_count: 80,
            width_per_particle: 20.0,

            max_start_speed: 0.25,
            size_min: 1.0,
            size_max: 3.0,
            opacity_min: 0.2,
            opacity_max: 0.7,

            attract_radius: 150.0,
            attract_strength: 0.02,

            friction: 0.99,

            link_radius: 120.0,
            link_alpha: 0.15,
            link_width: 0.5,

            glow_radius: 200.0,
            glow_alpha: 0.1,

            fade_alpha: 0.1,
            background: [8, 10, 18],

            hue_primary: 185.0,
            hue_secondary: 270.0,
        }
    }
}

impl FieldConfig {
    /// Number of particles for a surface of the given width.
    ///
    /// One particle per `width_per_particle` units of width, rounded
    /// down and capped at `max_count`. Widths too small to hold a
    /// single particle yield zero. A non-positive `width_per_particle`
    /// disables the width scaling and yields `max_count` directly.
    pub fn particle_count(&self, width: f32) -> usize {
        if self.width_per_particle <= 0.0 {
            return self.max_count;
        }
        let derived = (width / self.width_per_particle).floor().max(0.0) as usize;
        derived.min(self.max_count)
    }

    /// Writes the configuration to `path` as pretty-printed JSON.
    pub fn save(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reads a configuration from the JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let cfg = serde_json::from_str(&json)?;
        Ok(cfg)
    }
}
