//! A CPU-side RGBA pixel surface the field is painted onto.
//!
//! The surface is fully opaque: every pixel keeps alpha 255 and draw
//! calls blend their color over the existing pixel instead of storing
//! their own alpha. Motion trails come from [`Surface::fade`], which
//! washes a translucent layer of the background color over the whole
//! surface before each frame is drawn.

use crate::color::Rgb8;
use glam::Vec2;

/// Fixed-size RGBA8 pixel buffer.
#[derive(Clone, Debug)]
pub struct Surface {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Surface {
    /// Allocates a surface of `width` by `height` pixels, all black.
    ///
    /// Returns `None` when either dimension is zero.
    pub fn new(width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let mut surface = Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
        };
        surface.clear(Rgb8::new(0, 0, 0));
        Some(surface)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Surface dimensions as a vector, for the simulation phases.
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Raw pixel data, row-major RGBA8.
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    /// Overwrites every pixel with `color` at full opacity.
    pub fn clear(&mut self, color: Rgb8) {
        for px in self.pixels.chunks_exact_mut(4) {
            px[0] = color.r;
            px[1] = color.g;
            px[2] = color.b;
            px[3] = 255;
        }
    }

    /// Blends a translucent layer of `color` over the whole surface.
    ///
    /// With a small `alpha` this is the trail effect: previous frames
    /// shine through, fading a little more on every call.
    pub fn fade(&mut self, color: Rgb8, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        let alpha = alpha.min(1.0);
        for px in self.pixels.chunks_exact_mut(4) {
            px[0] = blend_channel(color.r, px[0], alpha);
            px[1] = blend_channel(color.g, px[1], alpha);
            px[2] = blend_channel(color.b, px[2], alpha);
        }
    }

    /// Draws a filled circle of `color` blended at `alpha`.
    ///
    /// Edge pixels get partial coverage so small circles stay round.
    /// Circles partially or fully outside the surface are clipped; a
    /// non-positive radius or alpha draws nothing.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb8, alpha: f32) {
        if radius <= 0.0 || alpha <= 0.0 {
            return;
        }
        let alpha = alpha.min(1.0);

        // Clip the bounding box before walking pixels.
        let min_x = (center.x - radius).floor().max(0.0) as i32;
        let min_y = (center.y - radius).floor().max(0.0) as i32;
        let max_x = (center.x + radius).ceil().min(self.width as f32 - 1.0) as i32;
        let max_y = (center.y + radius).ceil().min(self.height as f32 - 1.0) as i32;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let offset = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
                let dist = offset.length();
                // 1 inside, 0 outside, a half-pixel ramp on the rim.
                let coverage = (radius - dist + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_pixel(x, y, color, alpha * coverage);
                }
            }
        }
    }

    /// Draws a one-pixel line from `from` to `to`, blended at `alpha`.
    pub fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgb8, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        let alpha = alpha.min(1.0);

        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil() as i32;
        if steps == 0 {
            // Degenerate line: a single pixel.
            self.blend_pixel(from.x.floor() as i32, from.y.floor() as i32, color, alpha);
            return;
        }

        let step = delta / steps as f32;
        let mut prev = (i32::MIN, i32::MIN);
        for i in 0..=steps {
            let p = from + step * i as f32;
            let px = (p.x.floor() as i32, p.y.floor() as i32);
            // Steps can land in the same pixel twice; blend it once.
            if px != prev {
                self.blend_pixel(px.0, px.1, color, alpha);
                prev = px;
            }
        }
    }

    /// Draws a radial gradient of `color`, opaque `alpha` at `center`
    /// and fading linearly to nothing at `radius`.
    pub fn radial_glow(&mut self, center: Vec2, radius: f32, color: Rgb8, alpha: f32) {
        if radius <= 0.0 || alpha <= 0.0 {
            return;
        }
        let alpha = alpha.min(1.0);

        let min_x = (center.x - radius).floor().max(0.0) as i32;
        let min_y = (center.y - radius).floor().max(0.0) as i32;
        let max_x = (center.x + radius).ceil().min(self.width as f32 - 1.0) as i32;
        let max_y = (center.y + radius).ceil().min(self.height as f32 - 1.0) as i32;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let offset = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
                let dist = offset.length();
                if dist < radius {
                    let t = 1.0 - dist / radius;
                    self.blend_pixel(x, y, color, alpha * t);
                }
            }
        }
    }

    /// Blends `color` over the pixel at `(x, y)` with the given alpha.
    /// Out-of-bounds coordinates are ignored.
    #[inline]
    fn blend_pixel(&mut self, x: i32, y: i32, color: Rgb8, alpha: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        self.pixels[idx] = blend_channel(color.r, self.pixels[idx], alpha);
        self.pixels[idx + 1] = blend_channel(color.g, self.pixels[idx + 1], alpha);
        self.pixels[idx + 2] = blend_channel(color.b, self.pixels[idx + 2], alpha);
    }
}

/// Source-over blend of one channel: `src * alpha + dst * (1 - alpha)`.
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: f32) -> u8 {
    (src as f32 * alpha + dst as f32 * (1.0 - alpha)).round() as u8
}
