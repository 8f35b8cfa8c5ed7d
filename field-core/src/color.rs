/// 8-bit RGB color used by the painting surface.
///
/// Alpha is not stored here; every painting call takes its own alpha,
/// so the same palette entry can be reused at different opacities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Converts an HSL color to [`Rgb8`].
///
/// The accent palette is defined in HSL (hue in degrees, saturation and
/// lightness in `[0, 1]`); everything downstream works in 8-bit RGB.
/// Hue values outside `[0, 360)` are wrapped.
pub fn hsl(h: f32, s: f32, l: f32) -> Rgb8 {
    let h = h.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());

    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let m = l - c / 2.0;
    let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb8::new(to_u8(r1), to_u8(g1), to_u8(b1))
}
