//! Packed ARGB8888 color helpers and the default palette.

pub const BACKGROUND: u32 = 0xFF1E1E1E;
pub const FILL: u32 = 0xFFFFFFFF;
pub const WIREFRAME: u32 = 0xFF00FF00;

/// Pack normalized channels into ARGB8888. Channels are clamped to [0, 1].
#[inline]
pub fn pack_color(r: f32, g: f32, b: f32, a: f32) -> u32 {
    let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
    (to_byte(a) << 24) | (to_byte(r) << 16) | (to_byte(g) << 8) | to_byte(b)
}

/// Unpack the RGB channels of an ARGB8888 color into [0, 1].
#[inline]
pub fn unpack_color(color: u32) -> (f32, f32, f32) {
    let channel = |shift: u32| ((color >> shift) & 0xFF) as f32 / 255.0;
    (channel(16), channel(8), channel(0))
}

/// Opaque grey of the given intensity in [0, 1].
#[inline]
pub fn grey(intensity: f32) -> u32 {
    pack_color(intensity, intensity, intensity, 1.0)
}

/// Multiply two colors channel by channel (texture sample times flat shade).
#[inline]
pub fn multiply(a: u32, b: u32) -> u32 {
    let (ar, ag, ab) = unpack_color(a);
    let (br, bg, bb) = unpack_color(b);
    (a & 0xFF00_0000) | (pack_color(ar * br, ag * bg, ab * bb, 0.0) & 0x00FF_FFFF)
}
