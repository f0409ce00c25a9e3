/// Straight-alpha RGBA color, one byte per channel.
///
/// This is the scalar form every setter stores and every getter returns.
/// Conversion to the backend's premultiplied representation happens only when a
/// pen, brush or font is materialized.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Unpacks a `0xAARRGGBB` value.
    #[inline]
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Packs into `0xAARRGGBB`.
    #[inline]
    pub const fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    #[inline]
    pub(crate) fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }

    /// Premultiplies and returns `[r, g, b, a]`.
    #[inline]
    pub(crate) fn premultiplied(self) -> [u8; 4] {
        let c = tiny_skia::ColorU8::from_rgba(self.r, self.g, self.b, self.a).premultiply();
        [c.red(), c.green(), c.blue(), c.alpha()]
    }
}

impl From<(u8, u8, u8, u8)> for Rgba {
    #[inline]
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<(u8, u8, u8)> for Rgba {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_packing_matches_channel_order() {
        let c = Rgba::from_argb(0x80_10_20_30);
        assert_eq!(c, Rgba::new(0x10, 0x20, 0x30, 0x80));
        assert_eq!(c.to_argb(), 0x80_10_20_30);
    }

    #[test]
    fn premultiplied_scales_rgb_by_alpha() {
        assert_eq!(Rgba::new(255, 0, 0, 255).premultiplied(), [255, 0, 0, 255]);
        assert_eq!(Rgba::TRANSPARENT.premultiplied(), [0, 0, 0, 0]);
        let [r, _, _, a] = Rgba::new(255, 0, 0, 128).premultiplied();
        assert_eq!(a, 128);
        assert_eq!(r, 128);
    }
}
