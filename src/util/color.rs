//! Hex colour → linear RGB conversion for scene materials.
//!
//! Material colours are authored as sRGB hex values (`0x00f0ff`). The
//! surface format is sRGB, so shaders work in linear space and the
//! hardware encodes on write.

/// Convert an sRGB channel in [0, 1] to linear.
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Decode `0xRRGGBB` into sRGB components in [0, 1].
#[must_use]
pub fn hex_srgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// Decode `0xRRGGBB` straight to linear RGB.
#[must_use]
pub fn hex_linear(hex: u32) -> [f32; 3] {
    hex_srgb(hex).map(srgb_to_linear)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_channels() {
        assert_eq!(hex_srgb(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(hex_srgb(0x00ff00), [0.0, 1.0, 0.0]);
        assert_eq!(hex_srgb(0x000000), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn linear_keeps_endpoints() {
        assert_eq!(hex_linear(0xffffff), [1.0, 1.0, 1.0]);
        assert_eq!(hex_linear(0x000000), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn linear_darkens_midtones() {
        let [r, _, _] = hex_linear(0x808080);
        assert!(r < 0.5 && r > 0.2);
    }
}
