//! Named color palettes and redmean nearest-color mapping.

use crate::geometry::Rgb;
use crate::settings::NamedPalette;

/// Redmean perceptual RGB distance:
/// `sqrt((2 + r_mean/256)*dr^2 + 4*dg^2 + (2 + (255-r_mean)/256)*db^2)`
pub fn redmean_distance(a: Rgb, b: Rgb) -> f64 {
    let r_mean = (a.r as f64 + b.r as f64) / 2.0;
    let dr = a.r as f64 - b.r as f64;
    let dg = a.g as f64 - b.g as f64;
    let db = a.b as f64 - b.b as f64;
    (((2.0 + r_mean / 256.0) * dr * dr) + (4.0 * dg * dg) + ((2.0 + (255.0 - r_mean) / 256.0) * db * db))
        .sqrt()
}

const fn rgb(r: u8, g: u8, b: u8) -> Rgb {
    Rgb { r, g, b }
}

/// The 13-color monochrome-blue palette, dark-navy to near-white.
const MONOCHROME_BLUE: &[Rgb] = &[
    rgb(0x05, 0x0a, 0x14),
    rgb(0x0a, 0x17, 0x2b),
    rgb(0x0f, 0x24, 0x42),
    rgb(0x14, 0x31, 0x59),
    rgb(0x19, 0x3e, 0x70),
    rgb(0x1e, 0x4b, 0x87),
    rgb(0x23, 0x58, 0x9e),
    rgb(0x33, 0x6d, 0xb5),
    rgb(0x4d, 0x82, 0xc2),
    rgb(0x73, 0x9f, 0xd3),
    rgb(0x99, 0xbc, 0xe3),
    rgb(0xc0, 0xd9, 0xf1),
    rgb(0xe8, 0xf1, 0xfb),
];

const WARM: &[Rgb] = &[
    rgb(0x4a, 0x12, 0x0a),
    rgb(0x7a, 0x1f, 0x0d),
    rgb(0xb3, 0x2d, 0x0e),
    rgb(0xd9, 0x4a, 0x1a),
    rgb(0xe8, 0x71, 0x2a),
    rgb(0xf2, 0x9e, 0x3f),
    rgb(0xf6, 0xc1, 0x5c),
    rgb(0xfa, 0xde, 0x8a),
];

const COOL: &[Rgb] = &[
    rgb(0x06, 0x1a, 0x1f),
    rgb(0x0a, 0x30, 0x3a),
    rgb(0x0e, 0x4a, 0x57),
    rgb(0x15, 0x67, 0x75),
    rgb(0x25, 0x89, 0x95),
    rgb(0x47, 0xad, 0xb4),
    rgb(0x79, 0xcf, 0xd0),
    rgb(0xb8, 0xe8, 0xe4),
];

const JEWEL_TONE: &[Rgb] = &[
    rgb(0x2d, 0x00, 0x3d),
    rgb(0x5c, 0x00, 0x6e),
    rgb(0x8a, 0x0a, 0x6b),
    rgb(0x0b, 0x5e, 0x5e),
    rgb(0x0d, 0x84, 0x5e),
    rgb(0xb0, 0x85, 0x00),
    rgb(0xc2, 0x1e, 0x3e),
    rgb(0x1c, 0x1f, 0x8a),
];

const EARTH: &[Rgb] = &[
    rgb(0x2b, 0x1d, 0x0e),
    rgb(0x4a, 0x30, 0x16),
    rgb(0x6b, 0x46, 0x1e),
    rgb(0x8c, 0x60, 0x2c),
    rgb(0xab, 0x7f, 0x48),
    rgb(0xc2, 0xa0, 0x6c),
    rgb(0xd8, 0xc2, 0x97),
    rgb(0xec, 0xe2, 0xc6),
];

/// Returns the ordered color list for a named palette, or `None` for
/// `Original` (the identity mapping has no fixed color list).
pub fn palette_colors(palette: NamedPalette) -> Option<&'static [Rgb]> {
    match palette {
        NamedPalette::Original => None,
        NamedPalette::MonochromeBlue => Some(MONOCHROME_BLUE),
        NamedPalette::Warm => Some(WARM),
        NamedPalette::Cool => Some(COOL),
        NamedPalette::JewelTone => Some(JEWEL_TONE),
        NamedPalette::Earth => Some(EARTH),
    }
}

/// Maps `color` to the nearest color in the named palette using redmean
/// distance. `Original` is the identity mapping.
pub fn map_to_palette(color: Rgb, palette: NamedPalette) -> Rgb {
    match palette_colors(palette) {
        None => color,
        Some(colors) => *colors
            .iter()
            .min_by(|a, b| {
                redmean_distance(color, **a)
                    .partial_cmp(&redmean_distance(color, **b))
                    .unwrap()
            })
            .expect("palette color lists are never empty"),
    }
}


// end of file
