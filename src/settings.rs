//! The Settings Record and its sub-records.
//!
//! Every numeric field here has a documented valid range. Out-of-range
//! values are clamped silently rather than rejected — this matches the
//! host's contract of always handing the core already-UI-bounded
//! values, and it means the pipeline itself never needs to validate
//! settings beyond clamping.

use crate::geometry::Rgb;

/// How seed points are scattered over the image before tessellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointDistribution {
    Uniform,
    Poisson,
    EdgeWeighted,
}

/// Edge-magnitude algorithm used to build the edge map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeMethod {
    Sobel,
    Canny,
}

/// How each cell's fill color is derived from the source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Exact,
    Average,
    Palette,
}

/// Decorative frame style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStyle {
    None,
    Simple,
    Segmented,
}

/// Named, closed-set color palette used for palette mapping and
/// for frame palette post-processing. `Original` is the identity
/// mapping (leaves colors unchanged).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedPalette {
    Original,
    MonochromeBlue,
    Warm,
    Cool,
    JewelTone,
    Earth,
}

/// Fixed compass preset for the light source direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightPreset {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    Center,
    Custom,
}

impl LightPreset {
    /// Fixed angle in degrees for presets that map to one, in screen
    /// coordinates (y grows downward): `left=0°`, accumulating
    /// clockwise. `Custom` and `Center` have no fixed angle and are
    /// handled separately by the caller.
    pub fn fixed_angle_degrees(self) -> Option<f64> {
        use LightPreset::*;
        match self {
            Left => Some(0.0),
            TopLeft => Some(315.0),
            Top => Some(270.0),
            TopRight => Some(225.0),
            Right => Some(180.0),
            BottomRight => Some(135.0),
            Bottom => Some(90.0),
            BottomLeft => Some(45.0),
            Custom | Center => None,
        }
    }
}

/// Volumetric "god ray" sub-settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySettings {
    pub enabled: bool,
    pub count: u32,
    pub intensity: f64,
    pub spread_degrees: f64,
    pub length: f64,
}

impl Default for RaySettings {
    fn default() -> Self {
        RaySettings {
            enabled: false,
            count: 6,
            intensity: 0.6,
            spread_degrees: 20.0,
            length: 0.6,
        }
    }
}

impl RaySettings {
    pub fn clamped(self) -> Self {
        RaySettings {
            enabled: self.enabled,
            count: self.count.clamp(3, 12),
            intensity: self.intensity.clamp(0.0, 1.0),
            spread_degrees: self.spread_degrees.clamp(0.0, 90.0),
            length: self.length.clamp(0.0, 1.0),
        }
    }
}

/// Glow-layer sub-settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowSettings {
    pub enabled: bool,
    pub intensity: f64,
    pub radius: f64,
}

impl Default for GlowSettings {
    fn default() -> Self {
        GlowSettings {
            enabled: false,
            intensity: 0.5,
            radius: 8.0,
        }
    }
}

impl GlowSettings {
    pub fn clamped(self) -> Self {
        GlowSettings {
            enabled: self.enabled,
            intensity: self.intensity.clamp(0.0, 1.0),
            radius: self.radius.clamp(0.0, 50.0),
        }
    }
}

/// Light Settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSettings {
    pub enabled: bool,
    pub preset: LightPreset,
    pub angle_degrees: f64,
    pub elevation_degrees: f64,
    pub intensity: f64,
    pub ambient: f64,
    pub dark_mode: bool,
    pub rays: RaySettings,
    pub glow: GlowSettings,
}

impl Default for LightSettings {
    fn default() -> Self {
        LightSettings {
            enabled: false,
            preset: LightPreset::TopLeft,
            angle_degrees: 315.0,
            elevation_degrees: 45.0,
            intensity: 1.0,
            ambient: 0.3,
            dark_mode: false,
            rays: RaySettings::default(),
            glow: GlowSettings::default(),
        }
    }
}

impl LightSettings {
    pub fn clamped(self) -> Self {
        LightSettings {
            enabled: self.enabled,
            preset: self.preset,
            angle_degrees: self.angle_degrees.rem_euclid(360.0),
            elevation_degrees: self.elevation_degrees.clamp(0.0, 90.0),
            intensity: self.intensity.clamp(0.0, 2.0),
            ambient: self.ambient.clamp(0.0, 1.0),
            dark_mode: self.dark_mode,
            rays: self.rays.clamped(),
            glow: self.glow.clamped(),
        }
    }

    /// The effective angle in degrees, resolving the preset:
    /// presets other than `Custom` override `angle_degrees`; `Custom`
    /// uses it verbatim. `Center` has no direction and callers must
    /// special-case it before calling this.
    pub fn effective_angle_degrees(&self) -> f64 {
        self.preset.fixed_angle_degrees().unwrap_or(self.angle_degrees)
    }
}

/// Complete user-configurable parameters for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub cell_count: u32,
    pub point_distribution: PointDistribution,
    pub edge_influence: f64,
    pub relaxation_iterations: u32,
    pub pre_blur: f64,
    pub contrast: f64,
    pub edge_method: EdgeMethod,
    pub edge_sensitivity: f64,
    pub line_width: f64,
    pub line_color: Rgb,
    pub color_mode: ColorMode,
    pub palette_size: u32,
    pub saturation: f64,
    pub brightness: f64,
    pub color_palette: NamedPalette,
    pub frame_style: FrameStyle,
    pub frame_width_percent: f64,
    pub frame_cell_size: f64,
    pub frame_color_palette: NamedPalette,
    pub frame_hue_shift_degrees: f64,
    pub frame_saturation: f64,
    pub frame_brightness: f64,
    pub lighting: LightSettings,
    /// Explicit RNG seed; identical settings and identical seed produce
    /// byte-equal output.
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            cell_count: 400,
            point_distribution: PointDistribution::EdgeWeighted,
            edge_influence: 0.6,
            relaxation_iterations: 2,
            pre_blur: 1.0,
            contrast: 1.0,
            edge_method: EdgeMethod::Sobel,
            edge_sensitivity: 50.0,
            line_width: 2.0,
            line_color: Rgb::new(0x1a, 0x1a, 0x1a),
            color_mode: ColorMode::Average,
            palette_size: 16,
            saturation: 1.0,
            brightness: 1.0,
            color_palette: NamedPalette::Original,
            frame_style: FrameStyle::Simple,
            frame_width_percent: 6.0,
            frame_cell_size: 60.0,
            frame_color_palette: NamedPalette::Original,
            frame_hue_shift_degrees: 0.0,
            frame_saturation: 1.0,
            frame_brightness: 1.0,
            lighting: LightSettings::default(),
            seed: 0,
        }
    }
}

impl Settings {
    /// Returns a copy with every field clamped to its documented range.
    /// Call this once at stage entry rather than scattering clamps
    /// through the algorithms.
    pub fn clamped(self) -> Self {
        Settings {
            cell_count: self.cell_count.clamp(50, 2000),
            point_distribution: self.point_distribution,
            edge_influence: self.edge_influence.clamp(0.0, 1.0),
            relaxation_iterations: self.relaxation_iterations.min(5),
            pre_blur: self.pre_blur.clamp(0.0, 10.0),
            contrast: self.contrast.clamp(0.5, 2.0),
            edge_method: self.edge_method,
            edge_sensitivity: self.edge_sensitivity.clamp(0.0, 100.0),
            line_width: self.line_width.clamp(0.5, 10.0),
            line_color: self.line_color,
            color_mode: self.color_mode,
            palette_size: self.palette_size.clamp(4, 64),
            saturation: self.saturation.clamp(0.0, 2.0),
            brightness: self.brightness.clamp(0.0, 2.0),
            color_palette: self.color_palette,
            frame_style: self.frame_style,
            frame_width_percent: self.frame_width_percent.clamp(2.0, 15.0),
            frame_cell_size: self.frame_cell_size.clamp(30.0, 150.0),
            frame_color_palette: self.frame_color_palette,
            frame_hue_shift_degrees: self.frame_hue_shift_degrees.rem_euclid(360.0),
            frame_saturation: self.frame_saturation.clamp(0.0, 2.0),
            frame_brightness: self.frame_brightness.clamp(0.0, 2.0),
            lighting: self.lighting.clamped(),
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pulls_out_of_range_fields_into_bounds() {
        let s = Settings {
            cell_count: 5,
            relaxation_iterations: 99,
            contrast: 9.0,
            frame_width_percent: 0.0,
            ..Settings::default()
        }
        .clamped();
        assert_eq!(s.cell_count, 50);
        assert_eq!(s.relaxation_iterations, 5);
        assert_eq!(s.contrast, 2.0);
        assert_eq!(s.frame_width_percent, 2.0);
    }

    #[test]
    fn light_preset_angles_follow_screen_coordinates() {
        assert_eq!(LightPreset::Left.fixed_angle_degrees(), Some(0.0));
        assert_eq!(LightPreset::Bottom.fixed_angle_degrees(), Some(90.0));
        assert_eq!(LightPreset::Custom.fixed_angle_degrees(), None);
        assert_eq!(LightPreset::Center.fixed_angle_degrees(), None);
    }

    #[test]
    fn hue_shift_wraps_instead_of_clamping() {
        let s = Settings {
            frame_hue_shift_degrees: 370.0,
            ..Settings::default()
        }
        .clamped();
        assert_eq!(s.frame_hue_shift_degrees, 10.0);
    }
}

// end of file
