//! Dark/light theme and the sun/moon that follow it

/// Opacity and height change by this fraction of the remaining distance
/// per 60 Hz frame
pub const APPROACH_RATE: f32 = 0.05;

/// Height of the visible celestial body
pub const RISEN_Y: f32 = 40.0;
/// Height of the hidden celestial body
pub const SET_Y: f32 = -20.0;
/// Horizontal placement shared by sun and moon
pub const CELESTIAL_XZ: [f32; 2] = [30.0, -30.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// A glow light that follows the visible celestial body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub rgb: [f32; 3],
    pub intensity: f32,
    pub range: f32,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Scene background as sRGB
    pub fn background(self) -> [f32; 3] {
        match self {
            Theme::Dark => srgb(0x1a, 0x1a, 0x1a),
            Theme::Light => srgb(0xf5, 0xf5, 0xf5),
        }
    }

    pub fn ambient_intensity(self) -> f32 {
        match self {
            Theme::Dark => 0.5,
            Theme::Light => 0.8,
        }
    }

    pub fn key_light_intensity(self) -> f32 {
        match self {
            Theme::Dark => 1.5,
            Theme::Light => 2.0,
        }
    }

    /// Label of the button that switches away from this theme
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Dark => "☀ Light Mode",
            Theme::Light => "🌙 Dark Mode",
        }
    }

    /// Target (height, opacity) of the moon
    pub fn moon_target(self) -> (f32, f32) {
        match self {
            Theme::Dark => (RISEN_Y, 1.0),
            Theme::Light => (SET_Y, 0.0),
        }
    }

    /// Target (height, opacity) of the sun
    pub fn sun_target(self) -> (f32, f32) {
        match self {
            Theme::Dark => (SET_Y, 0.0),
            Theme::Light => (RISEN_Y, 1.0),
        }
    }

    pub fn glow(self) -> Glow {
        match self {
            Theme::Dark => Glow {
                rgb: srgb(0x88, 0x88, 0xff),
                intensity: 0.3,
                range: 80.0,
            },
            Theme::Light => Glow {
                rgb: srgb(0xff, 0xaa, 0x00),
                intensity: 0.8,
                range: 100.0,
            },
        }
    }
}

fn srgb(r: u8, g: u8, b: u8) -> [f32; 3] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
}

/// Move `current` toward `target`, frame-rate independent
pub fn approach(current: f32, target: f32, dt_secs: f32) -> f32 {
    let keep = (1.0 - APPROACH_RATE).powf(dt_secs * 60.0);
    target + (current - target) * keep
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let theme = Theme::default();
        assert!(theme.is_dark());
        assert_eq!(theme.toggled(), Theme::Light);
        assert_eq!(theme.toggled().toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle_label(), "☀ Light Mode");
    }

    #[test]
    fn test_theme_parameters() {
        assert_eq!(Theme::Dark.ambient_intensity(), 0.5);
        assert_eq!(Theme::Light.key_light_intensity(), 2.0);
        let bg = Theme::Dark.background();
        assert!((bg[0] - 26.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_celestial_targets() {
        assert_eq!(Theme::Dark.moon_target(), (40.0, 1.0));
        assert_eq!(Theme::Dark.sun_target(), (-20.0, 0.0));
        assert_eq!(Theme::Light.sun_target(), (40.0, 1.0));
    }

    #[test]
    fn test_approach_one_frame() {
        let next = approach(0.0, 100.0, 1.0 / 60.0);
        assert!((next - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_approach_converges() {
        let mut y = SET_Y;
        for _ in 0..600 {
            y = approach(y, RISEN_Y, 1.0 / 60.0);
        }
        assert!((y - RISEN_Y).abs() < 0.01);

        // A single long frame lands at the same place as many short ones
        let long = approach(SET_Y, RISEN_Y, 10.0);
        assert!((long - y).abs() < 0.01);
    }
}
