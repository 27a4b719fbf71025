//! Device performance detection and rendering quality tiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cores assumed when the browser does not report `hardwareConcurrency`
const DEFAULT_CORES: u32 = 4;
/// Memory assumed when the browser does not report `deviceMemory`
const DEFAULT_MEMORY_GB: f32 = 4.0;
/// Viewports narrower than this are treated as small screens
const NARROW_VIEWPORT: f32 = 800.0;

/// What the browser tells us about the device
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceProfile {
    pub logical_cores: Option<u32>,
    pub memory_gb: Option<f32>,
    pub pixel_ratio: f32,
    pub is_mobile: bool,
    pub viewport_width: f32,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            logical_cores: None,
            memory_gb: None,
            pixel_ratio: 1.0,
            is_mobile: false,
            viewport_width: 1920.0,
        }
    }
}

/// Detect phones and tablets from a user agent string
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    const MARKERS: [&str; 5] = ["android", "iphone", "ipad", "ipod", "mobile"];
    let ua = user_agent.to_lowercase();
    MARKERS.iter().any(|m| ua.contains(m))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Low,
    Medium,
    High,
}

impl QualityTier {
    /// Score the device and pick a tier
    pub fn detect(profile: &DeviceProfile) -> Self {
        let cores = profile.logical_cores.unwrap_or(DEFAULT_CORES);
        let memory = profile.memory_gb.unwrap_or(DEFAULT_MEMORY_GB);

        let mut score: i32 = 0;
        score += match cores {
            c if c >= 8 => 2,
            c if c >= 4 => 1,
            _ => 0,
        };
        score += if memory >= 8.0 {
            2
        } else if memory >= 4.0 {
            1
        } else {
            0
        };
        if profile.is_mobile {
            score -= 2;
        }
        if profile.viewport_width < NARROW_VIEWPORT {
            score -= 1;
        }

        match score {
            s if s >= 3 => QualityTier::High,
            s if s >= 1 => QualityTier::Medium,
            _ => QualityTier::Low,
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QualityTier::Low => "low",
            QualityTier::Medium => "medium",
            QualityTier::High => "high",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for QualityTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(QualityTier::Low),
            "medium" => Ok(QualityTier::Medium),
            "high" => Ok(QualityTier::High),
            other => Err(format!("unknown quality tier: {}", other)),
        }
    }
}

/// Renderer settings derived from a tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderQuality {
    pub tier: QualityTier,
    pub msaa_samples: u32,
    pub shadows: bool,
    pub max_pixel_ratio: f32,
    /// Extra fill lights standing in for the environment map
    pub environment_lights: bool,
    /// Reactive low-power redraws when idle
    pub low_power: bool,
}

impl RenderQuality {
    pub fn for_tier(tier: QualityTier) -> Self {
        match tier {
            QualityTier::High => Self {
                tier,
                msaa_samples: 4,
                shadows: true,
                max_pixel_ratio: 2.0,
                environment_lights: true,
                low_power: false,
            },
            QualityTier::Medium => Self {
                tier,
                msaa_samples: 2,
                shadows: true,
                max_pixel_ratio: 1.5,
                environment_lights: true,
                low_power: false,
            },
            QualityTier::Low => Self {
                tier,
                msaa_samples: 1,
                shadows: false,
                max_pixel_ratio: 1.0,
                environment_lights: false,
                low_power: true,
            },
        }
    }

    /// Detect from a device profile, honoring an explicit override
    pub fn resolve(profile: &DeviceProfile, override_tier: Option<QualityTier>) -> Self {
        let tier = override_tier.unwrap_or_else(|| QualityTier::detect(profile));
        Self::for_tier(tier)
    }

    /// Device pixel ratio capped for this tier
    pub fn pixel_ratio(&self, device_ratio: f32) -> f32 {
        device_ratio.clamp(1.0, self.max_pixel_ratio)
    }
}

impl Default for RenderQuality {
    fn default() -> Self {
        Self::for_tier(QualityTier::Medium)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop(cores: u32, memory: f32) -> DeviceProfile {
        DeviceProfile {
            logical_cores: Some(cores),
            memory_gb: Some(memory),
            ..DeviceProfile::default()
        }
    }

    #[test]
    fn test_detect_tiers() {
        assert_eq!(QualityTier::detect(&desktop(16, 16.0)), QualityTier::High);
        assert_eq!(QualityTier::detect(&desktop(8, 4.0)), QualityTier::High);
        assert_eq!(QualityTier::detect(&desktop(4, 4.0)), QualityTier::Medium);
        assert_eq!(QualityTier::detect(&desktop(2, 2.0)), QualityTier::Low);
    }

    #[test]
    fn test_unknown_hardware_is_medium() {
        assert_eq!(QualityTier::detect(&DeviceProfile::default()), QualityTier::Medium);
    }

    #[test]
    fn test_mobile_penalty() {
        let phone = DeviceProfile {
            logical_cores: Some(8),
            memory_gb: Some(4.0),
            pixel_ratio: 3.0,
            is_mobile: true,
            viewport_width: 390.0,
        };
        assert_eq!(QualityTier::detect(&phone), QualityTier::Low);

        let tablet = DeviceProfile {
            viewport_width: 1024.0,
            ..phone
        };
        assert_eq!(QualityTier::detect(&tablet), QualityTier::Medium);
    }

    #[test]
    fn test_mobile_user_agents() {
        assert!(is_mobile_user_agent(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15"
        ));
        assert!(is_mobile_user_agent("Mozilla/5.0 (Linux; Android 14; Pixel 8)"));
        assert!(!is_mobile_user_agent(
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/126.0 Safari/537.36"
        ));
    }

    #[test]
    fn test_render_quality() {
        let low = RenderQuality::for_tier(QualityTier::Low);
        assert_eq!(low.msaa_samples, 1);
        assert!(!low.shadows);
        assert!(low.low_power);
        assert_eq!(low.pixel_ratio(3.0), 1.0);

        let high = RenderQuality::for_tier(QualityTier::High);
        assert_eq!(high.msaa_samples, 4);
        assert_eq!(high.pixel_ratio(3.0), 2.0);
        assert_eq!(high.pixel_ratio(1.25), 1.25);
    }

    #[test]
    fn test_override() {
        let quality = RenderQuality::resolve(&desktop(16, 16.0), Some(QualityTier::Low));
        assert_eq!(quality.tier, QualityTier::Low);

        assert_eq!("HIGH".parse::<QualityTier>(), Ok(QualityTier::High));
        assert!("ultra".parse::<QualityTier>().is_err());
        assert_eq!(QualityTier::Medium.to_string(), "medium");
    }
}
