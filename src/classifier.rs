use std::fmt;

pub const GOOD_MAX: f32 = 12.0;
pub const OKAY_MAX: f32 = 35.4;

pub const BRIGHTNESS_MIN: u8 = 25;
pub const BRIGHTNESS_MAX: u8 = 254;

/// pm25 at which Good brightness bottoms out.
const DIMMEST_PM25: f32 = 10.0;

const GREEN_BANDS: [(f32, u16); 4] = [(2.0, 31000), (4.0, 25500), (6.0, 22000), (8.0, 18000)];
const GREEN_HUE_TAIL: u16 = 14000;

const OKAY_HUE: u16 = 12750;
const OKAY_BRIGHTNESS: u8 = 100;
const BAD_HUE: u16 = 0;
const BAD_BRIGHTNESS: u8 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AirQualityCategory {
    Good,
    Okay,
    Bad,
}

impl fmt::Display for AirQualityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AirQualityCategory::Good => "Good",
            AirQualityCategory::Okay => "Okay",
            AirQualityCategory::Bad => "Bad",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: AirQualityCategory,
    pub hue: u16,
    pub brightness: u8,
}

/// Maps a PM2.5 concentration (ug/m^3) to a category and the light colour for it.
///
/// Negative readings count as clean air. NaN fails every threshold and lands in
/// `Bad`.
pub fn classify(pm25: f32) -> Classification {
    let pm25 = if pm25 < 0.0 { 0.0 } else { pm25 };

    if pm25 <= GOOD_MAX {
        Classification {
            category: AirQualityCategory::Good,
            hue: green_hue(pm25),
            brightness: good_brightness(pm25),
        }
    } else if pm25 <= OKAY_MAX {
        Classification {
            category: AirQualityCategory::Okay,
            hue: OKAY_HUE,
            brightness: OKAY_BRIGHTNESS,
        }
    } else {
        Classification {
            category: AirQualityCategory::Bad,
            hue: BAD_HUE,
            brightness: BAD_BRIGHTNESS,
        }
    }
}

fn green_hue(pm25: f32) -> u16 {
    GREEN_BANDS
        .iter()
        .find(|(upper, _)| pm25 <= *upper)
        .map_or(GREEN_HUE_TAIL, |(_, hue)| *hue)
}

fn good_brightness(pm25: f32) -> u8 {
    if pm25 >= DIMMEST_PM25 {
        return BRIGHTNESS_MIN;
    }

    let span = f32::from(BRIGHTNESS_MAX - BRIGHTNESS_MIN);
    let dimming = ((pm25 / DIMMEST_PM25) * span) as i32;
    let brightness = i32::from(BRIGHTNESS_MAX) - dimming;

    brightness.clamp(i32::from(BRIGHTNESS_MIN), i32::from(BRIGHTNESS_MAX)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_green_hue_bands() {
        let cases = [
            (0.0, 31000),
            (2.0, 31000),
            (2.01, 25500),
            (4.0, 25500),
            (4.01, 22000),
            (6.0, 22000),
            (6.01, 18000),
            (8.0, 18000),
            (8.01, 14000),
            (10.0, 14000),
        ];
        for (pm25, hue) in cases {
            assert_eq!(classify(pm25).hue, hue, "pm25 = {pm25}");
        }
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(classify(12.0).category, AirQualityCategory::Good);
        assert_eq!(classify(12.1).category, AirQualityCategory::Okay);
        assert_eq!(classify(35.4).category, AirQualityCategory::Okay);
        assert_eq!(classify(35.41).category, AirQualityCategory::Bad);
    }

    #[test]
    fn test_good_brightness_is_non_increasing() {
        let mut previous = BRIGHTNESS_MAX;
        for step in 0..=120 {
            let pm25 = step as f32 / 10.0;
            let c = classify(pm25);
            assert_eq!(c.category, AirQualityCategory::Good);
            assert!((BRIGHTNESS_MIN..=BRIGHTNESS_MAX).contains(&c.brightness));
            assert!(c.brightness <= previous, "pm25 = {pm25}");
            previous = c.brightness;
        }
    }

    #[test]
    fn test_good_brightness_endpoints() {
        assert_eq!(classify(0.0).brightness, 254);
        assert_eq!(classify(3.0).brightness, 186);
        assert_eq!(classify(10.0).brightness, 25);
        assert_eq!(classify(11.5).brightness, 25);
    }

    #[test]
    fn test_negative_reading_is_clean_air() {
        assert_eq!(
            classify(-4.0),
            Classification {
                category: AirQualityCategory::Good,
                hue: 31000,
                brightness: 254,
            }
        );
    }

    #[test]
    fn test_okay_and_bad_are_fixed() {
        assert_eq!(
            classify(20.0),
            Classification {
                category: AirQualityCategory::Okay,
                hue: 12750,
                brightness: 100,
            }
        );
        assert_eq!(
            classify(250.0),
            Classification {
                category: AirQualityCategory::Bad,
                hue: 0,
                brightness: 80,
            }
        );
    }

    #[test]
    fn test_nan_is_bad() {
        assert_eq!(classify(f32::NAN).category, AirQualityCategory::Bad);
    }

    #[test]
    fn test_categories_are_ordered_by_severity() {
        assert!(AirQualityCategory::Good < AirQualityCategory::Okay);
        assert!(AirQualityCategory::Okay < AirQualityCategory::Bad);
    }
}
