use serde::Serialize;

use crate::classifier::{AirQualityCategory, BRIGHTNESS_MAX, BRIGHTNESS_MIN, Classification};

pub const SATURATION: u8 = 254;

/// Body of a Hue `lights/<id>/state` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActuatorState {
    pub on: bool,
    pub hue: u16,
    #[serde(rename = "sat")]
    pub saturation: u8,
    #[serde(rename = "bri")]
    pub brightness: u8,
}

impl From<Classification> for ActuatorState {
    fn from(c: Classification) -> Self {
        ActuatorState {
            on: true,
            hue: c.hue,
            saturation: SATURATION,
            brightness: c.brightness.clamp(BRIGHTNESS_MIN, BRIGHTNESS_MAX),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Dispatched {
    category: AirQualityCategory,
    hue: u16,
    brightness: u8,
}

/// The last state handed to the dispatcher. Starts unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebounceMemory {
    last: Option<Dispatched>,
}

impl DebounceMemory {
    pub fn record(self, state: &ActuatorState, category: AirQualityCategory) -> Self {
        DebounceMemory {
            last: Some(Dispatched {
                category,
                hue: state.hue,
                brightness: state.brightness,
            }),
        }
    }
}

pub fn should_dispatch(
    candidate: &ActuatorState,
    category: AirQualityCategory,
    memory: &DebounceMemory,
) -> bool {
    match memory.last {
        Some(last) => {
            last.category != category
                || last.hue != candidate.hue
                || last.brightness != candidate.brightness
        }
        None => true,
    }
}
