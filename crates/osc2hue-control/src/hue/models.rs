use osc2hue_core::UpdateIntent;
use serde::{Deserialize, Serialize};

/// Body of `PUT /clip/v2/resource/light/{id}`.
///
/// Absent fields are omitted so the bridge leaves them unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightPut {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<On>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimming: Option<Dimming>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamics: Option<Dynamics>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct On {
    pub on: bool,
}

/// Brightness in percent (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimming {
    pub brightness: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub xy: GamutPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GamutPosition {
    pub x: f64,
    pub y: f64,
}

/// Transition duration in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dynamics {
    pub duration: u32,
}

impl From<&UpdateIntent> for LightPut {
    fn from(intent: &UpdateIntent) -> Self {
        Self {
            on: intent.on.map(|on| On { on }),
            dimming: intent
                .brightness_percent()
                .map(|brightness| Dimming { brightness }),
            color: intent.color.map(|c| Color {
                xy: GamutPosition { x: c.x, y: c.y },
            }),
            dynamics: intent.transition_ms.map(|duration| Dynamics { duration }),
        }
    }
}
