//! Normalized light update

use std::fmt;

/// CIE xy chromaticity coordinate, both axes in `[0, 1]` once clamped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XyColor {
    /// x coordinate
    pub x: f64,
    /// y coordinate
    pub y: f64,
}

impl XyColor {
    /// Create a color, clamping both coordinates into `[0, 1]`
    pub fn clamped(x: f64, y: f64) -> Self {
        Self {
            x: x.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
        }
    }
}

/// What should change on a single light.
///
/// Every field is optional; an intent where nothing is set must not be sent
/// to the bridge (see [`UpdateIntent::is_empty`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateIntent {
    /// Power state
    pub on: Option<bool>,
    /// Brightness fraction in `[0, 1]`
    pub brightness: Option<f64>,
    /// Target color
    pub color: Option<XyColor>,
    /// Transition duration in milliseconds, always positive
    pub transition_ms: Option<u32>,
}

impl UpdateIntent {
    /// Whether the intent carries nothing to apply
    pub fn is_empty(&self) -> bool {
        self.on.is_none()
            && self.brightness.is_none()
            && self.color.is_none()
            && self.transition_ms.is_none()
    }

    /// Brightness as a percentage, the unit the bridge expects
    pub fn brightness_percent(&self) -> Option<f64> {
        self.brightness.map(|b| b * 100.0)
    }
}

impl fmt::Display for UpdateIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(color) = self.color {
            parts.push(format!("color=x:{:.3},y:{:.3}", color.x, color.y));
        }
        if let Some(percent) = self.brightness_percent() {
            parts.push(format!("brightness={:.1}%", percent));
        } else if let Some(on) = self.on {
            parts.push(format!("on={}", on));
        }
        if let Some(ms) = self.transition_ms {
            parts.push(format!("duration={}ms", ms));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}
