//! Command normalization
//!
//! Turns positional argument lists into an [`UpdateIntent`]:
//!
//! ```text
//! set  {x|-1} [y|-1] [brightness|-1] [duration_ms|-1]
//! on   {0|1}  [duration_ms]
//! ```
//!
//! Brightness has no unit tag on the wire, so its range is guessed from the
//! representation and magnitude (see [`brightness_fraction`]).

use crate::error::CommandError;
use crate::intent::{UpdateIntent, XyColor};
use crate::scalar::{read_number, read_switch, read_transition, Number, Scalar, Slot};

/// Device-level brightness maximum
const RAW_BRIGHTNESS_MAX: f64 = 254.0;
/// Percentage maximum
const PERCENT_MAX: f64 = 100.0;

/// Convert a brightness value to an unclamped fraction.
///
/// - Integers up to 254 are raw device levels, above that percentages.
/// - Floats up to 1.0 are fractions, up to 100.0 percentages, above that
///   raw device levels.
pub fn brightness_fraction(value: Number) -> f64 {
    match value {
        Number::Int(v) if f64::from(v) <= RAW_BRIGHTNESS_MAX => f64::from(v) / RAW_BRIGHTNESS_MAX,
        Number::Int(v) => f64::from(v) / PERCENT_MAX,
        Number::Float(v) => {
            let v = f64::from(v);
            if v <= 1.0 {
                v
            } else if v <= PERCENT_MAX {
                v / PERCENT_MAX
            } else {
                v / RAW_BRIGHTNESS_MAX
            }
        }
    }
}

/// Normalize a `set` command.
///
/// A color needs both coordinates: a `y` sentinel cancels the color change
/// even when `x` is usable, while a missing `y` rejects the command.
pub fn normalize_set(args: &[Scalar]) -> Result<UpdateIntent, CommandError> {
    if args.is_empty() {
        return Err(CommandError::Malformed(
            "Set command requires at least 1 argument. Use -1 for null values.".to_string(),
        ));
    }

    let color = match read_number(args, 0, "X coordinate")? {
        Slot::Value(x) => match read_number(args, 1, "Y coordinate")? {
            Slot::Value(y) => Some(XyColor::clamped(x.as_f64(), y.as_f64())),
            Slot::Skip => None,
            Slot::Missing => {
                return Err(CommandError::Malformed(
                    "Color requires both X and Y coordinates".to_string(),
                ))
            }
        },
        Slot::Skip | Slot::Missing => None,
    };

    let brightness = read_number(args, 2, "brightness")?
        .value()
        .map(|value| brightness_fraction(value).clamp(0.0, 1.0));

    let intent = UpdateIntent {
        on: brightness.map(|b| b > 0.0),
        brightness,
        color,
        transition_ms: read_transition(args, 3),
    };

    if intent.is_empty() {
        return Err(CommandError::NoOp);
    }
    Ok(intent)
}

/// Normalize an `on` command into a power-only update
pub fn normalize_on(args: &[Scalar]) -> Result<UpdateIntent, CommandError> {
    let on = read_switch(args, 0)?;
    Ok(UpdateIntent {
        on: Some(on),
        transition_ms: read_transition(args, 1),
        ..Default::default()
    })
}
