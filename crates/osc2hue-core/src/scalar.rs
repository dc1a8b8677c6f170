//! Scalar argument model
//!
//! OSC has no null value, so a positional `-1` (integer or float) means
//! "leave this attribute unchanged". Slots are read through [`read_number`],
//! which turns that sentinel into [`Slot::Skip`] so later code never has to
//! look for `-1` again.

use std::fmt;

use crate::error::CommandError;

/// One positional command argument as it arrived on the wire
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// 32-bit integer
    Int(i32),
    /// 32-bit float
    Float(f32),
    /// Native boolean
    Bool(bool),
    /// Any other wire type, named so the reading slot can reject it
    Unsupported(String),
}

/// The null sentinel as synthesized by delegating shapes
pub const NULL: Scalar = Scalar::Int(-1);

impl Scalar {
    /// Name of the argument type, for diagnostics
    pub fn type_name(&self) -> &str {
        match self {
            Scalar::Int(_) => "int32",
            Scalar::Float(_) => "float32",
            Scalar::Bool(_) => "bool",
            Scalar::Unsupported(name) => name,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Bool(v) => write!(f, "{}", v),
            Scalar::Unsupported(name) => write!(f, "<{}>", name),
        }
    }
}

/// A numeric slot value, keeping the representation it arrived in.
///
/// Range disambiguation depends on the representation, so integers and
/// floats are never merged before normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Integer representation
    Int(i32),
    /// Float representation
    Float(f32),
}

impl Number {
    /// Whether this is the `-1` skip sentinel in its own representation
    pub fn is_sentinel(self) -> bool {
        match self {
            Number::Int(v) => v == -1,
            Number::Float(v) => v == -1.0,
        }
    }

    /// Widen to `f64`
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => f64::from(v),
            Number::Float(v) => f64::from(v),
        }
    }
}

/// State of one positional slot after sentinel handling
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slot<T> {
    /// The argument list ended before this slot
    Missing,
    /// The slot held the skip sentinel
    Skip,
    /// A usable value
    Value(T),
}

impl<T> Slot<T> {
    /// The value, if any
    pub fn value(self) -> Option<T> {
        match self {
            Slot::Value(v) => Some(v),
            Slot::Missing | Slot::Skip => None,
        }
    }
}

/// Read a numeric slot (x, y or brightness).
///
/// Booleans, unsupported types and NaN reject the command. Infinities are
/// kept and end up clamped like any other out-of-range value.
pub fn read_number(args: &[Scalar], index: usize, field: &str) -> Result<Slot<Number>, CommandError> {
    let Some(arg) = args.get(index) else {
        return Ok(Slot::Missing);
    };

    let number = match arg {
        Scalar::Int(v) => Number::Int(*v),
        Scalar::Float(v) if v.is_nan() => {
            return Err(CommandError::Malformed(format!("{} must be a number, got NaN", field)))
        }
        Scalar::Float(v) => Number::Float(*v),
        Scalar::Bool(_) | Scalar::Unsupported(_) => {
            return Err(CommandError::invalid_type(field, arg.type_name()))
        }
    };

    if number.is_sentinel() {
        Ok(Slot::Skip)
    } else {
        Ok(Slot::Value(number))
    }
}

/// Read the on/off switch slot.
///
/// Integers and floats switch on when greater than zero.
pub fn read_switch(args: &[Scalar], index: usize) -> Result<bool, CommandError> {
    match args.get(index) {
        None => Err(CommandError::Malformed(
            "No arguments provided for light on/off".to_string(),
        )),
        Some(Scalar::Int(v)) => Ok(*v > 0),
        Some(Scalar::Float(v)) => Ok(*v > 0.0),
        Some(Scalar::Bool(v)) => Ok(*v),
        Some(other @ Scalar::Unsupported(_)) => {
            Err(CommandError::invalid_type("on/off", other.type_name()))
        }
    }
}

/// Read an optional transition duration in milliseconds.
///
/// Only positive durations that fit in `u32` count; floats are truncated.
/// Non-finite floats are absent. A value of the wrong type is reported and
/// ignored rather than rejecting the command.
pub fn read_transition(args: &[Scalar], index: usize) -> Option<u32> {
    let millis = match args.get(index)? {
        Scalar::Int(v) => f64::from(*v),
        Scalar::Float(v) if !v.is_finite() => return None,
        Scalar::Float(v) => f64::from(*v).trunc(),
        other => {
            tracing::warn!("Invalid transition duration type: {}", other.type_name());
            return None;
        }
    };

    if millis > 0.0 && millis <= f64::from(u32::MAX) {
        Some(millis as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_in_both_representations() {
        assert!(Number::Int(-1).is_sentinel());
        assert!(Number::Float(-1.0).is_sentinel());
        assert!(!Number::Int(0).is_sentinel());
        assert!(!Number::Float(-0.5).is_sentinel());
    }

    #[test]
    fn test_read_number_slots() {
        let args = vec![Scalar::Float(0.3), Scalar::Int(-1)];
        assert_eq!(
            read_number(&args, 0, "x").unwrap(),
            Slot::Value(Number::Float(0.3))
        );
        assert_eq!(read_number(&args, 1, "y").unwrap(), Slot::Skip);
        assert_eq!(read_number(&args, 2, "brightness").unwrap(), Slot::Missing);
    }

    #[test]
    fn test_read_number_rejects_other_types() {
        let args = vec![Scalar::Bool(true), Scalar::Unsupported("string".to_string())];
        assert!(matches!(
            read_number(&args, 0, "x"),
            Err(CommandError::Malformed(_))
        ));
        let err = read_number(&args, 1, "y").unwrap_err();
        assert_eq!(
            err,
            CommandError::Malformed("Invalid y type: string".to_string())
        );
    }

    #[test]
    fn test_read_number_nan_and_infinity() {
        let args = vec![
            Scalar::Float(f32::NAN),
            Scalar::Float(f32::INFINITY),
            Scalar::Float(f32::NEG_INFINITY),
        ];
        assert!(read_number(&args, 0, "x").is_err());
        assert_eq!(
            read_number(&args, 1, "y").unwrap(),
            Slot::Value(Number::Float(f32::INFINITY))
        );
        assert_eq!(
            read_number(&args, 2, "brightness").unwrap(),
            Slot::Value(Number::Float(f32::NEG_INFINITY))
        );
    }

    #[test]
    fn test_read_switch() {
        assert!(read_switch(&[Scalar::Int(1)], 0).unwrap());
        assert!(!read_switch(&[Scalar::Int(0)], 0).unwrap());
        assert!(!read_switch(&[Scalar::Int(-1)], 0).unwrap());
        assert!(read_switch(&[Scalar::Float(0.1)], 0).unwrap());
        assert!(read_switch(&[Scalar::Bool(true)], 0).unwrap());
        assert!(read_switch(&[], 0).is_err());
        assert!(read_switch(&[Scalar::Unsupported("string".to_string())], 0).is_err());
    }

    #[test]
    fn test_read_transition() {
        assert_eq!(read_transition(&[Scalar::Int(2000)], 0), Some(2000));
        assert_eq!(read_transition(&[Scalar::Float(1500.7)], 0), Some(1500));
        assert_eq!(read_transition(&[Scalar::Int(-1)], 0), None);
        assert_eq!(read_transition(&[Scalar::Float(-1.0)], 0), None);
        assert_eq!(read_transition(&[Scalar::Int(0)], 0), None);
        assert_eq!(read_transition(&[Scalar::Int(-50)], 0), None);
        assert_eq!(read_transition(&[Scalar::Bool(true)], 0), None);
        assert_eq!(read_transition(&[], 0), None);
    }

    #[test]
    fn test_read_transition_out_of_range_floats() {
        assert_eq!(read_transition(&[Scalar::Float(f32::INFINITY)], 0), None);
        assert_eq!(read_transition(&[Scalar::Float(f32::NEG_INFINITY)], 0), None);
        assert_eq!(read_transition(&[Scalar::Float(f32::NAN)], 0), None);
        assert_eq!(read_transition(&[Scalar::Float(1e12)], 0), None);
        assert_eq!(read_transition(&[Scalar::Int(i32::MAX)], 0), Some(i32::MAX as u32));
    }
}
