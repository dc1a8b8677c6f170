//! Command shapes and delegation onto `set`
//!
//! `brightness` and `color` are shorthands: they are rewritten into a full
//! `set` argument list with the untouched fields filled by the sentinel.

use std::fmt;

use crate::error::CommandError;
use crate::scalar::{Scalar, NULL};

/// One of the command forms exposed per address scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// `on {onOff} [transitionMs]`
    On,
    /// `brightness {brightness} [transitionMs]`
    Brightness,
    /// `color {x} {y} [transitionMs]`
    Color,
    /// `set {x} {y} {brightness} [transitionMs]`
    Set,
}

impl Shape {
    /// Every shape, in the order they are listed to users
    pub const ALL: [Shape; 4] = [Shape::On, Shape::Set, Shape::Brightness, Shape::Color];

    /// Address segment for this shape
    pub fn as_str(self) -> &'static str {
        match self {
            Shape::On => "on",
            Shape::Brightness => "brightness",
            Shape::Color => "color",
            Shape::Set => "set",
        }
    }

    /// Argument usage, for help output
    pub fn usage(self) -> &'static str {
        match self {
            Shape::On => "{0|1} [duration_ms]",
            Shape::Brightness => "{0-254} [duration_ms]",
            Shape::Color => "{x} {y} [duration_ms]",
            Shape::Set => "{x|-1} [y|-1] [brightness|-1] [duration_ms|-1]",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who a command is addressed to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// A single light, by native id
    Light(String),
    /// Every light in the registry
    All,
}

/// Rewrite `brightness {b} [t]` as `set -1 -1 {b} [t]`
pub fn brightness_to_set(args: &[Scalar]) -> Result<Vec<Scalar>, CommandError> {
    let Some(brightness) = args.first() else {
        return Err(CommandError::Malformed(
            "No arguments provided for brightness".to_string(),
        ));
    };

    let mut set_args = vec![NULL, NULL, brightness.clone()];
    set_args.extend(args.get(1).cloned());
    Ok(set_args)
}

/// Rewrite `color {x} {y} [t]` as `set {x} {y} -1 [t]`
pub fn color_to_set(args: &[Scalar]) -> Result<Vec<Scalar>, CommandError> {
    if args.len() < 2 {
        return Err(CommandError::Malformed(
            "Not enough arguments for color (need X and Y coordinates)".to_string(),
        ));
    }

    let mut set_args = vec![args[0].clone(), args[1].clone(), NULL];
    set_args.extend(args.get(2).cloned());
    Ok(set_args)
}
