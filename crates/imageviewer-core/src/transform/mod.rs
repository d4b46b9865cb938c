//! Geometric transforms that produce a new image: resize and rotate.
//!
//! Unlike filters, transforms may change the image dimensions, so they are
//! pure functions from one [`PixelBuffer`] to another rather than in-place
//! mutations.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, x grows right, y grows down
//! - Resizing is by a factor of exactly two, nearest neighbour
//! - Rotation is by exact quarter turns

mod resize;
mod rotation;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::PixelBuffer;
use crate::error::EditError;

pub use resize::{larger_dimensions, make_larger, make_smaller, smaller_dimensions};
pub use rotation::{rotate_half, rotate_left, rotate_right};

/// Which way [`resize`] scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeDirection {
    Larger,
    Smaller,
}

/// Which way [`rotate`] turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotateDirection {
    /// 90 degrees counter-clockwise.
    Left,
    /// 90 degrees clockwise.
    Right,
}

/// Error for an unrecognized direction word.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected one of {expected}, got '{got}'")]
pub struct ParseDirectionError {
    expected: &'static str,
    got: String,
}

impl FromStr for ResizeDirection {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "larger" | "up" => Ok(ResizeDirection::Larger),
            "smaller" | "down" => Ok(ResizeDirection::Smaller),
            _ => Err(ParseDirectionError {
                expected: "larger|smaller",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for RotateDirection {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "ccw" => Ok(RotateDirection::Left),
            "right" | "cw" => Ok(RotateDirection::Right),
            _ => Err(ParseDirectionError {
                expected: "left|right",
                got: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ResizeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResizeDirection::Larger => "larger",
            ResizeDirection::Smaller => "smaller",
        })
    }
}

impl fmt::Display for RotateDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RotateDirection::Left => "left",
            RotateDirection::Right => "right",
        })
    }
}

/// Resize by a factor of two in `direction`.
///
/// # Arguments
///
/// * `image` - The image to resize; it is not modified
/// * `direction` - `Larger` doubles both dimensions, `Smaller` halves them
///
/// # Returns
///
/// A new buffer with the resized image.
///
/// # Errors
///
/// Returns `EditError::InvalidDimension` when the result would be empty or
/// would not fit in `u32`.
pub fn resize(image: &PixelBuffer, direction: ResizeDirection) -> Result<PixelBuffer, EditError> {
    match direction {
        ResizeDirection::Larger => make_larger(image),
        ResizeDirection::Smaller => make_smaller(image),
    }
}

/// Dimensions [`resize`] would produce, without allocating.
pub fn resized_dimensions(
    image: &PixelBuffer,
    direction: ResizeDirection,
) -> Result<(u32, u32), EditError> {
    match direction {
        ResizeDirection::Larger => larger_dimensions(image),
        ResizeDirection::Smaller => smaller_dimensions(image),
    }
}

/// Rotate a quarter turn in `direction`.
pub fn rotate(image: &PixelBuffer, direction: RotateDirection) -> PixelBuffer {
    match direction {
        RotateDirection::Left => rotate_left(image),
        RotateDirection::Right => rotate_right(image),
    }
}
