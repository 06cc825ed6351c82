//! Data models for the trajectory preview
//!
//! This module provides:
//! - Pixel-space positions reported by the perception/control loop
//! - Timestamped trail samples stored by the trail buffer

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in preview pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    /// Column, growing to the right
    pub x: i32,
    /// Row, growing downwards
    pub y: i32,
}

impl PixelPoint {
    /// Create a new pixel point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &PixelPoint) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        (dx * dx + dy * dy).sqrt()
    }

    /// Point at fraction `t` of the way towards `other`, truncated toward zero
    pub fn lerp(&self, other: &PixelPoint, t: f64) -> PixelPoint {
        let x = f64::from(self.x) + t * (f64::from(other.x) - f64::from(self.x));
        let y = f64::from(self.y) + t * (f64::from(other.y) - f64::from(self.y));
        PixelPoint::new(x as i32, y as i32)
    }

    /// Whether the point lies inside a `width` x `height` frame
    pub fn is_within(&self, width: u32, height: u32) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as u32) < width && (self.y as u32) < height
    }
}

impl From<(i32, i32)> for PixelPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for PixelPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One entry of the trajectory trail
///
/// Created by the trail manager for every incoming point (and for every
/// interpolated point between two of them). Immutable once stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    /// Pixel position of the sample
    pub position: PixelPoint,
    /// Wall-clock time in seconds since the Unix epoch
    pub timestamp: f64,
    /// First sample of a new, unconnected segment
    pub is_break_start: bool,
}

impl PositionSample {
    /// Create a sample stamped with the current time
    pub fn now(position: PixelPoint, is_break_start: bool) -> Self {
        Self::with_timestamp(position, unix_seconds(), is_break_start)
    }

    /// Create a sample with an explicit timestamp
    pub fn with_timestamp(position: PixelPoint, timestamp: f64, is_break_start: bool) -> Self {
        Self {
            position,
            timestamp,
            is_break_start,
        }
    }

    pub fn x(&self) -> i32 {
        self.position.x
    }

    pub fn y(&self) -> i32 {
        self.position.y
    }
}

/// Current wall-clock time as fractional seconds
pub fn unix_seconds() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = PixelPoint::new(0, 0);
        let b = PixelPoint::new(3, 4);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn test_lerp_truncates_toward_zero() {
        let a = PixelPoint::new(0, 0);
        let b = PixelPoint::new(10, -10);
        assert_eq!(a.lerp(&b, 0.25), PixelPoint::new(2, -2));
        assert_eq!(a.lerp(&b, 1.0), b);
    }

    #[test]
    fn test_extreme_coordinates() {
        let a = PixelPoint::new(i32::MIN, 0);
        let b = PixelPoint::new(i32::MAX, 0);
        assert_eq!(a.distance_to(&b), f64::from(i32::MAX) - f64::from(i32::MIN));
        assert_eq!(a.lerp(&b, 0.5), PixelPoint::new(0, 0));
        assert_eq!(a.lerp(&b, 1.0), b);
    }

    #[test]
    fn test_is_within() {
        assert!(PixelPoint::new(0, 0).is_within(10, 10));
        assert!(PixelPoint::new(9, 9).is_within(10, 10));
        assert!(!PixelPoint::new(10, 5).is_within(10, 10));
        assert!(!PixelPoint::new(-1, 5).is_within(10, 10));
    }

    #[test]
    fn test_sample_timestamp_is_recent() {
        let sample = PositionSample::now(PixelPoint::new(1, 2), true);
        assert!(sample.timestamp > 1_600_000_000.0);
        assert_eq!(sample.x(), 1);
        assert_eq!(sample.y(), 2);
        assert!(sample.is_break_start);
    }
}
