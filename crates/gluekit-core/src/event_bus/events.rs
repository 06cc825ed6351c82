//! Event type definitions for the event bus.
//!
//! Events are cloneable so the broadcast channel can fan them out. Camera
//! frames travel behind an `Arc` and are skipped when an event is serialized
//! for logging.

use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::data::PixelPoint;

/// Root event enum for all application events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppEvent {
    /// Trajectory preview feed
    Trajectory(TrajectoryEvent),
    /// Cycle time metrics
    Metrics(MetricsEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Trajectory(_) => EventCategory::Trajectory,
            AppEvent::Metrics(_) => EventCategory::Metrics,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Trajectory(e) => e.description(),
            AppEvent::Metrics(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Trajectory preview events.
    Trajectory,
    /// Cycle time metric events.
    Metrics,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Trajectory => write!(f, "Trajectory"),
            EventCategory::Metrics => write!(f, "Metrics"),
        }
    }
}

/// A trajectory point as published by the control loop
///
/// Missing coordinates read as zero; fractional coordinates are truncated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointMessage {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

impl PointMessage {
    /// Create a message carrying both coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    /// Pixel position described by this message
    pub fn to_pixel(&self) -> PixelPoint {
        PixelPoint::new(
            self.x.unwrap_or(0.0) as i32,
            self.y.unwrap_or(0.0) as i32,
        )
    }
}

/// A camera frame for the preview background
///
/// `image: None` asks the preview to fall back to its placeholder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameMessage {
    #[serde(skip)]
    pub image: Option<Arc<RgbImage>>,
}

impl FrameMessage {
    pub fn new(image: RgbImage) -> Self {
        Self {
            image: Some(Arc::new(image)),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Trajectory preview events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TrajectoryEvent {
    /// New robot position
    Point(PointMessage),
    /// Start a new, unconnected segment with the next point
    Break,
    /// New background frame
    Image(FrameMessage),
    /// Start drawing the trail
    EnableDrawing,
    /// Stop drawing the trail and clear it
    DisableDrawing,
}

impl TrajectoryEvent {
    /// Get a short description of this event
    pub fn description(&self) -> String {
        match self {
            TrajectoryEvent::Point(p) => format!("Trajectory point {}", p.to_pixel()),
            TrajectoryEvent::Break => "Trajectory break".to_string(),
            TrajectoryEvent::Image(frame) => match &frame.image {
                Some(img) => format!("Frame {}x{}", img.width(), img.height()),
                None => "Empty frame".to_string(),
            },
            TrajectoryEvent::EnableDrawing => "Drawing enabled".to_string(),
            TrajectoryEvent::DisableDrawing => "Drawing disabled".to_string(),
        }
    }
}

/// Cycle time metric events
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MetricsEvent {
    /// Estimated total cycle time in seconds
    EstimatedTime(f64),
    /// Remaining cycle time in seconds
    TimeLeft(f64),
}

impl MetricsEvent {
    /// Get a short description of this event
    pub fn description(&self) -> String {
        match self {
            MetricsEvent::EstimatedTime(s) => format!("Estimated time {:.2} s", s),
            MetricsEvent::TimeLeft(s) => format!("Time left {:.2} s", s),
        }
    }
}
