//! # GlueKit Core
//!
//! Core types, errors, and utilities for the GlueKit trajectory preview.
//! Provides the pixel/sample data model, shared-state aliases and the
//! application event bus that feeds the preview from the cell controller.

pub mod data;
pub mod error;
pub mod event_bus;
pub mod types;

pub use data::{PixelPoint, PositionSample};

pub use error::{Error, RenderError, Result, TrajectoryError};

// Re-export event bus for convenience
pub use event_bus::{
    event_bus, AppEvent, Delivery, EventBus, EventBusError, EventCategory, EventFilter,
    FrameMessage, MetricsEvent, PointMessage, SubscriptionId, TrajectoryEvent,
};

pub use types::{thread_safe_none, DataCallback, ThreadSafeOption};
