//! # Event Bus Module
//!
//! Publish/subscribe channel between the cell controller and the preview.
//! Publishers emit typed events without knowing subscribers; subscribers
//! filter by category and receive either synchronously or from a tokio task.
//!
//! ```rust,ignore
//! use gluekit_core::event_bus::{event_bus, AppEvent, EventCategory, EventFilter, PointMessage, TrajectoryEvent};
//!
//! let sub = event_bus().subscribe(
//!     EventFilter::Categories(vec![EventCategory::Trajectory]),
//!     |event| tracing::debug!("{}", event.description()),
//! );
//!
//! event_bus().publish(AppEvent::Trajectory(TrajectoryEvent::Point(PointMessage::new(10.0, 20.0))));
//! event_bus().unsubscribe(sub);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
