//! Trajectory trail preview
//!
//! This module provides:
//! - Bounded, thread-safe trail of robot positions (buffer, manager)
//! - Segment splitting and smoothing
//! - Gradient trail rendering onto camera frames
//! - The preview view, its display loop and the event bus adapter

pub mod adapter;
pub mod buffer;
pub mod display_loop;
pub mod manager;
pub mod marker;
pub mod renderer;
pub mod segments;
pub mod style;
pub mod view;

pub use adapter::TrajectoryAdapter;
pub use buffer::TrailBuffer;
pub use display_loop::DisplayLoop;
pub use manager::{TrailOptions, TrajectoryManager};
pub use marker::{draw_icon_at_position, draw_position_dot, load_marker_icon};
pub use renderer::{RenderStats, TrailRenderer};
pub use segments::{smooth_points, split_segments};
pub use style::{trail_band, trail_color, trail_thickness, TrailBand};
pub use view::{FrameSurface, LatestFrameSurface, TrajectoryView};
