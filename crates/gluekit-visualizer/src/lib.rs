//! # GlueKit Visualizer
//!
//! Live trajectory preview for the dispensing cell: a bounded trail of robot
//! positions drawn over the latest camera frame at a fixed refresh rate.

pub mod trajectory;

pub use trajectory::{
    draw_icon_at_position, load_marker_icon, smooth_points, split_segments, trail_band,
    trail_color, trail_thickness, DisplayLoop, FrameSurface, LatestFrameSurface, RenderStats,
    TrailBand, TrailBuffer, TrailOptions, TrailRenderer, TrajectoryAdapter, TrajectoryManager,
    TrajectoryView,
};
