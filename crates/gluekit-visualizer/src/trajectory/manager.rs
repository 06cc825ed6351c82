//! Trail manager
//!
//! Owns the trail buffer and the last/current position bookkeeping.
//! Producers (the control loop) call [`TrajectoryManager::update_position`]
//! from any thread; the display loop calls [`TrajectoryManager::snapshot`].
//! A single mutex guards all of it, and the display side only holds it for
//! the duration of a copy.

use gluekit_core::data::unix_seconds;
use gluekit_core::{PixelPoint, PositionSample};
use gluekit_settings::TrajectorySettings;
use parking_lot::Mutex;
use tracing::{debug, trace};

use super::buffer::TrailBuffer;

/// Trail ingestion options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailOptions {
    /// Maximum number of samples kept
    pub capacity: usize,
    /// Insert intermediate samples between distant points
    pub interpolate_motion: bool,
    /// Intermediate samples per gap
    pub interpolation_points: usize,
    /// Gaps longer than this (pixels) are interpolated
    pub interpolation_threshold: f64,
}

impl Default for TrailOptions {
    fn default() -> Self {
        Self {
            capacity: 100,
            interpolate_motion: true,
            interpolation_points: 3,
            interpolation_threshold: 5.0,
        }
    }
}

impl From<&TrajectorySettings> for TrailOptions {
    fn from(settings: &TrajectorySettings) -> Self {
        Self {
            capacity: settings.trail_length,
            interpolate_motion: settings.interpolate_motion,
            interpolation_points: settings.interpolation_points,
            interpolation_threshold: settings.interpolation_threshold,
        }
    }
}

#[derive(Debug)]
struct TrailState {
    buffer: TrailBuffer,
    current_position: Option<PixelPoint>,
    last_position: Option<PixelPoint>,
    break_pending: bool,
}

/// Thread-safe bounded trajectory trail
#[derive(Debug)]
pub struct TrajectoryManager {
    options: TrailOptions,
    state: Mutex<TrailState>,
}

impl TrajectoryManager {
    pub fn new(options: TrailOptions) -> Self {
        Self {
            state: Mutex::new(TrailState {
                buffer: TrailBuffer::new(options.capacity),
                current_position: None,
                last_position: None,
                break_pending: false,
            }),
            options,
        }
    }

    /// Manager with default options and the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(TrailOptions {
            capacity,
            ..TrailOptions::default()
        })
    }

    pub fn options(&self) -> &TrailOptions {
        &self.options
    }

    /// Feed a new robot position into the trail.
    ///
    /// A pending break makes this point the start of a new segment. Otherwise
    /// the point continues the current segment, preceded by interpolated
    /// samples when it is far from the previous one.
    pub fn update_position(&self, position: PixelPoint) {
        let now = unix_seconds();
        let mut state = self.state.lock();

        if state.break_pending {
            state.last_position = None;
            state.break_pending = false;
        } else {
            state.last_position = state.current_position;
        }
        state.current_position = Some(position);

        let Some(last) = state.last_position else {
            trace!("Segment start at {}", position);
            state
                .buffer
                .push(PositionSample::with_timestamp(position, now, true));
            return;
        };

        if self.options.interpolate_motion
            && last.distance_to(&position) > self.options.interpolation_threshold
        {
            let steps = self.options.interpolation_points;
            for i in 1..=steps {
                let t = i as f64 / (steps + 1) as f64;
                state
                    .buffer
                    .push(PositionSample::with_timestamp(last.lerp(&position, t), now, false));
            }
        }
        state
            .buffer
            .push(PositionSample::with_timestamp(position, now, false));
    }

    /// Request that the next point starts a new, unconnected segment
    pub fn request_break(&self) {
        self.state.lock().break_pending = true;
        debug!("Trajectory break requested");
    }

    /// Drop all samples and forget the last/current positions
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.buffer.clear();
        state.current_position = None;
        state.last_position = None;
        debug!("Trajectory trail cleared");
    }

    /// Point-in-time copy of the trail, oldest sample first
    pub fn snapshot(&self) -> Vec<PositionSample> {
        self.state.lock().buffer.to_vec()
    }

    pub fn current_position(&self) -> Option<PixelPoint> {
        self.state.lock().current_position
    }

    pub fn is_break_pending(&self) -> bool {
        self.state.lock().break_pending
    }

    pub fn len(&self) -> usize {
        self.state.lock().buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.options.capacity.max(1)
    }
}

impl Default for TrajectoryManager {
    fn default() -> Self {
        Self::new(TrailOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> PixelPoint {
        PixelPoint::new(x, y)
    }

    #[test]
    fn test_first_point_starts_segment() {
        let manager = TrajectoryManager::default();
        manager.update_position(p(10, 10));

        let snapshot = manager.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot[0].is_break_start);
        assert_eq!(manager.current_position(), Some(p(10, 10)));
    }

    #[test]
    fn test_interpolates_long_gap() {
        let manager = TrajectoryManager::default();
        manager.update_position(p(0, 0));
        manager.update_position(p(100, 0));

        let snapshot = manager.snapshot();
        // start + 3 interpolated + destination
        assert_eq!(snapshot.len(), 5);
        let xs: Vec<i32> = snapshot.iter().map(|s| s.x()).collect();
        assert_eq!(xs, vec![0, 25, 50, 75, 100]);
        assert!(snapshot[1..].iter().all(|s| !s.is_break_start));
    }

    #[test]
    fn test_short_gap_not_interpolated() {
        let manager = TrajectoryManager::default();
        manager.update_position(p(0, 0));
        manager.update_position(p(3, 4));

        let snapshot = manager.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert!(!snapshot[1].is_break_start);
    }

    #[test]
    fn test_interpolation_disabled() {
        let manager = TrajectoryManager::new(TrailOptions {
            interpolate_motion: false,
            ..TrailOptions::default()
        });
        manager.update_position(p(0, 0));
        manager.update_position(p(100, 100));

        let snapshot = manager.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot[0].is_break_start);
        assert!(!snapshot[1].is_break_start);
    }

    #[test]
    fn test_break_is_deferred_to_next_point() {
        let manager = TrajectoryManager::default();
        manager.update_position(p(0, 0));
        manager.request_break();

        assert!(manager.is_break_pending());
        assert_eq!(manager.len(), 1);

        manager.update_position(p(200, 200));
        assert!(!manager.is_break_pending());

        let snapshot = manager.snapshot();
        // No interpolation across the break
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot[1].is_break_start);
    }

    #[test]
    fn test_clear_resets_positions() {
        let manager = TrajectoryManager::default();
        manager.update_position(p(0, 0));
        manager.update_position(p(50, 0));
        manager.clear();

        assert!(manager.snapshot().is_empty());
        assert_eq!(manager.current_position(), None);

        manager.update_position(p(60, 0));
        assert!(manager.snapshot()[0].is_break_start);
    }

    #[test]
    fn test_far_apart_points_interpolate() {
        let manager = TrajectoryManager::default();
        manager.update_position(p(-2_000_000_000, 0));
        manager.update_position(p(2_000_000_000, 0));

        let xs: Vec<i32> = manager.snapshot().iter().map(|s| s.x()).collect();
        assert_eq!(
            xs,
            vec![-2_000_000_000, -1_000_000_000, 0, 1_000_000_000, 2_000_000_000]
        );
        assert_eq!(manager.current_position(), Some(p(2_000_000_000, 0)));
    }

    #[test]
    fn test_from_settings() {
        let settings = TrajectorySettings {
            trail_length: 12,
            interpolation_points: 1,
            ..TrajectorySettings::default()
        };
        let options = TrailOptions::from(&settings);
        assert_eq!(options.capacity, 12);
        assert_eq!(options.interpolation_points, 1);
        assert!(options.interpolate_motion);
    }
}
