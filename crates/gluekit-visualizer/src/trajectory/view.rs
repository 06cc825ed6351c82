//! Trajectory preview view
//!
//! Holds the background frame and the trail, and composes one output frame
//! per display tick. All setters take `&self` so the view can be shared
//! between the event adapter and the display loop behind an `Arc`; none of
//! them report anything back to the caller.

use gluekit_core::{
    thread_safe_none, FrameMessage, PointMessage, Result, ThreadSafeOption, TrajectoryError,
};
use gluekit_settings::TrajectorySettings;
use image::imageops::FilterType;
use image::{RgbImage, RgbaImage};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

use super::manager::{TrailOptions, TrajectoryManager};
use super::marker::{draw_icon_at_position, draw_position_dot, load_marker_icon};
use super::renderer::{RenderStats, TrailRenderer};

/// Destination for composed preview frames
pub trait FrameSurface: Send {
    /// Show a freshly composed frame
    fn present(&mut self, frame: &RgbImage);
}

/// Surface that keeps only the most recent frame
///
/// Clones share the same frame slot, so one clone can be handed to the view
/// while another is read by whoever displays or saves the preview.
#[derive(Debug, Clone, Default)]
pub struct LatestFrameSurface {
    frame: ThreadSafeOption<RgbImage>,
    presented: Arc<AtomicU64>,
}

impl LatestFrameSurface {
    pub fn new() -> Self {
        Self {
            frame: thread_safe_none(),
            presented: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Copy of the last presented frame
    pub fn latest(&self) -> Option<RgbImage> {
        self.frame.lock().clone()
    }

    /// Number of frames presented so far
    pub fn present_count(&self) -> u64 {
        self.presented.load(Ordering::Relaxed)
    }
}

impl FrameSurface for LatestFrameSurface {
    fn present(&mut self, frame: &RgbImage) {
        *self.frame.lock() = Some(frame.clone());
        self.presented.fetch_add(1, Ordering::Relaxed);
    }
}

#[derive(Debug, Clone, Default)]
struct TimeMetrics {
    estimated_time: f64,
    time_left: f64,
    estimated_label: String,
    time_left_label: String,
}

fn format_seconds(seconds: f64) -> String {
    format!("{:.2} s", seconds)
}

/// Live trajectory preview
pub struct TrajectoryView {
    width: u32,
    height: u32,
    manager: Arc<TrajectoryManager>,
    renderer: TrailRenderer,
    base_frame: Mutex<RgbImage>,
    placeholder_path: Option<PathBuf>,
    marker_icon: Option<RgbaImage>,
    show_current_point: bool,
    drawing_enabled: AtomicBool,
    surface: Mutex<Box<dyn FrameSurface>>,
    ticks: AtomicU64,
    metrics: Mutex<TimeMetrics>,
}

impl TrajectoryView {
    /// Create a view and present the placeholder frame once
    pub fn new(settings: &TrajectorySettings, surface: impl FrameSurface + 'static) -> Result<Self> {
        if settings.image_width == 0 || settings.image_height == 0 {
            return Err(TrajectoryError::InvalidFrameSize {
                width: settings.image_width,
                height: settings.image_height,
            }
            .into());
        }
        if settings.trail_length == 0 {
            return Err(TrajectoryError::ZeroCapacity.into());
        }

        let marker_icon = match (&settings.marker_icon_path, settings.show_current_point) {
            (Some(path), true) => match load_marker_icon(path, settings.marker_size) {
                Ok(icon) => Some(icon),
                Err(e) => {
                    warn!("Marker icon unavailable, drawing a dot instead: {}", e);
                    None
                }
            },
            _ => None,
        };

        let view = Self {
            width: settings.image_width,
            height: settings.image_height,
            manager: Arc::new(TrajectoryManager::new(TrailOptions::from(settings))),
            renderer: TrailRenderer::from(settings),
            base_frame: Mutex::new(RgbImage::new(settings.image_width, settings.image_height)),
            placeholder_path: settings.placeholder_path.clone(),
            marker_icon,
            show_current_point: settings.show_current_point,
            drawing_enabled: AtomicBool::new(false),
            surface: Mutex::new(Box::new(surface)),
            ticks: AtomicU64::new(0),
            metrics: Mutex::new(TimeMetrics {
                estimated_label: format_seconds(0.0),
                time_left_label: format_seconds(0.0),
                ..TimeMetrics::default()
            }),
        };

        view.load_placeholder();
        Ok(view)
    }

    /// Replace the background with the placeholder and present it
    pub fn load_placeholder(&self) {
        let placeholder = self
            .placeholder_path
            .as_deref()
            .filter(|path| path.exists())
            .and_then(|path| self.read_placeholder(path))
            .unwrap_or_else(|| RgbImage::new(self.width, self.height));

        self.surface.lock().present(&placeholder);
        *self.base_frame.lock() = placeholder;
    }

    fn read_placeholder(&self, path: &Path) -> Option<RgbImage> {
        match image::open(path) {
            Ok(img) => Some(self.fit(&img.to_rgb8())),
            Err(e) => {
                warn!("Failed to load placeholder {}: {}", path.display(), e);
                None
            }
        }
    }

    fn fit(&self, frame: &RgbImage) -> RgbImage {
        if frame.dimensions() == (self.width, self.height) {
            frame.clone()
        } else {
            image::imageops::resize(frame, self.width, self.height, FilterType::Triangle)
        }
    }

    /// Set a new background frame.
    ///
    /// An empty message (or an empty image) restores the placeholder.
    /// A new frame clears the trail.
    pub fn set_image(&self, message: FrameMessage) {
        let Some(image) = message.image else {
            self.load_placeholder();
            return;
        };
        if image.width() == 0 || image.height() == 0 {
            warn!("Ignoring empty {}x{} frame", image.width(), image.height());
            self.load_placeholder();
            return;
        }

        let frame = self.fit(&image);
        *self.base_frame.lock() = frame;
        self.manager.clear();
    }

    /// Feed a robot position; `None` is ignored
    pub fn update_trajectory_point(&self, message: Option<&PointMessage>) {
        if let Some(message) = message {
            self.manager.update_position(message.to_pixel());
        }
    }

    /// Start a new unconnected segment with the next point
    pub fn break_trajectory(&self) {
        self.manager.request_break();
    }

    pub fn enable_drawing(&self) {
        self.drawing_enabled.store(true, Ordering::SeqCst);
        debug!("Trajectory drawing enabled");
    }

    /// Stop drawing and clear the trail
    pub fn disable_drawing(&self) {
        self.drawing_enabled.store(false, Ordering::SeqCst);
        self.manager.clear();
        debug!("Trajectory drawing disabled");
    }

    pub fn is_drawing_enabled(&self) -> bool {
        self.drawing_enabled.load(Ordering::SeqCst)
    }

    pub fn set_estimated_time(&self, seconds: f64) {
        self.metrics.lock().estimated_time = seconds;
    }

    pub fn set_time_left(&self, seconds: f64) {
        self.metrics.lock().time_left = seconds;
    }

    /// `(estimated, time left)` labels as of the last display tick
    pub fn metric_labels(&self) -> (String, String) {
        let metrics = self.metrics.lock();
        (
            metrics.estimated_label.clone(),
            metrics.time_left_label.clone(),
        )
    }

    /// Compose and present one frame over the current background
    pub fn update_display(&self) -> RenderStats {
        let mut frame = self.base_frame.lock().clone();
        let mut stats = RenderStats::default();

        if self.is_drawing_enabled() {
            let snapshot = self.manager.snapshot();
            if !snapshot.is_empty() {
                match self.renderer.draw(&mut frame, &snapshot) {
                    Ok(s) => stats = s,
                    Err(e) => warn!("Trail not drawn this tick: {}", e),
                }
            }
            if self.show_current_point {
                self.draw_marker(&mut frame);
            }
        }

        self.surface.lock().present(&frame);
        self.ticks.fetch_add(1, Ordering::Relaxed);

        let mut metrics = self.metrics.lock();
        metrics.estimated_label = format_seconds(metrics.estimated_time);
        metrics.time_left_label = format_seconds(metrics.time_left);

        stats
    }

    fn draw_marker(&self, frame: &mut RgbImage) {
        let Some(position) = self.manager.current_position() else {
            return;
        };
        match &self.marker_icon {
            Some(icon) => {
                draw_icon_at_position(icon, frame, position);
            }
            None => draw_position_dot(frame, position),
        }
    }

    /// Shared handle for producers feeding positions from other threads
    pub fn trajectory_manager(&self) -> Arc<TrajectoryManager> {
        Arc::clone(&self.manager)
    }

    pub fn image_dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of display ticks served
    pub fn tick_count(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for TrajectoryView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrajectoryView")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("drawing_enabled", &self.is_drawing_enabled())
            .field("trail_len", &self.manager.len())
            .field("ticks", &self.tick_count())
            .finish()
    }
}
