//! Trail renderer
//! Composites a trail snapshot onto a background frame using tiny-skia for
//! anti-aliased strokes.
//!
//! Features:
//! - Segments split at trajectory breaks, never joined across them
//! - Moving-average smoothing before drawing
//! - Progress-based color bands and growing stroke width
//! - Two-stroke highlight on the newest points of each segment

use gluekit_core::{PixelPoint, PositionSample, RenderError};
use gluekit_settings::TrajectorySettings;
use image::{Rgb, RgbImage};
use tiny_skia::{LineCap, Paint, PathBuilder, Pixmap, Stroke, Transform};
use tracing::{trace, warn};

use super::segments::{smooth_points, split_segments};
use super::style::{
    trail_color, trail_thickness, HIGHLIGHT_CORE, HIGHLIGHT_CORE_WIDTH, HIGHLIGHT_HALO,
    HIGHLIGHT_HALO_WIDTH,
};

/// Counters describing what a render pass drew
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Segments with at least two points
    pub segments: usize,
    /// Line strokes drawn, highlight passes included
    pub lines_drawn: usize,
    /// Lines skipped because an endpoint was off-frame or the path was degenerate
    pub lines_skipped: usize,
}

impl RenderStats {
    pub fn is_empty(&self) -> bool {
        self.lines_drawn == 0
    }
}

/// Draws trail snapshots over background frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailRenderer {
    smoothing_window: usize,
    highlight_points: usize,
}

impl Default for TrailRenderer {
    fn default() -> Self {
        Self {
            smoothing_window: 3,
            highlight_points: 5,
        }
    }
}

impl From<&TrajectorySettings> for TrailRenderer {
    fn from(settings: &TrajectorySettings) -> Self {
        Self::new(settings.smoothing_window, settings.highlight_points)
    }
}

impl TrailRenderer {
    pub fn new(smoothing_window: usize, highlight_points: usize) -> Self {
        Self {
            smoothing_window: smoothing_window.max(1),
            highlight_points,
        }
    }

    /// Draw `samples` onto `frame` in place.
    ///
    /// Snapshots without a drawable segment leave the frame untouched.
    /// Individual lines that cannot be drawn are skipped; only failing to
    /// set up the drawing surface is reported as an error.
    pub fn draw(
        &self,
        frame: &mut RgbImage,
        samples: &[PositionSample],
    ) -> Result<RenderStats, RenderError> {
        let mut stats = RenderStats::default();
        let segments = split_segments(samples);
        if segments.is_empty() {
            return Ok(stats);
        }

        let (width, height) = frame.dimensions();
        let mut pixmap = pixmap_from_frame(frame)?;

        for (index, segment) in segments.iter().enumerate() {
            let smoothed = smooth_points(segment, self.smoothing_window);
            self.draw_segment(&mut pixmap, index, &smoothed, &mut stats);
            stats.segments += 1;
        }

        copy_pixmap_to_frame(&pixmap, frame);
        trace!(
            "Rendered {} segments ({} lines, {} skipped) on {}x{}",
            stats.segments,
            stats.lines_drawn,
            stats.lines_skipped,
            width,
            height
        );
        Ok(stats)
    }

    fn draw_segment(
        &self,
        pixmap: &mut Pixmap,
        index: usize,
        points: &[PixelPoint],
        stats: &mut RenderStats,
    ) {
        let total = points.len();

        for (i, pair) in points.windows(2).enumerate() {
            let progress = (i + 1) as f32 / total as f32;
            let result = stroke_line(
                pixmap,
                index,
                pair[0],
                pair[1],
                trail_color(progress),
                trail_thickness(progress),
            );
            record(result, stats);
        }

        if self.highlight_points > 1 && total > self.highlight_points {
            let tail = &points[total - self.highlight_points..];
            for pair in tail.windows(2) {
                let halo = stroke_line(
                    pixmap,
                    index,
                    pair[0],
                    pair[1],
                    HIGHLIGHT_HALO,
                    HIGHLIGHT_HALO_WIDTH,
                );
                if record(halo, stats) {
                    let core = stroke_line(
                        pixmap,
                        index,
                        pair[0],
                        pair[1],
                        HIGHLIGHT_CORE,
                        HIGHLIGHT_CORE_WIDTH,
                    );
                    record(core, stats);
                }
            }
        }
    }
}

fn record(result: Result<(), RenderError>, stats: &mut RenderStats) -> bool {
    match result {
        Ok(()) => {
            stats.lines_drawn += 1;
            true
        }
        Err(e @ RenderError::OutOfBounds { .. }) => {
            trace!("Skipping trail line: {}", e);
            stats.lines_skipped += 1;
            false
        }
        Err(e) => {
            warn!("Skipping trail line: {}", e);
            stats.lines_skipped += 1;
            false
        }
    }
}

fn stroke_line(
    pixmap: &mut Pixmap,
    segment: usize,
    from: PixelPoint,
    to: PixelPoint,
    color: Rgb<u8>,
    width: f32,
) -> Result<(), RenderError> {
    let (w, h) = (pixmap.width(), pixmap.height());
    for p in [from, to] {
        if !p.is_within(w, h) {
            return Err(RenderError::OutOfBounds {
                x: p.x,
                y: p.y,
                width: w,
                height: h,
            });
        }
    }

    let mut pb = PathBuilder::new();
    pb.move_to(from.x as f32, from.y as f32);
    pb.line_to(to.x as f32, to.y as f32);
    let path = pb
        .finish()
        .ok_or(RenderError::DegeneratePath { segment })?;

    let mut paint = Paint::default();
    paint.set_color_rgba8(color[0], color[1], color[2], 255);
    paint.anti_alias = true;
    let stroke = Stroke {
        width,
        line_cap: LineCap::Round,
        ..Default::default()
    };

    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    Ok(())
}

fn pixmap_from_frame(frame: &RgbImage) -> Result<Pixmap, RenderError> {
    let (width, height) = frame.dimensions();
    let mut pixmap =
        Pixmap::new(width, height).ok_or(RenderError::SurfaceAllocation { width, height })?;

    for (dst, src) in pixmap
        .data_mut()
        .chunks_exact_mut(4)
        .zip(frame.as_raw().chunks_exact(3))
    {
        dst[..3].copy_from_slice(src);
        dst[3] = 255;
    }
    Ok(pixmap)
}

// The frame is opaque, so premultiplied RGBA equals straight RGB here.
fn copy_pixmap_to_frame(pixmap: &Pixmap, frame: &mut RgbImage) {
    for (dst, src) in frame
        .chunks_exact_mut(3)
        .zip(pixmap.data().chunks_exact(4))
    {
        dst.copy_from_slice(&src[..3]);
    }
}
