//! Headless preview run
//!
//! Drives a [`TrajectoryView`] through the global event bus the same way a
//! live cell does: a background frame, bead passes separated by breaks, and
//! time metrics. The last composed frame is written to disk.

use anyhow::Context;
use gluekit_core::{
    event_bus, AppEvent, EventBus, FrameMessage, MetricsEvent, PointMessage, TrajectoryEvent,
};
use gluekit_settings::Config;
use gluekit_visualizer::{DisplayLoop, LatestFrameSurface, TrajectoryAdapter, TrajectoryView};
use image::{Rgb, RgbImage};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Points published per bead pass
const POINTS_PER_PASS: usize = 60;

/// Summary of a finished preview run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSummary {
    pub passes: usize,
    pub points_published: usize,
    pub ticks: u64,
    pub frames_presented: u64,
}

/// Run the simulated dispensing job and save the final frame to `output`
pub async fn run_preview(
    config: &Config,
    output: &Path,
    passes: usize,
) -> anyhow::Result<PreviewSummary> {
    let settings = &config.trajectory;
    let surface = LatestFrameSurface::new();
    let view = Arc::new(
        TrajectoryView::new(settings, surface.clone()).context("Failed to create trajectory view")?,
    );

    let bus = event_bus();
    let adapter = TrajectoryAdapter::attach(bus, Arc::clone(&view));
    let display = DisplayLoop::spawn(
        Arc::clone(&view),
        Duration::from_millis(settings.display_interval_ms),
    );

    let points_published =
        publish_job(bus, settings.image_width, settings.image_height, passes).await;

    // Let at least one more tick pick up the tail of the last pass
    tokio::time::sleep(Duration::from_millis(settings.display_interval_ms * 2)).await;
    let ticks = display.stop().await;
    if !adapter.detach(bus) {
        warn!("Trajectory adapter was already detached");
    }

    let frame = surface
        .latest()
        .context("No frame was presented during the preview")?;
    frame
        .save(output)
        .with_context(|| format!("Failed to write preview to {}", output.display()))?;

    let summary = PreviewSummary {
        passes,
        points_published,
        ticks,
        frames_presented: surface.present_count(),
    };
    info!(
        "Preview written to {} ({} points, {} ticks)",
        output.display(),
        summary.points_published,
        summary.ticks
    );
    Ok(summary)
}

async fn publish_job(bus: &EventBus, width: u32, height: u32, passes: usize) -> usize {
    let send = |event: AppEvent| {
        if let Err(e) = bus.publish(event) {
            warn!("Event dropped: {}", e);
        }
    };

    send(AppEvent::Trajectory(TrajectoryEvent::Image(FrameMessage::new(
        background(width, height),
    ))));
    send(AppEvent::Trajectory(TrajectoryEvent::EnableDrawing));

    let step = Duration::from_millis(5);
    let total = (passes * POINTS_PER_PASS) as f64 * step.as_secs_f64();
    send(AppEvent::Metrics(MetricsEvent::EstimatedTime(total)));

    let mut published = 0;
    for pass in 0..passes {
        if pass > 0 {
            send(AppEvent::Trajectory(TrajectoryEvent::Break));
        }
        for (x, y) in bead_pass(pass, passes, width, height) {
            send(AppEvent::Trajectory(TrajectoryEvent::Point(PointMessage::new(x, y))));
            published += 1;
            let left = total - published as f64 * step.as_secs_f64();
            send(AppEvent::Metrics(MetricsEvent::TimeLeft(left.max(0.0))));
            tokio::time::sleep(step).await;
        }
    }

    published
}

/// One sinusoidal bead across the frame, offset vertically per pass
fn bead_pass(pass: usize, passes: usize, width: u32, height: u32) -> Vec<(f64, f64)> {
    let w = f64::from(width);
    let h = f64::from(height);
    let lane = h * (pass as f64 + 1.0) / (passes as f64 + 1.0);
    let amplitude = h / (4.0 * (passes as f64 + 1.0));

    (0..POINTS_PER_PASS)
        .map(|i| {
            let t = i as f64 / (POINTS_PER_PASS - 1) as f64;
            let x = w * (0.05 + 0.9 * t);
            let y = lane + amplitude * (t * std::f64::consts::TAU * 2.0).sin();
            (x, y)
        })
        .collect()
}

/// Grey vertical gradient standing in for a camera frame
fn background(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |_, y| {
        let shade = 30 + (y * 60 / height.max(1)) as u8;
        Rgb([shade, shade, shade])
    })
}
