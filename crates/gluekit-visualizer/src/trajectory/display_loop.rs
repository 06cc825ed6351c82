use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use super::view::TrajectoryView;

/// Fixed-rate refresh of a [`TrajectoryView`].
///
/// Runs as a tokio task; late ticks are skipped rather than replayed.
/// Dropping the handle stops the loop.
#[derive(Debug)]
pub struct DisplayLoop {
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<u64>>,
}

impl DisplayLoop {
    /// Start refreshing `view` every `interval`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(view: Arc<TrajectoryView>, interval: Duration) -> Self {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let interval = interval.max(Duration::from_millis(1));

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut ticks = 0u64;

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        view.update_display();
                        ticks += 1;
                    }
                }
            }

            debug!("Display loop stopped after {} ticks", ticks);
            ticks
        });

        info!("Display loop started ({} ms)", interval.as_millis());
        Self {
            stop: Some(stop_tx),
            task: Some(task),
        }
    }

    /// Stop the loop and wait for it, returning the number of ticks served.
    ///
    /// A loop task that panicked is reported at `error` and counts as 0 ticks.
    pub async fn stop(mut self) -> u64 {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        let Some(task) = self.task.take() else {
            return 0;
        };
        match task.await {
            Ok(ticks) => ticks,
            Err(e) => {
                error!("Display loop task failed: {}", e);
                0
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for DisplayLoop {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::view::{FrameSurface, LatestFrameSurface};
    use gluekit_settings::TrajectorySettings;
    use image::RgbImage;

    fn view(surface: LatestFrameSurface) -> Arc<TrajectoryView> {
        let settings = TrajectorySettings {
            image_width: 32,
            image_height: 32,
            ..TrajectorySettings::default()
        };
        Arc::new(TrajectoryView::new(&settings, surface).unwrap())
    }

    #[tokio::test]
    async fn test_loop_ticks_until_stopped() {
        let surface = LatestFrameSurface::new();
        let view = view(surface.clone());

        let display = DisplayLoop::spawn(view.clone(), Duration::from_millis(5));
        assert!(display.is_running());
        tokio::time::sleep(Duration::from_millis(60)).await;
        let ticks = display.stop().await;

        assert!(ticks >= 2, "expected several ticks, got {}", ticks);
        assert_eq!(view.tick_count(), ticks);
        // Placeholder presentation plus one frame per tick
        assert_eq!(surface.present_count(), ticks + 1);
    }

    struct FailingSurface {
        presented: usize,
    }

    impl FrameSurface for FailingSurface {
        fn present(&mut self, _frame: &RgbImage) {
            self.presented += 1;
            if self.presented > 1 {
                panic!("surface gone");
            }
        }
    }

    #[tokio::test]
    async fn test_stop_after_task_panic() {
        let settings = TrajectorySettings {
            image_width: 16,
            image_height: 16,
            ..TrajectorySettings::default()
        };
        let view = Arc::new(
            TrajectoryView::new(&settings, FailingSurface { presented: 0 }).unwrap(),
        );

        let display = DisplayLoop::spawn(view, Duration::from_millis(5));
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(!display.is_running());
        assert_eq!(display.stop().await, 0);
    }

    #[tokio::test]
    async fn test_drop_stops_loop() {
        let view = view(LatestFrameSurface::new());
        let display = DisplayLoop::spawn(view.clone(), Duration::from_millis(5));
        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(display);

        tokio::time::sleep(Duration::from_millis(20)).await;
        let after_drop = view.tick_count();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(view.tick_count(), after_drop);
    }
}
