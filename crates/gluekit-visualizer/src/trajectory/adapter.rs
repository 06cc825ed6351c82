//! Event bus adapter
//!
//! Routes trajectory and metric events from the bus onto a
//! [`TrajectoryView`]. The view itself knows nothing about the bus.

use gluekit_core::{
    AppEvent, EventBus, EventCategory, EventFilter, MetricsEvent, SubscriptionId, TrajectoryEvent,
};
use std::sync::Arc;
use tracing::trace;

use super::view::TrajectoryView;

/// Live subscription feeding a view from an [`EventBus`]
#[derive(Debug)]
pub struct TrajectoryAdapter {
    subscription: SubscriptionId,
}

impl TrajectoryAdapter {
    /// Subscribe `view` to trajectory and metric events
    pub fn attach(bus: &EventBus, view: Arc<TrajectoryView>) -> Self {
        let subscription = bus.subscribe(
            EventFilter::Categories(vec![EventCategory::Trajectory, EventCategory::Metrics]),
            move |event| Self::dispatch(&view, event),
        );
        Self { subscription }
    }

    /// Unsubscribe; returns false if the subscription was already gone
    pub fn detach(self, bus: &EventBus) -> bool {
        bus.unsubscribe(self.subscription)
    }

    pub fn subscription(&self) -> SubscriptionId {
        self.subscription
    }

    /// Apply one event to the view
    pub fn dispatch(view: &TrajectoryView, event: AppEvent) {
        trace!("{}", event.description());
        match event {
            AppEvent::Trajectory(TrajectoryEvent::Point(point)) => {
                view.update_trajectory_point(Some(&point))
            }
            AppEvent::Trajectory(TrajectoryEvent::Break) => view.break_trajectory(),
            AppEvent::Trajectory(TrajectoryEvent::Image(frame)) => view.set_image(frame),
            AppEvent::Trajectory(TrajectoryEvent::EnableDrawing) => view.enable_drawing(),
            AppEvent::Trajectory(TrajectoryEvent::DisableDrawing) => view.disable_drawing(),
            AppEvent::Metrics(MetricsEvent::EstimatedTime(seconds)) => {
                view.set_estimated_time(seconds)
            }
            AppEvent::Metrics(MetricsEvent::TimeLeft(seconds)) => view.set_time_left(seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::view::LatestFrameSurface;
    use gluekit_core::PointMessage;
    use gluekit_settings::TrajectorySettings;

    fn view() -> Arc<TrajectoryView> {
        let settings = TrajectorySettings {
            image_width: 32,
            image_height: 32,
            ..TrajectorySettings::default()
        };
        Arc::new(TrajectoryView::new(&settings, LatestFrameSurface::new()).unwrap())
    }

    fn point(x: f64, y: f64) -> AppEvent {
        AppEvent::Trajectory(TrajectoryEvent::Point(PointMessage::new(x, y)))
    }

    #[test]
    fn test_events_reach_view() {
        let bus = EventBus::new();
        let view = view();
        let adapter = TrajectoryAdapter::attach(&bus, view.clone());

        bus.publish(AppEvent::Trajectory(TrajectoryEvent::EnableDrawing))
            .unwrap();
        bus.publish(point(1.0, 1.0)).unwrap();
        bus.publish(point(2.0, 2.0)).unwrap();
        bus.publish(AppEvent::Trajectory(TrajectoryEvent::Break)).unwrap();
        bus.publish(point(20.0, 20.0)).unwrap();
        bus.publish(AppEvent::Metrics(MetricsEvent::TimeLeft(4.5)))
            .unwrap();

        assert!(view.is_drawing_enabled());
        let snapshot = view.trajectory_manager().snapshot();
        assert_eq!(snapshot.len(), 3);
        assert!(snapshot[2].is_break_start);

        view.update_display();
        assert_eq!(view.metric_labels().1, "4.50 s");

        assert!(adapter.detach(&bus));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_disable_event_clears_trail() {
        let bus = EventBus::new();
        let view = view();
        let _adapter = TrajectoryAdapter::attach(&bus, view.clone());

        bus.publish(point(3.0, 3.0)).unwrap();
        bus.publish(AppEvent::Trajectory(TrajectoryEvent::DisableDrawing))
            .unwrap();
        assert!(view.trajectory_manager().is_empty());
    }
}
