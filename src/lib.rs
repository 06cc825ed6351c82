//! # GlueKit
//!
//! Live trajectory preview for glue-dispensing robotic cells.
//!
//! ## Architecture
//!
//! GlueKit is organized as a workspace with multiple crates:
//!
//! 1. **gluekit-core** - Errors, pixel/sample types, event bus
//! 2. **gluekit-settings** - Configuration, validation, persistence
//! 3. **gluekit-visualizer** - Trail buffer, renderer, preview view and display loop
//! 4. **gluekit** - Logging setup and the headless preview binary

pub mod preview;

pub use gluekit_core::{
    event_bus, AppEvent, Error, EventBus, FrameMessage, MetricsEvent, PixelPoint, PointMessage,
    PositionSample, Result, TrajectoryEvent,
};
pub use gluekit_settings::{Config, LoggingSettings, TrajectorySettings};
pub use gluekit_visualizer::{
    DisplayLoop, FrameSurface, LatestFrameSurface, RenderStats, TrailRenderer, TrajectoryAdapter,
    TrajectoryManager, TrajectoryView,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging from the logging settings
///
/// Sets up structured logging with:
/// - `RUST_LOG` support, falling back to `settings.level`
/// - Pretty multi-line or compact single-line console output
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| anyhow::anyhow!("Invalid log filter '{}': {}", settings.level, e))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_names(true)
        .with_line_number(true);

    if settings.pretty {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.compact())
            .try_init()?;
    }

    Ok(())
}
