use clap::Parser;
use gluekit::preview::run_preview;
use gluekit::{init_logging, Config, BUILD_DATE, VERSION};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gluekit-preview", version, about = "Headless glue trajectory preview")]
struct Cli {
    /// Configuration file (.toml or .json); defaults to the user config dir
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Where to write the final preview frame
    #[arg(long, short, default_value = "trajectory_preview.png")]
    output: PathBuf,

    /// Number of simulated bead passes
    #[arg(long, default_value_t = 3)]
    passes: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => Config::load_from_file(&path)?,
        None => Config::load_or_default(&Config::default_path()?)?,
    };

    init_logging(&config.logging)?;
    tracing::info!("GlueKit {} (built {})", VERSION, BUILD_DATE);

    let runtime = tokio::runtime::Runtime::new()?;
    let summary = runtime.block_on(run_preview(&config, &cli.output, cli.passes))?;
    tracing::info!(
        "Done: {} passes, {} frames presented",
        summary.passes,
        summary.frames_presented
    );

    Ok(())
}
