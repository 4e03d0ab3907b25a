use anyhow::Result;
use clap::Parser;
use pipeline_sim::cli::{self, Cli};
use pipeline_sim::{util, Config};
use std::fs::{self, OpenOptions};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    util::init_data_dir(cli.data_dir.clone());

    // Initialize logging to file (~/.pipeline-sim/logs/pipeline-sim.log)
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false) // Disable ANSI colors in log file
        .init();

    let mut config = Config::load();
    if cli.instant {
        config = config.with_speed(0.0);
    }

    cli::run(cli, config).await
}
