use clap::{Parser, Subcommand};
use env_logger::{Builder, WriteStyle};
use gpulog::config::AppConfig;
use log::error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gpulog", about = "Log and chart NVIDIA GPU usage statistics", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll GPU statistics and append them to a JSONL log, indefinitely
    Record {
        /// Log file to append records to
        path: PathBuf,
        /// Seconds between polls (defaults from gpulog.ini)
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Render the memory-usage history of one device to an image
    Chart {
        /// Log file written by `record`
        path: PathBuf,
        /// Device id to chart
        #[arg(long)]
        device: u32,
        /// Output image path
        #[arg(long)]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration first (without logging)
    let config = AppConfig::new().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        // Fall back to default configuration
        AppConfig::default()
    });

    // Initialise logger with a configured log level
    Builder::new()
        .filter_level(config.get_log_level())
        .write_style(WriteStyle::Always)
        .format_timestamp_secs()
        .init();

    let result = match cli.command {
        Commands::Record { path, interval } => {
            let interval = interval.unwrap_or(config.poller.interval);
            gpulog::poller::run(&path, interval).await
        }
        Commands::Chart { path, device, out } => {
            gpulog::visualize::run(&path, device, &out, config.chart.width, config.chart.height)
        }
    };

    if let Err(e) = result {
        error!("Application error: {e:#}");
        return Err(e);
    }
    Ok(())
}
