use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod mock_data;
mod report;
mod run;

#[derive(Debug, Parser)]
#[command(name = "smap")]
#[command(about = "Social media engagement analytics pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the full pipeline: collect, normalize, validate, analyze, persist.
    Run {
        /// Replace all live adapters with the mock data generator.
        #[arg(long)]
        mock: bool,
        /// Number of records to generate with --mock.
        #[arg(long, default_value_t = 1000)]
        mock_records: usize,
        /// Collect from this platform only.
        #[arg(long)]
        platform: Option<String>,
        /// Moving-average window in days (defaults to SMAP_MA_WINDOW).
        #[arg(long)]
        window: Option<usize>,
        /// Global top-post count (defaults to SMAP_TOP_OVERALL_N).
        #[arg(long)]
        overall_n: Option<usize>,
        /// Per-platform top-post count (defaults to SMAP_TOP_PLATFORM_N).
        #[arg(long)]
        platform_n: Option<usize>,
        /// Output directory (defaults to SMAP_OUT_DIR).
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Display the latest persisted analytics artifacts.
    Report {
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Generate a mock raw dataset and save it.
    MockData {
        #[arg(long, default_value_t = 1000)]
        records: usize,
        /// Destination path; format follows the extension (.json/.csv).
        #[arg(long)]
        out: Option<PathBuf>,
        /// Seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = smap_core::load_app_config_from_env()?;
    init_tracing(&config.log_level);

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            mock,
            mock_records,
            platform,
            window,
            overall_n,
            platform_n,
            out_dir,
        } => {
            run::run_pipeline(
                &config,
                run::RunArgs {
                    mock,
                    mock_records,
                    platform,
                    window,
                    overall_n,
                    platform_n,
                    out_dir,
                },
            )
            .await
        }
        Commands::Report { out_dir } => {
            report::display_results(&out_dir.unwrap_or_else(|| config.out_dir.clone()))
        }
        Commands::MockData { records, out, seed } => {
            mock_data::generate_and_save(&config, records, out, seed)
        }
    }
}
