//! perfwatch CLI - performance monitoring dashboard.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use perfwatch_monitor::{CycleResult, Monitor, MonitorConfig};
use perfwatch_report::ChartError;
use perfwatch_runner::{ProcessRunner, RunProfile};
use perfwatch_storage::{HistoryStore, JsonHistoryStore};
use tracing::Level;

#[derive(Parser)]
#[command(name = "perfwatch")]
#[command(about = "Performance monitoring dashboard", long_about = None)]
struct Cli {
    /// Directory to store results
    #[arg(long, default_value = "performance_results")]
    results_dir: PathBuf,

    /// Run continuous monitoring
    #[arg(long)]
    continuous: bool,

    /// Monitoring interval in seconds
    #[arg(long, default_value = "300")]
    interval: u64,

    /// Run quick tests only
    #[arg(long)]
    quick: bool,

    /// Render a performance chart from the stored history
    #[arg(long)]
    plot: bool,

    /// Save the chart under a timestamped filename
    #[arg(long)]
    save_plot: bool,

    /// Show trend analysis only
    #[arg(long)]
    trend: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();

    let store = JsonHistoryStore::new(&cli.results_dir).await?;

    if cli.continuous {
        run_monitor(store, &cli, true).await
    } else if cli.plot {
        plot_history(store, &cli).await
    } else if cli.trend {
        show_trends(store).await
    } else {
        run_monitor(store, &cli, false).await
    }
}

fn profile_for(cli: &Cli) -> RunProfile {
    if cli.quick {
        RunProfile::Quick
    } else {
        RunProfile::Full
    }
}

async fn run_monitor(store: JsonHistoryStore, cli: &Cli, continuous: bool) -> Result<()> {
    let config = MonitorConfig {
        profile: profile_for(cli),
        interval: Duration::from_secs(cli.interval),
    };

    let mut monitor = Monitor::new(store, ProcessRunner::default())
        .await?
        .with_config(config);

    if continuous {
        monitor.run_continuous().await
    } else {
        println!("Running single performance test...");
        if let CycleResult::Failed(reason) = monitor.run_once().await? {
            eprintln!("Failed to collect metrics: {reason}");
            std::process::exit(1);
        }
        Ok(())
    }
}

async fn show_trends(store: JsonHistoryStore) -> Result<()> {
    let history = store.load().await?;
    match perfwatch_trend::analyze(&history) {
        Some(trends) => println!("{}", perfwatch_report::format_trends(&trends)),
        None => println!("Not enough data for trend analysis"),
    }
    Ok(())
}

async fn plot_history(store: JsonHistoryStore, cli: &Cli) -> Result<()> {
    let history = store.load().await?;

    let filename = if cli.save_plot {
        format!(
            "performance_plot_{}.png",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        )
    } else {
        "performance_plot.png".to_string()
    };
    let path = cli.results_dir.join(filename);

    match perfwatch_report::render_chart(&history, &path) {
        Ok(()) => {
            println!("Plot saved to: {}", path.display());
            Ok(())
        }
        Err(ChartError::NotEnoughData) => {
            println!("Not enough data for plotting");
            Ok(())
        }
        Err(ChartError::Unavailable) => {
            // Built without the `plot` feature; degrade to a textual report.
            println!("Chart rendering not available in this build");
            if let Some(latest) = history.last() {
                println!("{}", perfwatch_report::format_record(latest));
            }
            match perfwatch_trend::analyze(&history) {
                Some(trends) => println!("{}", perfwatch_report::format_trends(&trends)),
                None => println!("Not enough data for trend analysis"),
            }
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
