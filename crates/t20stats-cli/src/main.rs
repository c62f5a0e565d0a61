// Dashboard entry point.
//
// Startup sequence:
// 1. Build the base datasets
// 2. Load config (creating it from defaults on first run)
// 3. Initialize tracing (log to file, stdout carries the dashboard)
// 4. Build each requested tab and hand it to the presenter

use t20stats_cli::config::{self, OutputFormat};
use t20stats_cli::present::{JsonPresenter, Presenter, TextPresenter};
use t20stats_core::datasets::Datasets;
use t20stats_core::views::{self, Tab};

use anyhow::{bail, Context};
use std::path::Path;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // 1. Datasets are compiled in; a failure here is a programming error
    let data = Datasets::load().context("failed to build base datasets")?;

    // 2. Load config
    let config = config::load_config(&data.comparison_players())
        .context("failed to load configuration")?;

    // 3. Initialize tracing
    init_tracing(Path::new(&config.logging.dir), &config.logging.filter)?;
    info!(
        "Dashboard starting: {} tab(s), format={:?}, focus={}",
        config.dashboard.tabs.len(),
        config.dashboard.format,
        config.comparison.focus
    );

    // An optional first argument narrows output to one tab
    let tabs = match std::env::args().nth(1) {
        Some(arg) => match Tab::from_str_tab(&arg) {
            Some(tab) => vec![tab],
            None => {
                let known: Vec<&str> = Tab::ALL.iter().map(Tab::key).collect();
                bail!("unknown tab '{}' (expected one of: {})", arg, known.join(", "));
            }
        },
        None => config.dashboard.tabs.clone(),
    };

    let stdout = std::io::stdout().lock();
    let mut presenter: Box<dyn Presenter> = match config.dashboard.format {
        OutputFormat::Text => Box::new(TextPresenter::new(stdout)),
        OutputFormat::Json => Box::new(JsonPresenter::new(stdout)),
    };

    // 4. Build and present
    let selection = config.comparison.selection();
    for tab in tabs {
        let view = views::build(tab, &data, &selection);
        let unavailable = view.panels.iter().filter(|p| !p.is_available()).count();
        info!(
            "Built '{}' with {} panel(s), {} unavailable",
            view.title,
            view.panels.len(),
            unavailable
        );
        presenter
            .present(&view)
            .with_context(|| format!("failed to present tab '{}'", tab.key()))?;
    }

    info!("Dashboard finished");
    Ok(())
}

fn init_tracing(log_dir: &Path, default_filter: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join(log_dir);
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("t20stats.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
