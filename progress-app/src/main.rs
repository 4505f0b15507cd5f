use anyhow::{bail, Context, Result};
use clap::Parser;
use progress_browser::driver::BrowserDriver;
use progress_check::report::run_roster;
use progress_check::roster::load_roster;
use progress_check::session::WebdriverSession;
use progress_common::observability::{init_logging, LogConfig};
use progress_config::{ProgressConfig, ProgressConfigLoader};
use std::path::PathBuf;

/// Audit solved-exercise counts for a roster of student accounts.
#[derive(Parser)]
#[command(name = "progress-audit", version, about)]
struct Cli {
    /// Configuration file; defaults apply when it is absent.
    #[arg(long, default_value = "progress.yaml")]
    config: PathBuf,

    /// Roster file override.
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Override the configured headless setting.
    #[arg(long)]
    headless: Option<bool>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Env wins over the file; both fall back to defaults.
    let cfg: ProgressConfig = ProgressConfigLoader::new()
        .with_optional_file(&cli.config)
        .load()?;

    init_logging(LogConfig {
        emit_stderr: true,
        ..LogConfig::default()
    })?;

    let roster_path = cli.roster.unwrap_or_else(|| cfg.roster.clone());
    let records = load_roster(&roster_path);
    if records.is_empty() {
        bail!("no usable records in {}", roster_path.display());
    }
    tracing::info!(count = records.len(), roster = %roster_path.display(), "loaded roster");

    let headless = cli.headless.unwrap_or(cfg.webdriver.headless);
    let driver = BrowserDriver::connect(&cfg.webdriver.endpoint, headless)
        .await
        .with_context(|| format!("failed to reach webdriver at {}", cfg.webdriver.endpoint))?;
    let mut session = WebdriverSession::new(driver.page());

    let summary = run_roster(&mut session, &cfg.site.base_url, &records).await?;
    print!("{}", summary.render());

    driver.close().await?;
    Ok(())
}
