use clap::Parser;
use lift_scraper::core::engine::ScrapeOutcome;
use lift_scraper::core::{ConfigProvider, OutputSink};
use lift_scraper::utils::error::ErrorSeverity;
use lift_scraper::utils::{logger, validation::Validate};
use lift_scraper::{CliConfig, FileSink, LiftPipeline, ScrapeEngine, ScrapeError, StdoutSink, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting lift-scraper");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let mut config = match TomlConfig::from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            };

            cli.apply_overrides(&mut config);

            let output = config.output_path().map(str::to_string);
            execute(config, output, cli.dry_run).await
        }
        None => {
            let output = cli.output.clone();
            let dry_run = cli.dry_run;
            execute(cli, output, dry_run).await
        }
    };

    match result {
        Ok(Some(outcome)) => {
            tracing::info!("✅ Reported {} lifts", outcome.lifts.len());
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!(
                "❌ lift-scraper failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

/// Validate and run one scrape. Returns `None` for a dry run.
async fn execute<C>(
    config: C,
    output: Option<String>,
    dry_run: bool,
) -> Result<Option<ScrapeOutcome>, ScrapeError>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;
    tracing::info!("✅ Configuration validated");

    if dry_run {
        display_config_summary(&config, output.as_deref());
        return Ok(None);
    }

    let outcome = match output {
        Some(path) => run_pipeline(FileSink::new(path), config).await?,
        None => run_pipeline(StdoutSink, config).await?,
    };
    Ok(Some(outcome))
}

async fn run_pipeline<S, C>(sink: S, config: C) -> Result<ScrapeOutcome, ScrapeError>
where
    S: OutputSink,
    C: ConfigProvider,
{
    let pipeline = LiftPipeline::new(sink, config)?;
    let engine = ScrapeEngine::new(pipeline);
    Ok(engine.run().await)
}

fn display_config_summary<C: ConfigProvider>(config: &C, output: Option<&str>) {
    let selectors = config.selectors();

    println!("📋 Configuration Summary:");
    println!("  URL: {}", config.target_url());
    println!("  Strategy: {}", config.strategy());
    println!("  Timeout: {}s", config.timeout_seconds());
    println!("  Format: {}", config.report_format());
    println!("  Output: {}", output.unwrap_or("stdout"));
    println!();
    println!("🔍 Selectors:");
    println!("  Container: {}", selectors.container);
    println!("  Row: {}", selectors.row);
    println!("  Name: {}", selectors.name);
    println!(
        "  Status: {} (attribute '{}')",
        selectors.status, selectors.status_attribute
    );
    if !selectors.allowed_statuses.is_empty() {
        println!("  Allowed statuses: {}", selectors.allowed_statuses.join(", "));
    }
    println!("  Wait for: {}", selectors.wait_for());
    println!();
    println!("🔍 DRY RUN MODE - nothing was fetched");
}
