//! Cross-exchange arbitrage monitor entry point.

use std::io::Write;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cross_arb::config::Config;
use cross_arb::exchange::Registry;
use cross_arb::market::QuoteClient;
use cross_arb::metrics;
use cross_arb::report::{IntervalTicker, Reporter};
use cross_arb::utils::shutdown_channel;
use cross_arb::MonitorError;

/// Cross-exchange arbitrage monitor.
#[derive(Parser, Debug)]
#[command(name = "cross-arb")]
#[command(about = "Prints BITBAY/BITTREX spread and arbitrage ratios on a fixed interval")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the reporting loop until Ctrl-C (default).
    Run {
        /// Seconds between cycles (overrides POLL_INTERVAL_SECS).
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Run a single cycle and exit.
    Once,

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration before logging so RUST_LOG/LOG_JSON apply
    let config = Config::load().map_err(MonitorError::from)?;

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("cross_arb=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log))
    };

    let json = config.log_json.then(|| fmt::layer().json().with_writer(std::io::stderr));
    let plain = (!config.log_json).then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(plain)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(config),
        Some(Command::Once) => cmd_once(config).await,
        Some(Command::Run { interval }) => cmd_run(config, interval).await,
        None => cmd_run(config, None).await,
    }
}

fn validated(config: Config) -> anyhow::Result<Config> {
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(MonitorError::InvalidConfig(e).into());
    }
    Ok(config)
}

/// Check configuration validity.
fn cmd_check_config(config: Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("CROSS-ARB - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    let config = match config.validate() {
        Ok(()) => {
            println!("OK");
            config
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(MonitorError::InvalidConfig(e).into());
        }
    };

    let registry = Registry::from_config(&config);

    println!("----------------------------------------------------------------------");
    println!("Pair: {}", registry.pair);
    for endpoint in registry.endpoints() {
        println!("  {} ({} format)", endpoint.name, endpoint.format);
        println!("    URL: {}", endpoint.url_for(&registry.pair));
        println!("    Taker fee: {}", endpoint.taker_fee_rate);
        println!("    Transfer fee: {} (flat)", endpoint.transfer_fee_rate);
    }
    println!("Interval: {}s", config.poll_interval_secs);
    println!("HTTP timeout: {}ms", config.http_timeout_ms);
    println!("Metrics: {}", if config.metrics_enabled { "Enabled" } else { "Disabled" });
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run a single report cycle.
async fn cmd_once(config: Config) -> anyhow::Result<()> {
    let config = validated(config)?;
    let registry = Registry::from_config(&config);
    let client = QuoteClient::new(&config).map_err(MonitorError::from)?;

    let report = Reporter::new(&registry, &client).run_cycle().await;

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{report}")?;
    stdout.flush()?;

    if !report.is_complete() {
        anyhow::bail!("Connection to APIs failed: not every quote was available");
    }

    Ok(())
}

/// Run the reporting loop.
async fn cmd_run(mut config: Config, interval_override: Option<u64>) -> anyhow::Result<()> {
    if let Some(interval) = interval_override {
        config.poll_interval_secs = interval;
    }
    let config = validated(config)?;

    // Descriptions are registered once the exporter's recorder is live
    if config.metrics_enabled {
        metrics::install_exporter(config.metrics_port).map_err(MonitorError::from)?;
    }

    let registry = Registry::from_config(&config);
    let client = QuoteClient::new(&config).map_err(MonitorError::from)?;

    info!("Pair: {}", registry.pair);
    info!("Exchanges: {} / {}", registry.primary.name, registry.secondary.name);
    info!("Interval: {}s", config.poll_interval_secs);

    let mut ticker = IntervalTicker::new(config.poll_interval());
    let shutdown = shutdown_channel();
    let mut stdout = std::io::stdout();

    let cycles = Reporter::new(&registry, &client)
        .run(&mut ticker, &mut stdout, shutdown)
        .await?;

    info!("Stopped after {} cycles", cycles);
    Ok(())
}
