//! linekv - A Minimal Line-Oriented Key-Value Store
//!
//! Entry point: parses the command line, sets up logging, builds the
//! database and runs the interactive query loop on stdin/stdout.

use anyhow::Context as _;
use linekv::config::{initialize, usage, CliAction, Config, LOG_ENV};
use linekv::context::Context;
use linekv::repl::run_repl;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tokio::io::{stdin, stdout, BufReader};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(CliAction::Run(config)) => config,
        Ok(CliAction::Help) => {
            println!("{}", usage());
            return Ok(());
        }
        Ok(CliAction::Version) => {
            println!("linekv version {}", linekv::VERSION);
            return Ok(());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", usage());
            std::process::exit(1);
        }
    };

    init_tracing(&config)?;

    let runtime = tokio::runtime::Runtime::new().context("failed to start runtime")?;
    let result = runtime.block_on(run(config));

    // A pending stdin read lives on a blocking thread; don't wait for it.
    runtime.shutdown_background();
    result
}

async fn run(config: Config) -> anyhow::Result<()> {
    let mut db = initialize(&config).inspect_err(|e| error!(error = %e, "failed to start"))?;

    let (ctx, cancel) = Context::with_cancel();
    tokio::spawn(async move { cancel.cancel_on_signal(signal::ctrl_c().await) });

    info!(engine = %config.engine, "linekv v{} ready", linekv::VERSION);

    run_repl(BufReader::new(stdin()), stdout(), &ctx, &mut db)
        .await
        .context("failed to serve queries")?;

    info!("Shutdown complete");
    Ok(())
}

/// Installs the global tracing subscriber.
///
/// `LINEKV_LOG` takes precedence over the configured level.
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::default().add_directive(LevelFilter::from_level(config.log_level).into())
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}
