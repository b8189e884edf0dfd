//! Configuration and Initialization
//!
//! Startup picks the storage engine and the logging setup, then wires the
//! parser, analyzer, compute layer, engine and storage into a [`Database`].
//! Anything that goes wrong here is an [`InitError`] and stops the process
//! before the first query is read.

use crate::compute::{Analyzer, Compute, Parser};
use crate::database::Database;
use crate::error::InitError;
use crate::storage::{in_memory_engine, EngineFactory, Storage};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, Level};

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "LINEKV_LOG";

/// Which storage engine to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EngineKind {
    /// Hash map kept in process memory
    #[default]
    InMemory,
}

impl EngineKind {
    pub fn name(self) -> &'static str {
        match self {
            EngineKind::InMemory => "in_memory",
        }
    }

    /// Factory for fresh engines of this kind.
    pub fn factory(self) -> EngineFactory {
        match self {
            EngineKind::InMemory => in_memory_engine,
        }
    }
}

impl FromStr for EngineKind {
    type Err = InitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_memory" => Ok(EngineKind::InMemory),
            other => Err(InitError::UnknownEngine(other.to_string())),
        }
    }
}

/// Runtime configuration.
///
/// The engine is kept by name and only resolved in [`initialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name of the storage engine to build
    pub engine: String,
    /// Maximum log level when `LINEKV_LOG` is not set
    pub log_level: Level,
    /// Write logs to this file instead of stderr
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineKind::default().name().to_string(),
            log_level: Level::WARN,
            log_file: None,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    /// Start the database with this configuration
    Run(Config),
    /// Print usage and exit
    Help,
    /// Print the version and exit
    Version,
}

impl Config {
    /// Parses command-line arguments (without the program name).
    pub fn from_args<I>(args: I) -> Result<CliAction, InitError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--engine" | "-e" => {
                    config.engine = args.next().ok_or(InitError::MissingValue(arg))?;
                }
                "--log-level" | "-l" => {
                    let value = args.next().ok_or(InitError::MissingValue(arg))?;
                    config.log_level = value
                        .parse()
                        .map_err(|_| InitError::InvalidLogLevel(value))?;
                }
                "--log-file" => {
                    let value = args.next().ok_or(InitError::MissingValue(arg))?;
                    config.log_file = Some(PathBuf::from(value));
                }
                "--help" | "-h" => return Ok(CliAction::Help),
                "--version" | "-v" => return Ok(CliAction::Version),
                _ => return Err(InitError::UnknownArgument(arg)),
            }
        }

        Ok(CliAction::Run(config))
    }
}

/// Builds a ready-to-use database from the configuration.
///
/// # Errors
///
/// [`InitError::UnknownEngine`] if the configured engine does not exist.
pub fn initialize(config: &Config) -> Result<Database, InitError> {
    let engine: EngineKind = config.engine.parse()?;

    let compute = Compute::new(Parser::new(), Analyzer::new());
    let storage = Storage::new((engine.factory())());

    info!(engine = engine.name(), "database initialized");
    Ok(Database::new(compute, storage))
}

pub fn usage() -> &'static str {
    r#"
linekv - a minimal key-value store with a line-oriented query language

USAGE:
    linekv [OPTIONS]

OPTIONS:
    -e, --engine <ENGINE>      Storage engine (default: in_memory)
    -l, --log-level <LEVEL>    trace, debug, info, warn or error (default: warn)
        --log-file <PATH>      Write logs to a file instead of stderr
    -v, --version              Print version information
    -h, --help                 Print this help message

ENVIRONMENT:
    LINEKV_LOG                 tracing filter directive, overrides --log-level

QUERIES:
    SET <key> <value>
    GET <key>
    DEL <key>
"#
}
