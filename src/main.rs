// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{LevelFilter, error};
use std::path::PathBuf;
use std::process::ExitCode;

use caption_validator::app_config::{self, Config};
use caption_validator::app_controller::Controller;
use caption_validator::logging::CustomLogger;
use caption_validator::validation::{TimeWindow, ValidationRequest};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for caption-validator
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// caption-validator - WebVTT and SRT caption checks
///
/// Checks that a caption file covers a time window well enough and that its
/// text is in the expected language.
#[derive(Parser, Debug)]
#[command(name = "caption-validator")]
#[command(version)]
#[command(about = "Validate caption coverage and language")]
#[command(long_about = "caption-validator reads a WebVTT or SRT file, measures how much of a time window
its cues cover and asks a language detection service what language the text is in.

Each failed check is printed to stdout as one JSON object per line. Nothing is
printed when every check passes.

EXAMPLES:
    caption-validator --t-end 120 --endpoint http://localhost:8081/detect movie.vtt
    caption-validator --t-start 30 --t-end 90 --coverage 95 --endpoint http://localhost:8081/detect movie.srt
    caption-validator --config validator.json movie.vtt
    caption-validator completions bash > caption-validator.bash

EXIT CODES:
    0  the file was evaluated (failures, if any, are on stdout)
    1  the file could not be evaluated (bad arguments, unreadable or unsupported file)")]
#[command(args_conflicts_with_subcommands = true)]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Caption file to validate
    #[arg(value_name = "CAPTIONS_PATH")]
    input_path: Option<PathBuf>,

    /// Start of the time window in seconds
    #[arg(long = "t-start", alias = "t_start", default_value_t = 0.0, allow_negative_numbers = true)]
    t_start: f64,

    /// End of the time window in seconds
    #[arg(long = "t-end", alias = "t_end", default_value_t = 0.0, allow_negative_numbers = true)]
    t_end: f64,

    /// Required coverage percentage (default: 80, or the config file value)
    #[arg(short, long)]
    coverage: Option<f64>,

    /// Language detection endpoint URL
    #[arg(short, long, env = "CAPTION_VALIDATOR_ENDPOINT")]
    endpoint: Option<String>,

    /// Language detection request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Configuration file path
    #[arg(long = "config", value_name = "CONFIG_PATH")]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = CustomLogger::init(LevelFilter::Warn);

    let cli = match CommandLineOptions::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "caption-validator", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    match run_validate(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Merge the config file with command-line overrides
fn build_config(options: &CommandLineOptions) -> Result<Config> {
    let mut config = match &options.config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(coverage) = options.coverage {
        config.required_coverage = coverage;
    }
    if let Some(endpoint) = &options.endpoint {
        config.language.endpoint = endpoint.clone();
    }
    if let Some(timeout_secs) = options.timeout_secs {
        config.language.timeout_secs = timeout_secs;
    }
    if let Some(level) = &options.log_level {
        config.log_level = level.clone().into();
    }

    Ok(config)
}

async fn run_validate(options: CommandLineOptions) -> Result<()> {
    // Apply the command-line level first so config loading problems are visible
    if let Some(level) = &options.log_level {
        let level: app_config::LogLevel = level.clone().into();
        CustomLogger::set_level(level.to_level_filter());
    }

    let config = build_config(&options)?;
    CustomLogger::set_level(config.log_level.to_level_filter());

    let input_path = options
        .input_path
        .context("CAPTIONS_PATH is required when no subcommand is specified")?;

    let window = TimeWindow::new(options.t_start, options.t_end)?;
    let request = ValidationRequest {
        window,
        required_coverage: config.required_coverage,
    };

    let controller = Controller::with_config(config)?;

    let mut stdout = std::io::stdout().lock();
    controller.run(&input_path, &request, &mut stdout).await?;
    Ok(())
}
