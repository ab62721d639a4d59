mod cmd;
mod ctx;
mod error;
pub mod output;
mod signals;

use std::{
    fmt,
    io::{self, IsTerminal as _, Write as _},
    process::ExitCode,
};

use camino::{FromPathBufError, Utf8PathBuf};
use clap::{ArgAction, Parser};
use cmd::Commands;
use crossterm::style::Stylize as _;
use ctx::Ctx;
use error::{Error, Result};
use output::Format;
use tracing::{debug, trace};
use ts_config::{Config, KvAssignment};

// Split streamed replies into reasoning and answer.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten, next_help_heading = "Global Options")]
    globals: Globals,

    #[command(subcommand, next_help_heading = "Options")]
    command: Commands,
}

#[derive(Debug, clap::Args)]
struct Globals {
    /// Override a configuration value for the duration of the command.
    ///
    /// Can be specified multiple times, before the subcommand.
    #[arg(short, long = "cfg", value_name = "KEY=VALUE", action = ArgAction::Append)]
    config: Vec<KvAssignment>,

    /// Increase verbosity of logging.
    ///
    /// Can be specified multiple times to increase verbosity.
    ///
    /// Defaults to printing "error" messages. For each increase in verbosity,
    /// the log level is set to "warn", "info", "debug", and "trace"
    /// respectively.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress logging and error reports.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// How to print the reply.
    #[arg(long, global = true, value_enum, default_value_t = Format::Live)]
    format: Format,
}

impl fmt::Display for Cli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self
            .globals
            .config
            .iter()
            .map(|kv| format!("{}={}", kv.key(), kv.value()))
            .collect::<Vec<_>>();

        f.debug_map()
            .entry(&"config", &config)
            .entry(&"verbose", &self.globals.verbose)
            .entry(&"quiet", &self.globals.quiet)
            .entry(&"format", &self.globals.format)
            .finish()
    }
}

#[must_use]
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let quiet = cli.globals.quiet;

    configure_logging(cli.globals.verbose, quiet);
    trace!(command = cli.command.name(), arguments = %cli, "Starting CLI run.");

    let result = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(Error::from)
        .and_then(|runtime| runtime.block_on(run_inner(cli)));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if !quiet {
                report(&error);
            }

            ExitCode::from(error.exit_code())
        }
    }
}

async fn run_inner(cli: Cli) -> Result<()> {
    let config = load_config(cli.globals.config)?;
    let ctx = Ctx::new(config, cli.globals.format).with_styling(io::stdout().is_terminal());

    let interrupt = signals::cancel_on_interrupt(ctx.cancel.clone());
    let result = cli.command.run(&ctx).await;

    // Stops the interrupt listener, if it is still waiting.
    ctx.cancel.cancel();
    if let Err(error) = interrupt.await {
        debug!(%error, "Interrupt listener did not finish cleanly.");
    }

    result
}

/// Load the configuration for the current directory.
fn load_config(overrides: Vec<KvAssignment>) -> Result<Config> {
    let cwd = Utf8PathBuf::try_from(std::env::current_dir()?)
        .map_err(FromPathBufError::into_io_error)?;
    trace!(cwd = %cwd, overrides = overrides.len(), "Loading configuration.");

    Config::load(&cwd, overrides).map_err(Into::into)
}

/// Write `error` to stderr.
fn report(error: &Error) {
    let mut stderr = io::stderr();
    let prefix = if stderr.is_terminal() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_owned()
    };

    // There is nowhere left to report a failure to write to stderr.
    writeln!(stderr, "{prefix} {error}").ok();
}

fn configure_logging(verbose: u8, quiet: bool) {
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::fmt;

    let mut level = match verbose {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        3 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    if quiet {
        level = LevelFilter::OFF;
    }

    let mut filter = vec!["off".to_owned()];
    for krate in ["cli", "config", "conversation", "md", "stream", "transport"] {
        filter.push(format!("ts_{krate}={level}"));
    }

    let format = fmt::format().with_target(false).compact();

    if level < LevelFilter::DEBUG {
        tracing_subscriber::fmt()
            .event_format(format)
            .without_time()
            .with_ansi(io::stderr().is_terminal())
            .with_target(false)
            .with_writer(io::stderr)
            .with_env_filter(filter.join(","))
            .init();
    } else {
        tracing_subscriber::fmt()
            .event_format(format)
            .with_ansi(io::stderr().is_terminal())
            .with_target(false)
            .with_writer(io::stderr)
            .with_env_filter(filter.join(","))
            .init();
    }
}
