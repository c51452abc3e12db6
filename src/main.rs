//! procscope - process and port inspection output
//!
//! CLI entry point. Reads a JSON snapshot written by a collector and renders
//! it in the requested format.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use procscope::{
    output_port_info, output_process_env, output_process_info, output_process_list,
    output_process_tree, ColorChoice, ConnectionInfo, Emitter, EnvVar, OutputConfig, OutputMode,
    ProcessInfo, ProcessTreeNode, RenderError, Settings, Severity, Streams,
};

/// Environment variable holding the log filter
const LOG_ENV: &str = "PROCSCOPE_LOG";

/// Render process and port inspection snapshots
///
/// Each command reads a JSON snapshot (`-` for stdin) and prints it as text,
/// short tab-separated lines, or JSON.
#[derive(Parser, Debug)]
#[command(name = "procscope", version, about)]
struct Cli {
    /// Path to a procscope.toml configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(long, value_enum, global = true)]
    format: Option<OutputMode>,

    /// When to use color (overrides the config file)
    #[arg(long, value_enum, global = true)]
    color: Option<ColorChoice>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show one process in detail
    Info {
        /// Snapshot holding a single process object
        input: PathBuf,
    },
    /// Show a process hierarchy
    Tree {
        /// Snapshot holding a process tree
        input: PathBuf,
    },
    /// Show a process environment
    Env {
        /// Snapshot holding an array of `KEY=VALUE` strings
        input: PathBuf,
    },
    /// Show the connections using a port
    Port {
        /// Port to report on
        port: u16,
        /// Snapshot holding an array of connections
        input: PathBuf,
    },
    /// Show a list of processes
    List {
        /// Snapshot holding an array of processes
        input: PathBuf,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Read and parse a snapshot file, or stdin for `-`
fn read_snapshot<T: DeserializeOwned>(input: &Path) -> Result<T> {
    let content = if input == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read snapshot from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read snapshot: {}", input.display()))?
    };
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse snapshot: {}", input.display()))
}

/// Keep only the connections with either end on `port`
fn connections_on_port(connections: Vec<ConnectionInfo>, port: u16) -> Vec<ConnectionInfo> {
    connections
        .into_iter()
        .filter(|c| c.involves_port(port))
        .collect()
}

/// Settings file merged with command line overrides; resolved once per run
fn output_config(cli: &Cli) -> Result<OutputConfig> {
    let settings = Settings::load(cli.config.as_deref())?;
    let config = settings.output_config(cli.format, cli.color);
    debug!(mode = %config.mode, color = config.color, "resolved output config");
    Ok(config)
}

fn run(cli: &Cli, config: &OutputConfig, out: &mut impl io::Write) -> Result<()> {
    match &cli.command {
        Command::Info { input } => {
            let info: ProcessInfo = read_snapshot(input)?;
            output_process_info(out, &info, config)?;
        }
        Command::Tree { input } => {
            let tree: ProcessTreeNode = read_snapshot(input)?;
            output_process_tree(out, &tree, config)?;
        }
        Command::Env { input } => {
            let vars: Vec<EnvVar> = read_snapshot(input)?;
            output_process_env(out, &vars, config)?;
        }
        Command::Port { port, input } => {
            let connections = connections_on_port(read_snapshot(input)?, *port);
            output_port_info(out, *port, &connections, config)?;
        }
        Command::List { input } => {
            let processes: Vec<ProcessInfo> = read_snapshot(input)?;
            output_process_list(out, &processes, config)?;
        }
    }
    Ok(())
}

/// Report a failed run on the error stream and pick the exit code
fn report_failure<O: io::Write, E: io::Write>(
    err: &anyhow::Error,
    color: bool,
    streams: &mut Streams<O, E>,
) -> ExitCode {
    // Reader went away (e.g. `| head`); nothing left to report to
    if err
        .downcast_ref::<RenderError>()
        .is_some_and(RenderError::is_broken_pipe)
    {
        return ExitCode::SUCCESS;
    }
    let _ = Emitter::new(color).emit(streams, Severity::Error, format_args!("{err:#}"));
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    let mut streams = Streams::stdio();

    let config = match output_config(&cli) {
        Ok(config) => config,
        // No usable settings file; only the command line can say
        Err(err) => {
            let color = cli.color.unwrap_or_default().resolve();
            return report_failure(&err, color, &mut streams);
        }
    };

    match run(&cli, &config, &mut streams.out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_failure(&err, config.color, &mut streams),
    }
}
