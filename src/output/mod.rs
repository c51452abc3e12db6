//! Rendering of inspection results
//!
//! One entry point per entity kind. Each looks at [`OutputConfig::mode`],
//! builds the whole document in memory, then writes it to the caller's
//! stream in a single `write_all` followed by a flush. An unsupported mode
//! is rejected before anything is written.
//!
//! Renderers are pure functions of (entity, config): color comes from the
//! config, never from process-wide state.

pub mod emitter;
pub mod error;
mod fields;
mod json;
mod short;
mod table;
mod text;
mod tree;

use std::io::{self, Write};

use tracing::debug;

use crate::config::{OutputConfig, OutputMode};
use crate::model::{ConnectionInfo, EnvVar, ProcessInfo, ProcessTreeNode};

pub use emitter::{Emitter, Severity, Target};
pub use error::{EntityKind, RenderError};

/// Status code for a successful render
pub const STATUS_OK: i32 = 0;
/// Status code for a failed render
pub const STATUS_ERROR: i32 = -1;

/// The standard and error streams messages are routed to
#[derive(Debug)]
pub struct Streams<O, E> {
    /// Standard output sink
    pub out: O,
    /// Standard error sink
    pub err: E,
}

impl<O: Write, E: Write> Streams<O, E> {
    /// Pair up two sinks
    pub const fn new(out: O, err: E) -> Self {
        Self { out, err }
    }
}

impl Streams<io::Stdout, io::Stderr> {
    /// The process's real stdout and stderr
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl Streams<Vec<u8>, Vec<u8>> {
    /// In-memory sinks, handy for capturing output
    #[must_use]
    pub const fn captured() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Everything written to the standard sink so far
    #[must_use]
    pub fn out_text(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }

    /// Everything written to the error sink so far
    #[must_use]
    pub fn err_text(&self) -> String {
        String::from_utf8_lossy(&self.err).into_owned()
    }
}

/// Collapse a render result to the 0 / -1 status contract
#[must_use]
pub const fn exit_status<T>(result: &Result<T, RenderError>) -> i32 {
    match result {
        Ok(_) => STATUS_OK,
        Err(_) => STATUS_ERROR,
    }
}

/// Render a single process
pub fn output_process_info<W: Write>(
    out: &mut W,
    info: &ProcessInfo,
    config: &OutputConfig,
) -> Result<(), RenderError> {
    debug!(entity = %EntityKind::Process, mode = %config.mode, pid = info.pid, "rendering");
    let emitter = emitter_for(config);
    let doc = match config.mode {
        OutputMode::Text => text::process_info(info, &emitter),
        OutputMode::Short => short::process_line(info),
        OutputMode::Json => json::document(info, EntityKind::Process)?,
    };
    write_document(out, &doc)
}

/// Render a process hierarchy. `short` mode is not supported.
pub fn output_process_tree<W: Write>(
    out: &mut W,
    tree: &ProcessTreeNode,
    config: &OutputConfig,
) -> Result<(), RenderError> {
    debug!(
        entity = %EntityKind::ProcessTree,
        mode = %config.mode,
        root = tree.process.pid,
        "rendering"
    );
    let emitter = emitter_for(config);
    let doc = match config.mode {
        OutputMode::Text => tree::render(tree, &emitter),
        OutputMode::Json => json::document(tree, EntityKind::ProcessTree)?,
        OutputMode::Short => return Err(unsupported(config.mode, EntityKind::ProcessTree)),
    };
    write_document(out, &doc)
}

/// Render a process environment. `short` mode is not supported.
pub fn output_process_env<W: Write>(
    out: &mut W,
    env_vars: &[EnvVar],
    config: &OutputConfig,
) -> Result<(), RenderError> {
    debug!(
        entity = %EntityKind::Environment,
        mode = %config.mode,
        count = env_vars.len(),
        "rendering"
    );
    let emitter = emitter_for(config);
    let doc = match config.mode {
        OutputMode::Text => text::environment(env_vars, &emitter),
        OutputMode::Json => json::env_document(env_vars)?,
        OutputMode::Short => return Err(unsupported(config.mode, EntityKind::Environment)),
    };
    write_document(out, &doc)
}

/// Render the connections found on `port`.
///
/// The port is echoed even when `connections` is empty.
pub fn output_port_info<W: Write>(
    out: &mut W,
    port: u16,
    connections: &[ConnectionInfo],
    config: &OutputConfig,
) -> Result<(), RenderError> {
    debug!(
        entity = %EntityKind::PortConnections,
        mode = %config.mode,
        port,
        count = connections.len(),
        "rendering"
    );
    let emitter = emitter_for(config);
    let doc = match config.mode {
        OutputMode::Text => text::port_connections(port, connections, &emitter),
        OutputMode::Short => short::port_lines(port, connections),
        OutputMode::Json => json::port_document(port, connections)?,
    };
    write_document(out, &doc)
}

/// Render a list of processes
pub fn output_process_list<W: Write>(
    out: &mut W,
    processes: &[ProcessInfo],
    config: &OutputConfig,
) -> Result<(), RenderError> {
    debug!(
        entity = %EntityKind::ProcessList,
        mode = %config.mode,
        count = processes.len(),
        "rendering"
    );
    let emitter = emitter_for(config);
    let doc = match config.mode {
        OutputMode::Text => table::process_table(processes, &emitter),
        OutputMode::Short => short::process_lines(processes),
        OutputMode::Json => json::process_list_document(processes)?,
    };
    write_document(out, &doc)
}

/// Structured documents never carry escapes, whatever the color flag says
const fn emitter_for(config: &OutputConfig) -> Emitter {
    Emitter::new(config.color && !config.mode.is_structured())
}

fn unsupported(mode: OutputMode, entity: EntityKind) -> RenderError {
    debug!(%entity, %mode, "unsupported output mode");
    RenderError::UnsupportedMode { mode, entity }
}

fn write_document<W: Write>(out: &mut W, doc: &str) -> Result<(), RenderError> {
    out.write_all(doc.as_bytes())?;
    out.flush()?;
    Ok(())
}
