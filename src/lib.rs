//! procscope - process and port inspection output
//!
//! Turns already-collected process, process tree, environment and socket
//! data into colored text, tab-separated short lines, or JSON. Collection
//! from the OS lives elsewhere; this crate only renders.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod model;
pub mod output;

#[cfg(test)]
mod testutil;

// Re-export commonly used types
pub use config::{ColorChoice, OutputConfig, OutputMode, Settings};
pub use model::{
    ConnectionInfo, ConnectionState, EnvVar, ProcessInfo, ProcessTreeNode, Protocol, UNKNOWN,
};
pub use output::{
    exit_status, output_port_info, output_process_env, output_process_info, output_process_list,
    output_process_tree, Emitter, EntityKind, RenderError, Severity, Streams,
};
