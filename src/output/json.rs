//! Structured (JSON) documents
//!
//! Field names come from the model's serde attributes plus the wrapper
//! structs below; they are part of the scripting interface and stay fixed.
//! Every document is built in memory and written in one go.

use serde::Serialize;

use super::error::{EntityKind, RenderError};
use crate::model::{ConnectionInfo, EnvVar, ProcessInfo};

#[derive(Serialize)]
struct PortReport<'a> {
    port: u16,
    count: usize,
    connections: &'a [ConnectionInfo],
}

#[derive(Serialize)]
struct ProcessListReport<'a> {
    count: usize,
    processes: &'a [ProcessInfo],
}

#[derive(Serialize)]
struct EnvReport<'a> {
    count: usize,
    variables: Vec<EnvRecord<'a>>,
}

#[derive(Serialize)]
struct EnvRecord<'a> {
    key: &'a str,
    value: Option<&'a str>,
}

/// Pretty-print `value` with a trailing newline
pub(crate) fn document<T: Serialize + ?Sized>(
    value: &T,
    entity: EntityKind,
) -> Result<String, RenderError> {
    let mut doc = serde_json::to_string_pretty(value)
        .map_err(|source| RenderError::Serialize { entity, source })?;
    doc.push('\n');
    Ok(doc)
}

pub(crate) fn port_document(port: u16, connections: &[ConnectionInfo]) -> Result<String, RenderError> {
    let report = PortReport {
        port,
        count: connections.len(),
        connections,
    };
    document(&report, EntityKind::PortConnections)
}

pub(crate) fn process_list_document(processes: &[ProcessInfo]) -> Result<String, RenderError> {
    let report = ProcessListReport {
        count: processes.len(),
        processes,
    };
    document(&report, EntityKind::ProcessList)
}

pub(crate) fn env_document(vars: &[EnvVar]) -> Result<String, RenderError> {
    let report = EnvReport {
        count: vars.len(),
        variables: vars
            .iter()
            .map(|var| EnvRecord {
                key: var.key(),
                value: var.value(),
            })
            .collect(),
    };
    document(&report, EntityKind::Environment)
}
