//! Human-readable detail views: a single process and an environment listing

use colored::Color;

use super::emitter::Emitter;
use super::fields::{
    command_of, cpu_or_unknown, format_memory, name_of, or_unknown, text_or_unknown,
};
use super::table;
use crate::model::{ConnectionInfo, EnvVar, ProcessInfo};

/// Labelled field view of one process. Every label is always printed.
pub(crate) fn process_info(info: &ProcessInfo, emitter: &Emitter) -> String {
    let header = format!("{} (PID {})", name_of(info), info.pid);
    let started = info.start_time.map(|t| t.to_rfc3339());

    let fields: [(&str, String); 8] = [
        ("PPID:", or_unknown(info.ppid)),
        ("User:", text_or_unknown(info.user.as_deref()).into_owned()),
        ("State:", text_or_unknown(info.state.as_deref()).into_owned()),
        ("Threads:", or_unknown(info.threads)),
        ("CPU:", cpu_or_unknown(info.cpu_percent)),
        ("Memory:", or_unknown(info.rss_kb.map(format_memory))),
        ("Started:", or_unknown(started)),
        ("Command:", command_of(info)),
    ];

    let mut out = emitter.paint(&header, Color::Cyan);
    out.push('\n');
    for (label, value) in fields {
        let label = emitter.paint(&format!("{label:<9}"), Color::BrightBlack);
        out.push_str(&format!("  {label}{value}\n"));
    }
    out
}

/// Count line followed by the `KEY=VALUE` lines, control characters escaped
pub(crate) fn environment(vars: &[EnvVar], emitter: &Emitter) -> String {
    let header = format!("Environment ({} variables):", vars.len());
    let mut out = emitter.paint(&header, Color::Cyan);
    out.push('\n');
    for var in vars {
        out.push_str("  ");
        out.push_str(&text_or_unknown(Some(var.as_str())));
        out.push('\n');
    }
    out
}

/// Context line naming the port, then the connection table
pub(crate) fn port_connections(port: u16, connections: &[ConnectionInfo], emitter: &Emitter) -> String {
    let mut out = emitter.paint(&port_context(port, connections.len()), Color::Cyan);
    out.push('\n');
    out.push_str(&table::connection_table(connections, emitter));
    out
}

/// `Port N: ...` line shared by the text and short layouts
pub(crate) fn port_context(port: u16, count: usize) -> String {
    if count == 0 {
        format!("Port {port}: no connections")
    } else {
        format!("Port {port}: {count} connection(s)")
    }
}
