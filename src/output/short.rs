//! One tab-separated line per entity, for `grep`/`cut` pipelines

use super::table::{connection_row, process_row};
use super::text::port_context;
use crate::model::{ConnectionInfo, ProcessInfo};

pub(crate) fn process_line(info: &ProcessInfo) -> String {
    let mut line = process_row(info).join("\t");
    line.push('\n');
    line
}

pub(crate) fn process_lines(processes: &[ProcessInfo]) -> String {
    processes.iter().map(process_line).collect()
}

/// Port context line, then one line per connection
pub(crate) fn port_lines(port: u16, connections: &[ConnectionInfo]) -> String {
    let mut out = port_context(port, connections.len());
    out.push('\n');
    for conn in connections {
        out.push_str(&connection_row(conn).join("\t"));
        out.push('\n');
    }
    out
}
