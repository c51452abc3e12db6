//! Aligned columns for homogeneous collections
//!
//! Every row carries exactly one cell per header. Widths come from the widest
//! cell in each column (header included); the last column is left unpadded
//! so long commands do not drag trailing spaces.

use colored::Color;

use super::emitter::Emitter;
use super::fields::{command_of, cpu_or_unknown, format_memory, or_unknown, text_or_unknown};
use crate::model::{ConnectionInfo, ProcessInfo};

const GAP: &str = "  ";

/// Columns of the process list
pub(crate) const PROCESS_COLUMNS: [&str; 7] = ["PID", "PPID", "USER", "STATE", "CPU%", "RSS", "COMMAND"];

/// Columns of the port connection list
pub(crate) const CONNECTION_COLUMNS: [&str; 6] = ["PROTO", "LOCAL", "REMOTE", "STATE", "PID", "PROGRAM"];

pub(crate) struct Table<const N: usize> {
    headers: [&'static str; N],
    rows: Vec<[String; N]>,
}

impl<const N: usize> Table<N> {
    pub(crate) const fn new(headers: [&'static str; N]) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, row: [String; N]) {
        self.rows.push(row);
    }

    fn widths(&self) -> [usize; N] {
        let mut widths = self.headers.map(|h| h.chars().count());
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }

    /// Render header plus rows, one line each
    pub(crate) fn render(&self, emitter: &Emitter) -> String {
        let widths = self.widths();
        let mut out = String::new();

        let header = layout(&self.headers, &widths);
        out.push_str(&emitter.paint(&header, Color::Cyan));
        out.push('\n');

        for row in &self.rows {
            out.push_str(&layout(row, &widths));
            out.push('\n');
        }
        out
    }
}

fn layout<S: AsRef<str>, const N: usize>(cells: &[S; N], widths: &[usize; N]) -> String {
    let mut line = String::new();
    for (i, (cell, &width)) in cells.iter().zip(widths).enumerate() {
        let cell = cell.as_ref();
        if i + 1 == N {
            line.push_str(cell);
        } else {
            line.push_str(&format!("{cell:<width$}{GAP}"));
        }
    }
    line
}

pub(crate) fn process_row(info: &ProcessInfo) -> [String; 7] {
    [
        info.pid.to_string(),
        or_unknown(info.ppid),
        text_or_unknown(info.user.as_deref()).into_owned(),
        text_or_unknown(info.state.as_deref()).into_owned(),
        cpu_or_unknown(info.cpu_percent),
        or_unknown(info.rss_kb.map(format_memory)),
        command_of(info),
    ]
}

pub(crate) fn connection_row(conn: &ConnectionInfo) -> [String; 6] {
    [
        conn.protocol.to_string(),
        conn.local_endpoint(),
        conn.remote_endpoint(),
        or_unknown(conn.state),
        or_unknown(conn.pid),
        text_or_unknown(conn.process_name.as_deref()).into_owned(),
    ]
}

/// Process list as a table
pub(crate) fn process_table(processes: &[ProcessInfo], emitter: &Emitter) -> String {
    let mut table = Table::new(PROCESS_COLUMNS);
    for info in processes {
        table.push(process_row(info));
    }
    table.render(emitter)
}

/// Connection list as a table
pub(crate) fn connection_table(connections: &[ConnectionInfo], emitter: &Emitter) -> String {
    let mut table = Table::new(CONNECTION_COLUMNS);
    for conn in connections {
        table.push(connection_row(conn));
    }
    table.render(emitter)
}
