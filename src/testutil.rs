//! Shared test utilities
//!
//! Common fixtures used across test modules. Only compiled in test builds.

use std::net::{IpAddr, Ipv4Addr};

use crate::model::{ConnectionInfo, ConnectionState, ProcessInfo, ProcessTreeNode, Protocol};

/// A fully populated process owned by root.
///
/// `ppid = 1`, state `S`, 1.5% CPU, 2048 KB RSS, command `/usr/bin/<name>`;
/// threads and start time are left unknown.
#[must_use]
pub fn sample_process(pid: u32, name: &str) -> ProcessInfo {
    ProcessInfo {
        pid,
        ppid: Some(1),
        name: Some(name.to_string()),
        cmdline: Some(format!("/usr/bin/{name}")),
        user: Some("root".to_string()),
        state: Some("S".to_string()),
        threads: None,
        cpu_percent: Some(1.5),
        rss_kb: Some(2048),
        start_time: None,
    }
}

/// `init(1) -> [sshd(10), cron(11)]`
#[must_use]
pub fn sample_tree() -> ProcessTreeNode {
    ProcessTreeNode::new(sample_process(1, "init"))
        .with_child(ProcessTreeNode::new(sample_process(10, "sshd")))
        .with_child(ProcessTreeNode::new(sample_process(11, "cron")))
}

/// nginx (PID 4242) listening on `0.0.0.0:<port>`
#[must_use]
pub fn sample_connection(port: u16) -> ConnectionInfo {
    ConnectionInfo {
        protocol: Protocol::Tcp,
        local_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        local_port: port,
        remote_addr: None,
        remote_port: None,
        state: Some(ConnectionState::Listen),
        pid: Some(4242),
        process_name: Some("nginx".to_string()),
    }
}
