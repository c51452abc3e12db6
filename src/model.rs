//! Inspection entities consumed by the renderers
//!
//! These are plain data filled in by a collector. Renderers only borrow them
//! for the duration of one call and never mutate them. A field the collector
//! could not read is `None`; it serializes as `null` and renders as
//! [`UNKNOWN`] in text output.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder shown in text output for a value that was not collected
pub const UNKNOWN: &str = "?";

/// Information about a single process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessInfo {
    /// Process ID
    pub pid: u32,
    /// Parent process ID
    pub ppid: Option<u32>,
    /// Short executable name (e.g. `sshd`)
    pub name: Option<String>,
    /// Full command line, arguments joined by spaces
    pub cmdline: Option<String>,
    /// Owning user name
    pub user: Option<String>,
    /// Scheduler state as reported by the OS (e.g. `S`, `R`, `Z`)
    pub state: Option<String>,
    /// Number of threads
    pub threads: Option<u32>,
    /// CPU usage in percent of one core. NaN and infinities are shown as
    /// unknown and serialize as `null`.
    pub cpu_percent: Option<f64>,
    /// Resident set size in kilobytes
    pub rss_kb: Option<u64>,
    /// When the process started
    pub start_time: Option<DateTime<Utc>>,
}

impl ProcessInfo {
    /// Create a process record with only the PID known
    #[must_use]
    pub const fn new(pid: u32) -> Self {
        Self {
            pid,
            ppid: None,
            name: None,
            cmdline: None,
            user: None,
            state: None,
            threads: None,
            cpu_percent: None,
            rss_kb: None,
            start_time: None,
        }
    }

    /// Best available display name.
    ///
    /// Falls back to the file name of the first command line word, then to
    /// [`UNKNOWN`].
    #[must_use]
    pub fn display_name(&self) -> &str {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name;
        }
        self.cmdline
            .as_deref()
            .and_then(|c| c.split_whitespace().next())
            .and_then(|exe| exe.rsplit('/').next())
            .filter(|n| !n.is_empty())
            .unwrap_or(UNKNOWN)
    }
}

/// A process together with its children, in collection order
///
/// Children are owned, so a node can never be its own descendant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessTreeNode {
    /// The process at this node
    #[serde(flatten)]
    pub process: ProcessInfo,
    /// Child processes, in the order the collector found them
    #[serde(default)]
    pub children: Vec<Self>,
}

impl ProcessTreeNode {
    /// Create a leaf node
    #[must_use]
    pub const fn new(process: ProcessInfo) -> Self {
        Self {
            process,
            children: Vec::new(),
        }
    }

    /// Append a child and return the node (builder style)
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Total number of nodes in this subtree, including `self`
    #[must_use]
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// A tree always holds at least its root
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

/// Transport protocol of a socket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// TCP over IPv4
    Tcp,
    /// UDP over IPv4
    Udp,
    /// TCP over IPv6
    Tcp6,
    /// UDP over IPv6
    Udp6,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp => write!(f, "tcp"),
            Self::Udp => write!(f, "udp"),
            Self::Tcp6 => write!(f, "tcp6"),
            Self::Udp6 => write!(f, "udp6"),
        }
    }
}

/// TCP connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionState {
    /// Waiting for incoming connections
    Listen,
    /// Open connection
    Established,
    /// Active open in progress
    SynSent,
    /// Passive open in progress
    SynRecv,
    /// Local side closed, waiting for ack
    FinWait1,
    /// Local side closed and acked
    FinWait2,
    /// Waiting out stray segments after close
    TimeWait,
    /// Closed
    Close,
    /// Remote side closed
    CloseWait,
    /// Waiting for final ack
    LastAck,
    /// Both sides closing simultaneously
    Closing,
}

impl ConnectionState {
    /// The conventional upper-case name (matches the serialized form)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Listen => "LISTEN",
            Self::Established => "ESTABLISHED",
            Self::SynSent => "SYN_SENT",
            Self::SynRecv => "SYN_RECV",
            Self::FinWait1 => "FIN_WAIT1",
            Self::FinWait2 => "FIN_WAIT2",
            Self::TimeWait => "TIME_WAIT",
            Self::Close => "CLOSE",
            Self::CloseWait => "CLOSE_WAIT",
            Self::LastAck => "LAST_ACK",
            Self::Closing => "CLOSING",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A socket and the process that owns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    /// Transport protocol
    pub protocol: Protocol,
    /// Local bound address
    pub local_addr: IpAddr,
    /// Local port
    pub local_port: u16,
    /// Peer address (absent for listening and unconnected sockets)
    pub remote_addr: Option<IpAddr>,
    /// Peer port
    pub remote_port: Option<u16>,
    /// TCP state; UDP sockets have none
    pub state: Option<ConnectionState>,
    /// Owning process
    pub pid: Option<u32>,
    /// Name of the owning process
    pub process_name: Option<String>,
}

impl ConnectionInfo {
    /// `addr:port` for the local side, IPv6 bracketed
    #[must_use]
    pub fn local_endpoint(&self) -> String {
        SocketAddr::new(self.local_addr, self.local_port).to_string()
    }

    /// `addr:port` for the peer, with `*` for unknown parts
    #[must_use]
    pub fn remote_endpoint(&self) -> String {
        match (self.remote_addr, self.remote_port) {
            (Some(addr), Some(port)) => SocketAddr::new(addr, port).to_string(),
            (Some(IpAddr::V6(addr)), None) => format!("[{addr}]:*"),
            (Some(addr), None) => format!("{addr}:*"),
            (None, _) => "*:*".to_string(),
        }
    }

    /// Whether either end of the socket uses `port`
    #[must_use]
    pub fn involves_port(&self, port: u16) -> bool {
        self.local_port == port || self.remote_port == Some(port)
    }
}

/// One `KEY=VALUE` environment entry, kept as opaque text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvVar(String);

impl EnvVar {
    /// Wrap a raw environment line
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The line exactly as collected
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text before the first `=`, or the whole line if there is none
    #[must_use]
    pub fn key(&self) -> &str {
        self.0.split_once('=').map_or(self.0.as_str(), |(key, _)| key)
    }

    /// Text after the first `=`; `None` for a line without one
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.0.split_once('=').map(|(_, value)| value)
    }
}

impl From<&str> for EnvVar {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for EnvVar {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}
