//! Error type for rendering calls

use std::fmt;
use std::io;

use thiserror::Error;

use crate::config::OutputMode;

/// Which kind of entity a render call was handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A single process
    Process,
    /// A process hierarchy
    ProcessTree,
    /// A process environment
    Environment,
    /// Connections on one port
    PortConnections,
    /// A list of processes
    ProcessList,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Process => write!(f, "process"),
            Self::ProcessTree => write!(f, "process tree"),
            Self::Environment => write!(f, "environment"),
            Self::PortConnections => write!(f, "port connections"),
            Self::ProcessList => write!(f, "process list"),
        }
    }
}

/// Why a render call failed. Nothing is written when this is returned
/// before output starts; an [`RenderError::Io`] may follow a partial write.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The output stream rejected the write (closed pipe, full disk, ...)
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    /// Building the structured document failed
    #[error("failed to serialize {entity}: {source}")]
    Serialize {
        /// Entity being serialized
        entity: EntityKind,
        /// Underlying serializer error
        #[source]
        source: serde_json::Error,
    },

    /// The requested mode has no rendering for this entity
    #[error("output mode '{mode}' is not supported for {entity}")]
    UnsupportedMode {
        /// Requested mode
        mode: OutputMode,
        /// Entity it was requested for
        entity: EntityKind,
    },
}

impl RenderError {
    /// True when the reader of our output went away
    #[must_use]
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Self::Io(err) if err.kind() == io::ErrorKind::BrokenPipe)
    }
}
