//! Output configuration
//!
//! [`OutputConfig`] is what the renderers consume: an output mode plus an
//! already-resolved color flag. [`Settings`] is the optional `procscope.toml`
//! file the CLI builds it from.

use std::fmt;
use std::io::IsTerminal;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "procscope.toml";

/// How rendered entities are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Human-readable text: detail views, aligned tables, trees
    #[default]
    Text,
    /// One tab-separated line per entity
    Short,
    /// Pretty-printed JSON
    Json,
}

impl OutputMode {
    /// Whether this mode is meant for programs rather than people
    #[must_use]
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Json)
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Short => write!(f, "short"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// When to emit ANSI color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color when stdout is a capable terminal
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

impl ColorChoice {
    /// Decide once, at startup, whether color is on.
    ///
    /// `auto` honours `NO_COLOR`, `TERM=dumb` and whether stdout is a TTY.
    #[must_use]
    pub fn resolve(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => terminal_supports_color(),
        }
    }
}

fn terminal_supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var("TERM").is_ok_and(|term| term == "dumb") {
        return false;
    }
    std::io::stdout().is_terminal()
}

/// Per-invocation rendering configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputConfig {
    /// Layout to render
    pub mode: OutputMode,
    /// Whether ANSI color escapes may be written
    pub color: bool,
}

impl OutputConfig {
    /// Build a config from a mode and a resolved color flag
    #[must_use]
    pub const fn new(mode: OutputMode, color: bool) -> Self {
        Self { mode, color }
    }

    /// Config with color disabled
    #[must_use]
    pub const fn plain(mode: OutputMode) -> Self {
        Self { mode, color: false }
    }
}

/// `[output]` table of the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    /// Default output mode
    pub format: OutputMode,
    /// Default color choice
    pub color: ColorChoice,
}

/// Top-level `procscope.toml` contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Output defaults
    pub output: OutputSettings,
}

impl Settings {
    /// Parse a settings file from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse settings from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse procscope.toml")
    }

    /// Load settings for a CLI run.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// used if present, otherwise defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_path(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Combine file defaults with command line overrides
    #[must_use]
    pub fn output_config(
        &self,
        format: Option<OutputMode>,
        color: Option<ColorChoice>,
    ) -> OutputConfig {
        OutputConfig {
            mode: format.unwrap_or(self.output.format),
            color: color.unwrap_or(self.output.color).resolve(),
        }
    }
}
