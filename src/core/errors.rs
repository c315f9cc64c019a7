//! ONC-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, OncallError>;

/// Top-level error type for process startup and the event loop itself.
///
/// Collector failures never surface here; they travel as [`CollectorError`]
/// values inside dashboard messages.
#[derive(Debug, Error)]
pub enum OncallError {
    #[error("[ONC-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[ONC-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[ONC-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[ONC-1004] configuration serialization failure: {details}")]
    ConfigSerialize { details: String },

    #[error("[ONC-3001] terminal setup failure: {source}")]
    Terminal {
        #[source]
        source: std::io::Error,
    },

    #[error("[ONC-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[ONC-3003] channel closed in component {component}")]
    ChannelClosed { component: &'static str },
}

impl OncallError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "ONC-1001",
            Self::MissingConfig { .. } => "ONC-1002",
            Self::ConfigParse { .. } => "ONC-1003",
            Self::ConfigSerialize { .. } => "ONC-1004",
            Self::Terminal { .. } => "ONC-3001",
            Self::Io { .. } => "ONC-3002",
            Self::ChannelClosed { .. } => "ONC-3003",
        }
    }

    /// Whether retrying might resolve the failure.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::ChannelClosed { .. })
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<toml::de::Error> for OncallError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}

impl From<toml::ser::Error> for OncallError {
    fn from(value: toml::ser::Error) -> Self {
        Self::ConfigSerialize {
            details: value.to_string(),
        }
    }
}

// ──────────────────── collector errors ────────────────────

/// External data source a collector speaks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSource {
    Pods,
    Context,
    Health,
    IssueList,
    IssueCounts,
    PodLogs,
}

impl DataSource {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pods => "pods",
            Self::Context => "context",
            Self::Health => "health",
            Self::IssueList => "issue-list",
            Self::IssueCounts => "issue-counts",
            Self::PodLogs => "pod-logs",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Failure of one external collector call. Cloneable so it can ride inside
/// dashboard messages and be kept in the model for inline rendering.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollectorError {
    #[error("[ONC-2001] {origin}: failed to launch `{program}`: {details}")]
    Launch {
        origin: DataSource,
        program: String,
        details: String,
    },

    #[error("[ONC-2002] {origin}: `{program}` exited with {status}\n{output}")]
    Exit {
        origin: DataSource,
        program: String,
        status: String,
        output: String,
    },

    #[error("[ONC-2003] {origin}: `{program}` timed out after {}s", .after.as_secs())]
    Timeout {
        origin: DataSource,
        program: String,
        after: Duration,
    },
}

impl CollectorError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Launch { .. } => "ONC-2001",
            Self::Exit { .. } => "ONC-2002",
            Self::Timeout { .. } => "ONC-2003",
        }
    }

    /// Data source that produced the failure.
    #[must_use]
    pub const fn origin(&self) -> DataSource {
        match self {
            Self::Launch { origin, .. } | Self::Exit { origin, .. } | Self::Timeout { origin, .. } => {
                *origin
            }
        }
    }
}
