//! Data collectors: each one shells out to an external tool, runs the output
//! through the extraction engine and hands back a typed result.
//!
//! Collectors are plain blocking functions over a [`CommandRunner`]; the
//! runtime decides which thread they run on.

#![allow(missing_docs)]

pub mod context;
pub mod exec;
pub mod health;
pub mod issues;
pub mod logs;
pub mod pods;

pub use context::{collect_context, parse_active_context};
pub use exec::{CommandRunner, ProcessRunner};
pub use health::{GroupHealth, HealthResult, collect_health};
pub use issues::{IssueCount, ProjectIssues, collect_issue_counts, collect_issue_list};
pub use logs::collect_logs;
pub use pods::{PodSnapshot, collect_pods};

use crate::core::errors::DataSource;

/// One unit of background collection work requested by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PollRequest {
    Pods,
    Context,
    Health,
    IssueCounts,
    IssueList,
}

impl PollRequest {
    /// Every poll, in the order the initial batch dispatches them.
    pub const ALL: [Self; 5] = [
        Self::IssueList,
        Self::IssueCounts,
        Self::Pods,
        Self::Context,
        Self::Health,
    ];

    #[must_use]
    pub const fn source(self) -> DataSource {
        match self {
            Self::Pods => DataSource::Pods,
            Self::Context => DataSource::Context,
            Self::Health => DataSource::Health,
            Self::IssueCounts => DataSource::IssueCounts,
            Self::IssueList => DataSource::IssueList,
        }
    }
}
