//! Refresh cadence: which polls a tick dispatches.

use std::time::{Duration, Instant};

use crate::collectors::PollRequest;
use crate::core::config::RefreshConfig;

/// Timer settings for the dashboard, derived once from [`RefreshConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSchedule {
    pub tick: Duration,
    pub issue_list_interval: Duration,
    pub splash_delay: Duration,
}

impl Default for RefreshSchedule {
    fn default() -> Self {
        Self::from_config(&RefreshConfig::default())
    }
}

impl RefreshSchedule {
    #[must_use]
    pub const fn from_config(refresh: &RefreshConfig) -> Self {
        Self {
            tick: refresh.tick(),
            issue_list_interval: refresh.issue_list_interval(),
            splash_delay: refresh.splash_delay(),
        }
    }

    /// True when no issue list has landed yet or the last one is stale.
    #[must_use]
    pub fn issue_list_due(&self, now: Instant, last_issue_refresh: Option<Instant>) -> bool {
        last_issue_refresh
            .is_none_or(|last| now.saturating_duration_since(last) >= self.issue_list_interval)
    }

    /// Polls for one tick: pods, context, health and counts always; the issue
    /// list only when due.
    #[must_use]
    pub fn plan_batch(
        &self,
        now: Instant,
        last_issue_refresh: Option<Instant>,
    ) -> Vec<PollRequest> {
        let mut batch = vec![
            PollRequest::IssueCounts,
            PollRequest::Health,
            PollRequest::Pods,
            PollRequest::Context,
        ];
        if self.issue_list_due(now, last_issue_refresh) {
            batch.push(PollRequest::IssueList);
        }
        batch
    }
}
