//! Elm-style state model for the on-call dashboard.
//!
//! All display state lives in [`DashboardModel`]. Input, timers and collector
//! results arrive as [`DashboardMsg`] values; side-effects are represented as
//! [`DashboardCmd`] values returned from the update function.
//!
//! Nothing in this module performs I/O.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::collectors::{HealthResult, IssueCount, PodSnapshot, PollRequest, ProjectIssues};
use crate::core::errors::{CollectorError, DataSource};
use crate::tui::input::KeyEvent;
use crate::tui::log_viewer::LogViewerState;
use crate::tui::scheduler::RefreshSchedule;

// ──────────────────── panes ────────────────────

/// Focusable panes of the main view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Pane {
    /// Recent unresolved issues per project.
    #[default]
    Errors,
    /// Issue totals and service health.
    Analytics,
    /// Live pod table.
    Pods,
}

const PANE_COUNT: u8 = 3;

impl Pane {
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Errors => 0,
            Self::Analytics => 1,
            Self::Pods => 2,
        }
    }

    #[must_use]
    pub const fn from_index(n: u8) -> Self {
        match n % PANE_COUNT {
            0 => Self::Errors,
            1 => Self::Analytics,
            _ => Self::Pods,
        }
    }

    /// Next pane, wrapping Pods → Errors.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Previous pane, wrapping Errors → Pods.
    #[must_use]
    pub const fn prev(self) -> Self {
        Self::from_index(self.index() + PANE_COUNT - 1)
    }
}

// ──────────────────── model ────────────────────

/// The single owned dashboard state.
#[derive(Debug)]
pub struct DashboardModel {
    pub pane: Pane,
    pub selected_pod: usize,
    pub issues: Vec<ProjectIssues>,
    pub issue_counts: Vec<IssueCount>,
    pub health: Vec<HealthResult>,
    pub pods: PodSnapshot,
    pub context: Option<String>,
    /// Monotonic time of the last successful issue-list refresh.
    pub last_issue_refresh: Option<Instant>,
    /// Wall-clock time of the same refresh, for display.
    pub last_issue_refresh_at: Option<DateTime<Local>>,
    pub splash_visible: bool,
    pub splash_timer_elapsed: bool,
    pub first_data_arrived: bool,
    /// Open log viewer, if any.
    pub modal: Option<LogViewerState>,
    pub terminal_size: (u16, u16),
    /// Most recent failure per data source; cleared by the next success.
    pub errors: HashMap<DataSource, CollectorError>,
    pub schedule: RefreshSchedule,
    pub quit: bool,
}

impl DashboardModel {
    #[must_use]
    pub fn new(schedule: RefreshSchedule, terminal_size: (u16, u16)) -> Self {
        Self {
            pane: Pane::default(),
            selected_pod: 0,
            issues: Vec::new(),
            issue_counts: Vec::new(),
            health: Vec::new(),
            pods: PodSnapshot::default(),
            context: None,
            last_issue_refresh: None,
            last_issue_refresh_at: None,
            splash_visible: true,
            splash_timer_elapsed: false,
            first_data_arrived: false,
            modal: None,
            terminal_size,
            errors: HashMap::new(),
            schedule,
            quit: false,
        }
    }

    #[must_use]
    pub const fn modal_active(&self) -> bool {
        self.modal.is_some()
    }

    #[must_use]
    pub fn error_for(&self, source: DataSource) -> Option<&CollectorError> {
        self.errors.get(&source)
    }

    /// Name of the pod under the cursor.
    #[must_use]
    pub fn selected_pod_name(&self) -> Option<&str> {
        self.pods.names().get(self.selected_pod).map(String::as_str)
    }
}

// ──────────────────── messages ────────────────────

/// Events folded into the model one at a time.
#[derive(Debug, Clone)]
pub enum DashboardMsg {
    /// Periodic refresh tick.
    Tick(Instant),
    /// The one-shot splash timer fired.
    SplashTimerElapsed,
    Key(KeyEvent),
    Resize {
        cols: u16,
        rows: u16,
    },
    PodsLoaded(PodSnapshot),
    ContextLoaded(Option<String>),
    HealthLoaded(Vec<HealthResult>),
    IssuesLoaded {
        projects: Vec<ProjectIssues>,
        at: Instant,
        wall: DateTime<Local>,
    },
    IssueCountsLoaded(Vec<IssueCount>),
    /// Log fetch finished for `pod`.
    LogsLoaded {
        pod: String,
        result: Result<String, CollectorError>,
    },
    /// A background collector failed.
    CollectorFailed(CollectorError),
}

// ──────────────────── commands ────────────────────

/// Side-effects returned by the update function for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardCmd {
    None,
    Quit,
    Batch(Vec<Self>),
    /// Run one collector in the background.
    Poll(PollRequest),
    /// Deliver the next `Tick` after the given duration.
    ScheduleTick(Duration),
    /// Deliver `SplashTimerElapsed` after the given duration.
    ScheduleSplash(Duration),
    /// Echo the given size back as a `Resize` message.
    SyncViewportSize {
        cols: u16,
        rows: u16,
    },
    /// Fetch logs for one pod, bounded by the log timeout.
    FetchLogs {
        pod: String,
    },
}

impl DashboardCmd {
    /// Flatten nested batches into a list of leaf commands.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::None => Vec::new(),
            Self::Batch(cmds) => cmds.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}

// ──────────────────── tests ────────────────────
