//! Pure update function for the dashboard.
//!
//! `update()` takes the current model and one message, mutates the model, and
//! returns a command describing any side-effects the runtime should execute.
//! This module performs zero I/O.

use super::input::{InputAction, InputContext, resolve_key_event};
use super::log_viewer::LogViewerState;
use super::model::{DashboardCmd, DashboardModel, DashboardMsg};
use crate::collectors::PollRequest;
use crate::core::errors::DataSource;

/// Commands to run at startup: every collector, the splash timer and the
/// first tick.
#[must_use]
pub fn init(model: &DashboardModel) -> DashboardCmd {
    let mut cmds: Vec<DashboardCmd> = PollRequest::ALL
        .into_iter()
        .map(DashboardCmd::Poll)
        .collect();
    cmds.push(DashboardCmd::ScheduleSplash(model.schedule.splash_delay));
    cmds.push(DashboardCmd::ScheduleTick(model.schedule.tick));
    DashboardCmd::Batch(cmds)
}

/// Apply a message to the model and return the next command for the runtime.
pub fn update(model: &mut DashboardModel, msg: DashboardMsg) -> DashboardCmd {
    match msg {
        DashboardMsg::Tick(now) => {
            if model.splash_visible && model.splash_timer_elapsed && model.first_data_arrived {
                model.splash_visible = false;
            }
            let mut cmds: Vec<DashboardCmd> = model
                .schedule
                .plan_batch(now, model.last_issue_refresh)
                .into_iter()
                .map(DashboardCmd::Poll)
                .collect();
            cmds.push(DashboardCmd::ScheduleTick(model.schedule.tick));
            DashboardCmd::Batch(cmds)
        }

        DashboardMsg::SplashTimerElapsed => {
            model.splash_timer_elapsed = true;
            DashboardCmd::None
        }

        DashboardMsg::Key(key) => {
            if !key.is_press() {
                return DashboardCmd::None;
            }
            let context = InputContext {
                pane: model.pane,
                modal_open: model.modal_active(),
            };
            match resolve_key_event(&key, context) {
                Some(action) => apply_input_action(model, action),
                None => DashboardCmd::None,
            }
        }

        DashboardMsg::Resize { cols, rows } => {
            model.terminal_size = (cols, rows);
            if let Some(modal) = model.modal.as_mut() {
                modal.resize(cols, rows);
            }
            DashboardCmd::None
        }

        DashboardMsg::PodsLoaded(snapshot) => {
            model.pods = snapshot;
            if model.selected_pod >= model.pods.names().len() {
                model.selected_pod = 0;
            }
            model.errors.remove(&DataSource::Pods);
            model.first_data_arrived = true;
            DashboardCmd::None
        }

        DashboardMsg::ContextLoaded(context) => {
            model.context = context;
            model.errors.remove(&DataSource::Context);
            DashboardCmd::None
        }

        DashboardMsg::HealthLoaded(results) => {
            model.health = results;
            model.errors.remove(&DataSource::Health);
            model.first_data_arrived = true;
            DashboardCmd::None
        }

        DashboardMsg::IssuesLoaded { projects, at, wall } => {
            model.issues = projects;
            model.last_issue_refresh = Some(at);
            model.last_issue_refresh_at = Some(wall);
            model.errors.remove(&DataSource::IssueList);
            model.first_data_arrived = true;
            DashboardCmd::None
        }

        DashboardMsg::IssueCountsLoaded(counts) => {
            model.issue_counts = counts;
            model.errors.remove(&DataSource::IssueCounts);
            model.first_data_arrived = true;
            DashboardCmd::None
        }

        DashboardMsg::LogsLoaded { pod, result } => {
            // A result for a viewer that was closed (or reopened on another
            // pod) is dropped.
            if let Some(modal) = model.modal.as_mut().filter(|m| m.pod_name() == pod) {
                match result {
                    Ok(text) => modal.set_logs(text),
                    Err(error) => modal.set_error(&error),
                }
            }
            DashboardCmd::None
        }

        DashboardMsg::CollectorFailed(error) => {
            model.errors.insert(error.origin(), error);
            DashboardCmd::None
        }
    }
}

fn apply_input_action(model: &mut DashboardModel, action: InputAction) -> DashboardCmd {
    match action {
        InputAction::Quit => {
            model.quit = true;
            DashboardCmd::Quit
        }
        InputAction::NextPane => {
            model.pane = model.pane.next();
            model.selected_pod = 0;
            DashboardCmd::None
        }
        InputAction::PrevPane => {
            model.pane = model.pane.prev();
            model.selected_pod = 0;
            DashboardCmd::None
        }
        InputAction::SelectUp => {
            let len = model.pods.names().len();
            if len > 0 {
                model.selected_pod = model.selected_pod.checked_sub(1).unwrap_or(len - 1);
            }
            DashboardCmd::None
        }
        InputAction::SelectDown => {
            let len = model.pods.names().len();
            if len > 0 {
                model.selected_pod = (model.selected_pod + 1) % len;
            }
            DashboardCmd::None
        }
        InputAction::OpenLogs => open_log_viewer(model),
        InputAction::CloseModal => {
            model.modal = None;
            DashboardCmd::None
        }
        InputAction::ScrollUp => with_modal(model, |m| m.scroll_up(1)),
        InputAction::ScrollDown => with_modal(model, |m| m.scroll_down(1)),
        InputAction::PageUp => with_modal(model, LogViewerState::page_up),
        InputAction::PageDown => with_modal(model, LogViewerState::page_down),
        InputAction::ScrollTop => with_modal(model, LogViewerState::scroll_to_top),
        InputAction::ScrollBottom => with_modal(model, LogViewerState::scroll_to_bottom),
    }
}

fn open_log_viewer(model: &mut DashboardModel) -> DashboardCmd {
    let Some(pod) = model.selected_pod_name().map(str::to_string) else {
        return DashboardCmd::None;
    };
    model.modal = Some(LogViewerState::new(pod.clone()));
    let (cols, rows) = model.terminal_size;
    DashboardCmd::Batch(vec![
        DashboardCmd::SyncViewportSize { cols, rows },
        DashboardCmd::FetchLogs { pod },
    ])
}

fn with_modal(model: &mut DashboardModel, f: impl FnOnce(&mut LogViewerState)) -> DashboardCmd {
    if let Some(modal) = model.modal.as_mut() {
        f(modal);
    }
    DashboardCmd::None
}
