//! Dashboard event loop.
//!
//! One thread owns the model: it draws, blocks on the message channel, folds
//! the next message and executes the returned command. Collectors, timers and
//! terminal input run on their own threads and only ever send messages.

#![allow(missing_docs)]

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use chrono::Local;
use crossbeam_channel::{Receiver, Sender, unbounded};
use crossterm::event::{self, Event};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info, warn};

use super::model::{DashboardCmd, DashboardModel, DashboardMsg};
use super::render::render;
use super::scheduler::RefreshSchedule;
use super::terminal_guard::TerminalGuard;
use super::theme::Theme;
use super::update::{init, update};
use crate::collectors::{
    CommandRunner, PollRequest, ProcessRunner, collect_context, collect_health,
    collect_issue_counts, collect_issue_list, collect_logs, collect_pods,
};
use crate::core::config::Config;
use crate::core::errors::{OncallError, Result};

/// How long the input thread blocks before re-checking for shutdown.
const INPUT_POLL: Duration = Duration::from_millis(250);

/// Runtime inputs shared with background work.
#[derive(Clone)]
pub struct DashboardRuntimeConfig {
    pub config: Arc<Config>,
    pub theme: Theme,
    pub runner: Arc<dyn CommandRunner>,
}

impl DashboardRuntimeConfig {
    #[must_use]
    pub fn new(config: Config, theme: Theme) -> Self {
        Self {
            config: Arc::new(config),
            theme,
            runner: Arc::new(ProcessRunner),
        }
    }
}

/// Run the dashboard until the operator quits.
///
/// # Errors
/// Returns terminal setup/draw failures. Collector failures never end the
/// loop; they are folded into the model as messages.
pub fn run_dashboard(runtime: &DashboardRuntimeConfig) -> Result<()> {
    let guard = TerminalGuard::new().map_err(|source| OncallError::Terminal { source })?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
        .map_err(|source| OncallError::Terminal { source })?;

    let (tx, rx) = unbounded();
    let shutdown = Arc::new(AtomicBool::new(false));
    let input = spawn_input_thread(tx.clone(), Arc::clone(&shutdown));

    let schedule = RefreshSchedule::from_config(&runtime.config.refresh);
    let mut model = DashboardModel::new(schedule, TerminalGuard::terminal_size());
    let executor = Executor::new(runtime, tx);

    info!("dashboard started");
    let result = event_loop(&mut terminal, &mut model, &executor, &rx, &runtime.theme);

    shutdown.store(true, Ordering::SeqCst);
    let _ = input.join();
    drop(guard);
    info!("dashboard stopped");
    result
}

fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    model: &mut DashboardModel,
    executor: &Executor,
    rx: &Receiver<DashboardMsg>,
    theme: &Theme,
) -> Result<()> {
    if executor.execute(init(model)) {
        return Ok(());
    }
    loop {
        terminal
            .draw(|frame| render(frame, model, theme))
            .map_err(|source| OncallError::Terminal { source })?;

        let msg = rx.recv().map_err(|_| OncallError::ChannelClosed {
            component: "dashboard event loop",
        })?;
        let cmd = update(model, msg);
        if executor.execute(cmd) || model.quit {
            return Ok(());
        }
    }
}

fn spawn_input_thread(
    tx: Sender<DashboardMsg>,
    shutdown: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while !shutdown.load(Ordering::SeqCst) {
            match event::poll(INPUT_POLL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    warn!(error = %e, "terminal input poll failed");
                    break;
                }
            }
            let msg = match event::read() {
                Ok(Event::Key(key)) => DashboardMsg::Key(key.into()),
                Ok(Event::Resize(cols, rows)) => DashboardMsg::Resize { cols, rows },
                Ok(_) => continue,
                Err(e) => {
                    warn!(error = %e, "terminal input read failed");
                    break;
                }
            };
            if tx.send(msg).is_err() {
                break;
            }
        }
    })
}

/// Executes [`DashboardCmd`] values by spawning background work that reports
/// back over the message channel.
pub struct Executor {
    config: Arc<Config>,
    runner: Arc<dyn CommandRunner>,
    tx: Sender<DashboardMsg>,
}

impl Executor {
    #[must_use]
    pub fn new(runtime: &DashboardRuntimeConfig, tx: Sender<DashboardMsg>) -> Self {
        Self {
            config: Arc::clone(&runtime.config),
            runner: Arc::clone(&runtime.runner),
            tx,
        }
    }

    /// Run `cmd`. Returns `true` when the loop should stop.
    pub fn execute(&self, cmd: DashboardCmd) -> bool {
        match cmd {
            DashboardCmd::None => false,
            DashboardCmd::Quit => true,
            DashboardCmd::Batch(cmds) => {
                debug!(commands = cmds.len(), "dispatching command batch");
                cmds.into_iter()
                    .fold(false, |quit, cmd| self.execute(cmd) || quit)
            }
            DashboardCmd::Poll(request) => {
                let config = Arc::clone(&self.config);
                let runner = Arc::clone(&self.runner);
                let tx = self.tx.clone();
                thread::spawn(move || {
                    let _ = tx.send(poll_message(request, runner.as_ref(), &config));
                });
                false
            }
            DashboardCmd::ScheduleTick(after) => {
                self.send_after(after, || DashboardMsg::Tick(Instant::now()));
                false
            }
            DashboardCmd::ScheduleSplash(after) => {
                self.send_after(after, || DashboardMsg::SplashTimerElapsed);
                false
            }
            DashboardCmd::SyncViewportSize { cols, rows } => {
                let _ = self.tx.send(DashboardMsg::Resize { cols, rows });
                false
            }
            DashboardCmd::FetchLogs { pod } => {
                let config = Arc::clone(&self.config);
                let runner = Arc::clone(&self.runner);
                let tx = self.tx.clone();
                thread::spawn(move || {
                    let result = collect_logs(runner.as_ref(), &config.kube, &pod);
                    if let Err(e) = &result {
                        warn!(pod = %pod, error = %e, "log fetch failed");
                    }
                    let _ = tx.send(DashboardMsg::LogsLoaded { pod, result });
                });
                false
            }
        }
    }

    fn send_after<F>(&self, after: Duration, make: F)
    where
        F: FnOnce() -> DashboardMsg + Send + 'static,
    {
        let tx = self.tx.clone();
        thread::spawn(move || {
            thread::sleep(after);
            let _ = tx.send(make());
        });
    }
}

/// Run one collector to completion and wrap its outcome as a message.
pub fn poll_message(
    request: PollRequest,
    runner: &dyn CommandRunner,
    config: &Config,
) -> DashboardMsg {
    let result = match request {
        PollRequest::Pods => collect_pods(runner, &config.kube).map(DashboardMsg::PodsLoaded),
        PollRequest::Context => {
            collect_context(runner, &config.kube).map(DashboardMsg::ContextLoaded)
        }
        PollRequest::Health => Ok(DashboardMsg::HealthLoaded(collect_health(
            runner,
            &config.health,
        ))),
        PollRequest::IssueCounts => {
            collect_issue_counts(runner, &config.issues).map(DashboardMsg::IssueCountsLoaded)
        }
        PollRequest::IssueList => collect_issue_list(runner, &config.issues).map(|projects| {
            DashboardMsg::IssuesLoaded {
                projects,
                at: Instant::now(),
                wall: Local::now(),
            }
        }),
    };
    result.unwrap_or_else(|error| {
        warn!(source = %request.source(), error = %error, "collector failed");
        DashboardMsg::CollectorFailed(error)
    })
}
