//! Property-based tests for dashboard reducer invariants.
//!
//! Arbitrary sequences of messages are folded into a fresh model and the
//! state is checked after every step: the pod cursor stays in range, the
//! splash never comes back once dismissed, and pane navigation is periodic.

use std::time::{Duration, Instant};

use chrono::Local;
use proptest::prelude::*;

use super::input::{KeyCode, KeyEvent, KeyEventKind, Modifiers};
use super::model::{DashboardCmd, DashboardModel, DashboardMsg, Pane};
use super::scheduler::RefreshSchedule;
use super::update::update;
use crate::collectors::PodSnapshot;
use crate::core::errors::{CollectorError, DataSource};

// ──────────────────── strategies ────────────────────

fn arb_key_code() -> impl Strategy<Value = KeyCode> {
    prop_oneof![
        Just(KeyCode::Char('j')),
        Just(KeyCode::Char('k')),
        Just(KeyCode::Char('l')),
        Just(KeyCode::Char('g')),
        Just(KeyCode::Char('G')),
        Just(KeyCode::Char('x')),
        Just(KeyCode::Tab),
        Just(KeyCode::BackTab),
        Just(KeyCode::Escape),
        Just(KeyCode::Enter),
        Just(KeyCode::Up),
        Just(KeyCode::Down),
        Just(KeyCode::PageUp),
        Just(KeyCode::PageDown),
        Just(KeyCode::Home),
        Just(KeyCode::End),
    ]
}

fn arb_key_event() -> impl Strategy<Value = KeyEvent> {
    (arb_key_code(), any::<bool>()).prop_map(|(code, release)| KeyEvent {
        code,
        modifiers: Modifiers::NONE,
        kind: if release {
            KeyEventKind::Release
        } else {
            KeyEventKind::Press
        },
    })
}

fn arb_pods() -> impl Strategy<Value = PodSnapshot> {
    (0usize..6).prop_map(|n| {
        let mut display = String::from("NAME STATUS\n");
        let names: Vec<String> = (0..n).map(|i| format!("pod-{i}")).collect();
        for name in &names {
            display.push_str(&format!("{name} Running\n"));
        }
        PodSnapshot::new(&display, names)
    })
}

fn arb_failure() -> impl Strategy<Value = CollectorError> {
    prop_oneof![
        Just(DataSource::Pods),
        Just(DataSource::Health),
        Just(DataSource::IssueList),
        Just(DataSource::IssueCounts),
    ]
    .prop_map(|origin| CollectorError::Exit {
        origin,
        program: "tool".into(),
        status: "exit status: 1".into(),
        output: "boom".into(),
    })
}

fn arb_msg() -> impl Strategy<Value = DashboardMsg> {
    prop_oneof![
        4 => arb_key_event().prop_map(DashboardMsg::Key),
        2 => arb_pods().prop_map(DashboardMsg::PodsLoaded),
        1 => Just(DashboardMsg::Tick(Instant::now())),
        1 => Just(DashboardMsg::SplashTimerElapsed),
        1 => Just(DashboardMsg::HealthLoaded(Vec::new())),
        1 => Just(DashboardMsg::ContextLoaded(Some("prod".into()))),
        1 => Just(DashboardMsg::IssueCountsLoaded(Vec::new())),
        1 => (10u16..200, 5u16..80).prop_map(|(cols, rows)| DashboardMsg::Resize { cols, rows }),
        1 => arb_failure().prop_map(DashboardMsg::CollectorFailed),
        1 => (0usize..4, any::<bool>()).prop_map(|(i, ok)| DashboardMsg::LogsLoaded {
            pod: format!("pod-{i}"),
            result: if ok {
                Ok("line one\nline two\n".into())
            } else {
                Err(CollectorError::Timeout {
                    origin: DataSource::PodLogs,
                    program: "kubectl".into(),
                    after: Duration::from_secs(10),
                })
            },
        }),
    ]
}

fn fresh_model() -> DashboardModel {
    DashboardModel::new(RefreshSchedule::default(), (100, 30))
}

// ──────────────────── properties ────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn pod_cursor_stays_in_range(msgs in prop::collection::vec(arb_msg(), 1..60)) {
        let mut model = fresh_model();
        for msg in msgs {
            let _ = update(&mut model, msg);
            let len = model.pods.names().len();
            if len > 0 {
                prop_assert!(model.selected_pod < len);
            }
            prop_assert_eq!(model.pods.names().len(), model.pods.rows().len());
        }
    }

    #[test]
    fn splash_never_returns_once_hidden(msgs in prop::collection::vec(arb_msg(), 1..60)) {
        let mut model = fresh_model();
        let mut hidden = false;
        for msg in msgs {
            let _ = update(&mut model, msg);
            if hidden {
                prop_assert!(!model.splash_visible);
            }
            if !model.splash_visible {
                prop_assert!(model.splash_timer_elapsed);
                prop_assert!(model.first_data_arrived);
                hidden = true;
            }
        }
    }

    #[test]
    fn failures_are_recorded_under_their_origin(msgs in prop::collection::vec(arb_msg(), 1..40)) {
        let mut model = fresh_model();
        for msg in msgs {
            let _ = update(&mut model, msg);
            for (source, error) in &model.errors {
                prop_assert_eq!(*source, error.origin());
            }
        }
    }

    #[test]
    fn tick_always_reschedules_itself(msgs in prop::collection::vec(arb_msg(), 0..30)) {
        let mut model = fresh_model();
        for msg in msgs {
            let _ = update(&mut model, msg);
        }
        let cmds = update(&mut model, DashboardMsg::Tick(Instant::now())).flatten();
        prop_assert_eq!(cmds.last(), Some(&DashboardCmd::ScheduleTick(model.schedule.tick)));
    }

    #[test]
    fn pane_cycle_has_period_three(start in 0u8..3) {
        let pane = Pane::from_index(start);
        prop_assert_eq!(pane.next().next().next(), pane);
        prop_assert_eq!(pane.next().prev(), pane);
    }

    #[test]
    fn pane_change_resets_cursor(pods in arb_pods(), downs in 0usize..8, back in any::<bool>()) {
        let mut model = fresh_model();
        let _ = update(&mut model, DashboardMsg::PodsLoaded(pods));
        model.pane = Pane::Pods;
        for _ in 0..downs {
            let _ = update(&mut model, DashboardMsg::Key(KeyEvent::new(KeyCode::Down)));
        }
        let code = if back { KeyCode::BackTab } else { KeyCode::Tab };
        let _ = update(&mut model, DashboardMsg::Key(KeyEvent::new(code)));
        prop_assert_eq!(model.selected_pod, 0);
        prop_assert_ne!(model.pane, Pane::Pods);
    }

    #[test]
    fn issues_refresh_records_both_clocks(n in 0usize..3) {
        let mut model = fresh_model();
        let at = Instant::now();
        let wall = Local::now();
        let _ = update(
            &mut model,
            DashboardMsg::IssuesLoaded { projects: Vec::new(), at, wall },
        );
        for _ in 0..n {
            let _ = update(&mut model, DashboardMsg::Tick(Instant::now()));
        }
        prop_assert_eq!(model.last_issue_refresh, Some(at));
        prop_assert_eq!(model.last_issue_refresh_at, Some(wall));
        prop_assert!(model.first_data_arrived);
    }
}
