//! Frame rendering for the dashboard.
//!
//! Everything here is a pure function of [`DashboardModel`] and [`Theme`]:
//! the runtime calls [`render`] after every folded message. Pane contents are
//! built as plain `Line` lists first so they can be asserted on without a
//! terminal.

#![allow(missing_docs)]

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use super::input::KEY_HINTS;
use super::log_viewer::LogViewerState;
use super::model::{DashboardModel, Pane};
use super::theme::{
    SemanticToken, Theme, issue_level_token, issue_status_token, pod_status_token,
};
use crate::collectors::HealthResult;
use crate::core::errors::{CollectorError, DataSource};
use crate::extract::HealthStatus;

const HINT_BAR_ROWS: u16 = 3;

const SPLASH_ART: [&str; 6] = [
    r"   ____        _____      _ _ ",
    r"  / __ \____  / ___/___  (_| )",
    r" / / / / __ \__ \__/ / / /|/ ",
    r"/ /_/ / /_/ /__/ / / /_/ /     ",
    r"\____/ .___/____/  \__,_/      ",
    r"     /_/                         ",
];

/// Draw the whole frame for the current state.
pub fn render(frame: &mut Frame<'_>, model: &DashboardModel, theme: &Theme) {
    let area = frame.area();
    if model.splash_visible {
        render_splash(frame, area, theme);
    } else if let Some(modal) = &model.modal {
        render_log_viewer(frame, area, modal, theme);
    } else {
        render_main(frame, area, model, theme);
    }
}

// ──────────────────── splash ────────────────────

fn render_splash(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let mut lines = vec![Line::styled("On-Call", theme.palette.header), Line::raw("")];
    lines.extend(SPLASH_ART.iter().map(|row| Line::raw(*row)));
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        format!("v{}", env!("CARGO_PKG_VERSION")),
        theme.style(SemanticToken::Info),
    ));
    lines.push(Line::raw(""));
    lines.push(Line::raw("Fetching data..."));

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(4);
    let width = area.width.saturating_sub(4).max(20).min(area.width);
    let target = centered(area, width, height);

    frame.render_widget(Clear, target);
    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().border_style(theme.border(false))),
        target,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

// ──────────────────── main view ────────────────────

fn render_main(frame: &mut Frame<'_>, area: Rect, model: &DashboardModel, theme: &Theme) {
    let [top, hints] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(HINT_BAR_ROWS)]).areas(area);
    let [left, pods_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(top);
    let [errors_area, analytics_area] =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(left);

    frame.render_widget(
        Paragraph::new(issue_lines(model, theme))
            .wrap(Wrap { trim: false })
            .block(pane_block(errors_title(model), model.pane == Pane::Errors, theme)),
        errors_area,
    );
    frame.render_widget(
        Paragraph::new(analytics_lines(model, theme))
            .wrap(Wrap { trim: false })
            .block(pane_block(
                "Analytics".to_string(),
                model.pane == Pane::Analytics,
                theme,
            )),
        analytics_area,
    );

    let pods = pod_lines(model, theme);
    let inner_rows = usize::from(pods_area.height.saturating_sub(2));
    let cursor_line = pod_cursor_line(model);
    let scroll = (cursor_line + 1).saturating_sub(inner_rows);
    frame.render_widget(
        Paragraph::new(pods)
            .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
            .block(pane_block(pods_title(model), model.pane == Pane::Pods, theme)),
        pods_area,
    );

    frame.render_widget(
        Paragraph::new(hint_line(theme)).block(Block::bordered()),
        hints,
    );
}

fn pane_block(title: String, focused: bool, theme: &Theme) -> Block<'static> {
    let title_style = if focused {
        theme.palette.header
    } else {
        Style::new()
    };
    Block::bordered()
        .border_style(theme.border(focused))
        .title(Line::styled(format!(" {title} "), title_style))
}

fn errors_title(model: &DashboardModel) -> String {
    match model.last_issue_refresh_at {
        Some(at) => format!("Recent Errors (updated {})", at.format("%H:%M:%S")),
        None => "Recent Errors".to_string(),
    }
}

fn pods_title(model: &DashboardModel) -> String {
    match model.context.as_deref() {
        Some(ctx) if !ctx.is_empty() => format!("Pod Status (Live) [{ctx}]"),
        _ => "Pod Status (Live)".to_string(),
    }
}

fn error_lines(error: &CollectorError, theme: &Theme) -> Vec<Line<'static>> {
    let danger = theme.style(SemanticToken::Danger);
    error
        .to_string()
        .lines()
        .map(|line| Line::styled(line.to_string(), danger))
        .collect()
}

/// Errors pane: recent issues per project.
#[must_use]
pub fn issue_lines(model: &DashboardModel, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(error) = model.error_for(DataSource::IssueList) {
        lines.extend(error_lines(error, theme));
        lines.push(Line::raw(""));
    }
    if model.last_issue_refresh.is_none() {
        if lines.is_empty() {
            lines.push(Line::styled("Loading issues...", theme.style(SemanticToken::Muted)));
        }
        return lines;
    }

    for (i, project) in model.issues.iter().enumerate() {
        if i > 0 {
            lines.push(Line::raw(""));
        }
        lines.push(Line::styled(
            format!("Recent Issues: {}", project.label),
            theme.palette.header,
        ));
        if project.issues.is_empty() {
            lines.push(Line::raw("  No unresolved issues found."));
            continue;
        }
        for issue in &project.issues {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(issue.short_id.clone(), theme.style(SemanticToken::Identifier)),
                Span::raw(" "),
                Span::styled(issue.title.clone(), theme.style(SemanticToken::Neutral)),
                Span::raw(" | "),
                Span::styled(issue.last_seen.clone(), theme.style(SemanticToken::Muted)),
                Span::raw(" | "),
                Span::styled(
                    issue.status.clone(),
                    theme.style(issue_status_token(&issue.status)),
                ),
                Span::raw(" | "),
                Span::styled(issue.level.clone(), theme.style(issue_level_token(&issue.level))),
            ]));
        }
    }
    lines
}

/// Analytics pane: issue totals followed by service health.
#[must_use]
pub fn analytics_lines(model: &DashboardModel, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(error) = model.error_for(DataSource::IssueCounts) {
        lines.extend(error_lines(error, theme));
    }
    for count in &model.issue_counts {
        lines.push(Line::raw(format!("{} Issues (total): {}", count.label, count.total)));
    }

    if !lines.is_empty() {
        lines.push(Line::raw(""));
    }
    if let Some(error) = model.error_for(DataSource::Health) {
        lines.extend(error_lines(error, theme));
    }
    for result in &model.health {
        lines.extend(health_lines(result, theme));
    }

    if lines.is_empty() {
        lines.push(Line::styled("Waiting for data...", theme.style(SemanticToken::Muted)));
    }
    lines
}

fn status_token(status: HealthStatus) -> SemanticToken {
    match status {
        HealthStatus::Ok => SemanticToken::Success,
        HealthStatus::Fail => SemanticToken::Danger,
        HealthStatus::Unknown => SemanticToken::Neutral,
    }
}

fn health_lines(result: &HealthResult, theme: &Theme) -> Vec<Line<'static>> {
    if let Some(error) = &result.error {
        return vec![Line::from(vec![
            Span::raw(format!("{}: ", result.service)),
            Span::styled(
                format!("Error - {error}").replace('\n', " "),
                theme.style(SemanticToken::Danger),
            ),
        ])];
    }

    let latency = result
        .latency_ms
        .map_or_else(|| "?".to_string(), |ms| ms.to_string());
    let mut lines = vec![Line::raw(format!("{}: {latency}ms", result.service))];

    if !result.expand_groups {
        lines.push(Line::from(vec![
            Span::raw("  General: "),
            Span::styled(result.status.label(), theme.style(status_token(result.status))),
        ]));
        return lines;
    }

    if !result.status_text.is_empty() {
        let token = match HealthStatus::classify(&result.status_text) {
            HealthStatus::Ok => SemanticToken::Success,
            _ => SemanticToken::Danger,
        };
        lines.push(Line::from(vec![
            Span::raw("  Status: "),
            Span::styled(result.status_text.to_uppercase(), theme.style(token)),
        ]));
    }
    if !result.groups.is_empty() {
        let names: Vec<&str> = result.groups.iter().map(|g| g.name.as_str()).collect();
        lines.push(Line::from(vec![
            Span::raw("  Groups: "),
            Span::styled(names.join(", "), theme.style(SemanticToken::Info)),
        ]));
        for group in &result.groups {
            lines.push(Line::from(vec![
                Span::raw(format!("    - {}: ", group.name)),
                Span::styled(group.status_text.clone(), theme.style(status_token(group.status))),
            ]));
        }
    }
    lines
}

fn pod_error_rows(model: &DashboardModel) -> usize {
    [DataSource::Pods, DataSource::Context]
        .iter()
        .filter_map(|source| model.error_for(*source))
        .map(|e| e.to_string().lines().count())
        .sum()
}

/// Line index of the selected pod inside [`pod_lines`].
fn pod_cursor_line(model: &DashboardModel) -> usize {
    pod_error_rows(model) + 1 + model.selected_pod
}

/// Pods pane: the display table with STATUS coloring and the cursor row.
#[must_use]
pub fn pod_lines(model: &DashboardModel, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for source in [DataSource::Pods, DataSource::Context] {
        if let Some(error) = model.error_for(source) {
            lines.extend(error_lines(error, theme));
        }
    }
    if model.pods.header().is_empty() {
        if lines.is_empty() {
            lines.push(Line::styled("Loading pods...", theme.style(SemanticToken::Muted)));
        }
        return lines;
    }

    lines.push(Line::raw(model.pods.header().to_string()));
    let focused = model.pane == Pane::Pods;
    for (i, row) in model.pods.rows().iter().enumerate() {
        let status = row.split_whitespace().nth(2).unwrap_or_default();
        let base = if focused && i == model.selected_pod {
            theme.palette.highlight
        } else {
            theme.style(SemanticToken::Neutral)
        };
        let status_style = match pod_status_token(status) {
            SemanticToken::Neutral => Style::new(),
            token => theme.style(token),
        };
        lines.push(Line::raw(row.clone()).style(base.patch(status_style)));
    }
    lines
}

/// Bottom key-hint bar.
#[must_use]
pub fn hint_line(theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (keys, action)) in KEY_HINTS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", theme.style(SemanticToken::Muted)));
        }
        spans.push(Span::styled(*keys, theme.style(SemanticToken::Accent)));
        spans.push(Span::raw(format!(": {action}")));
    }
    Line::from(spans)
}

// ──────────────────── log viewer ────────────────────

fn render_log_viewer(frame: &mut Frame<'_>, area: Rect, modal: &LogViewerState, theme: &Theme) {
    frame.render_widget(Clear, area);
    if !modal.is_ready() {
        frame.render_widget(Paragraph::new("Loading logs..."), area);
        return;
    }

    let [header, body, footer] = Layout::vertical([
        Constraint::Length(super::log_viewer::HEADER_ROWS),
        Constraint::Min(0),
        Constraint::Length(super::log_viewer::FOOTER_ROWS),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Line::styled(
            format!(" Logs for {}", modal.pod_name()),
            theme.palette.header,
        )),
        header,
    );
    let visible: Vec<Line<'_>> = modal.visible_lines().map(Line::raw).collect();
    frame.render_widget(Paragraph::new(visible), body);
    frame.render_widget(
        Paragraph::new(Line::styled(
            " Scroll with arrow keys | Esc: Back",
            theme.style(SemanticToken::Muted),
        )),
        footer,
    );
}
