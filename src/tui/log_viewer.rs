//! Modal log viewer state for one pod.
//!
//! Geometry is unknown until the first size notification arrives; logs that
//! land earlier are kept and shown once the viewport exists.

use crate::core::errors::CollectorError;

/// Rows taken by the "Logs for ..." header line.
pub const HEADER_ROWS: u16 = 1;
/// Rows taken by the scroll-hint footer line.
pub const FOOTER_ROWS: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogViewerState {
    pod_name: String,
    logs: String,
    viewport: Option<Viewport>,
    offset: usize,
}

impl LogViewerState {
    #[must_use]
    pub fn new(pod_name: impl Into<String>) -> Self {
        Self {
            pod_name: pod_name.into(),
            logs: String::new(),
            viewport: None,
            offset: 0,
        }
    }

    #[must_use]
    pub fn pod_name(&self) -> &str {
        &self.pod_name
    }

    #[must_use]
    pub fn logs(&self) -> &str {
        &self.logs
    }

    #[must_use]
    pub const fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Set once the first size notification has been applied.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.viewport.is_some()
    }

    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Apply a terminal size. The first call initializes the viewport; later
    /// calls resize it.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.viewport = Some(Viewport {
            width: cols,
            height: rows.saturating_sub(HEADER_ROWS + FOOTER_ROWS),
        });
        self.clamp();
    }

    pub fn set_logs(&mut self, text: String) {
        self.logs = text;
        self.clamp();
    }

    /// Replace the content with an inline error; the modal stays open.
    pub fn set_error(&mut self, error: &CollectorError) {
        self.logs = format!("Error fetching logs: {error}");
        self.offset = 0;
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.logs.lines().count()
    }

    fn page(&self) -> usize {
        self.viewport.map_or(0, |v| usize::from(v.height))
    }

    fn max_offset(&self) -> usize {
        self.line_count().saturating_sub(self.page())
    }

    fn clamp(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn scroll_up(&mut self, lines: usize) {
        if self.is_ready() {
            self.offset = self.offset.saturating_sub(lines);
        }
    }

    pub fn scroll_down(&mut self, lines: usize) {
        if self.is_ready() {
            self.offset = self.offset.saturating_add(lines).min(self.max_offset());
        }
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.page().max(1));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.page().max(1));
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        if self.is_ready() {
            self.offset = self.max_offset();
        }
    }

    /// Lines currently inside the viewport. Empty until ready.
    pub fn visible_lines(&self) -> impl Iterator<Item = &str> {
        self.logs.lines().skip(self.offset).take(self.page())
    }
}
