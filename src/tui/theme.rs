//! Theme tokens and the `NO_COLOR` accessibility hook for dashboard rendering.
//!
//! A [`Theme`] is built once at startup and passed by reference into every
//! render function.

#![allow(missing_docs)]

use std::env;

use ratatui::style::{Color, Modifier, Style};

/// Color output mode for compatibility with `NO_COLOR` and `--no-color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessibilityProfile {
    pub color: ColorMode,
}

impl Default for AccessibilityProfile {
    fn default() -> Self {
        Self {
            color: ColorMode::Enabled,
        }
    }
}

impl AccessibilityProfile {
    #[must_use]
    pub const fn from_no_color_flag(no_color: bool) -> Self {
        Self {
            color: if no_color {
                ColorMode::Disabled
            } else {
                ColorMode::Enabled
            },
        }
    }

    /// `NO_COLOR` in the environment, or the explicit flag, disables color.
    #[must_use]
    pub fn from_environment(force_no_color: bool) -> Self {
        let no_color = force_no_color || env::var_os("NO_COLOR").is_some();
        Self::from_no_color_flag(no_color)
    }

    #[must_use]
    pub const fn no_color(self) -> bool {
        matches!(self.color, ColorMode::Disabled)
    }
}

/// Semantic token category independent of concrete colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticToken {
    Accent,
    Success,
    Warning,
    Danger,
    Info,
    Identifier,
    Muted,
    Neutral,
}

/// Resolved styles for each token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub accent: Style,
    pub success: Style,
    pub warning: Style,
    pub danger: Style,
    pub info: Style,
    pub identifier: Style,
    pub muted: Style,
    pub neutral: Style,
    pub header: Style,
    pub highlight: Style,
}

impl ThemePalette {
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            accent: Style::new().fg(Color::Cyan),
            success: Style::new().fg(Color::LightGreen),
            warning: Style::new().fg(Color::LightYellow),
            danger: Style::new().fg(Color::LightRed),
            info: Style::new().fg(Color::LightBlue),
            identifier: Style::new().fg(Color::LightMagenta),
            muted: Style::new().fg(Color::DarkGray),
            neutral: Style::new().fg(Color::White),
            header: Style::new()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
            highlight: Style::new().bg(Color::Indexed(19)).fg(Color::White),
        }
    }

    /// Monochrome palette: structure survives through modifiers only.
    #[must_use]
    pub const fn monochrome() -> Self {
        Self {
            accent: Style::new(),
            success: Style::new(),
            warning: Style::new(),
            danger: Style::new(),
            info: Style::new(),
            identifier: Style::new(),
            muted: Style::new(),
            neutral: Style::new(),
            header: Style::new().add_modifier(Modifier::BOLD),
            highlight: Style::new().add_modifier(Modifier::REVERSED),
        }
    }

    #[must_use]
    pub const fn style(&self, token: SemanticToken) -> Style {
        match token {
            SemanticToken::Accent => self.accent,
            SemanticToken::Success => self.success,
            SemanticToken::Warning => self.warning,
            SemanticToken::Danger => self.danger,
            SemanticToken::Info => self.info,
            SemanticToken::Identifier => self.identifier,
            SemanticToken::Muted => self.muted,
            SemanticToken::Neutral => self.neutral,
        }
    }
}

/// Issue status column: resolved/ignored are fine, unresolved is not.
#[must_use]
pub fn issue_status_token(status: &str) -> SemanticToken {
    match status {
        "resolved" | "ignored" => SemanticToken::Success,
        "unresolved" => SemanticToken::Danger,
        _ => SemanticToken::Neutral,
    }
}

#[must_use]
pub fn issue_level_token(level: &str) -> SemanticToken {
    match level {
        "error" | "fatal" => SemanticToken::Danger,
        "warning" => SemanticToken::Warning,
        "info" | "debug" => SemanticToken::Info,
        _ => SemanticToken::Neutral,
    }
}

/// Pod table STATUS column.
#[must_use]
pub fn pod_status_token(status: &str) -> SemanticToken {
    match status {
        "Running" => SemanticToken::Success,
        "Pending" | "ContainerCreating" | "PodInitializing" => SemanticToken::Warning,
        "Error" | "Evicted" | "CrashLoopBackOff" | "ImagePullBackOff" | "ErrImagePull" => {
            SemanticToken::Danger
        }
        _ => SemanticToken::Neutral,
    }
}

/// Full render theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub accessibility: AccessibilityProfile,
    pub palette: ThemePalette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(AccessibilityProfile::default())
    }
}

impl Theme {
    #[must_use]
    pub const fn new(accessibility: AccessibilityProfile) -> Self {
        let palette = if accessibility.no_color() {
            ThemePalette::monochrome()
        } else {
            ThemePalette::standard()
        };
        Self {
            accessibility,
            palette,
        }
    }

    #[must_use]
    pub const fn style(&self, token: SemanticToken) -> Style {
        self.palette.style(token)
    }

    /// Border style for a pane, brighter when focused.
    #[must_use]
    pub const fn border(&self, focused: bool) -> Style {
        if focused {
            self.palette.accent.add_modifier(Modifier::BOLD)
        } else {
            Style::new()
        }
    }
}
