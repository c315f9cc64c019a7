//! Input routing for the dashboard.
//!
//! Keys are carried in a small terminal-agnostic [`KeyEvent`] so the update
//! fold never depends on the terminal backend. The runtime converts backend
//! events at the edge.

#![allow(missing_docs)]

use super::model::Pane;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Other,
}

/// Modifier bit set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1);
    pub const CTRL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Releases and repeats are delivered by some terminals; only presses act.
    #[must_use]
    pub const fn is_press(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press)
    }
}

#[cfg(feature = "tui")]
impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(event: crossterm::event::KeyEvent) -> Self {
        use crossterm::event::{KeyCode as Ct, KeyEventKind as CtKind, KeyModifiers};

        let code = match event.code {
            Ct::Char(c) => KeyCode::Char(c),
            Ct::Enter => KeyCode::Enter,
            Ct::Esc => KeyCode::Escape,
            Ct::Tab => KeyCode::Tab,
            Ct::BackTab => KeyCode::BackTab,
            Ct::Up => KeyCode::Up,
            Ct::Down => KeyCode::Down,
            Ct::PageUp => KeyCode::PageUp,
            Ct::PageDown => KeyCode::PageDown,
            Ct::Home => KeyCode::Home,
            Ct::End => KeyCode::End,
            _ => KeyCode::Other,
        };

        let mut modifiers = Modifiers::NONE;
        if event.modifiers.contains(KeyModifiers::SHIFT) {
            modifiers = modifiers.union(Modifiers::SHIFT);
        }
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            modifiers = modifiers.union(Modifiers::CTRL);
        }
        if event.modifiers.contains(KeyModifiers::ALT) {
            modifiers = modifiers.union(Modifiers::ALT);
        }

        let kind = match event.kind {
            CtKind::Press => KeyEventKind::Press,
            CtKind::Repeat => KeyEventKind::Repeat,
            CtKind::Release => KeyEventKind::Release,
        };

        Self {
            code,
            modifiers,
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputContext {
    pub pane: Pane,
    pub modal_open: bool,
}

impl Default for InputContext {
    fn default() -> Self {
        Self {
            pane: Pane::Errors,
            modal_open: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Quit,
    NextPane,
    PrevPane,
    SelectUp,
    SelectDown,
    OpenLogs,
    CloseModal,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollTop,
    ScrollBottom,
}

/// Resolve a key to an action.
///
/// While the log viewer is open only its bindings apply and every other key
/// is swallowed. Pod selection and log opening resolve only on the Pods pane.
#[must_use]
pub fn resolve_key_event(key: &KeyEvent, context: InputContext) -> Option<InputAction> {
    if context.modal_open {
        return resolve_modal_key(key);
    }
    resolve_global_key(key, context.pane)
}

fn resolve_modal_key(key: &KeyEvent) -> Option<InputAction> {
    match key.code {
        KeyCode::Char('c') if key.ctrl() => Some(InputAction::CloseModal),
        KeyCode::Escape | KeyCode::Char('q') => Some(InputAction::CloseModal),
        KeyCode::Up | KeyCode::Char('k') => Some(InputAction::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') => Some(InputAction::ScrollDown),
        KeyCode::PageUp => Some(InputAction::PageUp),
        KeyCode::PageDown => Some(InputAction::PageDown),
        KeyCode::Home | KeyCode::Char('g') => Some(InputAction::ScrollTop),
        KeyCode::End | KeyCode::Char('G') => Some(InputAction::ScrollBottom),
        _ => None,
    }
}

fn resolve_global_key(key: &KeyEvent, pane: Pane) -> Option<InputAction> {
    let on_pods = pane == Pane::Pods;
    match key.code {
        KeyCode::Char('c') if key.ctrl() => Some(InputAction::Quit),
        KeyCode::Char('q') => Some(InputAction::Quit),
        KeyCode::BackTab => Some(InputAction::PrevPane),
        KeyCode::Tab if key.shift() => Some(InputAction::PrevPane),
        KeyCode::Tab => Some(InputAction::NextPane),
        KeyCode::Up | KeyCode::Char('k') if on_pods => Some(InputAction::SelectUp),
        KeyCode::Down | KeyCode::Char('j') if on_pods => Some(InputAction::SelectDown),
        KeyCode::Char('l') if on_pods => Some(InputAction::OpenLogs),
        _ => None,
    }
}

/// Bindings shown in the key-hint bar.
pub const KEY_HINTS: &[(&str, &str)] = &[
    ("q/^C", "Quit"),
    ("Tab/Shift+Tab", "Switch Panes"),
    ("↑↓/k j", "Select Pod"),
    ("l", "Pod Logs"),
];
