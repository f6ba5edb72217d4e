//! Input handling abstractions.
//!
//! This module provides traits and types for handling keyboard input
//! in a modular way, allowing mode-specific handlers to be tested independently.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of processing an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// The input was ignored (not applicable to this handler).
    Ignored,
    /// The application should quit.
    Quit,
    /// The mode should change.
    ModeChange(AppMode),
    /// Keyboard focus should move to another pane.
    FocusChange(Focus),
    /// Run the calculation for the current selection.
    Calculate,
    /// Open the help modal.
    ShowHelp,
}

/// Application modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Initial splash screen.
    Splash,
    /// Book list, layout form, results and diagram.
    Calculator,
}

/// Pane receiving keyboard input in calculator mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The book selector.
    #[default]
    Books,
    /// The layout form.
    Form,
}

impl Focus {
    /// The other pane (for Tab).
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Books => Self::Form,
            Self::Form => Self::Books,
        }
    }
}

/// Context passed to input handlers.
///
/// This provides handlers with the information they need to process
/// input without directly accessing the full App state.
pub struct InputContext {
    /// Pane with keyboard focus.
    pub focus: Focus,
    /// Whether the book filter is capturing text.
    pub is_search_mode: bool,
}

/// Trait for handling keyboard input.
///
/// Implementations of this trait handle input for specific modes
/// or input contexts.
pub trait InputHandler {
    /// Handle a key event.
    fn handle(&mut self, key: KeyEvent, ctx: &InputContext) -> InputResult;
}

/// Handler for global shortcuts (help, quit, calculate, pane switching).
#[derive(Debug, Default)]
pub struct GlobalHandler;

impl InputHandler for GlobalHandler {
    fn handle(&mut self, key: KeyEvent, ctx: &InputContext) -> InputResult {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return InputResult::Quit;
        }

        if key.code == KeyCode::F(1) {
            return InputResult::ShowHelp;
        }

        // Letters are text while the book filter is open
        if ctx.is_search_mode {
            return InputResult::Ignored;
        }

        match key.code {
            KeyCode::Char('?') => InputResult::ShowHelp,
            KeyCode::Char('q') | KeyCode::Esc => InputResult::Quit,
            KeyCode::Enter | KeyCode::Char('c') => InputResult::Calculate,
            KeyCode::Tab | KeyCode::BackTab => InputResult::FocusChange(ctx.focus.toggle()),
            _ => InputResult::Ignored,
        }
    }
}

/// Handler for the splash screen.
#[derive(Debug, Default)]
pub struct SplashHandler;

impl InputHandler for SplashHandler {
    fn handle(&mut self, _key: KeyEvent, _ctx: &InputContext) -> InputResult {
        // Any key dismisses the splash screen
        InputResult::ModeChange(AppMode::Calculator)
    }
}
