//! Application state and key dispatch for the calculator TUI.

use arboard::Clipboard;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::ListState;

use crate::calculator::{Calculation, GapPolicy};
use crate::catalog::{Catalog, CatalogEntry};
use crate::config::Config;
use crate::constants::search::MAX_SEARCH_RESULTS;
use crate::diagram::LayoutDiagram;
use crate::error::{Error, Result};
use crate::form::{FormAction, LayoutForm};
use crate::input::{
    AppMode, Focus, GlobalHandler, InputContext, InputHandler, InputResult, SplashHandler,
};
use crate::types::CountMode;

/// Everything the UI draws, plus the state behind each control.
pub struct App {
    pub mode: AppMode,
    pub focus: Focus,
    pub config: Config,
    pub catalog: Catalog,
    pub book_list_state: ListState,
    /// Catalog positions currently listed (all of them unless filtering).
    pub visible_books: Vec<usize>,
    pub book_search_active: bool,
    pub book_search_query: String,
    pub form: LayoutForm,
    pub count_mode: CountMode,
    pub gap_policy: GapPolicy,
    pub calculation: Option<Calculation>,
    pub diagram: Option<LayoutDiagram>,
    pub show_help: bool,
    pub error_message: Option<String>,
    pub status_message: Option<String>,
    should_quit: bool,
}

impl App {
    /// Start on the splash screen with the first book selected.
    pub fn new(config: Config, catalog: Catalog) -> Self {
        let form = LayoutForm::new(&config.defaults);
        let visible_books = catalog.search("", catalog.len());
        let mut book_list_state = ListState::default();
        if !visible_books.is_empty() {
            book_list_state.select(Some(0));
        }

        Self {
            mode: AppMode::Splash,
            focus: Focus::Books,
            config,
            catalog,
            book_list_state,
            visible_books,
            book_search_active: false,
            book_search_query: String::new(),
            form,
            count_mode: CountMode::Characters,
            gap_policy: GapPolicy::Unclamped,
            calculation: None,
            diagram: None,
            show_help: false,
            error_message: None,
            status_message: None,
            should_quit: false,
        }
    }

    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Book under the list cursor.
    pub fn selected_book(&self) -> Option<&CatalogEntry> {
        self.book_list_state
            .selected()
            .and_then(|i| self.visible_books.get(i))
            .and_then(|&idx| self.catalog.entry(idx))
    }

    /// Select a book by name or abbreviation, clearing any filter.
    pub fn select_book(&mut self, name: &str) -> Result<()> {
        let idx = self
            .catalog
            .position(name)
            .ok_or_else(|| Error::UnknownBook(name.to_string()))?;
        self.book_search_query.clear();
        self.update_search();
        let row = self.visible_books.iter().position(|&i| i == idx);
        self.book_list_state.select(row);
        Ok(())
    }

    const fn input_context(&self) -> InputContext {
        InputContext {
            focus: self.focus,
            is_search_mode: self.book_search_active,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // First, check if help modal is shown
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return; // Don't process other keys while help is displayed
        }

        // Check if we need to dismiss an error or status message
        if self.error_message.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.error_message = None;
            }
            return;
        }
        if self.status_message.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.status_message = None;
            }
            return;
        }

        let ctx = self.input_context();
        if self.mode == AppMode::Splash {
            let result = SplashHandler.handle(key, &ctx);
            self.apply(result);
            return;
        }

        let result = GlobalHandler.handle(key, &ctx);
        if result != InputResult::Ignored {
            self.apply(result);
            return;
        }

        if self.book_search_active {
            self.handle_search_input(key);
            return;
        }

        match key.code {
            KeyCode::Char('/') => {
                self.focus = Focus::Books;
                self.book_search_active = true;
                return;
            }
            KeyCode::Char('w') => {
                self.toggle_count_mode();
                return;
            }
            KeyCode::Char('g') => {
                self.gap_policy = self.gap_policy.next();
                tracing::debug!("gap policy now {}", self.gap_policy.name());
                return;
            }
            KeyCode::Char('r') => {
                self.form.reset(&self.config.defaults);
                self.calculation = None;
                self.diagram = None;
                return;
            }
            KeyCode::Char('y') => {
                self.copy_result();
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Books => self.handle_book_list_input(key),
            Focus::Form => {
                if self.form.handle_key(key) == FormAction::Unhandled {
                    tracing::trace!("unhandled form key {:?}", key.code);
                }
            }
        }
    }

    fn apply(&mut self, result: InputResult) {
        match result {
            InputResult::Ignored => {}
            InputResult::Quit => self.quit(),
            InputResult::ModeChange(mode) => self.mode = mode,
            InputResult::FocusChange(focus) => self.focus = focus,
            InputResult::Calculate => self.calculate(),
            InputResult::ShowHelp => self.show_help = true,
        }
    }

    /// Run the calculation for the selected book and current form values.
    pub fn calculate(&mut self) {
        match self.build_calculation() {
            Ok(calculation) => {
                tracing::info!("{}", calculation.summary());
                self.diagram = Some(LayoutDiagram::build(
                    &calculation.result,
                    &calculation.parameters,
                ));
                self.calculation = Some(calculation);
            }
            Err(e) => {
                tracing::warn!("calculation rejected: {e}");
                self.error_message = Some(e.to_string());
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn build_calculation(&self) -> Result<Calculation> {
        let book = self
            .selected_book()
            .ok_or_else(|| Error::Msg("No book selected".to_string()))?;
        let params = self.form.parameters()?;

        Ok(match self.count_mode {
            CountMode::Characters => Calculation::for_characters(
                book.name.clone(),
                book.effective_characters() as f64,
                params,
                self.gap_policy,
            ),
            CountMode::Words => {
                Calculation::for_words(book.name.clone(), self.form.word_count()?, params)
            }
        })
    }

    fn toggle_count_mode(&mut self) {
        self.count_mode = self.count_mode.next();
        self.form
            .set_word_count_visible(self.count_mode == CountMode::Words);
        tracing::debug!("count mode now {}", self.count_mode.name());
    }

    fn handle_book_list_input(&mut self, key: KeyEvent) {
        let len = self.visible_books.len();
        if len == 0 {
            return;
        }
        let current = self.book_list_state.selected().unwrap_or(0);
        let next = match key.code {
            KeyCode::Up | KeyCode::Char('k') => current.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => (current + 1).min(len - 1),
            KeyCode::PageUp => current.saturating_sub(10),
            KeyCode::PageDown => (current + 10).min(len - 1),
            KeyCode::Home => 0,
            KeyCode::End => len - 1,
            _ => return,
        };
        self.book_list_state.select(Some(next));
    }

    fn handle_search_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.book_search_active = false;
                self.book_search_query.clear();
                self.update_search();
            }
            KeyCode::Enter => {
                self.book_search_active = false;
            }
            KeyCode::Backspace => {
                self.book_search_query.pop();
                self.update_search();
            }
            KeyCode::Up | KeyCode::Down => self.handle_book_list_input(key),
            KeyCode::Char(c) => {
                self.book_search_query.push(c);
                self.update_search();
            }
            _ => {}
        }
    }

    fn update_search(&mut self) {
        let limit = if self.book_search_query.is_empty() {
            self.catalog.len()
        } else {
            MAX_SEARCH_RESULTS
        };
        self.visible_books = self.catalog.search(&self.book_search_query, limit);
        let selection = if self.visible_books.is_empty() { None } else { Some(0) };
        self.book_list_state.select(selection);
    }

    fn copy_result(&mut self) {
        let Some(calculation) = &self.calculation else {
            self.status_message = Some("Nothing to copy yet. Press Enter to calculate.".into());
            return;
        };
        let summary = calculation.summary();
        match Clipboard::new().and_then(|mut cb| cb.set_text(summary.clone())) {
            Ok(()) => self.status_message = Some(format!("Copied: {summary}")),
            Err(e) => self.error_message = Some(format!("Clipboard unavailable: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic, clippy::float_cmp)]

    use super::*;
    use crossterm::event::KeyModifiers;

    fn make_key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn ready_app() -> App {
        let mut app = App::new(Config::default(), Catalog::builtin());
        app.handle_key(make_key(KeyCode::Char(' ')));
        app
    }

    #[test]
    fn splash_dismissed_by_any_key() {
        let app = ready_app();
        assert_eq!(app.mode, AppMode::Calculator);
        assert_eq!(app.selected_book().map(|b| b.name.as_str()), Some("Genesis"));
    }

    #[test]
    fn search_filters_and_escape_restores() {
        let mut app = ready_app();
        app.handle_key(make_key(KeyCode::Char('/')));
        for c in "psal".chars() {
            app.handle_key(make_key(KeyCode::Char(c)));
        }
        assert_eq!(app.selected_book().map(|b| b.name.as_str()), Some("Psalms"));
        assert!(app.visible_books.len() < app.catalog.len());

        app.handle_key(make_key(KeyCode::Esc));
        assert!(!app.book_search_active);
        assert_eq!(app.visible_books.len(), app.catalog.len());
        assert!(!app.should_quit());
    }

    #[test]
    fn search_with_no_hits_blocks_calculation() {
        let mut app = ready_app();
        app.handle_key(make_key(KeyCode::Char('/')));
        for c in "zzzz".chars() {
            app.handle_key(make_key(KeyCode::Char(c)));
        }
        assert!(app.selected_book().is_none());
        app.handle_key(make_key(KeyCode::Enter));
        app.calculate();
        assert_eq!(app.error_message.as_deref(), Some("No book selected"));
    }

    #[test]
    fn invalid_form_value_shows_error() {
        let mut app = ready_app();
        app.handle_key(make_key(KeyCode::Tab));
        app.handle_key(make_key(KeyCode::Backspace));
        app.handle_key(make_key(KeyCode::Backspace));
        app.handle_key(make_key(KeyCode::Enter));
        assert!(app.calculation.is_none());
        assert!(app.error_message.as_deref().unwrap().contains("Lines per Column"));

        // Esc dismisses the error without quitting.
        app.handle_key(make_key(KeyCode::Esc));
        assert!(app.error_message.is_none());
        assert!(!app.should_quit());
    }

    #[test]
    fn gap_toggle_changes_policy() {
        let mut app = ready_app();
        app.handle_key(make_key(KeyCode::Char('g')));
        assert_eq!(app.gap_policy, GapPolicy::Clamped);
    }

    #[test]
    fn reset_restores_defaults_and_clears_result() {
        let mut app = ready_app();
        app.handle_key(make_key(KeyCode::Enter));
        assert!(app.calculation.is_some());
        app.handle_key(make_key(KeyCode::Tab));
        app.handle_key(make_key(KeyCode::Right));
        app.handle_key(make_key(KeyCode::Char('r')));
        assert!(app.calculation.is_none());
        assert_eq!(app.form.parameters().unwrap(), app.config.defaults);
    }

    #[test]
    fn help_modal_swallows_keys() {
        let mut app = ready_app();
        app.handle_key(make_key(KeyCode::Char('?')));
        assert!(app.show_help);
        app.handle_key(make_key(KeyCode::Char('q')));
        assert!(!app.should_quit());
        app.handle_key(make_key(KeyCode::Esc));
        assert!(!app.show_help);
    }
}
