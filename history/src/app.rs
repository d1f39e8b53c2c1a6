//! Main application state and logic

use std::collections::{BTreeSet, VecDeque};
use std::path::PathBuf;

use history_core::persist::export_path;
use history_core::{CatalogEntry, Console, ExportBundle, HistoryService, Quiz, QuizResult};

use crate::error::CommandError;
use crate::ui::theme::Theme;
use crate::ui::Overlay;

const INPUT_HISTORY_LIMIT: usize = 100;

/// Vim-style input modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal mode - navigation and hotkeys (default)
    #[default]
    Normal,
    /// Insert mode - editing a title, comment, answer or search term
    Insert,
    /// Command mode - entering : commands
    Command,
}

/// Top-level screens, cycled with Tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Rankings,
    Timeline,
    Quiz,
    Catalog,
}

impl View {
    pub const ALL: [View; 4] = [View::Rankings, View::Timeline, View::Quiz, View::Catalog];

    pub fn title(self) -> &'static str {
        match self {
            View::Rankings => "Rankings",
            View::Timeline => "Timeline",
            View::Quiz => "Quiz",
            View::Catalog => "Catalog",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// What the insert-mode buffer is editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Title,
    Comment,
    QuizAnswer,
    CatalogSearch,
}

impl EditTarget {
    pub fn label(self) -> &'static str {
        match self {
            EditTarget::Title => "Title",
            EditTarget::Comment => "Comment",
            EditTarget::QuizAnswer => "Your answer",
            EditTarget::CatalogSearch => "Search",
        }
    }
}

/// Store operations queued by key handling and run by the main loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    SaveRankings(Vec<String>),
    DeleteRanking(String),
    SetBirthYear(String),
    AddLifeEvent { age: u32, event: String },
    RemoveLifeEvent(usize),
    Export(Option<PathBuf>),
    Import(PathBuf),
}

/// Main application state
pub struct App {
    pub history: HistoryService,
    export_dir: PathBuf,

    // UI state
    pub theme: Theme,
    pub view: View,
    overlay: Option<Overlay>,

    // Rankings and catalog navigation
    console_index: usize,
    selected_rank: usize,
    unsaved: BTreeSet<String>,
    pub catalog_scroll: usize,
    pub search_term: String,

    // Timeline
    pub timeline_scroll: usize,

    // Quiz
    pub quiz: Option<Quiz>,
    pub quiz_result: Option<QuizResult>,
    pub show_hint: bool,
    pub quiz_correct: u32,
    pub quiz_answered: u32,

    // Input state
    pub input_mode: InputMode,
    edit_target: Option<EditTarget>,
    input_buffer: String,
    cursor_position: usize,
    pub input_history: VecDeque<String>,
    pub history_index: Option<usize>,
    pub saved_input: Option<String>, // Saved current input when browsing history

    // Status
    status_message: Option<String>,
    pending: Option<PendingAction>,
    pub should_quit: bool,
    pub quit_after_save: bool,
}

impl App {
    pub fn new(history: HistoryService, export_dir: impl Into<PathBuf>) -> Self {
        let mut app = Self {
            history,
            export_dir: export_dir.into(),
            theme: Theme::default(),
            view: View::default(),
            overlay: None,
            console_index: 0,
            selected_rank: 0,
            unsaved: BTreeSet::new(),
            catalog_scroll: 0,
            search_term: String::new(),
            timeline_scroll: 0,
            quiz: None,
            quiz_result: None,
            show_hint: false,
            quiz_correct: 0,
            quiz_answered: 0,
            input_mode: InputMode::Normal,
            edit_target: None,
            input_buffer: String::new(),
            cursor_position: 0,
            input_history: VecDeque::with_capacity(INPUT_HISTORY_LIMIT),
            history_index: None,
            saved_input: None,
            status_message: None,
            pending: None,
            should_quit: false,
            quit_after_save: false,
        };

        // Start on the first console the user has already ranked
        if let Some(index) = Console::all()
            .iter()
            .position(|c| app.history.ranking(c.id).is_some())
        {
            app.console_index = index;
        }
        app.set_status("Press ? for help");
        app
    }

    // =========================================================================
    // Rankings
    // =========================================================================

    pub fn current_console(&self) -> &'static Console {
        &Console::all()[self.console_index]
    }

    pub fn console_index(&self) -> usize {
        self.console_index
    }

    pub fn next_console(&mut self) {
        self.console_index = (self.console_index + 1) % Console::all().len();
        self.on_console_changed();
    }

    pub fn prev_console(&mut self) {
        let count = Console::all().len();
        self.console_index = (self.console_index + count - 1) % count;
        self.on_console_changed();
    }

    fn on_console_changed(&mut self) {
        self.selected_rank = 0;
        self.catalog_scroll = 0;
    }

    fn ranking_len(&self) -> usize {
        self.history
            .ranking(self.current_console().id)
            .map(|r| r.games.len())
            .unwrap_or(0)
    }

    /// 0-based position of the highlighted rank.
    pub fn selected_rank(&self) -> usize {
        self.selected_rank
    }

    pub fn select_next_rank(&mut self) {
        if self.selected_rank + 1 < self.ranking_len() {
            self.selected_rank += 1;
        }
    }

    pub fn select_prev_rank(&mut self) {
        self.selected_rank = self.selected_rank.saturating_sub(1);
    }

    pub fn is_unsaved(&self, console_id: &str) -> bool {
        self.unsaved.contains(console_id)
    }

    pub fn unsaved_count(&self) -> usize {
        self.unsaved.len()
    }

    pub fn add_rank(&mut self) {
        let console_id = self.current_console().id;
        match self.history.edit_ranking(console_id).add_rank() {
            Ok(()) => {
                self.unsaved.insert(console_id.to_string());
                self.selected_rank = self.ranking_len() - 1;
            }
            Err(e) => self.set_status(format!("Error: {e}")),
        }
    }

    pub fn remove_rank(&mut self) {
        let console_id = self.current_console().id;
        if self.history.ranking(console_id).is_none() {
            return;
        }
        match self.history.edit_ranking(console_id).remove_rank() {
            Ok(removed) => {
                self.unsaved.insert(console_id.to_string());
                self.selected_rank = self.selected_rank.min(self.ranking_len() - 1);
                if removed.has_title() {
                    self.set_status(format!("Removed {}", removed.title));
                }
            }
            Err(e) => self.set_status(format!("Error: {e}")),
        }
    }

    // =========================================================================
    // Catalog and quiz
    // =========================================================================

    /// Catalog entries of the current console matching the search term.
    pub fn catalog_results(&self) -> Vec<&CatalogEntry> {
        self.history
            .catalog()
            .search(self.current_console().id, &self.search_term)
    }

    pub fn scroll_catalog(&mut self, down: bool) {
        if down {
            let last = self.catalog_results().len().saturating_sub(1);
            self.catalog_scroll = (self.catalog_scroll + 1).min(last);
        } else {
            self.catalog_scroll = self.catalog_scroll.saturating_sub(1);
        }
    }

    pub fn new_quiz(&mut self) {
        self.quiz = Quiz::draw(self.history.catalog());
        self.quiz_result = None;
        self.show_hint = false;
        if self.quiz.is_none() {
            self.set_status(CommandError::EmptyQuiz.to_string());
        }
    }

    pub fn toggle_hint(&mut self) {
        if self.quiz.is_some() {
            self.show_hint = !self.show_hint;
        }
    }

    // =========================================================================
    // Timeline
    // =========================================================================

    /// Number of lines the chronicle renders to.
    fn timeline_lines(&self) -> usize {
        self.history
            .chronicle()
            .rows()
            .iter()
            .map(|row| row.events.len() + row.games.len() + 2)
            .sum()
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.timeline_scroll = self.timeline_scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        let max = self.timeline_lines();
        self.timeline_scroll = self.timeline_scroll.saturating_add(lines).min(max);
    }

    pub fn scroll_to_top(&mut self) {
        self.timeline_scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.timeline_scroll = self.timeline_lines();
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Enter insert mode for `target`, prefilled with the current value.
    pub fn begin_edit(&mut self, target: EditTarget) {
        let current = match target {
            EditTarget::Title | EditTarget::Comment => {
                let console_id = self.current_console().id;
                let rank = self.selected_rank + 1;
                let ranking = self.history.edit_ranking(console_id);
                ranking
                    .game(rank)
                    .map(|g| match target {
                        EditTarget::Title => g.title.clone(),
                        _ => g.comment.clone(),
                    })
                    .unwrap_or_default()
            }
            EditTarget::QuizAnswer => {
                if self.quiz.is_none() || self.quiz_result.is_some() {
                    self.new_quiz();
                }
                String::new()
            }
            EditTarget::CatalogSearch => self.search_term.clone(),
        };

        self.edit_target = Some(target);
        self.input_mode = InputMode::Insert;
        self.set_input(current);
    }

    pub fn edit_target(&self) -> Option<EditTarget> {
        self.edit_target
    }

    /// Leave insert mode without applying the buffer.
    pub fn cancel_edit(&mut self) {
        self.edit_target = None;
        self.input_mode = InputMode::Normal;
        self.clear_input();
    }

    /// Apply the buffer to the edit target and return to normal mode.
    pub fn submit_edit(&mut self) {
        let Some(target) = self.edit_target.take() else {
            self.input_mode = InputMode::Normal;
            return;
        };
        let text = self.submit_input().unwrap_or_default();
        self.input_mode = InputMode::Normal;

        if let Err(e) = self.apply_edit(target, text.trim()) {
            self.set_status(format!("Error: {e}"));
        }
    }

    fn apply_edit(&mut self, target: EditTarget, text: &str) -> Result<(), CommandError> {
        let console_id = self.current_console().id;
        let rank = self.selected_rank + 1;

        match target {
            EditTarget::Title => {
                self.history.edit_ranking(console_id).set_title(rank, text)?;
                self.unsaved.insert(console_id.to_string());
                let status = if text.is_empty() {
                    format!("Cleared rank {rank}")
                } else {
                    match self.history.resolve(console_id, text) {
                        Some(entry) if entry.has_year() => {
                            format!("Matched {} ({}, {})", entry.title, entry.year, entry.genre)
                        }
                        Some(entry) => format!("Matched {} (year unknown)", entry.title),
                        None => "Not in the catalog; listed under unknown-period".to_string(),
                    }
                };
                self.set_status(status);
            }
            EditTarget::Comment => {
                self.history.edit_ranking(console_id).set_comment(rank, text)?;
                self.unsaved.insert(console_id.to_string());
            }
            EditTarget::QuizAnswer => {
                let quiz = self.quiz.as_ref().ok_or(CommandError::NoQuiz)?;
                if let Some(result) = quiz.answer(text) {
                    self.quiz_answered += 1;
                    if result.is_correct {
                        self.quiz_correct += 1;
                    }
                    self.quiz_result = Some(result);
                }
            }
            EditTarget::CatalogSearch => {
                self.search_term = text.to_string();
                self.catalog_scroll = 0;
            }
        }
        Ok(())
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Enter command mode (starts with :)
    pub fn enter_command_mode(&mut self) {
        self.input_mode = InputMode::Command;
        self.set_input(":");
    }

    /// Process a colon command. Store operations are queued as pending.
    pub fn process_command(&mut self, command: &str) {
        let cmd = command.trim_start_matches(':').trim();
        let (name, rest) = match cmd.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (cmd, ""),
        };
        if let Err(e) = self.run_command(name, rest) {
            self.set_status(format!("Error: {e}"));
        }
    }

    fn run_command(&mut self, name: &str, rest: &str) -> Result<(), CommandError> {
        match name {
            "" => {}
            "q" | "quit" => {
                if self.unsaved.is_empty() {
                    self.should_quit = true;
                } else {
                    self.set_status(format!(
                        "{} unsaved rankings (:wq to save and quit, :q! to discard)",
                        self.unsaved.len()
                    ));
                }
            }
            "q!" => self.should_quit = true,
            "w" | "save" => {
                let console_id = self.current_console().id.to_string();
                if self.history.ranking(&console_id).is_none() {
                    return Err(CommandError::Usage(":w saves the current console's ranking"));
                }
                self.pending = Some(PendingAction::SaveRankings(vec![console_id]));
            }
            "wa" => self.pending = Some(PendingAction::SaveRankings(self.unsaved_list())),
            "wq" => {
                self.quit_after_save = true;
                self.pending = Some(PendingAction::SaveRankings(self.unsaved_list()));
            }
            "delete" => {
                let console_id = self.current_console().id.to_string();
                self.pending = Some(PendingAction::DeleteRanking(console_id));
            }
            "birth" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage(":birth <year>"));
                }
                self.pending = Some(PendingAction::SetBirthYear(rest.to_string()));
            }
            "event" => {
                let (age, event) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(CommandError::Usage(":event <age> <text>"))?;
                let age = age
                    .parse()
                    .map_err(|_| CommandError::Usage(":event <age> <text>"))?;
                self.pending = Some(PendingAction::AddLifeEvent {
                    age,
                    event: event.trim().to_string(),
                });
            }
            "forget" => {
                let index: usize = rest
                    .parse()
                    .ok()
                    .filter(|&n: &usize| n >= 1)
                    .ok_or(CommandError::Usage(":forget <n>"))?;
                self.pending = Some(PendingAction::RemoveLifeEvent(index - 1));
            }
            "export" => {
                let path = (!rest.is_empty()).then(|| PathBuf::from(rest));
                self.pending = Some(PendingAction::Export(path));
            }
            "import" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage(":import <path>"));
                }
                self.pending = Some(PendingAction::Import(PathBuf::from(rest)));
            }
            "help" | "h" => self.toggle_help(),
            other => return Err(CommandError::Unknown(other.to_string())),
        }
        Ok(())
    }

    fn unsaved_list(&self) -> Vec<String> {
        self.unsaved.iter().cloned().collect()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    /// Run the queued store operation, reporting the outcome on the status line.
    pub async fn run_pending(&mut self) {
        let Some(action) = self.pending.take() else {
            return;
        };

        match self.perform(action).await {
            Ok(message) => {
                self.set_status(message);
                if self.quit_after_save {
                    self.should_quit = true;
                }
            }
            Err(e) => {
                tracing::warn!("command failed: {e}");
                self.set_status(format!("Error: {e}"));
                // Don't quit on failure, let the user see the error
                self.quit_after_save = false;
            }
        }
    }

    async fn perform(&mut self, action: PendingAction) -> Result<String, CommandError> {
        match action {
            PendingAction::SaveRankings(console_ids) => {
                for console_id in &console_ids {
                    self.history.save_ranking(console_id).await?;
                    self.unsaved.remove(console_id);
                }
                Ok(match console_ids.len() {
                    0 => "Nothing to save".to_string(),
                    1 => format!("Saved {}", console_ids[0]),
                    n => format!("Saved {n} rankings"),
                })
            }
            PendingAction::DeleteRanking(console_id) => {
                let existed = self.history.delete_ranking(&console_id).await?;
                self.unsaved.remove(&console_id);
                self.selected_rank = 0;
                Ok(if existed {
                    format!("Deleted {console_id}")
                } else {
                    format!("No ranking for {console_id}")
                })
            }
            PendingAction::SetBirthYear(input) => {
                let year = self.history.set_birth_year(&input).await?;
                Ok(format!("Birth year set to {year}"))
            }
            PendingAction::AddLifeEvent { age, event } => {
                self.history.add_life_event(age, event).await?;
                Ok(format!("Added life event at age {age}"))
            }
            PendingAction::RemoveLifeEvent(index) => {
                let removed = self.history.remove_life_event(index).await?;
                Ok(format!("Removed \"{}\"", removed.event))
            }
            PendingAction::Export(path) => {
                let path = path.unwrap_or_else(|| export_path(&self.export_dir));
                self.history.export().save_json(&path).await?;
                Ok(format!("Exported to {}", path.display()))
            }
            PendingAction::Import(path) => {
                let bundle = ExportBundle::load_json(&path).await?;
                self.history.import(bundle).await?;
                self.unsaved.clear();
                self.selected_rank = 0;
                Ok(format!(
                    "Imported {} rankings from {}",
                    self.history.rankings().len(),
                    path.display()
                ))
            }
        }
    }

    // =========================================================================
    // Input buffer
    // =========================================================================

    /// Take the buffer, recording non-command input in the history
    pub fn submit_input(&mut self) -> Option<String> {
        if self.input_buffer.is_empty() {
            return None;
        }

        let input = std::mem::take(&mut self.input_buffer);
        self.cursor_position = 0;

        if !input.starts_with(':') {
            self.input_history.push_front(input.clone());
            self.input_history.truncate(INPUT_HISTORY_LIMIT);
        }
        self.history_index = None;
        self.saved_input = None;

        Some(input)
    }

    /// Byte offset of the character at `position`, or the end of the buffer.
    fn byte_index(&self, position: usize) -> usize {
        self.input_buffer
            .char_indices()
            .nth(position)
            .map(|(i, _)| i)
            .unwrap_or(self.input_buffer.len())
    }

    fn remove_char_at(&mut self, position: usize) {
        if position < self.input_buffer.chars().count() {
            let start = self.byte_index(position);
            self.input_buffer.remove(start);
        }
    }

    pub fn type_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor_position);
        self.input_buffer.insert(at, c);
        self.cursor_position += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            self.remove_char_at(self.cursor_position);
        }
    }

    pub fn delete(&mut self) {
        self.remove_char_at(self.cursor_position);
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let char_count = self.input_buffer.chars().count();
        self.cursor_position = (self.cursor_position + 1).min(char_count);
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.input_buffer.chars().count();
    }

    /// Navigate to previous input in history
    pub fn history_prev(&mut self) {
        if self.input_history.is_empty() {
            return;
        }

        // Save current input if we're just starting to browse history
        if self.history_index.is_none() && !self.input_buffer.is_empty() {
            self.saved_input = Some(self.input_buffer.clone());
        }

        let index = match self.history_index {
            None => 0,
            Some(i) => (i + 1).min(self.input_history.len() - 1),
        };
        if let Some(entry) = self.input_history.get(index).cloned() {
            self.set_input(entry);
            self.history_index = Some(index);
        }
    }

    /// Navigate to next input in history
    pub fn history_next(&mut self) {
        match self.history_index {
            None => {}
            Some(0) => {
                let saved = self.saved_input.take().unwrap_or_default();
                self.set_input(saved);
                self.history_index = None;
            }
            Some(i) => {
                if let Some(entry) = self.input_history.get(i - 1).cloned() {
                    self.set_input(entry);
                    self.history_index = Some(i - 1);
                }
            }
        }
    }

    /// Set input buffer content and move cursor to end (unicode-safe)
    pub fn set_input(&mut self, content: impl Into<String>) {
        self.input_buffer = content.into();
        self.cursor_position = self.input_buffer.chars().count();
    }

    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }

    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    // =========================================================================
    // Overlay and status
    // =========================================================================

    pub fn toggle_help(&mut self) {
        if matches!(self.overlay, Some(Overlay::Help)) {
            self.overlay = None;
        } else {
            self.overlay = Some(Overlay::Help);
        }
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Set status message (always overwrites)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
