//! Event handling for the game history TUI

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, EditTarget, InputMode, View};

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

/// Handle a mouse event
fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> EventResult {
    match (mouse.kind, app.view) {
        (MouseEventKind::ScrollUp, View::Timeline) => app.scroll_up(3),
        (MouseEventKind::ScrollDown, View::Timeline) => app.scroll_down(3),
        (MouseEventKind::ScrollUp, View::Catalog) => app.scroll_catalog(false),
        (MouseEventKind::ScrollDown, View::Catalog) => app.scroll_catalog(true),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Global shortcuts (always work)
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    if app.has_overlay() {
        return handle_overlay_key(app, key);
    }

    let result = match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Insert => handle_insert_mode(app, key),
        InputMode::Command => handle_command_mode(app, key),
    };

    if app.should_quit {
        EventResult::Quit
    } else {
        result
    }
}

/// Handle keys in NORMAL mode shared by every view
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char(':') => app.enter_command_mode(),
        KeyCode::Char('?') | KeyCode::F(1) => app.toggle_help(),
        KeyCode::Char('q') => app.process_command(":q"),
        KeyCode::Tab => app.view = app.view.next(),
        KeyCode::BackTab => app.view = app.view.prev(),
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            app.view = View::ALL[index];
        }
        _ => {
            return match app.view {
                View::Rankings => handle_rankings_keys(app, key),
                View::Timeline => handle_timeline_keys(app, key),
                View::Quiz => handle_quiz_keys(app, key),
                View::Catalog => handle_catalog_keys(app, key),
            }
        }
    }
    EventResult::NeedsRedraw
}

fn handle_rankings_keys(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.prev_console(),
        KeyCode::Char('l') | KeyCode::Right => app.next_console(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next_rank(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev_rank(),
        KeyCode::Char('i') | KeyCode::Enter => app.begin_edit(EditTarget::Title),
        KeyCode::Char('c') => app.begin_edit(EditTarget::Comment),
        KeyCode::Char('+') => app.add_rank(),
        KeyCode::Char('-') => app.remove_rank(),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

fn handle_timeline_keys(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => app.scroll_up(10),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_down(10)
        }
        KeyCode::PageUp => app.scroll_up(10),
        KeyCode::PageDown => app.scroll_down(10),
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(1),
        KeyCode::Char('g') => app.scroll_to_top(),
        KeyCode::Char('G') => app.scroll_to_bottom(),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

fn handle_quiz_keys(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('n') => app.new_quiz(),
        KeyCode::Char('h') => app.toggle_hint(),
        KeyCode::Char('i') => app.begin_edit(EditTarget::QuizAnswer),
        KeyCode::Enter if app.quiz_result.is_some() || app.quiz.is_none() => app.new_quiz(),
        KeyCode::Enter => app.begin_edit(EditTarget::QuizAnswer),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

fn handle_catalog_keys(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.prev_console(),
        KeyCode::Char('l') | KeyCode::Right => app.next_console(),
        KeyCode::Char('j') | KeyCode::Down => app.scroll_catalog(true),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_catalog(false),
        KeyCode::Char('/') | KeyCode::Char('i') => app.begin_edit(EditTarget::CatalogSearch),
        KeyCode::Esc => {
            app.search_term.clear();
            app.catalog_scroll = 0;
        }
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

/// Handle keys in INSERT mode (free text input)
fn handle_insert_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Enter => app.submit_edit(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Home => app.cursor_home(),
        KeyCode::End => app.cursor_end(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete(),
        KeyCode::Up => app.history_prev(),
        KeyCode::Down => app.history_next(),
        KeyCode::Char(c) => app.type_char(c),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

/// Handle keys in COMMAND mode (: commands)
fn handle_command_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.clear_input();
        }
        KeyCode::Enter => {
            let command = app.input_buffer().to_string();
            app.clear_input();
            app.input_mode = InputMode::Normal;
            app.process_command(&command);
        }
        KeyCode::Left => {
            // Keep the cursor after the leading ':'
            if app.cursor_position() > 1 {
                app.cursor_left();
            }
        }
        KeyCode::Right => app.cursor_right(),
        KeyCode::Backspace => {
            if app.cursor_position() > 1 {
                app.backspace();
            } else {
                // Backspace on just ":" exits command mode
                app.input_mode = InputMode::Normal;
                app.clear_input();
            }
        }
        KeyCode::Char(c) => app.type_char(c),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

/// Handle key when overlay is open
fn handle_overlay_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter => {
            app.close_overlay();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}
