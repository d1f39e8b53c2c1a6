//! Bottom input line: ranking edits, quiz answers, catalog search and `:` commands

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::Theme;

pub struct InputWidget<'a> {
    content: &'a str,
    cursor_position: usize,
    theme: &'a Theme,
    placeholder: &'a str,
    is_active: bool,
    is_command_mode: bool,
    label: Option<&'a str>,
}

impl<'a> InputWidget<'a> {
    pub fn new(content: &'a str, theme: &'a Theme) -> Self {
        Self {
            content,
            cursor_position: content.chars().count(),
            theme,
            placeholder: "",
            is_active: true,
            is_command_mode: false,
            label: None,
        }
    }

    /// Cursor as a char index into the buffer, counting the leading `:` in
    /// command mode.
    pub fn cursor_position(mut self, pos: usize) -> Self {
        self.cursor_position = pos;
        self
    }

    /// Key hints shown while the buffer is empty and nothing is being edited.
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    pub fn command_mode(mut self, is_command: bool) -> Self {
        self.is_command_mode = is_command;
        self
    }

    /// What is being edited ("Title", "Answer", ...). Shown on the border.
    pub fn label(mut self, label: Option<&'a str>) -> Self {
        self.label = label;
        self
    }

    fn prompt(&self) -> &'static str {
        if self.is_command_mode {
            ":"
        } else {
            "> "
        }
    }

    fn edited_text(&self) -> (&'a str, usize) {
        match self.content.strip_prefix(':') {
            Some(rest) if self.is_command_mode => (rest, self.cursor_position.saturating_sub(1)),
            _ => (self.content, self.cursor_position),
        }
    }

    fn line(&self) -> Line<'a> {
        let prompt = Span::styled(self.prompt(), self.theme.input_style());

        // Hints only make sense in normal mode; an empty edit shows the cursor.
        if !self.is_active && self.content.is_empty() {
            return Line::from(vec![
                prompt,
                Span::styled(self.placeholder, self.theme.system_style()),
            ]);
        }

        let (text, cursor) = self.edited_text();
        let (before, at, after) = split_at_cursor(text, cursor);
        let cursor_style = self
            .theme
            .input_style()
            .add_modifier(Modifier::UNDERLINED | Modifier::BOLD);

        Line::from(vec![
            prompt,
            Span::styled(before, self.theme.input_style()),
            Span::styled(at, cursor_style),
            Span::styled(after, self.theme.input_style()),
        ])
    }
}

/// Split `text` around the char at `cursor`. Past the end the cursor sits on
/// a blank cell.
fn split_at_cursor(text: &str, cursor: usize) -> (String, String, String) {
    let mut chars = text.chars();
    let before: String = chars.by_ref().take(cursor).collect();
    let at = chars.next().map_or_else(|| " ".to_string(), String::from);
    let after: String = chars.collect();
    (before, at, after)
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.is_active));
        if let Some(label) = self.label {
            block = block.title(format!(" {label} "));
        }

        let inner = block.inner(area);
        let line = self.line();
        block.render(area, buf);
        Paragraph::new(line).render(inner, buf);
    }
}
