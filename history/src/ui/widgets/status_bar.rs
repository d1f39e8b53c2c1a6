//! Status line and hotkey bar

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::{InputMode, View};
use crate::ui::theme::Theme;

pub struct StatusBarWidget<'a> {
    input_mode: InputMode,
    user_id: &'a str,
    birth_year: i32,
    unsaved: usize,
    message: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(input_mode: InputMode, user_id: &'a str, birth_year: i32, theme: &'a Theme) -> Self {
        Self {
            input_mode,
            user_id,
            birth_year,
            unsaved: 0,
            message: None,
            theme,
        }
    }

    /// Number of rankings with unsaved edits.
    pub fn unsaved(mut self, count: usize) -> Self {
        self.unsaved = count;
        self
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (mode, color) = match self.input_mode {
            InputMode::Normal => ("NORMAL", Color::Blue),
            InputMode::Insert => ("INSERT", Color::Green),
            InputMode::Command => ("COMMAND", Color::Yellow),
        };

        let mut spans = vec![
            Span::styled(
                format!(" {mode} "),
                Style::default()
                    .bg(color)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                format!("{} · born {}", self.user_id, self.birth_year),
                self.theme.system_style(),
            ),
        ];
        if self.unsaved > 0 {
            spans.push(Span::styled(
                format!(" · {} unsaved", self.unsaved),
                self.theme.verdict_style(false),
            ));
        }
        if let Some(message) = self.message {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(message.to_string(), self.theme.text_style()));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// One-line summary of the keys that work in the current view and mode
pub struct HotkeyBarWidget<'a> {
    view: View,
    input_mode: InputMode,
    theme: &'a Theme,
}

impl<'a> HotkeyBarWidget<'a> {
    pub fn new(view: View, input_mode: InputMode, theme: &'a Theme) -> Self {
        Self {
            view,
            input_mode,
            theme,
        }
    }

    fn hotkeys(&self) -> &'static [(&'static str, &'static str)] {
        match (self.input_mode, self.view) {
            (InputMode::Insert, _) => &[("Enter", "submit"), ("Esc", "cancel")],
            (InputMode::Command, _) => &[("Enter", "run"), ("Esc", "cancel")],
            (InputMode::Normal, View::Rankings) => &[
                ("h/l", "console"),
                ("j/k", "rank"),
                ("i", "title"),
                ("c", "comment"),
                ("+/-", "rank slots"),
                (":w", "save"),
                ("Tab", "view"),
                ("?", "help"),
            ],
            (InputMode::Normal, View::Timeline) => &[
                ("j/k", "scroll"),
                ("g/G", "top/bottom"),
                (":birth", "year"),
                (":event", "add"),
                ("Tab", "view"),
                ("?", "help"),
            ],
            (InputMode::Normal, View::Quiz) => &[
                ("n", "new"),
                ("i", "answer"),
                ("h", "hint"),
                ("Tab", "view"),
                ("?", "help"),
            ],
            (InputMode::Normal, View::Catalog) => &[
                ("h/l", "console"),
                ("/", "search"),
                ("j/k", "scroll"),
                ("Tab", "view"),
                ("?", "help"),
            ],
        }
    }
}

impl Widget for HotkeyBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let key_style = Style::default()
            .fg(self.theme.border_focused)
            .add_modifier(Modifier::BOLD);

        let mut spans = Vec::new();
        for (key, action) in self.hotkeys() {
            spans.push(Span::styled(format!(" {key}"), key_style));
            spans.push(Span::styled(format!(" {action} "), self.theme.system_style()));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
