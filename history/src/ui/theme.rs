//! Color theme and styling for the game history TUI

use history_core::YearLabel;
use ratatui::style::{Color, Modifier, Style};

/// UI color theme
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Text colors
    pub input_text: Color,
    pub system_text: Color,
    pub year_text: Color,
    pub event_text: Color,
    pub genre_text: Color,

    // Matching and quiz outcome colors
    pub matched: Color,
    pub unmatched: Color,
    pub correct: Color,
    pub wrong: Color,

    pub selection: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            input_text: Color::Cyan,
            system_text: Color::DarkGray,
            year_text: Color::Yellow,
            event_text: Color::LightMagenta,
            genre_text: Color::LightBlue,

            matched: Color::Green,
            unmatched: Color::DarkGray,
            correct: Color::LightGreen,
            wrong: Color::LightRed,

            selection: Color::Cyan,
        }
    }
}

impl Theme {
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.foreground)
    }

    /// Style for typed input and prompts
    pub fn input_style(&self) -> Style {
        Style::default()
            .fg(self.input_text)
            .add_modifier(Modifier::ITALIC)
    }

    /// Style for system hints
    pub fn system_style(&self) -> Style {
        Style::default()
            .fg(self.system_text)
            .add_modifier(Modifier::DIM)
    }

    /// Heading style for a timeline year. The unknown period is dimmed.
    pub fn year_style(&self, label: YearLabel) -> Style {
        match label {
            YearLabel::Year(_) => Style::default()
                .fg(self.year_text)
                .add_modifier(Modifier::BOLD),
            YearLabel::Unknown => Style::default()
                .fg(self.system_text)
                .add_modifier(Modifier::BOLD),
        }
    }

    pub fn event_style(&self) -> Style {
        Style::default()
            .fg(self.event_text)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn genre_style(&self) -> Style {
        Style::default().fg(self.genre_text)
    }

    /// Style for a ranked title depending on whether the catalog knows it
    pub fn match_style(&self, matched: bool) -> Style {
        if matched {
            Style::default().fg(self.matched)
        } else {
            Style::default().fg(self.unmatched)
        }
    }

    /// Style for a graded quiz answer
    pub fn verdict_style(&self, correct: bool) -> Style {
        Style::default()
            .fg(if correct { self.correct } else { self.wrong })
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the selected row of a list
    pub fn selected_style(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.selection)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        }
    }

    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }
}
