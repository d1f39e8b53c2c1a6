//! Quiz card widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use history_core::{Console, Quiz, QuizResult};

use crate::ui::theme::Theme;

pub struct QuizCardWidget<'a> {
    quiz: Option<&'a Quiz>,
    result: Option<&'a QuizResult>,
    show_hint: bool,
    score: (u32, u32),
    theme: &'a Theme,
}

impl<'a> QuizCardWidget<'a> {
    pub fn new(quiz: Option<&'a Quiz>, theme: &'a Theme) -> Self {
        Self {
            quiz,
            result: None,
            show_hint: false,
            score: (0, 0),
            theme,
        }
    }

    pub fn result(mut self, result: Option<&'a QuizResult>) -> Self {
        self.result = result;
        self
    }

    pub fn show_hint(mut self, show: bool) -> Self {
        self.show_hint = show;
        self
    }

    /// Correct answers out of questions answered this session.
    pub fn score(mut self, correct: u32, answered: u32) -> Self {
        self.score = (correct, answered);
        self
    }
}

impl Widget for QuizCardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" Quiz  {}/{} ", self.score.0, self.score.1))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));

        let inner = block.inner(area);
        block.render(area, buf);

        let Some(quiz) = self.quiz else {
            let line = Line::from(Span::styled(
                "Press n to draw a question.",
                self.theme.system_style(),
            ));
            Paragraph::new(line).render(inner, buf);
            return;
        };

        let mut lines = vec![
            Line::from(Span::styled(
                format!("Which {} game is this?", Console::display_name(&quiz.console_id)),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(quiz.description.clone(), self.theme.text_style())),
            Line::from(""),
        ];

        if self.show_hint {
            lines.push(Line::from(vec![
                Span::styled("Hint: ", self.theme.system_style()),
                Span::styled(quiz.hint(), self.theme.genre_style()),
            ]));
            lines.push(Line::from(""));
        }

        match self.result {
            Some(result) => {
                let verdict = if result.is_correct {
                    "Correct!"
                } else {
                    "Not quite."
                };
                lines.push(Line::from(Span::styled(
                    verdict,
                    self.theme.verdict_style(result.is_correct),
                )));
                lines.push(Line::from(format!(
                    "{} ({}, {})",
                    result.correct_title, result.year, result.genre
                )));
                lines.push(Line::from(Span::styled(
                    "Press n for the next question.",
                    self.theme.system_style(),
                )));
            }
            None => lines.push(Line::from(Span::styled(
                "Press i to answer, h for a hint.",
                self.theme.system_style(),
            ))),
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
