//! Ranking panel and console list widgets

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use history_core::{Catalog, Console, Ranking, Rankings};

use crate::ui::theme::Theme;

/// One console's ranking with the catalog match shown per title
pub struct RankingPanelWidget<'a> {
    console: &'a Console,
    ranking: Option<&'a Ranking>,
    catalog: &'a Catalog,
    theme: &'a Theme,
    selected: usize,
    unsaved: bool,
    focused: bool,
}

impl<'a> RankingPanelWidget<'a> {
    pub fn new(
        console: &'a Console,
        ranking: Option<&'a Ranking>,
        catalog: &'a Catalog,
        theme: &'a Theme,
    ) -> Self {
        Self {
            console,
            ranking,
            catalog,
            theme,
            selected: 0,
            unsaved: false,
            focused: false,
        }
    }

    /// Highlight the rank at this 0-based position.
    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn unsaved(mut self, unsaved: bool) -> Self {
        self.unsaved = unsaved;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for RankingPanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let marker = if self.unsaved { " [+]" } else { "" };
        let block = Block::default()
            .title(format!(
                " {} {}{marker} ",
                self.console.icon, self.console.name
            ))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        let Some(ranking) = self.ranking else {
            let lines = vec![
                Line::from(Span::styled(
                    "No ranking for this console yet.",
                    self.theme.system_style(),
                )),
                Line::from(Span::styled(
                    "Press i to enter your number one.",
                    self.theme.system_style(),
                )),
            ];
            Paragraph::new(lines).render(inner, buf);
            return;
        };

        let mut lines = Vec::new();
        for (i, game) in ranking.games.iter().enumerate() {
            let rank_style = if i == self.selected {
                self.theme.selected_style(self.focused)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };

            let mut spans = vec![Span::styled(format!("{:>2}. ", game.rank), rank_style)];
            if game.has_title() {
                let entry = self.catalog.resolve(&ranking.console_id, &game.title);
                spans.push(Span::styled(game.title.clone(), self.theme.text_style()));
                spans.push(Span::raw("  "));
                match entry {
                    Some(entry) if entry.has_year() => spans.push(Span::styled(
                        format!("{} {}", entry.year, entry.genre),
                        self.theme.match_style(true),
                    )),
                    Some(entry) => spans.push(Span::styled(
                        format!("year unknown {}", entry.genre),
                        self.theme.match_style(true),
                    )),
                    None => spans.push(Span::styled("not in catalog", self.theme.match_style(false))),
                }
            } else {
                spans.push(Span::styled("(empty)", self.theme.system_style()));
            }
            lines.push(Line::from(spans));

            if !game.comment.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("      {}", game.comment),
                    self.theme.input_style(),
                )));
            }
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

/// Console list showing how many titles each ranking holds
pub struct ConsoleListWidget<'a> {
    rankings: &'a Rankings,
    theme: &'a Theme,
    selected: usize,
    title: &'a str,
}

impl<'a> ConsoleListWidget<'a> {
    pub fn new(rankings: &'a Rankings, theme: &'a Theme) -> Self {
        Self {
            rankings,
            theme,
            selected: 0,
            title: " Consoles ",
        }
    }

    /// Highlight the console at this index of [`Console::all`].
    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }
}

impl Widget for ConsoleListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));

        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = Console::all()
            .iter()
            .enumerate()
            .map(|(i, console)| {
                let count = self
                    .rankings
                    .get(console.id)
                    .map(|r| r.titled_games().count())
                    .unwrap_or(0);
                let style = if i == self.selected {
                    self.theme.selected_style(true)
                } else {
                    self.theme.text_style()
                };
                let count = if count > 0 {
                    format!(" {count}")
                } else {
                    String::new()
                };
                Line::from(vec![
                    Span::styled(format!("{} {}", console.icon, console.id), style),
                    Span::styled(count, self.theme.system_style()),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
