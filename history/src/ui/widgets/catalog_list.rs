//! Catalog browser widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use history_core::{CatalogEntry, Console, YearLabel};

use crate::ui::theme::Theme;

/// Search results for one console, with descriptions under each title
pub struct CatalogListWidget<'a> {
    console: &'a Console,
    entries: &'a [&'a CatalogEntry],
    term: &'a str,
    scroll: usize,
    theme: &'a Theme,
}

impl<'a> CatalogListWidget<'a> {
    pub fn new(console: &'a Console, entries: &'a [&'a CatalogEntry], theme: &'a Theme) -> Self {
        Self {
            console,
            entries,
            term: "",
            scroll: 0,
            theme,
        }
    }

    pub fn term(mut self, term: &'a str) -> Self {
        self.term = term;
        self
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }
}

impl Widget for CatalogListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.term.is_empty() {
            format!(" {} {} ({}) ", self.console.icon, self.console.name, self.entries.len())
        } else {
            format!(
                " {} {} /{}/ ({}) ",
                self.console.icon,
                self.console.name,
                self.term,
                self.entries.len()
            )
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));

        let inner = block.inner(area);
        block.render(area, buf);

        if self.entries.is_empty() {
            let line = Line::from(Span::styled("No games found.", self.theme.system_style()));
            Paragraph::new(line).render(inner, buf);
            return;
        }

        let mut lines = Vec::new();
        for entry in self.entries.iter().skip(self.scroll) {
            // Undated entries are styled like the unknown period.
            let (year, label) = if entry.has_year() {
                (entry.year.to_string(), YearLabel::Year(entry.year))
            } else {
                ("----".to_string(), YearLabel::Unknown)
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{year} "), self.theme.year_style(label)),
                Span::styled(entry.title.clone(), self.theme.text_style()),
                Span::raw(" "),
                Span::styled(format!("[{}]", entry.genre), self.theme.genre_style()),
            ]));
            if let Some(description) = entry.description() {
                lines.push(Line::from(Span::styled(
                    format!("     {description}"),
                    self.theme.system_style(),
                )));
            }
        }

        Paragraph::new(lines).render(inner, buf);
    }
}
