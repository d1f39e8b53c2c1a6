//! Life chronicle widget: the timeline with ages and life events

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::scrollbar,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Widget, Wrap,
    },
};

use history_core::Chronicle;

use crate::ui::theme::Theme;

/// Scrollable chronicle, one heading per year
pub struct ChronicleWidget<'a> {
    chronicle: &'a Chronicle,
    scroll: usize,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> ChronicleWidget<'a> {
    pub fn new(chronicle: &'a Chronicle, theme: &'a Theme) -> Self {
        Self {
            chronicle,
            scroll: 0,
            theme,
            focused: false,
        }
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        if self.chronicle.is_empty() {
            lines.push(Line::from(Span::styled(
                "Nothing here yet. Rank some games or add life events.",
                self.theme.system_style(),
            )));
            return lines;
        }

        for row in self.chronicle.rows() {
            let mut heading = vec![Span::styled(
                row.label.to_string(),
                self.theme.year_style(row.label),
            )];
            if let (Some(age), Some(group)) = (row.age, row.age_group) {
                heading.push(Span::styled(
                    format!("  age {age} · {}", group.name()),
                    self.theme.system_style(),
                ));
            }
            lines.push(Line::from(heading));

            for event in &row.events {
                lines.push(Line::from(Span::styled(
                    format!("  ◆ {}", event.event),
                    self.theme.event_style(),
                )));
            }

            for game in &row.games {
                let mut spans = vec![
                    Span::raw(format!(
                        "  {} ",
                        game.console_icon.as_deref().unwrap_or("?")
                    )),
                    Span::styled(
                        format!("{} #{} ", game.console_name, game.rank),
                        self.theme.system_style(),
                    ),
                    Span::styled(game.title.clone(), self.theme.text_style()),
                    Span::raw(" "),
                    Span::styled(format!("[{}]", game.genre), self.theme.genre_style()),
                ];
                if !game.comment.is_empty() {
                    spans.push(Span::styled(
                        format!("  {}", game.comment),
                        self.theme.input_style(),
                    ));
                }
                lines.push(Line::from(spans));
            }

            // Blank line between years
            lines.push(Line::from(""));
        }

        lines
    }
}

impl Widget for ChronicleWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.focused {
            " Timeline [j/k scroll] "
        } else {
            " Timeline "
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        let lines = self.lines();

        let visible_height = inner.height as usize;
        let total_lines = lines.len();
        let max_scroll = total_lines.saturating_sub(visible_height);
        let scroll = self.scroll.min(max_scroll);

        Paragraph::new(lines)
            .scroll((scroll as u16, 0))
            .wrap(Wrap { trim: false })
            .render(inner, buf);

        if total_lines <= visible_height {
            return;
        }

        let scrollbar_area = Rect {
            x: inner.x + inner.width.saturating_sub(1),
            y: inner.y,
            width: 1,
            height: inner.height,
        };
        let mut scrollbar_state = ScrollbarState::new(max_scroll).position(scroll);
        Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .symbols(scrollbar::VERTICAL)
            .thumb_style(Style::default().fg(Color::DarkGray))
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .render(scrollbar_area, buf, &mut scrollbar_state);

        if scroll > 0 {
            draw_hint(buf, inner, inner.y, &format!(" ↑{scroll} "));
        }
        if scroll < max_scroll {
            let bottom = inner.y + inner.height.saturating_sub(1);
            draw_hint(buf, inner, bottom, &format!(" ↓{} more ", max_scroll - scroll));
        }
    }
}

/// Write a dim hint over the left edge of row `y`, leaving the scrollbar free.
fn draw_hint(buf: &mut Buffer, inner: Rect, y: u16, hint: &str) {
    let style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::DIM);
    let limit = inner.x + inner.width.saturating_sub(2);
    for (x, ch) in (inner.x..limit).zip(hint.chars()) {
        buf[(x, y)].set_char(ch).set_style(style);
    }
}
