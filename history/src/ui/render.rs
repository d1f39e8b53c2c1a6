//! Render orchestration for the game history TUI

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::{App, InputMode, View};
use crate::ui::layout::{centered_rect_fixed, sidebar_split, AppLayout};
use crate::ui::widgets::{
    CatalogListWidget, ChronicleWidget, ConsoleListWidget, HotkeyBarWidget, InputWidget,
    QuizCardWidget, RankingPanelWidget, StatusBarWidget,
};

/// Overlay types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Help,
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = AppLayout::calculate(area);

    render_tabs(frame, app, layout.tabs_area);

    match app.view {
        View::Rankings => render_rankings(frame, app, layout.main_area),
        View::Timeline => render_timeline(frame, app, layout.main_area),
        View::Quiz => render_quiz(frame, app, layout.main_area),
        View::Catalog => render_catalog(frame, app, layout.main_area),
    }

    let status = StatusBarWidget::new(
        app.input_mode,
        app.history.user_id(),
        app.history.profile().birth_year,
        &app.theme,
    )
    .unsaved(app.unsaved_count())
    .message(app.status_message());
    frame.render_widget(status, layout.status_bar);

    frame.render_widget(
        HotkeyBarWidget::new(app.view, app.input_mode, &app.theme),
        layout.hotkey_bar,
    );

    render_input(frame, app, layout.input_area);

    if let Some(overlay) = app.overlay() {
        render_overlay(frame, app, overlay, area);
    }
}

/// Render the view tabs
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<String> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| format!("{} {}", i + 1, view.title()))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.view.index())
        .style(app.theme.system_style())
        .highlight_style(
            Style::default()
                .fg(app.theme.border_focused)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|");
    frame.render_widget(tabs, area);
}

fn render_rankings(frame: &mut Frame, app: &App, area: Rect) {
    let (sidebar, main) = sidebar_split(area);
    let console = app.current_console();

    frame.render_widget(
        ConsoleListWidget::new(app.history.rankings(), &app.theme).selected(app.console_index()),
        sidebar,
    );

    let panel = RankingPanelWidget::new(
        console,
        app.history.ranking(console.id),
        app.history.catalog(),
        &app.theme,
    )
    .selected(app.selected_rank())
    .unsaved(app.is_unsaved(console.id))
    .focused(app.input_mode == InputMode::Normal);
    frame.render_widget(panel, main);
}

fn render_timeline(frame: &mut Frame, app: &App, area: Rect) {
    let chronicle = app.history.chronicle();
    let widget = ChronicleWidget::new(&chronicle, &app.theme)
        .scroll(app.timeline_scroll)
        .focused(app.input_mode == InputMode::Normal);
    frame.render_widget(widget, area);
}

fn render_quiz(frame: &mut Frame, app: &App, area: Rect) {
    let widget = QuizCardWidget::new(app.quiz.as_ref(), &app.theme)
        .result(app.quiz_result.as_ref())
        .show_hint(app.show_hint)
        .score(app.quiz_correct, app.quiz_answered);
    frame.render_widget(widget, area);
}

fn render_catalog(frame: &mut Frame, app: &App, area: Rect) {
    let (sidebar, main) = sidebar_split(area);
    let console = app.current_console();

    frame.render_widget(
        ConsoleListWidget::new(app.history.rankings(), &app.theme)
            .selected(app.console_index())
            .title(" Catalog "),
        sidebar,
    );

    let entries = app.catalog_results();
    let widget = CatalogListWidget::new(console, &entries, &app.theme)
        .term(&app.search_term)
        .scroll(app.catalog_scroll);
    frame.render_widget(widget, main);
}

/// Render the input area
fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let is_active = matches!(app.input_mode, InputMode::Insert | InputMode::Command);
    let is_command = matches!(app.input_mode, InputMode::Command);

    let placeholder = match app.view {
        View::Rankings => "i: edit title  c: edit comment  :w save",
        View::Timeline => ":birth <year>  :event <age> <text>",
        View::Quiz => "n: new question  i: answer",
        View::Catalog => "/: search titles",
    };

    let input_widget = InputWidget::new(app.input_buffer(), &app.theme)
        .cursor_position(app.cursor_position())
        .active(is_active)
        .command_mode(is_command)
        .label(app.edit_target().map(|t| t.label()))
        .placeholder(placeholder);

    frame.render_widget(input_widget, area);
}

/// Render overlay
fn render_overlay(frame: &mut Frame, app: &App, overlay: &Overlay, area: Rect) {
    match overlay {
        Overlay::Help => render_help_overlay(frame, app, area),
    }
}

fn heading(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default().add_modifier(Modifier::UNDERLINED),
    ))
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(60, 34, area);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            " Game History - Help ",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading("Views:"),
        Line::from("  Tab / Shift+Tab   Next / previous view"),
        Line::from("  1-4               Jump to a view"),
        Line::from(""),
        heading("Rankings:"),
        Line::from("  h/l or ←/→        Previous / next console"),
        Line::from("  j/k or ↑/↓        Select rank"),
        Line::from("  i or Enter        Edit title"),
        Line::from("  c                 Edit comment"),
        Line::from("  + / -             Add / remove the last rank"),
        Line::from(""),
        heading("Timeline:"),
        Line::from("  j/k, Ctrl+d/u     Scroll"),
        Line::from("  g/G               Jump to top/bottom"),
        Line::from(""),
        heading("Quiz and catalog:"),
        Line::from("  n / i / h         New question / answer / hint"),
        Line::from("  / or i            Search the catalog"),
        Line::from(""),
        heading("Commands:"),
        Line::from("  :w  :wa  :wq      Save current / all / all and quit"),
        Line::from("  :q  :q!           Quit / quit discarding changes"),
        Line::from("  :delete           Delete the current ranking"),
        Line::from("  :birth <year>     Set birth year"),
        Line::from("  :event <age> <t>  Add a life event"),
        Line::from("  :forget <n>       Remove life event n"),
        Line::from("  :export [path]    Export to JSON"),
        Line::from("  :import <path>    Replace everything from JSON"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or q to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}
