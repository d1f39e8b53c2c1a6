//! Headless mode for the game history app.
//!
//! This module provides a simple text-based interface for editing rankings and
//! printing the timeline without a TUI. It's designed for scripting and
//! automated testing.

use history_core::persist::export_path;
use history_core::{Chronicle, Console, ExportBundle, HistoryService, Quiz, YearLabel};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::error::CommandError;

const HELP: &[&str] = &[
    "  #rankings                - List all rankings",
    "  #edit <console>          - Select (or create) the ranking for a console",
    "  #title <rank> <title>    - Set a title in the selected ranking",
    "  #comment <rank> <text>   - Set a comment in the selected ranking",
    "  #add-rank                - Add a slot to the selected ranking",
    "  #remove-rank             - Remove the last slot of the selected ranking",
    "  #save                    - Save the selected ranking",
    "  #delete [console]        - Delete a ranking",
    "  #timeline                - Show the timeline with life events",
    "  #birth-year [year]       - Show or set the birth year",
    "  #event [<age> <text>]    - List life events, or add one",
    "  #forget <n>              - Remove life event n",
    "  #quiz                    - Draw a quiz question",
    "  #answer <title>          - Answer the current quiz",
    "  #hint                    - Show a hint for the current quiz",
    "  #search <console> [term] - Search the catalog",
    "  #resolve <console> <title> - Show which catalog game a title matches",
    "  #export [path]           - Export everything to a JSON file",
    "  #import <path>           - Replace everything with an exported file",
    "  #help                    - Show this help",
    "  #quit                    - Exit",
];

/// Output of one input line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<String>,
    pub quit: bool,
}

impl Reply {
    fn lines(lines: Vec<String>) -> Self {
        Self { lines, quit: false }
    }

    fn line(line: impl Into<String>) -> Self {
        Self::lines(vec![line.into()])
    }
}

/// State carried between headless commands.
pub struct HeadlessSession {
    history: HistoryService,
    export_dir: PathBuf,
    console: Option<String>,
    quiz: Option<Quiz>,
}

impl HeadlessSession {
    pub fn new(history: HistoryService, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            history,
            export_dir: export_dir.into(),
            console: None,
            quiz: None,
        }
    }

    pub fn history(&self) -> &HistoryService {
        &self.history
    }

    /// Run one input line. Failures are reported as `[ERROR]` lines.
    pub async fn execute(&mut self, line: &str) -> Reply {
        let line = line.trim();
        let Some(command) = line.strip_prefix('#') else {
            return Reply::line("[ERROR] Commands start with '#'. Type #help for help.");
        };

        let (name, rest) = split_word(command);
        match self.dispatch(name, rest).await {
            Ok(reply) => reply,
            Err(e) => Reply::line(format!("[ERROR] {e}")),
        }
    }

    async fn dispatch(&mut self, name: &str, rest: &str) -> Result<Reply, CommandError> {
        match name {
            "quit" | "exit" => Ok(Reply {
                lines: vec!["Goodbye!".to_string()],
                quit: true,
            }),
            "help" => {
                let mut lines = vec!["[HELP]".to_string()];
                lines.extend(HELP.iter().map(|l| l.to_string()));
                Ok(Reply::lines(lines))
            }
            "rankings" => Ok(Reply::lines(self.rankings())),
            "edit" => self.edit(rest),
            "title" => self.set_field(rest, Field::Title),
            "comment" => self.set_field(rest, Field::Comment),
            "add-rank" => {
                let console = self.selected()?;
                self.history.edit_ranking(&console).add_rank()?;
                Ok(Reply::lines(self.ranking_lines(&console)))
            }
            "remove-rank" => {
                let console = self.selected()?;
                self.history.edit_ranking(&console).remove_rank()?;
                Ok(Reply::lines(self.ranking_lines(&console)))
            }
            "save" => {
                let console = self.selected()?;
                self.history.save_ranking(&console).await?;
                Ok(Reply::line(format!("[SAVED] {console}")))
            }
            "delete" => self.delete(rest).await,
            "timeline" => Ok(Reply::lines(chronicle_lines(&self.history.chronicle()))),
            "birth-year" => self.birth_year(rest).await,
            "event" => self.event(rest).await,
            "forget" => {
                let index = parse_index(rest).ok_or(CommandError::Usage("#forget <n>"))?;
                let removed = self.history.remove_life_event(index - 1).await?;
                Ok(Reply::line(format!(
                    "[FORGOT] age {}: {}",
                    removed.age, removed.event
                )))
            }
            "quiz" => {
                let quiz = Quiz::draw(self.history.catalog()).ok_or(CommandError::EmptyQuiz)?;
                let reply = Reply::lines(vec![
                    format!("[QUIZ] {}", Console::display_name(&quiz.console_id)),
                    quiz.description.clone(),
                ]);
                self.quiz = Some(quiz);
                Ok(reply)
            }
            "hint" => {
                let quiz = self.quiz.as_ref().ok_or(CommandError::NoQuiz)?;
                Ok(Reply::line(format!("[HINT] {}", quiz.hint())))
            }
            "answer" => self.answer(rest),
            "search" => self.search(rest),
            "resolve" => self.resolve(rest),
            "export" => self.export(rest).await,
            "import" => self.import(rest).await,
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }

    fn selected(&self) -> Result<String, CommandError> {
        self.console.clone().ok_or(CommandError::NoConsoleSelected)
    }

    fn rankings(&self) -> Vec<String> {
        if self.history.rankings().is_empty() {
            return vec!["[RANKINGS] none yet".to_string()];
        }
        let consoles: Vec<String> = self.history.rankings().keys().cloned().collect();
        consoles
            .iter()
            .flat_map(|console| self.ranking_lines(console))
            .collect()
    }

    fn ranking_lines(&self, console_id: &str) -> Vec<String> {
        let Some(ranking) = self.history.ranking(console_id) else {
            return vec![format!("[RANKING] {console_id} (empty)")];
        };

        let mut lines = vec![format!("[RANKING] {} {}", ranking.console_id, ranking.name)];
        for game in &ranking.games {
            let title = if game.has_title() { game.title.as_str() } else { "-" };
            if game.comment.is_empty() {
                lines.push(format!("  {:>2}. {title}", game.rank));
            } else {
                lines.push(format!("  {:>2}. {title} ({})", game.rank, game.comment));
            }
        }
        lines
    }

    fn edit(&mut self, rest: &str) -> Result<Reply, CommandError> {
        let console = rest.trim();
        if console.is_empty() || console.contains(char::is_whitespace) {
            return Err(CommandError::Usage("#edit <console>"));
        }

        let console = console.to_uppercase();
        self.history.edit_ranking(&console);
        self.console = Some(console.clone());

        let mut lines = self.ranking_lines(&console);
        if Console::find(&console).is_none() {
            lines.push(format!("[WARN] {console} is not a known console"));
        }
        Ok(Reply::lines(lines))
    }

    fn set_field(&mut self, rest: &str, field: Field) -> Result<Reply, CommandError> {
        let console = self.selected()?;
        let (rank, text) = split_word(rest);
        let rank = parse_index(rank).ok_or(field.usage())?;

        let ranking = self.history.edit_ranking(&console);
        match field {
            Field::Title => ranking.set_title(rank, text)?,
            Field::Comment => ranking.set_comment(rank, text)?,
        }

        let mut lines = Vec::new();
        if matches!(field, Field::Title) && !text.is_empty() {
            lines.push(match self.history.resolve(&console, text) {
                Some(entry) => format!("[MATCH] {} ({}, {})", entry.title, entry.year, entry.genre),
                None => "[NO MATCH] will appear in the unknown period".to_string(),
            });
        }
        lines.extend(self.ranking_lines(&console));
        Ok(Reply::lines(lines))
    }

    async fn delete(&mut self, rest: &str) -> Result<Reply, CommandError> {
        let console = match rest.trim() {
            "" => self.selected()?,
            console => console.to_uppercase(),
        };
        let existed = self.history.delete_ranking(&console).await?;
        if self.console.as_deref() == Some(console.as_str()) {
            self.console = None;
        }
        Ok(Reply::line(if existed {
            format!("[DELETED] {console}")
        } else {
            format!("[DELETED] {console} (nothing stored)")
        }))
    }

    async fn birth_year(&mut self, rest: &str) -> Result<Reply, CommandError> {
        if rest.trim().is_empty() {
            return Ok(Reply::line(format!(
                "[BIRTH YEAR] {}",
                self.history.profile().birth_year
            )));
        }
        let year = self.history.set_birth_year(rest).await?;
        Ok(Reply::line(format!("[SAVED] birth year {year}")))
    }

    async fn event(&mut self, rest: &str) -> Result<Reply, CommandError> {
        if rest.trim().is_empty() {
            let profile = self.history.profile();
            if profile.life_events.is_empty() {
                return Ok(Reply::line("[EVENTS] none yet"));
            }
            let mut lines = vec!["[EVENTS]".to_string()];
            for (i, event) in profile.life_events.iter().enumerate() {
                let year = event
                    .year(profile.birth_year)
                    .map_or(YearLabel::Unknown, YearLabel::from_resolved);
                lines.push(format!("  {}. age {} ({year}): {}", i + 1, event.age, event.event));
            }
            return Ok(Reply::lines(lines));
        }

        let (age, text) = split_word(rest);
        let age: u32 = age
            .parse()
            .map_err(|_| CommandError::Usage("#event <age> <text>"))?;
        self.history.add_life_event(age, text).await?;
        Ok(Reply::line(format!("[SAVED] age {age}: {text}")))
    }

    fn answer(&mut self, rest: &str) -> Result<Reply, CommandError> {
        let quiz = self.quiz.as_ref().ok_or(CommandError::NoQuiz)?;
        let result = quiz
            .answer(rest)
            .ok_or(CommandError::Usage("#answer <title>"))?;
        self.quiz = None;

        let verdict = if result.is_correct {
            "[CORRECT]"
        } else {
            "[WRONG]"
        };
        Ok(Reply::line(format!(
            "{verdict} {} ({}, {})",
            result.correct_title, result.genre, result.year
        )))
    }

    fn search(&self, rest: &str) -> Result<Reply, CommandError> {
        let (console, term) = split_word(rest);
        if console.is_empty() {
            return Err(CommandError::Usage("#search <console> [term]"));
        }
        let console = console.to_uppercase();
        let found = self.history.catalog().search(&console, term);

        let mut lines = vec![format!("[SEARCH] {console}: {} found", found.len())];
        for entry in found {
            lines.push(format!("  {} ({}, {})", entry.title, entry.year, entry.genre));
        }
        Ok(Reply::lines(lines))
    }

    fn resolve(&self, rest: &str) -> Result<Reply, CommandError> {
        let (console, title) = split_word(rest);
        if console.is_empty() || title.is_empty() {
            return Err(CommandError::Usage("#resolve <console> <title>"));
        }
        Ok(Reply::line(
            match self.history.resolve(&console.to_uppercase(), title) {
                Some(entry) => format!("[MATCH] {} ({}, {})", entry.title, entry.year, entry.genre),
                None => "[NO MATCH]".to_string(),
            },
        ))
    }

    async fn export(&self, rest: &str) -> Result<Reply, CommandError> {
        let path = match rest.trim() {
            "" => export_path(&self.export_dir),
            path => PathBuf::from(path),
        };
        self.history.export().save_json(&path).await?;
        Ok(Reply::line(format!("[EXPORTED] {}", path.display())))
    }

    async fn import(&mut self, rest: &str) -> Result<Reply, CommandError> {
        let path = rest.trim();
        if path.is_empty() {
            return Err(CommandError::Usage("#import <path>"));
        }
        let bundle = ExportBundle::load_json(path).await?;
        self.history.import(bundle).await?;
        self.console = None;
        Ok(Reply::line(format!(
            "[IMPORTED] {} rankings from {path}",
            self.history.rankings().len()
        )))
    }
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Title,
    Comment,
}

impl Field {
    fn usage(self) -> CommandError {
        match self {
            Field::Title => CommandError::Usage("#title <rank> <title>"),
            Field::Comment => CommandError::Usage("#comment <rank> <text>"),
        }
    }
}

/// Split off the first whitespace-delimited word; the remainder is trimmed.
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    }
}

/// A 1-based position typed by the user.
fn parse_index(input: &str) -> Option<usize> {
    input.trim().parse().ok().filter(|&n: &usize| n >= 1)
}

/// Render the chronicle one line per game or event.
pub fn chronicle_lines(chronicle: &Chronicle) -> Vec<String> {
    if chronicle.is_empty() {
        return vec!["[TIMELINE] empty. Add titles with #edit and #title.".to_string()];
    }

    let mut lines = Vec::new();
    for row in chronicle.rows() {
        match (row.age, row.age_group) {
            (Some(age), Some(group)) => {
                lines.push(format!("[{}] age {age}, {}", row.label, group.name()))
            }
            _ => lines.push(format!("[{}]", row.label)),
        }
        for event in &row.events {
            lines.push(format!("  * {}", event.event));
        }
        for game in &row.games {
            lines.push(format!(
                "  {} {} #{} {} ({})",
                game.console_icon.as_deref().unwrap_or("?"),
                game.console_name,
                game.rank,
                game.title,
                game.genre
            ));
        }
    }
    lines
}

/// Run the app in headless mode.
///
/// This provides a simple line-oriented protocol:
/// - Lines starting with `#` are commands
/// - Responses are tagged lines such as `[SAVED]` or `[ERROR]`
pub async fn run_headless(history: HistoryService, export_dir: PathBuf) -> io::Result<()> {
    let mut session = HeadlessSession::new(history, export_dir);

    println!("=== Game History Headless Mode ===");
    println!("User: {}", session.history().user_id());
    println!(
        "Rankings: {}, catalog games: {}",
        session.history().rankings().len(),
        session.history().catalog().len()
    );
    println!();
    println!("Type #help for commands.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let reply = session.execute(&line).await;
        for out in &reply.lines {
            writeln!(stdout, "{out}")?;
        }
        stdout.flush()?;

        if reply.quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use history_core::testing::memory_service;
    use tempfile::TempDir;

    fn session() -> HeadlessSession {
        let (history, _store) = memory_service("tester");
        HeadlessSession::new(history, std::env::temp_dir())
    }

    async fn run(session: &mut HeadlessSession, line: &str) -> Vec<String> {
        session.execute(line).await.lines
    }

    #[test]
    fn test_split_word() {
        assert_eq!(split_word("  3  Chrono Trigger "), ("3", "Chrono Trigger"));
        assert_eq!(split_word("FC"), ("FC", ""));
        assert_eq!(split_word(""), ("", ""));
    }

    #[tokio::test]
    async fn test_edit_title_and_timeline() {
        let mut s = session();

        let out = run(&mut s, "#edit sfc").await;
        assert_eq!(out[0], "[RANKING] SFC SUPER FAMICOM");

        let out = run(&mut s, "#title 1 chrono trigger").await;
        assert_eq!(out[0], "[MATCH] Chrono Trigger (1995, RPG)");

        let out = run(&mut s, "#title 2 Secret of Homebrew").await;
        assert!(out[0].starts_with("[NO MATCH]"));

        let out = run(&mut s, "#save").await;
        assert_eq!(out, vec!["[SAVED] SFC"]);

        let out = run(&mut s, "#timeline").await;
        assert_eq!(out[0], "[1995] age 5, Early childhood");
        assert!(out[1].contains("#1 chrono trigger (RPG)"));
        assert_eq!(out[2], "[unknown-period]");
    }

    #[tokio::test]
    async fn test_commands_need_a_selected_console() {
        let mut s = session();
        let out = run(&mut s, "#title 1 MOTHER").await;
        assert!(out[0].starts_with("[ERROR] No console selected"));

        run(&mut s, "#edit FC").await;
        let out = run(&mut s, "#title 11 MOTHER").await;
        assert_eq!(out[0], "[ERROR] no rank 11 in this ranking");
    }

    #[tokio::test]
    async fn test_rank_bounds_are_reported() {
        let mut s = session();
        run(&mut s, "#edit GB").await;
        run(&mut s, "#remove-rank").await;
        run(&mut s, "#remove-rank").await;
        let out = run(&mut s, "#remove-rank").await;
        assert_eq!(out[0], "[ERROR] ranking must keep at least 1 game");
    }

    #[tokio::test]
    async fn test_profile_commands() {
        let mut s = session();
        assert_eq!(
            run(&mut s, "#birth-year 1984").await,
            vec!["[SAVED] birth year 1984"]
        );
        assert!(run(&mut s, "#birth-year 12345").await[0].starts_with("[ERROR]"));

        run(&mut s, "#event 10 moved to Sapporo").await;
        run(&mut s, "#event 6 first day of school").await;
        let out = run(&mut s, "#event").await;
        assert_eq!(out[1], "  1. age 6 (1990): first day of school");
        assert_eq!(out[2], "  2. age 10 (1994): moved to Sapporo");

        let out = run(&mut s, "#forget 1").await;
        assert_eq!(out, vec!["[FORGOT] age 6: first day of school"]);
        assert!(run(&mut s, "#forget 5").await[0].starts_with("[ERROR]"));
    }

    #[tokio::test]
    async fn test_quiz_flow() {
        let mut s = session();
        assert!(run(&mut s, "#answer x").await[0].starts_with("[ERROR] No quiz"));

        let out = run(&mut s, "#quiz").await;
        assert!(out[0].starts_with("[QUIZ]"));
        let title = s.quiz.as_ref().unwrap().title.clone();

        assert!(run(&mut s, "#hint").await[0].starts_with("[HINT]"));
        let out = run(&mut s, &format!("#answer {}", title.to_uppercase())).await;
        assert!(out[0].starts_with("[CORRECT]"));
        assert!(s.quiz.is_none());
    }

    #[tokio::test]
    async fn test_search_and_resolve() {
        let mut s = session();
        let out = run(&mut s, "#search sfc super").await;
        assert_eq!(out[0], "[SEARCH] SFC: 1 found");
        assert_eq!(out[1], "  Super Mario World (1990, ACT)");

        assert_eq!(
            run(&mut s, "#resolve GB tetris").await,
            vec!["[MATCH] Tetris (1989, PZL)"]
        );
        assert_eq!(run(&mut s, "#resolve PCE R-TYPE").await, vec!["[NO MATCH]"]);
    }

    #[tokio::test]
    async fn test_export_import_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("backup.json");

        let mut s = session();
        run(&mut s, "#edit FC").await;
        run(&mut s, "#title 1 MOTHER").await;
        let out = run(&mut s, &format!("#export {}", path.display())).await;
        assert!(out[0].starts_with("[EXPORTED]"));

        let mut other = session();
        let out = run(&mut other, &format!("#import {}", path.display())).await;
        assert!(out[0].starts_with("[IMPORTED] 1 rankings"));
        assert_eq!(other.history().timeline(), s.history().timeline());
    }

    #[tokio::test]
    async fn test_unknown_input() {
        let mut s = session();
        assert!(run(&mut s, "hello").await[0].starts_with("[ERROR]"));
        assert!(run(&mut s, "#dance").await[0].contains("Unknown command: dance"));

        let reply = s.execute("#quit").await;
        assert!(reply.quit);
    }
}
