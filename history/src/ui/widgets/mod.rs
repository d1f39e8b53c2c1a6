//! TUI widgets for the game history app

pub mod catalog_list;
pub mod chronicle;
pub mod input;
pub mod quiz_card;
pub mod ranking_panel;
pub mod status_bar;

pub use catalog_list::CatalogListWidget;
pub use chronicle::ChronicleWidget;
pub use input::InputWidget;
pub use quiz_card::QuizCardWidget;
pub use ranking_panel::{ConsoleListWidget, RankingPanelWidget};
pub use status_bar::{HotkeyBarWidget, StatusBarWidget};
