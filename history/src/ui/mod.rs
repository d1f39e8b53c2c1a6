//! UI module for the game history TUI

pub mod layout;
pub mod render;
pub mod theme;
pub mod widgets;

pub use render::Overlay;
