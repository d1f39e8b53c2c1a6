//! Screen layout calculations

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the console list beside a ranking.
const SIDEBAR_WIDTH: u16 = 26;

/// Areas of the main screen, top to bottom.
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub tabs_area: Rect,
    pub main_area: Rect,
    pub status_bar: Rect,
    pub hotkey_bar: Rect,
    pub input_area: Rect,
}

impl AppLayout {
    pub fn calculate(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // View tabs
                Constraint::Min(5),    // Current view
                Constraint::Length(1), // Status
                Constraint::Length(1), // Hotkeys
                Constraint::Length(3), // Input
            ])
            .split(area);

        Self {
            tabs_area: chunks[0],
            main_area: chunks[1],
            status_bar: chunks[2],
            hotkey_bar: chunks[3],
            input_area: chunks[4],
        }
    }
}

/// Split a view into a fixed-width sidebar and the remaining content.
pub fn sidebar_split(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(area);
    (chunks[0], chunks[1])
}

/// A `width` x `height` rectangle centered in `area`, clamped to fit.
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        let popup = centered_rect_fixed(50, 6, area);
        assert_eq!(popup, Rect::new(0, 2, 40, 6));
    }

    #[test]
    fn test_layout_fills_area() {
        let layout = AppLayout::calculate(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.tabs_area.height, 1);
        assert_eq!(layout.input_area.height, 3);
        assert_eq!(layout.main_area.height, 24 - 1 - 1 - 1 - 3);
    }
}
