// Screen layout: panel arrangement and sizing.
//
// Both screens share the outer frame:
//
// +--------------------------------------------------+
// | Title (3 rows)                                    |
// +--------------------------------------------------+
// | Body (fill)                                       |
// +--------------------------------------------------+
// | Status line (1 row)                               |
// | Help bar (1 row)                                  |
// +--------------------------------------------------+
//
// The setup body is split again:
//
// +--------------------------------------------------+
// | Add participant (3 rows)                          |
// +-------------------------+------------------------+
// | Adults (50%)             | Kids (50%)             |
// +-------------------------+------------------------+
// | Generate (3 rows)                                 |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved areas of the outer frame.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub title: Rect,
    pub body: Rect,
    /// Rejection messages and hints.
    pub status_line: Rect,
    /// Keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Resolved areas of the setup screen body.
#[derive(Debug, Clone)]
pub struct SetupLayout {
    pub entry: Rect,
    pub adults: Rect,
    pub kids: Rect,
    pub generate: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(6),    // body
            Constraint::Length(1), // status line
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        title: vertical[0],
        body: vertical[1],
        status_line: vertical[2],
        help_bar: vertical[3],
    }
}

pub fn build_setup_layout(body: Rect) -> SetupLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // entry
            Constraint::Min(3),    // group columns
            Constraint::Length(3), // generate
        ])
        .split(body);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(vertical[1]);

    SetupLayout {
        entry: vertical[0],
        adults: columns[0],
        kids: columns[1],
        generate: vertical[2],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_area() -> Rect {
        Rect::new(0, 0, 100, 40)
    }

    #[test]
    fn outer_frame_fixed_heights() {
        let layout = build_layout(test_area());
        assert_eq!(layout.title.height, 3);
        assert_eq!(layout.status_line.height, 1);
        assert_eq!(layout.help_bar.height, 1);
        assert_eq!(layout.body.height, 40 - 3 - 1 - 1);
    }

    #[test]
    fn outer_frame_stacks_without_overlap() {
        let layout = build_layout(test_area());
        assert_eq!(layout.body.y, layout.title.y + layout.title.height);
        assert_eq!(layout.status_line.y, layout.body.y + layout.body.height);
        assert_eq!(layout.help_bar.y, layout.status_line.y + 1);
    }

    #[test]
    fn setup_columns_split_evenly() {
        let layout = build_layout(test_area());
        let setup = build_setup_layout(layout.body);
        assert_eq!(setup.entry.height, 3);
        assert_eq!(setup.generate.height, 3);
        assert_eq!(setup.adults.width, 50);
        assert_eq!(setup.kids.width, 50);
        assert_eq!(setup.adults.y, setup.kids.y);
        assert_eq!(setup.kids.x, setup.adults.x + setup.adults.width);
    }
}
