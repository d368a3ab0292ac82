use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Header / body / footer split shared by every screen. The footer gets two
/// rows so the key hints can wrap once on narrow terminals.
pub struct ScreenFrame {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
}

impl ScreenFrame {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(2),
            ])
            .split(area);

        Self {
            header: rows[0],
            body: rows[1],
            footer: rows[2],
        }
    }
}

/// How many rows `text` occupies when wrapped at `width` columns. Zero width
/// means nothing fits at all.
pub fn wrapped_line_count(text: &str, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    text.chars().count().max(1).div_ceil(width)
}

/// Pack key hints into as few lines as fit `width`, never splitting a hint.
/// Hints that would overflow start a new line instead.
pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    let indent = "  ";
    let mut lines: Vec<String> = Vec::new();

    for hint in hints {
        if hint.is_empty() || width == 0 {
            continue;
        }
        match lines.last_mut() {
            Some(line) if line.chars().count() + 2 + hint.chars().count() <= width => {
                line.push_str("  ");
                line.push_str(hint);
            }
            _ => lines.push(format!("{indent}{hint}")),
        }
    }

    lines
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 56;
    const MIN_POPUP_HEIGHT: u16 = 14;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}
