use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::ui::theme::Theme;

/// Borderless meter with a caption row: exercise progress is shown inline in
/// the topic screens, so the bordered look would be too heavy here.
pub struct Meter<'a> {
    pub caption: String,
    pub ratio: f64,
    pub label: String,
    pub theme: &'a Theme,
}

impl<'a> Meter<'a> {
    /// Meter over a 0..=100 scale, labeled with the raw percentage.
    pub fn percent(caption: &str, value: u8, theme: &'a Theme) -> Self {
        Self {
            caption: caption.to_string(),
            ratio: f64::from(value) / 100.0,
            label: format!("{value}%"),
            theme,
        }
    }

    /// Meter counting collected items, labeled "have / want".
    pub fn counted(caption: &str, have: usize, want: usize, theme: &'a Theme) -> Self {
        let ratio = if want == 0 {
            1.0
        } else {
            have as f64 / want as f64
        };
        Self {
            caption: caption.to_string(),
            ratio,
            label: format!("{have} / {want}"),
            theme,
        }
    }
}

impl Widget for Meter<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let colors = &self.theme.colors;

        // Caption on its own row when there is one; otherwise the bar takes
        // the single row we have.
        let bar_y = if area.height >= 2 {
            buf.set_stringn(
                area.x,
                area.y,
                &self.caption,
                area.width as usize,
                Style::default().fg(colors.fg()),
            );
            area.y + 1
        } else {
            area.y
        };

        let ratio = self.ratio.clamp(0.0, 1.0);
        let filled_width = (ratio * area.width as f64) as u16;
        for x in area.x..area.x + area.width {
            let style = if x < area.x + filled_width {
                Style::default().fg(colors.bg()).bg(colors.bar_filled())
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, bar_y)].set_style(style);
        }

        let label_x = area.x + (area.width.saturating_sub(self.label.len() as u16)) / 2;
        buf.set_stringn(
            label_x,
            bar_y,
            &self.label,
            area.width as usize,
            Style::default().fg(colors.fg()),
        );
    }
}
