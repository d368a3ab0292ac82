use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget, Wrap};

use crate::content::{Catalog, TopicEntry};
use crate::engine::exercise::ExerciseBank;
use crate::ui::components::exercise::ExercisePanel;
use crate::ui::layout::wrapped_line_count;
use crate::ui::theme::Theme;

/// Body of one lesson screen: tagline, the embedded exercise, and the
/// topic's advice lists underneath.
pub struct TopicScreen<'a> {
    pub entry: &'a TopicEntry,
    pub catalog: &'a Catalog,
    pub exercises: &'a ExerciseBank,
    pub cursor: usize,
    pub theme: &'a Theme,
}

impl TopicScreen<'_> {
    fn advice_height(&self) -> u16 {
        let rows = self.entry.tips.len().max(self.entry.warnings.len());
        if rows == 0 {
            0
        } else {
            // Title row plus a spacer, capped so the exercise keeps room.
            (rows as u16 + 2).min(8)
        }
    }

    fn advice_list(title: &str, items: &[String], color: ratatui::style::Color, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!(" {title}"),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
        ];
        for item in items {
            lines.push(Line::from(Span::styled(
                format!("  \u{2022} {item}"),
                Style::default().fg(theme.colors.fg()),
            )));
        }
        lines
    }
}

impl Widget for TopicScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let tagline = format!(" {}", self.entry.tagline);
        // Taglines wrap on narrow terminals; give them a second row when
        // needed but no more, so the exercise keeps its space.
        let tagline_rows = wrapped_line_count(&tagline, area.width as usize).min(2) as u16;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(tagline_rows),
                Constraint::Min(8),
                Constraint::Length(self.advice_height()),
            ])
            .split(area);

        Paragraph::new(Line::from(Span::styled(
            tagline,
            Style::default().fg(colors.text_dim()),
        )))
        .wrap(Wrap { trim: true })
        .render(layout[0], buf);

        ExercisePanel::new(
            self.entry.id,
            self.catalog,
            self.exercises,
            self.cursor,
            self.theme,
        )
        .render(layout[1], buf);

        let has_tips = !self.entry.tips.is_empty();
        let has_warnings = !self.entry.warnings.is_empty();
        match (has_tips, has_warnings) {
            (true, true) => {
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(layout[2]);
                Paragraph::new(Self::advice_list(
                    &self.entry.tips_title,
                    &self.entry.tips,
                    colors.success(),
                    self.theme,
                ))
                .render(columns[0], buf);
                Paragraph::new(Self::advice_list(
                    &self.entry.warnings_title,
                    &self.entry.warnings,
                    colors.danger(),
                    self.theme,
                ))
                .render(columns[1], buf);
            }
            (true, false) => {
                Paragraph::new(Self::advice_list(
                    &self.entry.tips_title,
                    &self.entry.tips,
                    colors.success(),
                    self.theme,
                ))
                .render(layout[2], buf);
            }
            (false, true) => {
                Paragraph::new(Self::advice_list(
                    &self.entry.warnings_title,
                    &self.entry.warnings,
                    colors.danger(),
                    self.theme,
                ))
                .render(layout[2], buf);
            }
            (false, false) => {}
        }
    }
}
