use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::content::Question;
use crate::engine::quiz::QuizSession;
use crate::ui::components::meter::Meter;
use crate::ui::theme::Theme;

/// The quiz modal. While open it owns the whole screen; the sheet view and
/// the result view are two faces of the same widget, switched by whether the
/// session is complete.
pub struct QuizOverlay<'a> {
    pub title: &'a str,
    pub questions: &'a [Question],
    pub session: &'a QuizSession,
    pub focus: usize,
    pub cursor: usize,
    pub theme: &'a Theme,
}

impl QuizOverlay<'_> {
    fn render_sheet(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        Meter::counted(
            "Answered",
            self.session.answered_count(),
            self.questions.len(),
            self.theme,
        )
        .render(layout[0], buf);

        let mut lines: Vec<Line> = Vec::new();
        for (q_idx, question) in self.questions.iter().enumerate() {
            let focused = q_idx == self.focus;
            let prompt_style = if focused {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD)
            };
            lines.push(Line::from(Span::styled(
                format!(" Q{}. {}", q_idx + 1, question.prompt),
                prompt_style,
            )));

            for (o_idx, option) in question.options.iter().enumerate() {
                let recorded = self.session.answer(q_idx) == Some(o_idx);
                let pointer = if focused && o_idx == self.cursor {
                    Span::styled(
                        " > ",
                        Style::default()
                            .fg(colors.accent())
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::raw("   ")
                };
                let marker = if recorded { "\u{25cf} " } else { "\u{25cb} " };
                let marker_style = if recorded && focused {
                    Style::default().fg(colors.accent())
                } else if recorded {
                    Style::default().fg(colors.accent_dim())
                } else {
                    Style::default().fg(colors.text_dim())
                };
                let letter = char::from(b'A' + (o_idx % 26) as u8);
                let text_style = if !focused {
                    Style::default().fg(colors.text_dim())
                } else if recorded || o_idx == self.cursor {
                    Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.fg())
                };
                lines.push(Line::from(vec![
                    pointer,
                    Span::styled(marker, marker_style),
                    Span::styled(format!("{letter}. {option}"), text_style),
                ]));
            }
            lines.push(Line::from(""));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(layout[1], buf);
    }

    fn render_result(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let score = self.session.score(self.questions);
        let score_color = if score == 100 {
            colors.success()
        } else if score >= 50 {
            colors.warning()
        } else {
            colors.danger()
        };
        let verdict = if score == 100 {
            "Outstanding! You're a real internet-safety expert."
        } else if score >= 50 {
            "Solid! One more pass and it's perfect."
        } else {
            "Worth another look. You'll get it next time."
        };

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Score: ", Style::default().fg(colors.fg())),
                Span::styled(
                    format!("{score}%"),
                    Style::default().fg(score_color).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                format!("  {verdict}"),
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
        ];

        for (q_idx, question) in self.questions.iter().enumerate() {
            let right = self.session.answer(q_idx) == Some(question.correct);
            let (mark, mark_color) = if right {
                ("\u{2713}", colors.success())
            } else {
                ("\u{2717}", colors.danger())
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {mark} "),
                    Style::default().fg(mark_color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(question.prompt.clone(), Style::default().fg(colors.fg())),
            ]));
            if !right {
                let answer = question
                    .options
                    .get(question.correct)
                    .map(String::as_str)
                    .unwrap_or_default();
                lines.push(Line::from(Span::styled(
                    format!("      answer: {answer}"),
                    Style::default().fg(colors.text_dim()),
                )));
            }
        }

        lines.push(Line::from(""));
        let mut hint_spans = Vec::new();
        if score < 100 {
            hint_spans.push(Span::styled(
                "  [r] try again",
                Style::default().fg(colors.warning()),
            ));
        }
        hint_spans.push(Span::styled(
            "  [Esc] back to the lesson",
            Style::default().fg(colors.text_dim()),
        ));
        lines.push(Line::from(hint_spans));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

impl Widget for QuizOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" Quiz: {} ", self.title))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.session.is_complete() {
            self.render_result(inner, buf);
        } else {
            self.render_sheet(inner, buf);
        }
    }
}
