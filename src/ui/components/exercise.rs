use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::content::Catalog;
use crate::engine::exercise::{ExerciseBank, PHISHING_POINTS};
use crate::engine::topic::Topic;
use crate::ui::components::meter::Meter;
use crate::ui::theme::Theme;

/// The interactive exercise embedded in a topic screen. One widget, five
/// faces; which face renders is decided by the topic alone.
pub struct ExercisePanel<'a> {
    pub topic: Topic,
    pub catalog: &'a Catalog,
    pub exercises: &'a ExerciseBank,
    pub cursor: usize,
    pub theme: &'a Theme,
}

impl<'a> ExercisePanel<'a> {
    pub fn new(
        topic: Topic,
        catalog: &'a Catalog,
        exercises: &'a ExerciseBank,
        cursor: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            topic,
            catalog,
            exercises,
            cursor,
            theme,
        }
    }

    /// Target score for the phishing exercise: one fixed credit per fake
    /// message, capped at the meter maximum.
    pub fn phishing_goal(catalog: &Catalog) -> u8 {
        (PHISHING_POINTS as usize * catalog.fake_message_count()).min(100) as u8
    }

    /// How many rows the cursor can stand on in a topic's exercise. Behavior
    /// counts two rows per scenario, one per response.
    pub fn item_count(topic: Topic, catalog: &Catalog) -> usize {
        match topic {
            Topic::Passwords => catalog.password_categories.len(),
            Topic::Behavior => catalog.behavior_scenarios.len() * 2,
            Topic::Phishing => catalog.phishing_messages.len(),
            Topic::Data => catalog.data_items.len(),
            Topic::Devices => catalog.device_steps.len(),
        }
    }

    fn cursor_span(&self, row: usize) -> Span<'static> {
        let colors = &self.theme.colors;
        if row == self.cursor {
            Span::styled(
                " > ",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::raw("   ")
        }
    }

    fn hint_line(&self) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        match self
            .catalog
            .topic(self.topic)
            .and_then(|entry| entry.exercise_hint.clone())
        {
            Some(hint) => vec![
                Line::from(Span::styled(hint, Style::default().fg(colors.text_dim()))),
                Line::from(""),
            ],
            None => vec![Line::from("")],
        }
    }

    fn banner(text: String, color: ratatui::style::Color) -> Line<'static> {
        Line::from(Span::styled(
            format!("  {text}"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
    }

    fn render_passwords(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let strength = self.exercises.password_strength();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(2),
                Constraint::Length(1),
            ])
            .split(area);

        let mut lines = self.hint_line();
        for (idx, category) in self.catalog.password_categories.iter().enumerate() {
            // Mirrors the meter rather than tracking clicks: a category lights
            // up once the running total has covered its slice of the scale.
            let reached = strength >= ((idx as u16 + 1) * u16::from(category.points)).min(100) as u8;
            let marker = if reached { "[x] " } else { "[ ] " };
            let marker_style = if reached {
                Style::default().fg(colors.success())
            } else {
                Style::default().fg(colors.text_dim())
            };
            let label_style = if idx == self.cursor {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            lines.push(Line::from(vec![
                self.cursor_span(idx),
                Span::styled(marker, marker_style),
                Span::styled(category.label.clone(), label_style),
                Span::styled(
                    format!("  +{}", category.points),
                    Style::default().fg(colors.text_dim()),
                ),
            ]));
        }
        Paragraph::new(lines).render(layout[0], buf);

        Meter::percent("Password strength", strength, self.theme).render(layout[1], buf);

        if strength >= 100 {
            Paragraph::new(Self::banner(
                "Super password! Nobody is picking this lock.".to_string(),
                colors.success(),
            ))
            .render(layout[2], buf);
        }
    }

    fn render_behavior(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let chosen = self.exercises.behavior_choice();

        let mut lines = self.hint_line();
        for (idx, scenario) in self.catalog.behavior_scenarios.iter().enumerate() {
            lines.push(Line::from(Span::styled(
                format!("   {}", scenario.situation),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            )));
            for (side, label) in [(0usize, &scenario.safe), (1, &scenario.danger)] {
                let row = idx * 2 + side;
                let picked = chosen == Some(row);
                let marker = if picked { "\u{25cf} " } else { "\u{25cb} " };
                let verdict = match (picked, side) {
                    (true, 0) => "  \u{2713} good call",
                    (true, _) => "  \u{2717} risky!",
                    _ => "",
                };
                let option_color = match (picked, side) {
                    (true, 0) => colors.success(),
                    (true, _) => colors.danger(),
                    _ if row == self.cursor => colors.accent(),
                    _ => colors.fg(),
                };
                let mut style = Style::default().fg(option_color);
                if picked || row == self.cursor {
                    style = style.add_modifier(Modifier::BOLD);
                }
                lines.push(Line::from(vec![
                    self.cursor_span(row),
                    Span::styled(format!("{marker}{label}{verdict}"), style),
                ]));
            }
            lines.push(Line::from(""));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }

    fn render_phishing(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let score = self.exercises.phishing_score();
        let goal = Self::phishing_goal(self.catalog);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(2),
                Constraint::Length(1),
            ])
            .split(area);

        let mut lines = self.hint_line();
        for (idx, message) in self.catalog.phishing_messages.iter().enumerate() {
            let from_style = if idx == self.cursor {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD)
            };
            let mut from_spans = vec![
                self.cursor_span(idx),
                Span::styled(format!("From: {}", message.from), from_style),
            ];
            if message.fake {
                from_spans.push(Span::styled(
                    "  \u{26a0}",
                    Style::default().fg(colors.warning()),
                ));
            }
            lines.push(Line::from(from_spans));
            lines.push(Line::from(Span::styled(
                format!("       {}", message.text),
                Style::default().fg(colors.text_dim()),
            )));
            lines.push(Line::from(""));
        }
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(layout[0], buf);

        Meter::percent("Phishing radar", score, self.theme).render(layout[1], buf);

        if score >= goal {
            Paragraph::new(Self::banner(
                "Well spotted! Every scam in this inbox is busted.".to_string(),
                colors.success(),
            ))
            .render(layout[2], buf);
        }
    }

    fn render_data(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let collected = self.exercises.collected_safe_data();
        let safe_total = self.catalog.safe_item_count();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(2),
                Constraint::Length(1),
            ])
            .split(area);

        let mut lines = self.hint_line();
        for (idx, item) in self.catalog.data_items.iter().enumerate() {
            let in_backpack = collected.contains(&idx);
            let marker = if in_backpack { "[x] " } else { "[ ] " };
            let label_style = if in_backpack {
                Style::default().fg(colors.success())
            } else if idx == self.cursor {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            let mut spans = vec![
                self.cursor_span(idx),
                Span::styled(marker, Style::default().fg(colors.text_dim())),
                Span::styled(item.label.clone(), label_style),
            ];
            if in_backpack {
                spans.push(Span::styled(
                    "  packed",
                    Style::default().fg(colors.text_dim()),
                ));
            }
            lines.push(Line::from(spans));
        }
        Paragraph::new(lines).render(layout[0], buf);

        Meter::counted("Backpack", collected.len(), safe_total, self.theme).render(layout[1], buf);

        if collected.len() >= safe_total && safe_total > 0 {
            Paragraph::new(Self::banner(
                "Backpack packed! Only safe things made it in.".to_string(),
                colors.success(),
            ))
            .render(layout[2], buf);
        }
    }

    fn render_devices(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        if self.exercises.device_protected() {
            let lines = vec![
                Line::from(""),
                Self::banner(
                    "Device protected! This phone is a fortress now.".to_string(),
                    colors.success(),
                ),
                Line::from(""),
                Line::from(Span::styled(
                    "   Keep the habits up: updates, official stores, locked screen.",
                    Style::default().fg(colors.text_dim()),
                )),
            ];
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .render(area, buf);
            return;
        }

        let mut lines = self.hint_line();
        for (idx, step) in self.catalog.device_steps.iter().enumerate() {
            let label_style = if idx == self.cursor {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            lines.push(Line::from(vec![
                self.cursor_span(idx),
                Span::styled("[ ] ", Style::default().fg(colors.text_dim())),
                Span::styled(step.label.clone(), label_style),
            ]));
        }
        Paragraph::new(lines).render(area, buf);
    }
}

impl Widget for ExercisePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let title = self
            .catalog
            .topic(self.topic)
            .map(|entry| entry.exercise_title.clone())
            .unwrap_or_default();

        let block = Block::bordered()
            .title(format!(" {title} "))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        match self.topic {
            Topic::Passwords => self.render_passwords(inner, buf),
            Topic::Behavior => self.render_behavior(inner, buf),
            Topic::Phishing => self.render_phishing(inner, buf),
            Topic::Data => self.render_data(inner, buf),
            Topic::Devices => self.render_devices(inner, buf),
        }
    }
}
