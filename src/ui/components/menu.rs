use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::content::Catalog;
use crate::ui::theme::Theme;

pub struct MenuItem {
    pub key: String,
    pub label: String,
    pub description: String,
}

/// The intro screen: app banner, greeting, and one entry per lesson plus the
/// about page. Topic entries come straight from the catalog so the menu can
/// never drift from the lesson content.
pub struct Menu<'a> {
    pub items: Vec<MenuItem>,
    pub selected: usize,
    pub theme: &'a Theme,
    title: String,
    blurb: String,
    prompt: String,
}

impl<'a> Menu<'a> {
    pub fn from_catalog(theme: &'a Theme, catalog: &Catalog) -> Self {
        let mut items: Vec<MenuItem> = catalog
            .topics
            .iter()
            .enumerate()
            .map(|(idx, entry)| MenuItem {
                key: (idx + 1).to_string(),
                label: entry.title.clone(),
                description: entry.tagline.clone(),
            })
            .collect();
        items.push(MenuItem {
            key: "a".to_string(),
            label: catalog.about.title.clone(),
            description: "Why this lesson exists".to_string(),
        });

        Self {
            items,
            selected: 0,
            theme,
            title: catalog.intro.title.clone(),
            blurb: catalog.intro.blurb.clone(),
            prompt: catalog.intro.prompt.clone(),
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len() - 1;
        }
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "netwise",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(&*self.title, Style::default().fg(colors.fg()))),
            Line::from(""),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        Paragraph::new(Line::from(Span::styled(
            &*self.blurb,
            Style::default().fg(colors.text_dim()),
        )))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(layout[1], buf);

        Paragraph::new(Line::from(Span::styled(
            &*self.prompt,
            Style::default()
                .fg(colors.warning())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[2], buf);

        let item_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.items
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(layout[3]);

        for (i, item) in self.items.iter().enumerate() {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };

            let label_text = format!(" {indicator} [{}] {}", item.key, item.label);
            let desc_text = format!("       {}", item.description);

            let lines = vec![
                Line::from(Span::styled(
                    &*label_text,
                    Style::default()
                        .fg(if is_selected {
                            colors.accent()
                        } else {
                            colors.fg()
                        })
                        .add_modifier(if is_selected {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                )),
                Line::from(Span::styled(
                    &*desc_text,
                    Style::default().fg(colors.text_dim()),
                )),
            ];

            if i < item_layout.len() {
                Paragraph::new(lines).render(item_layout[i], buf);
            }
        }
    }
}
