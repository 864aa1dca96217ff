use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::app::AppScreen;
use crate::ui::theme::Theme;

const TABS: [(&str, &str, AppScreen); 4] = [
    ("F1", "Desafios", AppScreen::Home),
    ("F2", "Mentor", AppScreen::Report),
    ("F3", "Ranking", AppScreen::Leaderboard),
    ("F4", "Redação", AppScreen::Essay),
];

pub struct NavBar<'a> {
    pub active: AppScreen,
    pub theme: &'a Theme,
}

impl Widget for NavBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let active = match self.active {
            AppScreen::StudyPlan => AppScreen::Report,
            other => other,
        };

        let mut spans: Vec<Span> = Vec::new();
        for (key, label, screen) in TABS.iter() {
            let style = if *screen == active {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.muted())
            };
            spans.push(Span::styled(format!(" [{key}] {label} "), style));
        }
        spans.push(Span::styled(
            " [Espaço] ⚡ Desafio rápido ",
            Style::default()
                .fg(colors.premium())
                .add_modifier(Modifier::BOLD),
        ));

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(colors.border())),
            )
            .render(area, buf);
    }
}
