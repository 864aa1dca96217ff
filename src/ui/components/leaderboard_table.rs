use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::content::leaderboard::{LeaderboardEntry, LeaderboardScope};
use crate::ui::theme::Theme;

pub struct LeaderboardTable<'a> {
    pub entries: &'a [LeaderboardEntry],
    pub scope: LeaderboardScope,
    pub theme: &'a Theme,
}

fn medal(rank: usize) -> &'static str {
    match rank {
        1 => "🥇",
        2 => "🥈",
        3 => "🥉",
        _ => "  ",
    }
}

impl Widget for LeaderboardTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let tabs: Vec<Span> = LeaderboardScope::ALL
            .iter()
            .flat_map(|scope| {
                let style = if *scope == self.scope {
                    Style::default()
                        .fg(colors.bg())
                        .bg(colors.accent())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.muted())
                };
                [Span::styled(format!(" {} ", scope.label()), style), Span::raw(" ")]
            })
            .collect();

        let block = Block::bordered()
            .title(" Ranking ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![Line::from(tabs), Line::from("")];
        if self.entries.is_empty() {
            lines.push(Line::from(Span::styled(
                "Ninguém por aqui ainda.",
                Style::default().fg(colors.muted()),
            )));
        }
        for entry in self.entries {
            let style = if entry.is_you {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            let name = if entry.is_you {
                format!("{} (você)", entry.name)
            } else {
                entry.name.clone()
            };
            let mut spans = vec![
                Span::styled(format!("{:>3}. {} ", entry.rank, medal(entry.rank)), style),
                Span::styled(format!("{name:<24}"), style),
                Span::styled(format!("{:>7} XP  ", entry.score), style),
                Span::styled(
                    format!("{}/{}", entry.city, entry.state),
                    Style::default().fg(colors.muted()),
                ),
            ];
            if entry.is_premium {
                spans.push(Span::styled(" 👑", Style::default().fg(colors.premium())));
            }
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::THEME;

    #[test]
    fn test_marks_current_user_row() {
        let entries = vec![
            LeaderboardEntry {
                rank: 1,
                name: "Ana Silva".into(),
                score: 15420,
                city: "São Paulo".into(),
                state: "SP".into(),
                is_premium: true,
                is_you: false,
            },
            LeaderboardEntry {
                rank: 2,
                name: "Lia".into(),
                score: 100,
                city: "São Paulo".into(),
                state: "SP".into(),
                is_premium: false,
                is_you: true,
            },
        ];
        let area = Rect::new(0, 0, 80, 8);
        let mut buf = Buffer::empty(area);
        LeaderboardTable {
            entries: &entries,
            scope: LeaderboardScope::Global,
            theme: &THEME,
        }
        .render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Lia (você)"));
        assert!(text.contains("Brasil"));
    }
}
