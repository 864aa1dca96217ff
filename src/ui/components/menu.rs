use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::app::HomeAction;
use crate::content::subjects::SUBJECT_AREAS;
use crate::ui::theme::Theme;

pub struct MenuItem {
    pub action: HomeAction,
    pub label: String,
    pub description: String,
    /// Shown with a PRO tag for free users.
    pub premium: bool,
}

impl MenuItem {
    fn for_action(action: HomeAction) -> Self {
        let (label, description, premium) = match action {
            HomeAction::GlobalChallenge => (
                "Desafio Global".to_string(),
                "Questões oficiais de provas anteriores".to_string(),
                false,
            ),
            HomeAction::MiniChallenge => (
                "Mini Desafio".to_string(),
                "Questões inéditas geradas pela IA, matéria surpresa".to_string(),
                false,
            ),
            HomeAction::AreaChallenge(idx) => {
                let label = SUBJECT_AREAS.get(idx).map_or("Área", |a| a.label);
                (label.to_string(), "Treine uma área do conhecimento".to_string(), false)
            }
            HomeAction::StudyPlan => (
                "Plano de Estudos".to_string(),
                "Roteiro de 5 dias montado pela IA".to_string(),
                true,
            ),
            HomeAction::Report => (
                "Mentor IA".to_string(),
                "Relatório de pontos fortes e fracos".to_string(),
                true,
            ),
            HomeAction::Leaderboard => (
                "Ranking".to_string(),
                "Compare sua pontuação com o Brasil".to_string(),
                false,
            ),
            HomeAction::Essay => (
                "Correção de Redação".to_string(),
                "Envie a foto da sua redação".to_string(),
                false,
            ),
        };
        Self {
            action,
            label,
            description,
            premium,
        }
    }
}

pub struct Menu<'a> {
    pub items: Vec<MenuItem>,
    pub selected: usize,
    pub show_pro_tags: bool,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    pub fn home(selected: usize, show_pro_tags: bool, theme: &'a Theme) -> Self {
        let items: Vec<MenuItem> = HomeAction::all()
            .into_iter()
            .map(MenuItem::for_action)
            .collect();
        Self {
            selected: selected.min(items.len().saturating_sub(1)),
            items,
            show_pro_tags,
            theme,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Desafios ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        // Two rows per item; scroll so the selection stays visible.
        let per_page = (inner.height / 2).max(1) as usize;
        let first = self.selected.saturating_sub(per_page - 1);
        let visible: Vec<(usize, &MenuItem)> =
            self.items.iter().enumerate().skip(first).take(per_page).collect();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(visible.iter().map(|_| Constraint::Length(2)).collect::<Vec<_>>())
            .split(inner);

        for (row, (i, item)) in rows.iter().zip(visible) {
            let selected = i == self.selected;
            let label_style = if selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            let mut label = vec![
                Span::styled(if selected { " > " } else { "   " }, label_style),
                Span::styled(item.label.as_str(), label_style),
            ];
            if item.premium && self.show_pro_tags {
                label.push(Span::styled(
                    " PRO",
                    Style::default()
                        .fg(colors.premium())
                        .add_modifier(Modifier::BOLD),
                ));
            }
            let lines = vec![
                Line::from(label),
                Line::from(Span::styled(
                    format!("     {}", item.description),
                    Style::default().fg(colors.muted()),
                )),
            ];
            Paragraph::new(lines)
                .alignment(Alignment::Left)
                .render(*row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::THEME;

    fn text_of(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_home_menu_lists_every_action() {
        let menu = Menu::home(0, true, &THEME);
        assert_eq!(menu.len(), HomeAction::all().len());
        assert!(menu.items.iter().any(|i| i.label == "Linguagens e Códigos"));
    }

    #[test]
    fn test_selection_is_clamped() {
        let menu = Menu::home(999, false, &THEME);
        assert_eq!(menu.selected, menu.len() - 1);
    }

    #[test]
    fn test_render_scrolls_to_selection() {
        let menu = Menu::home(menu_last(), true, &THEME);
        let area = Rect::new(0, 0, 60, 8);
        let mut buf = Buffer::empty(area);
        (&menu).render(area, &mut buf);
        let text = text_of(&buf);
        assert!(text.contains("Correção de Redação"));
        assert!(!text.contains("Desafio Global"));
    }

    fn menu_last() -> usize {
        HomeAction::all().len() - 1
    }
}
