use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

use crate::app::{CREDIT_PACKS, Modal};
use crate::ui::theme::Theme;

/// Popup for the paywall and the essay credit shop.
pub struct ModalView<'a> {
    pub modal: Modal,
    /// Highlighted credit pack.
    pub selected_pack: usize,
    pub theme: &'a Theme,
}

impl ModalView<'_> {
    fn premium_lines(&self, headline: &'static str) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let perk = |text: &'static str| {
            Line::from(vec![
                Span::styled("✓ ", Style::default().fg(colors.correct())),
                Span::styled(text, Style::default().fg(colors.fg())),
            ])
        };
        vec![
            Line::from(Span::styled(
                "👑 Desbloqueie o Master",
                Style::default()
                    .fg(colors.premium())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                headline,
                Style::default()
                    .fg(colors.incorrect())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Garanta sua aprovação no ENEM com ferramentas de elite.",
                Style::default().fg(colors.muted()),
            )),
            Line::from(""),
            perk("Questões ilimitadas"),
            perk("Relatório de IA Mentor"),
            perk("Plano de estudos adaptativo"),
            Line::from(""),
            Line::from(Span::styled(
                "R$ 19,90/mês",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "[Enter] Assinar Premium   [Esc] Talvez depois",
                Style::default().fg(colors.muted()),
            )),
        ]
    }

    fn credit_lines(&self) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let mut lines = vec![
            Line::from(Span::styled(
                "📝 Créditos de Redação",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "A correção detalhada consome recursos avançados de IA.",
                Style::default().fg(colors.muted()),
            )),
            Line::from(""),
        ];
        for (i, pack) in CREDIT_PACKS.iter().enumerate() {
            let selected = i == self.selected_pack;
            let style = if selected {
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            let noun = if pack.amount == 1 { "correção" } else { "correções" };
            lines.push(Line::from(Span::styled(
                format!(" {} {noun} · {} ", pack.amount, pack.price),
                style,
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[←/→] Escolher   [Enter] Comprar   [Esc] Cancelar",
            Style::default().fg(colors.muted()),
        )));
        lines
    }
}

impl Widget for ModalView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let lines = match self.modal {
            Modal::Premium(denial) => self.premium_lines(denial.headline()),
            Modal::EssayCredits => self.credit_lines(),
        };

        Clear.render(area, buf);
        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::entitlement::Denial;
    use crate::ui::theme::THEME;

    fn render(modal: Modal) -> String {
        let area = Rect::new(0, 0, 70, 20);
        let mut buf = Buffer::empty(area);
        ModalView {
            modal,
            selected_pack: 1,
            theme: &THEME,
        }
        .render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_premium_modal_shows_reason() {
        let text = render(Modal::Premium(Denial::LimitReached));
        assert!(text.contains("R$ 19,90/mês"));
    }

    #[test]
    fn test_credit_modal_lists_packs() {
        let text = render(Modal::EssayCredits);
        assert!(text.contains("1 correção"));
        assert!(text.contains("5 correções"));
    }
}
