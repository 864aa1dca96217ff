use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::app::TextPanel;
use crate::ui::theme::Theme;

/// Renders AI output. Understands just enough markdown to make headings and
/// bold runs stand out in a terminal.
pub struct TextPanelView<'a> {
    pub title: &'a str,
    pub panel: &'a TextPanel,
    pub idle_hint: &'a str,
    pub loading_hint: &'a str,
    pub scroll: u16,
    pub theme: &'a Theme,
}

impl Widget for TextPanelView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = match self.panel {
            TextPanel::Idle => vec![Line::from(Span::styled(
                self.idle_hint.to_string(),
                Style::default().fg(colors.muted()),
            ))],
            TextPanel::Loading => vec![Line::from(Span::styled(
                self.loading_hint.to_string(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::ITALIC),
            ))],
            TextPanel::Ready(text) => markdown_lines(text, self.theme),
        };

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(inner, buf);
    }
}

pub fn markdown_lines(text: &str, theme: &Theme) -> Vec<Line<'static>> {
    let colors = &theme.colors;
    text.lines()
        .map(|raw| {
            let trimmed = raw.trim_start();
            if let Some(heading) = trimmed.strip_prefix('#') {
                let heading = heading.trim_start_matches('#').trim();
                return Line::from(Span::styled(
                    heading.replace("**", ""),
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                ));
            }
            let body = if let Some(item) = trimmed.strip_prefix("* ") {
                format!("• {item}")
            } else {
                raw.to_string()
            };
            Line::from(bold_spans(&body, theme))
        })
        .collect()
}

/// Split on `**` markers, alternating plain and bold spans.
fn bold_spans(line: &str, theme: &Theme) -> Vec<Span<'static>> {
    let plain = Style::default().fg(theme.colors.fg());
    let bold = plain.add_modifier(Modifier::BOLD);
    line.split("**")
        .enumerate()
        .filter(|(_, part)| !part.is_empty())
        .map(|(i, part)| {
            Span::styled(part.to_string(), if i % 2 == 1 { bold } else { plain })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::THEME;

    #[test]
    fn test_headings_lose_hashes() {
        let lines = markdown_lines("# Nota Final: 880\ntexto", &THEME);
        assert_eq!(lines[0].spans[0].content, "Nota Final: 880");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_bold_markers_become_styled_spans() {
        let lines = markdown_lines("1. **Domínio:** 160 - bom", &THEME);
        let spans = &lines[0].spans;
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].content, "Domínio:");
        assert!(spans[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_bullets_are_rewritten() {
        let lines = markdown_lines("* revisar frações", &THEME);
        assert_eq!(lines[0].spans[0].content, "• revisar frações");
    }
}
