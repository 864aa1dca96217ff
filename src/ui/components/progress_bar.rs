use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::ui::theme::Theme;

/// One-row bar with a centered caption, e.g. "Questão 2 de 4".
pub struct ProgressBar<'a> {
    pub caption: String,
    pub ratio: f64,
    pub theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    pub fn new(caption: impl Into<String>, ratio: f64, theme: &'a Theme) -> Self {
        Self {
            caption: caption.into(),
            ratio: if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 },
            theme,
        }
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let colors = &self.theme.colors;
        let filled = (self.ratio * area.width as f64).round() as u16;

        for x in area.x..area.x + area.width {
            let bg = if x < area.x + filled {
                colors.bar_filled()
            } else {
                colors.bar_empty()
            };
            buf[(x, area.y)].set_style(Style::default().fg(colors.fg()).bg(bg));
        }

        let width = self.caption.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(width) / 2;
        buf.set_stringn(
            x,
            area.y,
            &self.caption,
            area.width as usize,
            Style::default().fg(colors.fg()),
        );
    }
}
