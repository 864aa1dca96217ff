use ratatui::style::Color;

/// Fixed palette, loosely following the ENEM blue and the accent orange
/// used for premium prompts.
#[derive(Clone, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug)]
pub struct ThemeColors {
    pub bg: &'static str,
    pub fg: &'static str,
    pub muted: &'static str,
    pub accent: &'static str,
    pub premium: &'static str,
    pub border: &'static str,
    pub border_focused: &'static str,
    pub header_bg: &'static str,
    pub header_fg: &'static str,
    pub bar_filled: &'static str,
    pub bar_empty: &'static str,
    pub correct: &'static str,
    pub incorrect: &'static str,
    pub warning: &'static str,
}

pub static THEME: Theme = Theme {
    name: "enem",
    colors: ThemeColors {
        bg: "#0f172a",
        fg: "#e2e8f0",
        muted: "#64748b",
        accent: "#3b82f6",
        premium: "#f59e0b",
        border: "#334155",
        border_focused: "#60a5fa",
        header_bg: "#1e3a8a",
        header_fg: "#f8fafc",
        bar_filled: "#3b82f6",
        bar_empty: "#1e293b",
        correct: "#22c55e",
        incorrect: "#ef4444",
        warning: "#facc15",
    },
};

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(self.fg) }
    pub fn muted(&self) -> Color { Self::parse_color(self.muted) }
    pub fn accent(&self) -> Color { Self::parse_color(self.accent) }
    pub fn premium(&self) -> Color { Self::parse_color(self.premium) }
    pub fn border(&self) -> Color { Self::parse_color(self.border) }
    pub fn border_focused(&self) -> Color { Self::parse_color(self.border_focused) }
    pub fn header_bg(&self) -> Color { Self::parse_color(self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(self.header_fg) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(self.bar_filled) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(self.bar_empty) }
    pub fn correct(&self) -> Color { Self::parse_color(self.correct) }
    pub fn incorrect(&self) -> Color { Self::parse_color(self.incorrect) }
    pub fn warning(&self) -> Color { Self::parse_color(self.warning) }
}
