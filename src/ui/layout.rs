use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Regions every signed-in screen is drawn into.
pub struct ScreenLayout {
    pub header: Rect,
    pub main: Rect,
    /// Navigation bar; absent on screens that hide it.
    pub nav: Option<Rect>,
    pub footer: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect, with_nav: bool) -> Self {
        let nav_height = if with_nav { 3 } else { 0 };
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(nav_height),
                Constraint::Length(2),
            ])
            .split(area);

        Self {
            header: rows[0],
            main: rows[1],
            nav: with_nav.then_some(rows[2]),
            footer: rows[3],
        }
    }
}

/// Greedily pack key hints into as few lines as fit in `width`.
pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    const GAP: &str = "  ";
    if width == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for hint in hints.iter().filter(|h| !h.is_empty()) {
        let needed = if current.is_empty() {
            GAP.len() + hint.chars().count()
        } else {
            current.chars().count() + GAP.len() + hint.chars().count()
        };
        if !current.is_empty() && needed > width {
            lines.push(std::mem::take(&mut current));
        }
        current.push_str(GAP);
        current.push_str(hint);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Popup rectangle centered in `area`, never smaller than a readable modal
/// unless the terminal itself is smaller.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_WIDTH: u16 = 44;
    const MIN_HEIGHT: u16 = 12;

    let width = (area.width.saturating_mul(percent_x.min(100)) / 100)
        .max(MIN_WIDTH)
        .min(area.width);
    let height = (area.height.saturating_mul(percent_y.min(100)) / 100)
        .max(MIN_HEIGHT)
        .min(area.height);

    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_hint_lines_wraps_when_too_wide() {
        let lines = pack_hint_lines(&["[Enter] Confirmar", "[Esc] Voltar", "[F1] Início"], 34);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.chars().count() <= 34));
    }

    #[test]
    fn test_pack_hint_lines_single_line_when_room() {
        let lines = pack_hint_lines(&["a", "", "b"], 80);
        assert_eq!(lines, vec!["  a  b".to_string()]);
    }

    #[test]
    fn test_centered_rect_stays_inside_small_area() {
        let area = Rect::new(0, 0, 30, 8);
        let popup = centered_rect(50, 50, area);
        assert_eq!(popup, area);
    }

    #[test]
    fn test_centered_rect_is_centered() {
        let popup = centered_rect(50, 50, Rect::new(0, 0, 120, 40));
        assert_eq!(popup, Rect::new(30, 10, 60, 20));
    }

    #[test]
    fn test_nav_only_when_requested() {
        let area = Rect::new(0, 0, 80, 30);
        assert!(ScreenLayout::new(area, true).nav.is_some());
        let quiz = ScreenLayout::new(area, false);
        assert!(quiz.nav.is_none());
        assert_eq!(quiz.header.height, 3);
    }
}
