use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::model::question::{Question, QuestionSource};
use crate::session::quiz::{QuizSession, QuizState};
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

pub struct QuizCard<'a> {
    quiz: &'a QuizSession,
    cursor: usize,
    theme: &'a Theme,
}

impl<'a> QuizCard<'a> {
    pub fn new(quiz: &'a QuizSession, cursor: usize, theme: &'a Theme) -> Self {
        Self {
            quiz,
            cursor,
            theme,
        }
    }

    fn caption(&self) -> String {
        match self.quiz.state() {
            QuizState::AwaitingQuestion if self.quiz.is_empty() => "Preparando desafio".to_string(),
            QuizState::AwaitingQuestion => "Próxima questão".to_string(),
            _ if self.quiz.len() > 0 && self.quiz.is_last() => {
                format!("Questão {} de {} (última)", self.quiz.position() + 1, self.quiz.len())
            }
            _ => format!("Questão {} · {} XP", self.quiz.position() + 1, self.quiz.score()),
        }
    }

    fn option_lines(&self, question: &Question) -> Vec<Line<'a>> {
        let colors = &self.theme.colors;
        let revealed = self.quiz.state() == QuizState::Revealed;
        let selected = self.quiz.selected();
        question
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let marker = if !revealed && i == self.cursor { ">" } else { " " };
                let style = if revealed && question.is_correct(i) {
                    Style::default()
                        .fg(colors.correct())
                        .add_modifier(Modifier::BOLD)
                } else if revealed && selected == Some(i) {
                    Style::default()
                        .fg(colors.incorrect())
                        .add_modifier(Modifier::CROSSED_OUT)
                } else if i == self.cursor && !revealed {
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.fg())
                };
                Line::from(vec![
                    Span::styled(format!(" {marker} {}) ", Question::option_label(i)), style),
                    Span::styled(option.clone(), style),
                ])
            })
            .collect()
    }
}

impl Widget for QuizCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(3)])
            .split(area);

        ProgressBar::new(self.caption(), self.quiz.progress(), self.theme).render(rows[0], buf);

        let block = Block::bordered()
            .title(format!(" {} ", self.quiz.title()))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(rows[1]);
        block.render(rows[1], buf);

        let question = match (self.quiz.state(), self.quiz.current()) {
            (QuizState::AwaitingQuestion, _) | (_, None) => {
                Paragraph::new(Line::from(Span::styled(
                    "A IA está preparando uma questão inédita...",
                    Style::default().fg(colors.muted()),
                )))
                .render(inner, buf);
                return;
            }
            (_, Some(question)) => question,
        };

        let source = match (question.source, question.year) {
            (QuestionSource::EnemStatic, Some(year)) => format!("ENEM {year}"),
            (QuestionSource::EnemStatic, None) => "ENEM".to_string(),
            (QuestionSource::AiGenerated, _) => "Gerada por IA".to_string(),
            (QuestionSource::Placeholder, _) => "Indisponível".to_string(),
        };
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{} · {}", question.subject, source),
                Style::default().fg(colors.muted()),
            )),
            Line::from(""),
            Line::from(Span::styled(
                question.text.clone(),
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
        ];
        lines.extend(self.option_lines(question));

        if self.quiz.state() == QuizState::Revealed {
            let correct = self
                .quiz
                .selected()
                .is_some_and(|s| question.is_correct(s));
            let (verdict, color) = if correct {
                ("Resposta correta! +100 XP", colors.correct())
            } else {
                ("Resposta incorreta.", colors.incorrect())
            };
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                verdict,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                question.explanation.clone(),
                Style::default().fg(colors.fg()),
            )));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::question::sample_question;
    use crate::session::quiz::{QuizMode, SessionId};
    use crate::ui::theme::THEME;

    fn render(quiz: &QuizSession) -> String {
        let area = Rect::new(0, 0, 70, 24);
        let mut buf = Buffer::empty(area);
        QuizCard::new(quiz, 0, &THEME).render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_presenting_shows_options_with_letters() {
        let quiz = QuizSession::new(
            SessionId(1),
            QuizMode::GlobalChallenge,
            None,
            vec![sample_question("q1", "Física", 2)],
        );
        let text = render(&quiz);
        assert!(text.contains("A) Opção 0"));
        assert!(text.contains("E) Opção 4"));
        assert!(!text.contains("Resposta"));
    }

    #[test]
    fn test_revealed_shows_verdict_and_explanation() {
        let mut quiz = QuizSession::new(
            SessionId(1),
            QuizMode::GlobalChallenge,
            None,
            vec![sample_question("q1", "Física", 2)],
        );
        quiz.submit_answer(2);
        let text = render(&quiz);
        assert!(text.contains("Resposta correta!"));
        assert!(text.contains("Porque sim."));
    }

    #[test]
    fn test_waiting_mini_shows_loader() {
        let quiz = QuizSession::new(SessionId(1), QuizMode::MiniChallenge, None, Vec::new());
        assert!(render(&quiz).contains("preparando uma questão"));
    }
}
