use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::question::SubjectPerformance;
use crate::session::quiz::QuizMode;

/// What a finished (or abandoned) quiz reports back to the navigator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuizOutcome {
    pub mode: QuizMode,
    pub score: u32,
    pub answered: u32,
    pub correct: u32,
    /// True when the player left before the natural end of the quiz.
    #[serde(default)]
    pub partial: bool,
    #[serde(default)]
    pub per_subject: Vec<SubjectPerformance>,
    pub finished_at: DateTime<Utc>,
}

impl QuizOutcome {
    pub fn accuracy(&self) -> f64 {
        if self.answered == 0 {
            return 100.0;
        }
        (self.correct as f64 / self.answered as f64 * 100.0).clamp(0.0, 100.0)
    }
}

/// Notice shown on the home screen after a quiz is credited.
pub fn exit_notice(score: u32) -> String {
    format!("Desafio finalizado! Você ganhou {score} XP!")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(answered: u32, correct: u32) -> QuizOutcome {
        QuizOutcome {
            mode: QuizMode::GlobalChallenge,
            score: correct * 100,
            answered,
            correct,
            partial: false,
            per_subject: Vec::new(),
            finished_at: Utc::now(),
        }
    }

    #[test]
    fn test_accuracy_of_empty_session_is_full() {
        assert_eq!(outcome(0, 0).accuracy(), 100.0);
    }

    #[test]
    fn test_accuracy_is_percentage_of_answered() {
        assert!((outcome(4, 1).accuracy() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_exit_notice_mentions_xp() {
        assert_eq!(exit_notice(outcome(4, 2).score), "Desafio finalizado! Você ganhou 200 XP!");
    }
}
