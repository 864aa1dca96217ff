use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::content::subjects::random_mini_subject;
use crate::engine::scoring::CORRECT_ANSWER_XP;
use crate::model::question::{Question, SubjectPerformance};
use crate::session::result::QuizOutcome;
use crate::session::supply::{SupplySlot, SupplyTicket};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizMode {
    /// Fixed run over the whole static bank.
    GlobalChallenge,
    /// Open-ended run fed one generated question at a time.
    MiniChallenge,
}

impl QuizMode {
    pub fn as_str(self) -> &'static str {
        match self {
            QuizMode::GlobalChallenge => "global",
            QuizMode::MiniChallenge => "mini",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizState {
    AwaitingQuestion,
    Presenting,
    Revealed,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

/// One question the session wants from the provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SupplyRequest {
    pub session: SessionId,
    pub ticket: SupplyTicket,
    pub subject: String,
}

#[derive(Clone, Debug)]
pub enum Advance {
    Ignored,
    Presenting,
    AwaitingQuestion,
    Finished(QuizOutcome),
}

pub struct QuizSession {
    id: SessionId,
    mode: QuizMode,
    subject: Option<String>,
    questions: Vec<Question>,
    position: usize,
    selected: Option<usize>,
    revealed: bool,
    score: u32,
    answered: u32,
    correct: u32,
    per_subject: Vec<SubjectPerformance>,
    supply: SupplySlot,
    awaiting_next: bool,
    finished: bool,
}

impl QuizSession {
    pub fn new(
        id: SessionId,
        mode: QuizMode,
        subject: Option<String>,
        questions: Vec<Question>,
    ) -> Self {
        // A global run has nothing to wait for, so an empty one is already over.
        let finished = mode == QuizMode::GlobalChallenge && questions.is_empty();
        Self {
            id,
            mode,
            subject,
            questions,
            position: 0,
            selected: None,
            revealed: false,
            score: 0,
            answered: 0,
            correct: 0,
            per_subject: Vec::new(),
            supply: SupplySlot::default(),
            awaiting_next: false,
            finished,
        }
    }

    pub fn state(&self) -> QuizState {
        if self.finished {
            QuizState::Finished
        } else if self.awaiting_next || self.questions.get(self.position).is_none() {
            QuizState::AwaitingQuestion
        } else if self.revealed {
            QuizState::Revealed
        } else {
            QuizState::Presenting
        }
    }

    /// Issue a supply request if this is a mini challenge running out of
    /// questions and no request is already in flight.
    pub fn poll_supply<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<SupplyRequest> {
        if self.finished || self.mode != QuizMode::MiniChallenge || !self.needs_supply() {
            return None;
        }
        let ticket = self.supply.try_acquire()?;
        let subject = self
            .subject
            .clone()
            .unwrap_or_else(|| random_mini_subject(rng));
        debug!(session = self.id.0, ticket = ticket.value(), %subject, "requesting question");
        Some(SupplyRequest {
            session: self.id,
            ticket,
            subject,
        })
    }

    /// Append a supplied question. Returns false (and changes nothing) when
    /// the session is over or the ticket is not the outstanding one.
    pub fn receive_question(&mut self, ticket: SupplyTicket, question: Question) -> bool {
        if self.finished || !self.supply.release(ticket) {
            return false;
        }
        self.questions.push(question);
        if self.awaiting_next {
            self.awaiting_next = false;
            self.move_to(self.position + 1);
        }
        true
    }

    /// Returns `Some(correct)` when the answer was accepted.
    pub fn submit_answer(&mut self, option: usize) -> Option<bool> {
        if self.state() != QuizState::Presenting {
            return None;
        }
        let question = self.questions.get(self.position)?;
        if option >= question.options.len() {
            return None;
        }
        let correct = question.is_correct(option);
        let tally_subject = (!question.is_placeholder()).then(|| question.subject.clone());

        self.selected = Some(option);
        self.revealed = true;
        self.answered += 1;
        if correct {
            self.score += CORRECT_ANSWER_XP;
            self.correct += 1;
        }
        if let Some(subject) = tally_subject {
            self.tally(subject, correct);
        }
        Some(correct)
    }

    pub fn advance(&mut self) -> Advance {
        if self.state() != QuizState::Revealed {
            return Advance::Ignored;
        }
        if self.position + 1 < self.questions.len() {
            self.move_to(self.position + 1);
            return Advance::Presenting;
        }
        match self.mode {
            QuizMode::GlobalChallenge => {
                self.finished = true;
                Advance::Finished(self.outcome(false))
            }
            QuizMode::MiniChallenge => {
                self.awaiting_next = true;
                Advance::AwaitingQuestion
            }
        }
    }

    /// Leave now with whatever has been earned. `None` once finished.
    pub fn exit(&mut self) -> Option<QuizOutcome> {
        if self.finished {
            return None;
        }
        self.finished = true;
        Some(self.outcome(self.mode == QuizMode::GlobalChallenge))
    }

    pub fn outcome(&self, partial: bool) -> QuizOutcome {
        QuizOutcome {
            mode: self.mode,
            score: self.score,
            answered: self.answered,
            correct: self.correct,
            partial,
            per_subject: self.per_subject.clone(),
            finished_at: Utc::now(),
        }
    }

    fn needs_supply(&self) -> bool {
        self.questions.is_empty() || self.position + 1 >= self.questions.len()
    }

    fn move_to(&mut self, position: usize) {
        self.position = position;
        self.selected = None;
        self.revealed = false;
    }

    fn tally(&mut self, subject: String, correct: bool) {
        let idx = match self.per_subject.iter().position(|p| p.subject == subject) {
            Some(idx) => idx,
            None => {
                self.per_subject.push(SubjectPerformance {
                    subject,
                    correct: 0,
                    total: 0,
                });
                self.per_subject.len() - 1
            }
        };
        let entry = &mut self.per_subject[idx];
        entry.total += 1;
        if correct {
            entry.correct += 1;
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.position)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn answered(&self) -> u32 {
        self.answered
    }

    pub fn is_supply_in_flight(&self) -> bool {
        self.supply.is_in_flight()
    }

    /// True on the final question of a global run.
    pub fn is_last(&self) -> bool {
        self.mode == QuizMode::GlobalChallenge && self.position + 1 == self.questions.len()
    }

    /// Fill ratio for the progress bar. Mini runs always show one more slot.
    pub fn progress(&self) -> f64 {
        let denominator = match self.mode {
            QuizMode::GlobalChallenge => self.questions.len(),
            QuizMode::MiniChallenge => self.questions.len() + 1,
        };
        if self.questions.is_empty() || denominator == 0 {
            return 0.0;
        }
        ((self.position + 1) as f64 / denominator as f64).clamp(0.0, 1.0)
    }

    pub fn title(&self) -> &str {
        match (&self.subject, self.mode) {
            (Some(subject), _) => subject,
            (None, QuizMode::GlobalChallenge) => "Simulado Global",
            (None, QuizMode::MiniChallenge) => "Mini Desafio",
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::content::subjects::MINI_CHALLENGE_SUBJECTS;
    use crate::model::question::{QuestionSource, SYSTEM_SUBJECT, sample_question};

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn global(n: usize) -> QuizSession {
        let questions = (0..n)
            .map(|i| sample_question(&format!("q{i}"), "Matemática", 1))
            .collect();
        QuizSession::new(SessionId(1), QuizMode::GlobalChallenge, None, questions)
    }

    fn mini(subject: Option<&str>, seed: Vec<Question>) -> QuizSession {
        QuizSession::new(
            SessionId(2),
            QuizMode::MiniChallenge,
            subject.map(str::to_string),
            seed,
        )
    }

    #[test]
    fn test_global_run_finishes_after_n_answers_and_advances() {
        let n = 6;
        let mut session = global(n);
        let mut finished = None;
        for i in 0..n {
            assert_eq!(session.state(), QuizState::Presenting);
            assert!(session.submit_answer(i % 5).is_some());
            match session.advance() {
                Advance::Finished(outcome) => finished = Some((i, outcome)),
                Advance::Presenting => {}
                other => panic!("unexpected {other:?}"),
            }
        }
        let (at, outcome) = finished.expect("session should finish");
        assert_eq!(at, n - 1);
        assert_eq!(outcome.answered, n as u32);
        assert!(!outcome.partial);
        assert_eq!(session.state(), QuizState::Finished);
    }

    #[test]
    fn test_one_correct_out_of_four_scores_one_award() {
        let mut session = global(4);
        assert_eq!(session.submit_answer(1), Some(true));
        session.advance();
        for _ in 0..3 {
            assert_eq!(session.submit_answer(0), Some(false));
            session.advance();
        }
        let outcome = session.outcome(false);
        assert_eq!(outcome.score, 100);
        assert_eq!(outcome.answered, 4);
        assert_eq!(outcome.correct, 1);
    }

    #[test]
    fn test_double_submit_is_ignored() {
        let mut session = global(2);
        assert_eq!(session.submit_answer(1), Some(true));
        assert_eq!(session.submit_answer(1), None);
        assert_eq!(session.submit_answer(0), None);
        assert_eq!(session.score(), 100);
        assert_eq!(session.answered(), 1);
        assert_eq!(session.selected(), Some(1));
    }

    #[test]
    fn test_out_of_range_option_is_ignored() {
        let mut session = global(1);
        assert_eq!(session.submit_answer(5), None);
        assert_eq!(session.state(), QuizState::Presenting);
        assert_eq!(session.answered(), 0);
    }

    #[test]
    fn test_advance_before_answer_is_ignored() {
        let mut session = global(2);
        assert!(matches!(session.advance(), Advance::Ignored));
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn test_advancing_clears_selection() {
        let mut session = global(2);
        session.submit_answer(3);
        session.advance();
        assert_eq!(session.position(), 1);
        assert_eq!(session.selected(), None);
        assert_eq!(session.state(), QuizState::Presenting);
    }

    #[test]
    fn test_exit_reports_partial_result_once() {
        let mut session = global(3);
        session.submit_answer(1);
        let outcome = session.exit().expect("first exit reports");
        assert_eq!(outcome.score, 100);
        assert_eq!(outcome.answered, 1);
        assert!(outcome.partial);
        assert!(session.exit().is_none());
        assert_eq!(session.state(), QuizState::Finished);
    }

    #[test]
    fn test_empty_global_run_is_already_finished() {
        let session = global(0);
        assert_eq!(session.state(), QuizState::Finished);
    }

    #[test]
    fn test_global_run_never_requests_supply() {
        let mut session = global(1);
        assert!(session.poll_supply(&mut rng()).is_none());
    }

    #[test]
    fn test_empty_mini_run_requests_exactly_once_until_resolved() {
        let mut session = mini(None, Vec::new());
        let mut rng = rng();
        assert_eq!(session.state(), QuizState::AwaitingQuestion);
        let request = session.poll_supply(&mut rng).expect("first poll issues");
        assert!(MINI_CHALLENGE_SUBJECTS.contains(&request.subject.as_str()));
        for _ in 0..5 {
            assert!(session.poll_supply(&mut rng).is_none());
        }
        assert!(session.is_supply_in_flight());

        assert!(session.receive_question(request.ticket, sample_question("g1", &request.subject, 0)));
        assert!(!session.is_supply_in_flight());
        assert_eq!(session.state(), QuizState::Presenting);
    }

    #[test]
    fn test_subject_filter_tags_every_request() {
        let mut session = mini(Some("Química"), Vec::new());
        let request = session.poll_supply(&mut rng()).unwrap();
        assert_eq!(request.subject, "Química");
        assert_eq!(request.session, SessionId(2));
    }

    #[test]
    fn test_mini_run_prefetches_at_second_to_last_question() {
        let seed = vec![
            sample_question("s1", "Matemática", 0),
            sample_question("s2", "Matemática", 0),
            sample_question("s3", "Matemática", 0),
        ];
        let mut session = mini(Some("Matemática"), seed);
        let mut rng = rng();
        assert!(session.poll_supply(&mut rng).is_none());
        session.submit_answer(0);
        session.advance();
        assert!(session.poll_supply(&mut rng).is_none());
        session.submit_answer(0);
        session.advance();
        assert_eq!(session.position(), 2);
        assert!(session.poll_supply(&mut rng).is_some());
    }

    #[test]
    fn test_advance_past_end_waits_for_supply_then_presents_it() {
        let mut session = mini(None, vec![sample_question("s1", "Física", 2)]);
        let mut rng = rng();
        let request = session.poll_supply(&mut rng).unwrap();
        session.submit_answer(2);
        assert!(matches!(session.advance(), Advance::AwaitingQuestion));
        assert_eq!(session.state(), QuizState::AwaitingQuestion);
        assert!(session.submit_answer(0).is_none());

        assert!(session.receive_question(request.ticket, sample_question("g1", "Física", 4)));
        assert_eq!(session.position(), 1);
        assert_eq!(session.state(), QuizState::Presenting);
        assert_eq!(session.current().unwrap().id, "g1");
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_placeholder_keeps_session_playable_and_frees_slot() {
        let mut session = mini(Some("Matemática"), Vec::new());
        let mut rng = rng();
        let request = session.poll_supply(&mut rng).unwrap();
        assert!(session.receive_question(request.ticket, Question::placeholder()));

        let current = session.current().unwrap();
        assert!(!current.options.is_empty());
        assert!(current.correct_index < current.options.len());
        assert!(!session.is_supply_in_flight());
        assert!(session.poll_supply(&mut rng).is_some());
    }

    #[test]
    fn test_stale_ticket_is_dropped() {
        let mut session = mini(None, Vec::new());
        let mut rng = rng();
        let request = session.poll_supply(&mut rng).unwrap();
        assert!(session.receive_question(request.ticket, sample_question("a", "Física", 0)));
        assert!(!session.receive_question(request.ticket, sample_question("b", "Física", 0)));
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_reply_after_exit_is_a_no_op() {
        let mut session = mini(None, Vec::new());
        let request = session.poll_supply(&mut rng()).unwrap();
        session.exit();
        assert!(!session.receive_question(request.ticket, sample_question("late", "Física", 0)));
        assert!(session.is_empty());
    }

    #[test]
    fn test_per_subject_tally_skips_placeholders() {
        let mut session = mini(None, vec![sample_question("s1", "Biologia", 1)]);
        let mut rng = rng();
        let request = session.poll_supply(&mut rng).unwrap();
        session.submit_answer(1);
        session.advance();
        session.receive_question(request.ticket, Question::placeholder());
        session.submit_answer(0);
        let outcome = session.exit().unwrap();
        assert_eq!(outcome.answered, 2);
        assert_eq!(outcome.per_subject.len(), 1);
        assert_eq!(outcome.per_subject[0].subject, "Biologia");
        assert_eq!(outcome.per_subject[0].correct, 1);
    }

    #[test]
    fn test_real_question_with_system_subject_is_tallied() {
        let mut question = sample_question("ai-7", SYSTEM_SUBJECT, 2);
        question.source = QuestionSource::AiGenerated;
        let mut session = mini(None, vec![question]);
        session.submit_answer(2);
        let outcome = session.exit().unwrap();
        assert_eq!(outcome.per_subject.len(), 1);
        assert_eq!(outcome.per_subject[0].subject, SYSTEM_SUBJECT);
        assert_eq!(outcome.per_subject[0].correct, 1);
    }

    #[test]
    fn test_progress_and_titles_follow_mode() {
        let mut g = global(4);
        assert!((g.progress() - 0.25).abs() < 1e-9);
        assert_eq!(g.title(), "Simulado Global");
        for _ in 0..3 {
            g.submit_answer(0);
            g.advance();
        }
        assert!(g.is_last());

        let m = mini(None, vec![sample_question("s1", "Física", 0)]);
        assert!((m.progress() - 0.5).abs() < 1e-9);
        assert_eq!(m.title(), "Mini Desafio");
        assert!(!m.is_last());
    }
}
