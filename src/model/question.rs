use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of alternatives every well-formed ENEM question carries.
pub const ANSWER_OPTIONS: usize = 5;

/// Subject tag used for placeholder questions produced when generation fails.
pub const SYSTEM_SUBJECT: &str = "Sistema";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionSource {
    EnemStatic,
    AiGenerated,
    /// Stand-in for a question the provider failed to produce.
    Placeholder,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
    pub subject: String,
    #[serde(default)]
    pub year: Option<u16>,
    pub source: QuestionSource,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuestionError {
    #[error("question text is empty")]
    EmptyText,
    #[error("expected 5 options, got {0}")]
    OptionCount(usize),
    #[error("option {0} is empty")]
    EmptyOption(usize),
    #[error("correct index {index} is outside {len} options")]
    CorrectIndexOutOfRange { index: usize, len: usize },
}

impl Question {
    /// Check the shape every presented question must have: non-empty body,
    /// exactly five non-empty options and a correct index into them.
    pub fn validate(&self) -> Result<(), QuestionError> {
        if self.text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if self.options.len() != ANSWER_OPTIONS {
            return Err(QuestionError::OptionCount(self.options.len()));
        }
        if let Some(idx) = self.options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::EmptyOption(idx));
        }
        if self.correct_index >= self.options.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: self.correct_index,
                len: self.options.len(),
            });
        }
        Ok(())
    }

    /// Stand-in delivered when the provider cannot produce a question.
    /// Has a single option so the correct index is trivially valid.
    pub fn placeholder() -> Self {
        Self {
            id: "fallback".to_string(),
            text: "Não foi possível gerar uma nova questão online agora. Tente novamente mais tarde."
                .to_string(),
            options: vec!["Erro".to_string()],
            correct_index: 0,
            explanation: "Verifique sua conexão ou chave de API.".to_string(),
            subject: SYSTEM_SUBJECT.to_string(),
            year: None,
            source: QuestionSource::Placeholder,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.source == QuestionSource::Placeholder
    }

    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_index
    }

    /// Letter shown next to an option ("A".."E").
    pub fn option_label(index: usize) -> char {
        (b'A' + (index as u8).min(25)) as char
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectPerformance {
    pub subject: String,
    pub correct: u32,
    pub total: u32,
}

impl SubjectPerformance {
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }
}

/// Add `incoming` tallies into `into`, keeping first-seen subject order.
pub fn merge_performance(into: &mut Vec<SubjectPerformance>, incoming: &[SubjectPerformance]) {
    for perf in incoming {
        match into.iter_mut().find(|p| p.subject == perf.subject) {
            Some(existing) => {
                existing.correct += perf.correct;
                existing.total += perf.total;
            }
            None => into.push(perf.clone()),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_question(id: &str, subject: &str, correct_index: usize) -> Question {
    Question {
        id: id.to_string(),
        text: format!("Enunciado {id}"),
        options: (0..ANSWER_OPTIONS).map(|i| format!("Opção {i}")).collect(),
        correct_index,
        explanation: "Porque sim.".to_string(),
        subject: subject.to_string(),
        year: Some(2022),
        source: QuestionSource::EnemStatic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_question_validates() {
        assert_eq!(sample_question("q1", "Matemática", 4).validate(), Ok(()));
    }

    #[test]
    fn test_rejects_wrong_option_count() {
        let mut q = sample_question("q1", "Matemática", 0);
        q.options.pop();
        assert_eq!(q.validate(), Err(QuestionError::OptionCount(4)));
    }

    #[test]
    fn test_rejects_out_of_range_correct_index() {
        let q = sample_question("q1", "Matemática", 5);
        assert_eq!(
            q.validate(),
            Err(QuestionError::CorrectIndexOutOfRange { index: 5, len: 5 })
        );
    }

    #[test]
    fn test_rejects_blank_option() {
        let mut q = sample_question("q1", "Matemática", 0);
        q.options[3] = "   ".to_string();
        assert_eq!(q.validate(), Err(QuestionError::EmptyOption(3)));
    }

    #[test]
    fn test_placeholder_keeps_index_invariant() {
        let q = Question::placeholder();
        assert!(!q.options.is_empty());
        assert!(q.correct_index < q.options.len());
        assert!(q.is_placeholder());
    }

    #[test]
    fn test_generated_question_tagged_sistema_is_not_placeholder() {
        let mut q = sample_question("ai-1", SYSTEM_SUBJECT, 0);
        q.source = QuestionSource::AiGenerated;
        assert!(!q.is_placeholder());
    }

    #[test]
    fn test_deserializes_camel_case_asset_shape() {
        let json = r#"{
            "id": "x", "text": "t", "options": ["a","b","c","d","e"],
            "correctIndex": 2, "explanation": "e", "subject": "Linguagens",
            "source": "ENEM_STATIC"
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.correct_index, 2);
        assert_eq!(q.year, None);
        assert_eq!(q.source, QuestionSource::EnemStatic);
    }

    #[test]
    fn test_merge_performance_accumulates_by_subject() {
        let mut total = vec![SubjectPerformance {
            subject: "Matemática".into(),
            correct: 1,
            total: 2,
        }];
        merge_performance(
            &mut total,
            &[
                SubjectPerformance { subject: "Matemática".into(), correct: 2, total: 3 },
                SubjectPerformance { subject: "Física".into(), correct: 0, total: 1 },
            ],
        );
        assert_eq!(total.len(), 2);
        assert_eq!(total[0].correct, 3);
        assert_eq!(total[0].total, 5);
        assert_eq!(total[1].subject, "Física");
    }
}
