use tracing::warn;

use crate::content::asset_text;
use crate::model::question::Question;

const BANK_ASSET: &str = "questions.json";

/// Immutable collection of pre-authored ENEM questions.
#[derive(Clone, Debug, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Load the bundled bank. Malformed entries are dropped, never presented.
    pub fn load() -> Self {
        let Some(json) = asset_text(BANK_ASSET) else {
            warn!(asset = BANK_ASSET, "question bank asset missing");
            return Self::default();
        };
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Self {
        let parsed: Vec<Question> = match serde_json::from_str(json) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(%err, "question bank is not valid JSON");
                return Self::default();
            }
        };
        Self::new(parsed)
    }

    pub fn new(questions: Vec<Question>) -> Self {
        let questions = questions
            .into_iter()
            .filter(|q| match q.validate() {
                Ok(()) => true,
                Err(err) => {
                    warn!(id = %q.id, %err, "dropping malformed bank question");
                    false
                }
            })
            .collect();
        Self { questions }
    }

    pub fn all(&self) -> &[Question] {
        &self.questions
    }

    pub fn by_subject(&self, subject: &str) -> Vec<Question> {
        self.questions
            .iter()
            .filter(|q| q.subject == subject)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::question::sample_question;

    #[test]
    fn test_bundled_bank_has_four_valid_questions() {
        let bank = QuestionBank::load();
        assert_eq!(bank.len(), 4);
        assert!(bank.all().iter().all(|q| q.validate().is_ok()));
    }

    #[test]
    fn test_filters_by_subject() {
        let bank = QuestionBank::load();
        let math = bank.by_subject("Matemática");
        assert_eq!(math.len(), 1);
        assert_eq!(math[0].id, "enem-2022-1");
        assert!(bank.by_subject("Química").is_empty());
    }

    #[test]
    fn test_drops_malformed_entries() {
        let mut broken = sample_question("bad", "Física", 0);
        broken.correct_index = 9;
        let bank = QuestionBank::new(vec![sample_question("ok", "Física", 1), broken]);
        assert_eq!(bank.len(), 1);
        assert_eq!(bank.all()[0].id, "ok");
    }

    #[test]
    fn test_invalid_json_yields_empty_bank() {
        assert!(QuestionBank::from_json("not json").is_empty());
    }
}
