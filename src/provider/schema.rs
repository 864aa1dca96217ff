use serde::Deserialize;
use serde_json::{Value, json};

use crate::model::question::{Question, QuestionError, QuestionSource};

/// Shape the model is asked to return for one generated question.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: i64,
    pub explanation: String,
    #[serde(default)]
    pub subject: String,
}

impl GeneratedQuestion {
    /// Stamp provenance and check the result is presentable. A blank subject
    /// falls back to the one that was requested.
    pub fn into_question(
        self,
        id: String,
        year: u16,
        requested_subject: &str,
    ) -> Result<Question, QuestionError> {
        let correct_index =
            usize::try_from(self.correct_index).map_err(|_| QuestionError::CorrectIndexOutOfRange {
                index: usize::MAX,
                len: self.options.len(),
            })?;
        let subject = if self.subject.trim().is_empty() {
            requested_subject.to_string()
        } else {
            self.subject
        };
        let question = Question {
            id,
            text: self.text,
            options: self.options,
            correct_index,
            explanation: self.explanation,
            subject,
            year: Some(year),
            source: QuestionSource::AiGenerated,
        };
        question.validate()?;
        Ok(question)
    }
}

/// `responseSchema` sent alongside question requests.
pub fn question_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "text": {
                "type": "STRING",
                "description": "O enunciado da questão estilo ENEM."
            },
            "options": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "5 alternativas de resposta."
            },
            "correctIndex": {
                "type": "INTEGER",
                "description": "O índice da resposta correta (0-4)."
            },
            "explanation": {
                "type": "STRING",
                "description": "Uma explicação detalhada do porquê a resposta está correta."
            },
            "subject": {
                "type": "STRING",
                "description": "A matéria da questão (Matemática, Linguagens, etc)."
            }
        },
        "required": ["text", "options", "correctIndex", "explanation", "subject"]
    })
}
