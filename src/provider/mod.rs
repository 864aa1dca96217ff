pub mod gemini;
pub mod image;
pub mod prompts;
pub mod schema;
pub mod worker;

use chrono::{Datelike, Utc};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::model::question::{Question, SubjectPerformance};
use crate::model::user::LoginToken;
use crate::session::quiz::SessionId;
use crate::session::supply::SupplyTicket;
use self::image::EssayImage;
use self::schema::{GeneratedQuestion, question_schema};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no AI backend is configured")]
    Unavailable,
    #[cfg(feature = "network")]
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("provider returned no text")]
    EmptyResponse,
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed question: {0}")]
    Malformed(String),
}

/// Raw text generation against some model.
pub trait AiBackend: Send + Sync {
    fn generate_json(&self, prompt: &str, schema: &Value, temperature: f32)
    -> Result<String, ProviderError>;
    fn generate_text(&self, prompt: &str) -> Result<String, ProviderError>;
    fn generate_with_image(&self, prompt: &str, image: &EssayImage)
    -> Result<String, ProviderError>;
}

/// Backend used without an API key. Every call fails, so every feature
/// degrades to its fallback text.
pub struct OfflineBackend;

impl AiBackend for OfflineBackend {
    fn generate_json(&self, _: &str, _: &Value, _: f32) -> Result<String, ProviderError> {
        Err(ProviderError::Unavailable)
    }

    fn generate_text(&self, _: &str) -> Result<String, ProviderError> {
        Err(ProviderError::Unavailable)
    }

    fn generate_with_image(&self, _: &str, _: &EssayImage) -> Result<String, ProviderError> {
        Err(ProviderError::Unavailable)
    }
}

/// Pick the backend for this run.
pub fn build_backend(config: &Config, offline: bool) -> Box<dyn AiBackend> {
    if offline {
        info!("offline mode, AI features disabled");
        return Box::new(OfflineBackend);
    }
    let Some(api_key) = config.api_key() else {
        warn!("no Gemini API key configured, AI features disabled");
        return Box::new(OfflineBackend);
    };
    network_backend(config, api_key)
}

#[cfg(feature = "network")]
fn network_backend(config: &Config, api_key: String) -> Box<dyn AiBackend> {
    match gemini::GeminiBackend::new(config, api_key) {
        Ok(backend) => {
            info!(model = %config.model, "using Gemini backend");
            Box::new(backend)
        }
        Err(err) => {
            warn!(%err, "could not build HTTP client, AI features disabled");
            Box::new(OfflineBackend)
        }
    }
}

#[cfg(not(feature = "network"))]
fn network_backend(_config: &Config, _api_key: String) -> Box<dyn AiBackend> {
    warn!("built without network support, AI features disabled");
    Box::new(OfflineBackend)
}

/// Work handed to a background worker.
#[derive(Clone, Debug)]
pub enum ProviderJob {
    Question {
        session: SessionId,
        ticket: SupplyTicket,
        subject: String,
    },
    Report {
        stats: Vec<SubjectPerformance>,
    },
    StudyPlan {
        subject: String,
        context: String,
    },
    Essay {
        owner: LoginToken,
        image: EssayImage,
        theme: String,
    },
}

#[derive(Clone, Debug)]
pub enum ProviderReply {
    Question {
        session: SessionId,
        ticket: SupplyTicket,
        question: Question,
    },
    Report(String),
    StudyPlan {
        subject: String,
        text: String,
    },
    Essay {
        owner: LoginToken,
        text: String,
        failed: bool,
    },
}

/// Infallible front for the app: every failure becomes fallback content.
pub struct Provider {
    backend: Box<dyn AiBackend>,
    question_temperature: f32,
}

impl Provider {
    pub fn new(backend: Box<dyn AiBackend>, question_temperature: f32) -> Self {
        Self {
            backend,
            question_temperature,
        }
    }

    pub fn generate_question(&self, subject: &str) -> Question {
        match self.try_generate_question(subject) {
            Ok(question) => question,
            Err(err) => {
                warn!(%err, subject, "question generation failed, using placeholder");
                Question::placeholder()
            }
        }
    }

    fn try_generate_question(&self, subject: &str) -> Result<Question, ProviderError> {
        let raw = self.backend.generate_json(
            &prompts::question_prompt(subject),
            &question_schema(),
            self.question_temperature,
        )?;
        let generated: GeneratedQuestion = serde_json::from_str(raw.trim())?;
        let now = Utc::now();
        let year = u16::try_from(now.year()).unwrap_or(u16::MAX);
        generated
            .into_question(format!("ai-{}", now.timestamp_millis()), year, subject)
            .map_err(|err| ProviderError::Malformed(err.to_string()))
    }

    pub fn generate_report(&self, stats: &[SubjectPerformance]) -> String {
        match self.backend.generate_text(&prompts::report_prompt(stats)) {
            Ok(text) => text,
            Err(ProviderError::EmptyResponse) => prompts::REPORT_EMPTY_TEXT.to_string(),
            Err(err) => {
                warn!(%err, "performance report failed");
                prompts::REPORT_ERROR_TEXT.to_string()
            }
        }
    }

    pub fn generate_study_plan(&self, subject: &str, weakness_context: &str) -> String {
        match self
            .backend
            .generate_text(&prompts::study_plan_prompt(subject, weakness_context))
        {
            Ok(text) => text,
            Err(ProviderError::EmptyResponse) => prompts::STUDY_PLAN_EMPTY_TEXT.to_string(),
            Err(err) => {
                warn!(%err, subject, "study plan failed");
                prompts::STUDY_PLAN_ERROR_TEXT.to_string()
            }
        }
    }

    pub fn correct_essay(&self, image: &EssayImage, theme: &str) -> String {
        self.try_correct_essay(image, theme)
            .unwrap_or_else(|fallback| fallback)
    }

    fn try_correct_essay(&self, image: &EssayImage, theme: &str) -> Result<String, String> {
        match self
            .backend
            .generate_with_image(&prompts::essay_prompt(theme), image)
        {
            Ok(text) => Ok(text),
            Err(ProviderError::EmptyResponse) => Err(prompts::ESSAY_EMPTY_TEXT.to_string()),
            Err(err) => {
                warn!(%err, "essay correction failed");
                Err(prompts::ESSAY_ERROR_TEXT.to_string())
            }
        }
    }

    pub fn run(&self, job: ProviderJob) -> ProviderReply {
        match job {
            ProviderJob::Question {
                session,
                ticket,
                subject,
            } => ProviderReply::Question {
                session,
                ticket,
                question: self.generate_question(&subject),
            },
            ProviderJob::Report { stats } => ProviderReply::Report(self.generate_report(&stats)),
            ProviderJob::StudyPlan { subject, context } => {
                let text = self.generate_study_plan(&subject, &context);
                ProviderReply::StudyPlan { subject, text }
            }
            ProviderJob::Essay {
                owner,
                image,
                theme,
            } => match self.try_correct_essay(&image, &theme) {
                Ok(text) => ProviderReply::Essay {
                    owner,
                    text,
                    failed: false,
                },
                Err(text) => ProviderReply::Essay {
                    owner,
                    text,
                    failed: true,
                },
            },
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Backend returning canned answers; `None` means "fail with Unavailable".
    #[derive(Default)]
    pub struct FakeBackend {
        pub json: Option<String>,
        pub text: Option<String>,
        pub empty: bool,
    }

    impl FakeBackend {
        fn answer(&self, canned: &Option<String>) -> Result<String, ProviderError> {
            if self.empty {
                return Err(ProviderError::EmptyResponse);
            }
            canned.clone().ok_or(ProviderError::Unavailable)
        }
    }

    impl AiBackend for FakeBackend {
        fn generate_json(&self, _: &str, _: &Value, _: f32) -> Result<String, ProviderError> {
            self.answer(&self.json)
        }

        fn generate_text(&self, _: &str) -> Result<String, ProviderError> {
            self.answer(&self.text)
        }

        fn generate_with_image(&self, _: &str, _: &EssayImage) -> Result<String, ProviderError> {
            self.answer(&self.text)
        }
    }

    pub const VALID_QUESTION_JSON: &str = r#"{"text":"Qual é a derivada de x²?",
        "options":["x","2x","x²","2","0"],"correctIndex":1,
        "explanation":"Regra da potência.","subject":"Matemática"}"#;
}

#[cfg(test)]
mod tests {
    use super::testing::{FakeBackend, VALID_QUESTION_JSON};
    use super::*;
    use crate::model::question::{QuestionSource, SYSTEM_SUBJECT};

    fn provider(backend: FakeBackend) -> Provider {
        Provider::new(Box::new(backend), 0.7)
    }

    fn image() -> EssayImage {
        EssayImage {
            mime_type: "image/jpeg".into(),
            data: "aGVsbG8=".into(),
        }
    }

    #[test]
    fn test_generated_question_is_stamped() {
        let p = provider(FakeBackend {
            json: Some(VALID_QUESTION_JSON.into()),
            ..Default::default()
        });
        let q = p.generate_question("Matemática");
        assert!(q.id.starts_with("ai-"));
        assert_eq!(q.source, QuestionSource::AiGenerated);
        assert_eq!(q.correct_index, 1);
        assert!(q.year.is_some());
    }

    #[test]
    fn test_failed_generation_yields_placeholder() {
        let q = provider(FakeBackend::default()).generate_question("Matemática");
        assert_eq!(q.subject, SYSTEM_SUBJECT);
        assert!(!q.options.is_empty());
        assert!(q.correct_index < q.options.len());
    }

    #[test]
    fn test_malformed_json_yields_placeholder() {
        let p = provider(FakeBackend {
            json: Some(r#"{"text":"x","options":["a"],"correctIndex":4,"explanation":"","subject":"F"}"#.into()),
            ..Default::default()
        });
        assert!(p.generate_question("Física").is_placeholder());

        let p = provider(FakeBackend {
            json: Some("not json".into()),
            ..Default::default()
        });
        assert!(p.generate_question("Física").is_placeholder());
    }

    #[test]
    fn test_text_features_fall_back_to_fixed_messages() {
        let p = provider(FakeBackend::default());
        assert_eq!(p.generate_report(&[]), prompts::REPORT_ERROR_TEXT);
        assert_eq!(
            p.generate_study_plan("Química", ""),
            prompts::STUDY_PLAN_ERROR_TEXT
        );
        assert!(p.correct_essay(&image(), "Tema").contains("tente uma foto mais nítida"));
    }

    #[test]
    fn test_empty_response_uses_empty_texts() {
        let p = provider(FakeBackend {
            empty: true,
            ..Default::default()
        });
        assert_eq!(p.generate_report(&[]), prompts::REPORT_EMPTY_TEXT);
        assert_eq!(p.generate_study_plan("Física", "x"), prompts::STUDY_PLAN_EMPTY_TEXT);
        assert_eq!(p.correct_essay(&image(), "Tema"), prompts::ESSAY_EMPTY_TEXT);
    }

    #[test]
    fn test_run_flags_failed_essay() {
        let p = provider(FakeBackend::default());
        let reply = p.run(ProviderJob::Essay {
            owner: LoginToken(3),
            image: image(),
            theme: "Tema".into(),
        });
        assert!(matches!(
            reply,
            ProviderReply::Essay { failed: true, owner: LoginToken(3), .. }
        ));

        let p = provider(FakeBackend {
            text: Some("# Nota Final: 880".into()),
            ..Default::default()
        });
        let reply = p.run(ProviderJob::Essay {
            owner: LoginToken(3),
            image: image(),
            theme: "Tema".into(),
        });
        assert!(matches!(reply, ProviderReply::Essay { failed: false, ref text, .. } if text.contains("880")));
    }

    #[test]
    fn test_run_echoes_study_plan_subject() {
        let p = provider(FakeBackend {
            text: Some("Dia 1".into()),
            ..Default::default()
        });
        let reply = p.run(ProviderJob::StudyPlan {
            subject: "Biologia".into(),
            context: String::new(),
        });
        match reply {
            ProviderReply::StudyPlan { subject, text } => {
                assert_eq!(subject, "Biologia");
                assert_eq!(text, "Dia 1");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_offline_backend_always_unavailable() {
        assert!(matches!(
            OfflineBackend.generate_text("x"),
            Err(ProviderError::Unavailable)
        ));
    }

    #[test]
    fn test_offline_flag_forces_offline_backend() {
        let config = Config {
            gemini_api_key: Some("key".into()),
            ..Config::default()
        };
        let backend = build_backend(&config, true);
        assert!(matches!(
            backend.generate_text("x"),
            Err(ProviderError::Unavailable)
        ));
    }
}
