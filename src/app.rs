use std::mem;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info};

use crate::content::bank::QuestionBank;
use crate::content::leaderboard::{LeaderboardEntry, LeaderboardScope, Roster};
use crate::content::subjects::SUBJECT_AREAS;
use crate::engine::entitlement::{self, Access, Denial};
use crate::model::question::{SubjectPerformance, merge_performance};
use crate::model::user::{LoginToken, User};
use crate::provider::image::EssayImage;
use crate::provider::{ProviderJob, ProviderReply};
use crate::session::quiz::{Advance, QuizMode, QuizSession, QuizState, SessionId};
use crate::session::result::{self, QuizOutcome};
use crate::ui::line_input::{InputField, LineInput};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Login,
    Home,
    Quiz,
    Leaderboard,
    Report,
    StudyPlan,
    Essay,
}

impl AppScreen {
    pub fn shows_nav_bar(self) -> bool {
        !matches!(self, AppScreen::Login | AppScreen::Quiz)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Modal {
    Premium(Denial),
    EssayCredits,
}

/// Output area for one asynchronous AI feature.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum TextPanel {
    #[default]
    Idle,
    Loading,
    Ready(String),
}

impl TextPanel {
    pub fn is_loading(&self) -> bool {
        matches!(self, TextPanel::Loading)
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            TextPanel::Ready(text) => Some(text),
            _ => None,
        }
    }
}

/// Entries of the home screen menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HomeAction {
    GlobalChallenge,
    MiniChallenge,
    AreaChallenge(usize),
    StudyPlan,
    Report,
    Leaderboard,
    Essay,
}

impl HomeAction {
    pub fn all() -> Vec<HomeAction> {
        let mut actions = vec![HomeAction::GlobalChallenge, HomeAction::MiniChallenge];
        actions.extend((0..SUBJECT_AREAS.len()).map(HomeAction::AreaChallenge));
        actions.extend([
            HomeAction::StudyPlan,
            HomeAction::Report,
            HomeAction::Leaderboard,
            HomeAction::Essay,
        ]);
        actions
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreditPack {
    pub amount: u32,
    pub price: &'static str,
}

pub const CREDIT_PACKS: [CreditPack; 2] = [
    CreditPack {
        amount: 1,
        price: "R$ 4,90",
    },
    CreditPack {
        amount: 5,
        price: "R$ 19,90",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EssayFocus {
    Theme,
    ImagePath,
}

pub struct App {
    pub screen: AppScreen,
    pub user: Option<User>,
    pub modal: Option<Modal>,
    pub quiz: Option<QuizSession>,
    pub notice: Option<String>,
    pub last_outcome: Option<QuizOutcome>,
    pub performance: Vec<SubjectPerformance>,
    pub report: TextPanel,
    pub study_plan: TextPanel,
    pub study_plan_subject: Option<String>,
    pub essay: TextPanel,
    pub home_selected: usize,
    pub quiz_cursor: usize,
    pub leaderboard_scope: LeaderboardScope,
    pub study_plan_selected: usize,
    pub credit_pack_selected: usize,
    /// Scroll offset of the AI text panel on the current screen.
    pub text_scroll: u16,
    pub login_input: LineInput,
    pub essay_theme_input: LineInput,
    pub essay_path_input: LineInput,
    pub essay_focus: EssayFocus,
    pub should_quit: bool,
    bank: QuestionBank,
    roster: Roster,
    rng: SmallRng,
    next_session: u64,
    login_token: LoginToken,
    jobs: Vec<ProviderJob>,
}

impl App {
    pub fn new() -> Self {
        Self::with_content(QuestionBank::load(), Roster::load(), SmallRng::from_entropy())
    }

    pub fn with_content(bank: QuestionBank, roster: Roster, rng: SmallRng) -> Self {
        Self {
            screen: AppScreen::Login,
            user: None,
            modal: None,
            quiz: None,
            notice: None,
            last_outcome: None,
            performance: Vec::new(),
            report: TextPanel::Idle,
            study_plan: TextPanel::Idle,
            study_plan_subject: None,
            essay: TextPanel::Idle,
            home_selected: 0,
            quiz_cursor: 0,
            leaderboard_scope: LeaderboardScope::Global,
            study_plan_selected: 0,
            credit_pack_selected: CREDIT_PACKS.len() - 1,
            text_scroll: 0,
            login_input: LineInput::new(InputField::LoginName, ""),
            essay_theme_input: LineInput::new(InputField::EssayTheme, ""),
            essay_path_input: LineInput::new(InputField::EssayImagePath, ""),
            essay_focus: EssayFocus::Theme,
            should_quit: false,
            bank,
            roster,
            rng,
            next_session: 0,
            login_token: LoginToken::default(),
            jobs: Vec::new(),
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    // --- account ---

    pub fn login(&mut self, name: &str, via_google: bool) {
        let user = User::from_template(self.roster.template(), name, via_google);
        self.login_token = LoginToken(self.login_token.0 + 1);
        info!(name = %user.name, via_google, login = self.login_token.0, "login");
        self.user = Some(user);
        self.login_input.clear();
        self.screen = AppScreen::Home;
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(name = %user.name, "logout");
        }
        self.quiz = None;
        self.modal = None;
        self.notice = None;
        self.last_outcome = None;
        self.performance.clear();
        self.report = TextPanel::Idle;
        self.reset_study_plan();
        self.reset_essay();
        self.jobs.clear();
        self.home_selected = 0;
        self.screen = AppScreen::Login;
    }

    /// Navigation bar target. Gated screens go through the entitlement check.
    pub fn go_to(&mut self, screen: AppScreen) {
        if self.user.is_none() || self.screen == AppScreen::Quiz {
            return;
        }
        match screen {
            AppScreen::Home | AppScreen::Leaderboard | AppScreen::Essay => {
                self.modal = None;
                self.text_scroll = 0;
                self.screen = screen;
            }
            AppScreen::Report | AppScreen::StudyPlan => self.request_gated_feature(screen),
            AppScreen::Quiz | AppScreen::Login => {}
        }
    }

    pub fn activate_home(&mut self, action: HomeAction) {
        match action {
            HomeAction::GlobalChallenge => {
                self.request_start_quiz(QuizMode::GlobalChallenge, None);
            }
            HomeAction::MiniChallenge => {
                self.request_start_quiz(QuizMode::MiniChallenge, None);
            }
            HomeAction::AreaChallenge(idx) => {
                if let Some(area) = SUBJECT_AREAS.get(idx) {
                    self.request_start_quiz(QuizMode::MiniChallenge, Some(area.id));
                }
            }
            HomeAction::StudyPlan => self.go_to(AppScreen::StudyPlan),
            HomeAction::Report => self.go_to(AppScreen::Report),
            HomeAction::Leaderboard => self.go_to(AppScreen::Leaderboard),
            HomeAction::Essay => self.go_to(AppScreen::Essay),
        }
    }

    // --- quiz ---

    /// Returns whether a session was started.
    pub fn request_start_quiz(&mut self, mode: QuizMode, subject: Option<&str>) -> bool {
        let Some(user) = &self.user else {
            return false;
        };
        if let Access::Denied(denial) = entitlement::can_start_quiz(user) {
            info!(answered = user.questions_answered, "quiz blocked by free limit");
            self.modal = Some(Modal::Premium(denial));
            return false;
        }

        let (subject, questions) = match (mode, subject) {
            (QuizMode::GlobalChallenge, _) => (None, self.bank.all().to_vec()),
            (QuizMode::MiniChallenge, Some(subject)) => {
                (Some(subject.to_string()), self.bank.by_subject(subject))
            }
            (QuizMode::MiniChallenge, None) => (None, Vec::new()),
        };

        self.next_session += 1;
        let id = SessionId(self.next_session);
        info!(
            session = id.0,
            mode = mode.as_str(),
            subject = subject.as_deref().unwrap_or("-"),
            seeded = questions.len(),
            "quiz started"
        );
        self.quiz = Some(QuizSession::new(id, mode, subject, questions));
        self.modal = None;
        self.notice = None;
        self.quiz_cursor = 0;
        self.screen = AppScreen::Quiz;

        if self.quiz.as_ref().map(QuizSession::state) == Some(QuizState::Finished) {
            if let Some(quiz) = &self.quiz {
                let outcome = quiz.outcome(false);
                self.finish_quiz(outcome);
            }
            return true;
        }
        self.poll_quiz_supply();
        true
    }

    pub fn submit_answer(&mut self, option: usize) -> Option<bool> {
        let verdict = self.quiz.as_mut()?.submit_answer(option);
        self.poll_quiz_supply();
        verdict
    }

    pub fn submit_selected_answer(&mut self) -> Option<bool> {
        self.submit_answer(self.quiz_cursor)
    }

    pub fn advance_quiz(&mut self) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        match quiz.advance() {
            Advance::Finished(outcome) => self.finish_quiz(outcome),
            Advance::Presenting => {
                self.quiz_cursor = 0;
                self.poll_quiz_supply();
            }
            Advance::AwaitingQuestion => self.poll_quiz_supply(),
            Advance::Ignored => {}
        }
    }

    pub fn exit_quiz(&mut self) {
        if let Some(outcome) = self.quiz.as_mut().and_then(QuizSession::exit) {
            self.finish_quiz(outcome);
        }
    }

    pub fn move_quiz_cursor(&mut self, delta: isize) {
        let Some(len) = self
            .quiz
            .as_ref()
            .and_then(QuizSession::current)
            .map(|q| q.options.len())
        else {
            return;
        };
        if len == 0 {
            return;
        }
        self.quiz_cursor = (self.quiz_cursor as isize + delta).rem_euclid(len as isize) as usize;
    }

    fn finish_quiz(&mut self, outcome: QuizOutcome) {
        merge_performance(&mut self.performance, &outcome.per_subject);
        self.on_quiz_exit(outcome.score, outcome.answered);
        self.last_outcome = Some(outcome);
    }

    /// Credit a finished or abandoned quiz to the user and return home.
    pub fn on_quiz_exit(&mut self, score: u32, answered: u32) {
        self.quiz = None;
        if let Some(user) = &mut self.user {
            user.record_session(score, answered);
            info!(score, answered, total = user.score, "quiz finished");
        }
        self.notice = Some(result::exit_notice(score));
        self.screen = AppScreen::Home;
    }

    fn poll_quiz_supply(&mut self) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        if let Some(request) = quiz.poll_supply(&mut self.rng) {
            self.jobs.push(ProviderJob::Question {
                session: request.session,
                ticket: request.ticket,
                subject: request.subject,
            });
        }
    }

    // --- premium ---

    pub fn request_gated_feature(&mut self, screen: AppScreen) {
        let Some(user) = &self.user else {
            return;
        };
        match entitlement::can_view_gated_feature(user) {
            Access::Denied(denial) => self.modal = Some(Modal::Premium(denial)),
            Access::Allowed => {
                self.modal = None;
                self.text_scroll = 0;
                self.screen = screen;
                if screen == AppScreen::Report && self.report == TextPanel::Idle {
                    self.queue_report();
                }
            }
        }
    }

    /// Ask for a fresh report unless one is already on its way.
    pub fn refresh_report(&mut self) {
        if self.screen == AppScreen::Report && !self.report.is_loading() {
            self.queue_report();
        }
    }

    fn queue_report(&mut self) {
        self.report = TextPanel::Loading;
        self.jobs.push(ProviderJob::Report {
            stats: self.performance.clone(),
        });
    }

    pub fn upgrade(&mut self) {
        if let Some(user) = &mut self.user {
            user.is_premium = true;
            info!(name = %user.name, "upgraded to premium");
        }
        if matches!(self.modal, Some(Modal::Premium(_))) {
            self.modal = None;
        }
    }

    pub fn free_questions_remaining(&self) -> Option<u32> {
        self.user.as_ref().and_then(entitlement::free_questions_remaining)
    }

    // --- essay credits ---

    pub fn purchase_credits(&mut self, amount: u32) {
        if let Some(user) = &mut self.user {
            user.add_credits(amount);
            info!(amount, balance = user.essay_credits, "essay credits purchased");
        }
        if self.modal == Some(Modal::EssayCredits) {
            self.modal = None;
        }
    }

    pub fn purchase_selected_pack(&mut self) {
        if let Some(pack) = CREDIT_PACKS.get(self.credit_pack_selected) {
            self.purchase_credits(pack.amount);
        }
    }

    pub fn consume_essay_credit(&mut self) {
        if let Some(user) = &mut self.user {
            user.consume_credit();
        }
    }

    pub fn open_credit_modal(&mut self) {
        if self.user.is_some() {
            self.modal = Some(Modal::EssayCredits);
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    // --- study plan ---

    pub fn request_study_plan(&mut self, subject: &str) {
        let Some(user) = &self.user else {
            return;
        };
        if let Access::Denied(denial) = entitlement::can_view_gated_feature(user) {
            self.modal = Some(Modal::Premium(denial));
            return;
        }
        if self.study_plan.is_loading() {
            return;
        }
        self.study_plan = TextPanel::Loading;
        self.study_plan_subject = Some(subject.to_string());
        self.jobs.push(ProviderJob::StudyPlan {
            subject: subject.to_string(),
            context: self.weakness_context(),
        });
    }

    pub fn request_selected_study_plan(&mut self) {
        if let Some(area) = SUBJECT_AREAS.get(self.study_plan_selected) {
            self.request_study_plan(area.id);
        }
    }

    pub fn reset_study_plan(&mut self) {
        self.study_plan = TextPanel::Idle;
        self.study_plan_subject = None;
    }

    /// Recent misses, one line per subject, for the study plan prompt.
    pub fn weakness_context(&self) -> String {
        self.performance
            .iter()
            .filter(|p| p.correct < p.total)
            .map(|p| format!("{}: errou {} de {}", p.subject, p.total - p.correct, p.total))
            .collect::<Vec<_>>()
            .join("; ")
    }

    // --- essay ---

    /// Returns whether a correction job was queued.
    pub fn submit_essay(&mut self, image: EssayImage, theme: &str) -> bool {
        let Some(user) = &self.user else {
            return false;
        };
        if user.essay_credits == 0 {
            self.modal = Some(Modal::EssayCredits);
            return false;
        }
        let theme = theme.trim();
        if theme.is_empty() {
            self.notice = Some("Informe o tema da redação.".to_string());
            return false;
        }
        if self.essay.is_loading() {
            return false;
        }
        self.consume_essay_credit();
        self.essay = TextPanel::Loading;
        self.notice = None;
        self.jobs.push(ProviderJob::Essay {
            owner: self.login_token,
            image,
            theme: theme.to_string(),
        });
        true
    }

    /// Submit what is typed on the essay screen.
    pub fn submit_essay_form(&mut self) -> bool {
        let Some(user) = &self.user else {
            return false;
        };
        if user.essay_credits == 0 {
            self.modal = Some(Modal::EssayCredits);
            return false;
        }
        let path = self.essay_path_input.value().trim().to_string();
        if path.is_empty() {
            self.notice = Some("Informe o caminho da foto da redação.".to_string());
            return false;
        }
        match EssayImage::load(&path) {
            Ok(image) => {
                let theme = self.essay_theme_input.value().to_string();
                self.submit_essay(image, &theme)
            }
            Err(err) => {
                self.notice = Some(format!("Não foi possível abrir a imagem: {err}"));
                false
            }
        }
    }

    pub fn reset_essay(&mut self) {
        self.essay = TextPanel::Idle;
        self.essay_theme_input.clear();
        self.essay_path_input.clear();
        self.essay_focus = EssayFocus::Theme;
    }

    // --- provider plumbing ---

    pub fn take_jobs(&mut self) -> Vec<ProviderJob> {
        mem::take(&mut self.jobs)
    }

    pub fn pending_jobs(&self) -> &[ProviderJob] {
        &self.jobs
    }

    /// Fold a provider result into state. Replies nobody is waiting for any
    /// more are dropped.
    pub fn apply_reply(&mut self, reply: ProviderReply) {
        match reply {
            ProviderReply::Question {
                session,
                ticket,
                question,
            } => {
                let (accepted, was_waiting) = match self.quiz.as_mut() {
                    Some(quiz) if quiz.id() == session => {
                        let was_waiting = quiz.state() == QuizState::AwaitingQuestion;
                        (quiz.receive_question(ticket, question), was_waiting)
                    }
                    _ => (false, false),
                };
                if accepted {
                    if was_waiting {
                        self.quiz_cursor = 0;
                    }
                    self.poll_quiz_supply();
                } else {
                    debug!(session = session.0, ticket = ticket.value(), "stale question dropped");
                }
            }
            ProviderReply::Report(text) => {
                if self.report.is_loading() {
                    self.report = TextPanel::Ready(text);
                } else {
                    debug!("stale report dropped");
                }
            }
            ProviderReply::StudyPlan { subject, text } => {
                if self.study_plan.is_loading()
                    && self.study_plan_subject.as_deref() == Some(subject.as_str())
                {
                    self.study_plan = TextPanel::Ready(text);
                } else {
                    debug!(%subject, "stale study plan dropped");
                }
            }
            ProviderReply::Essay {
                owner,
                text,
                failed,
            } => {
                if owner != self.login_token {
                    debug!(owner = owner.0, "essay correction for a previous login dropped");
                    return;
                }
                if failed {
                    if let Some(user) = &mut self.user {
                        user.add_credits(1);
                        info!(balance = user.essay_credits, "essay credit refunded");
                    }
                }
                if self.essay.is_loading() {
                    self.essay = TextPanel::Ready(text);
                    if failed {
                        self.notice = Some("Seu crédito foi devolvido.".to_string());
                    }
                } else {
                    debug!("stale essay correction dropped");
                }
            }
        }
    }

    pub fn leaderboard(&self, scope: LeaderboardScope) -> Vec<LeaderboardEntry> {
        self.roster.rank(self.user.as_ref(), scope)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
