use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use enemquiz::app::{App, AppScreen, CREDIT_PACKS, EssayFocus, HomeAction, Modal, TextPanel};
use enemquiz::config::Config;
use enemquiz::content::subjects::SUBJECT_AREAS;
use enemquiz::engine::scoring;
use enemquiz::event::{AppEvent, EventHandler};
use enemquiz::provider::worker::ProviderWorker;
use enemquiz::provider::{Provider, build_backend};
use enemquiz::session::quiz::QuizState;
use enemquiz::ui::components::leaderboard_table::LeaderboardTable;
use enemquiz::ui::components::menu::Menu;
use enemquiz::ui::components::modal::ModalView;
use enemquiz::ui::components::nav_bar::NavBar;
use enemquiz::ui::components::quiz_card::QuizCard;
use enemquiz::ui::components::text_panel::TextPanelView;
use enemquiz::ui::layout::{ScreenLayout, centered_rect, pack_hint_lines};
use enemquiz::ui::line_input::{InputResult, LineInput};
use enemquiz::ui::theme::{THEME, Theme};

#[derive(Parser)]
#[command(name = "enemquiz", version, about = "Treine para o ENEM no terminal")]
struct Cli {
    #[arg(short, long, help = "Log in directly with this display name")]
    name: Option<String>,

    #[arg(long, help = "Log in as a Google account (with --name)")]
    google: bool,

    #[arg(long, help = "Disable all AI features")]
    offline: bool,

    #[arg(short, long, help = "Gemini model to use")]
    model: Option<String>,

    #[arg(long, help = "Path to an alternative config file")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let (mut config, load_error) = match loaded {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    if let Some(model) = cli.model {
        config.model = model;
    }
    config.normalize();

    init_logging(&config.log_filter);
    if let Some(err) = load_error {
        warn!(%err, "config unreadable, using defaults");
    }
    info!(model = %config.model, offline = cli.offline, "starting");

    let provider = Arc::new(Provider::new(
        build_backend(&config, cli.offline),
        config.question_temperature,
    ));

    let mut app = App::new();
    if let Some(name) = &cli.name {
        app.login(name, cli.google);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));
    let worker = ProviderWorker::new(provider, events.sender());

    let result = run_app(&mut terminal, &mut app, &events, &worker);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Log to a file; the terminal belongs to the UI. Without a writable data
/// dir the app simply runs unlogged.
fn init_logging(default_filter: &str) {
    let Some(dir) = dirs::data_dir().map(|d| d.join("enemquiz")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("enemquiz.log"))
    else {
        return;
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("enemquiz=info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init();
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    worker: &ProviderWorker<AppEvent>,
) -> Result<()> {
    loop {
        worker.dispatch_all(app.take_jobs());
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Provider(reply) => app.apply_reply(reply),
            AppEvent::Tick | AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

// ---------------------------------------------------------------- input ---

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if let Some(modal) = app.modal {
        handle_modal_key(app, modal, key);
        return;
    }

    if app.screen.shows_nav_bar() && handle_nav_key(app, key) {
        return;
    }

    match app.screen {
        AppScreen::Login => handle_login_key(app, key),
        AppScreen::Home => handle_home_key(app, key),
        AppScreen::Quiz => handle_quiz_key(app, key),
        AppScreen::Leaderboard => handle_leaderboard_key(app, key),
        AppScreen::Report => handle_report_key(app, key),
        AppScreen::StudyPlan => handle_study_plan_key(app, key),
        AppScreen::Essay => handle_essay_key(app, key),
    }
}

/// Returns true when the key was a navigation shortcut.
fn handle_nav_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::F(1) => app.go_to(AppScreen::Home),
        KeyCode::F(2) => app.go_to(AppScreen::Report),
        KeyCode::F(3) => app.go_to(AppScreen::Leaderboard),
        KeyCode::F(4) => app.go_to(AppScreen::Essay),
        // Space is text on the essay form.
        KeyCode::Char(' ') if app.screen != AppScreen::Essay => {
            app.activate_home(HomeAction::MiniChallenge);
        }
        _ => return false,
    }
    true
}

fn handle_modal_key(app: &mut App, modal: Modal, key: KeyEvent) {
    match modal {
        Modal::Premium(_) => match key.code {
            KeyCode::Enter | KeyCode::Char('a') => app.upgrade(),
            KeyCode::Esc | KeyCode::Char('q') => app.close_modal(),
            _ => {}
        },
        Modal::EssayCredits => match key.code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Up | KeyCode::Char('k') => {
                app.credit_pack_selected = app.credit_pack_selected.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Down | KeyCode::Char('j') => {
                app.credit_pack_selected = (app.credit_pack_selected + 1).min(CREDIT_PACKS.len() - 1);
            }
            KeyCode::Enter => app.purchase_selected_pack(),
            KeyCode::Esc | KeyCode::Char('q') => app.close_modal(),
            _ => {}
        },
    }
}

fn handle_login_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('g') {
        let name = app.login_input.value().to_string();
        app.login(&name, true);
        return;
    }
    match app.login_input.handle(key) {
        InputResult::Submit => {
            let name = app.login_input.value().to_string();
            app.login(&name, false);
        }
        InputResult::Cancel => app.should_quit = true,
        InputResult::Continue | InputResult::NextField => {}
    }
}

fn handle_home_key(app: &mut App, key: KeyEvent) {
    let actions = HomeAction::all();
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => {
            app.home_selected = app.home_selected.checked_sub(1).unwrap_or(actions.len() - 1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.home_selected = (app.home_selected + 1) % actions.len();
        }
        KeyCode::Enter => {
            if let Some(action) = actions.get(app.home_selected).copied() {
                app.activate_home(action);
            }
        }
        KeyCode::Char('g') => app.activate_home(HomeAction::GlobalChallenge),
        KeyCode::Char('m') => app.activate_home(HomeAction::MiniChallenge),
        KeyCode::Char('c') => app.open_credit_modal(),
        KeyCode::Char('x') => app.logout(),
        _ => {}
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    let state = app.quiz.as_ref().map(|q| q.state());
    match (state, key.code) {
        (_, KeyCode::Esc) => app.exit_quiz(),
        (Some(QuizState::Presenting), KeyCode::Up | KeyCode::Char('k')) => app.move_quiz_cursor(-1),
        (Some(QuizState::Presenting), KeyCode::Down | KeyCode::Char('j')) => app.move_quiz_cursor(1),
        (Some(QuizState::Presenting), KeyCode::Enter) => {
            app.submit_selected_answer();
        }
        (Some(QuizState::Presenting), KeyCode::Char(ch @ 'a'..='e')) => {
            app.submit_answer(ch as usize - 'a' as usize);
        }
        (Some(QuizState::Revealed), KeyCode::Enter | KeyCode::Char('n')) => app.advance_quiz(),
        _ => {}
    }
}

fn handle_leaderboard_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('s') => {
            app.leaderboard_scope = app.leaderboard_scope.next();
        }
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
            // Three scopes, so two steps forward is one back.
            app.leaderboard_scope = app.leaderboard_scope.next().next();
        }
        KeyCode::Esc | KeyCode::Char('q') => app.go_to(AppScreen::Home),
        _ => {}
    }
}

fn scroll(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.text_scroll = app.text_scroll.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') => app.text_scroll = app.text_scroll.saturating_add(1),
        KeyCode::PageUp => app.text_scroll = app.text_scroll.saturating_sub(10),
        KeyCode::PageDown => app.text_scroll = app.text_scroll.saturating_add(10),
        _ => return false,
    }
    true
}

fn handle_report_key(app: &mut App, key: KeyEvent) {
    if scroll(app, key) {
        return;
    }
    match key.code {
        KeyCode::Char('r') => {
            app.text_scroll = 0;
            app.refresh_report();
        }
        KeyCode::Char('p') => app.go_to(AppScreen::StudyPlan),
        KeyCode::Esc | KeyCode::Char('q') => app.go_to(AppScreen::Home),
        _ => {}
    }
}

fn handle_study_plan_key(app: &mut App, key: KeyEvent) {
    match app.study_plan {
        TextPanel::Idle => match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                app.study_plan_selected = app.study_plan_selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.study_plan_selected = (app.study_plan_selected + 1).min(SUBJECT_AREAS.len() - 1);
            }
            KeyCode::Enter => {
                app.text_scroll = 0;
                app.request_selected_study_plan();
            }
            KeyCode::Esc | KeyCode::Char('q') => app.go_to(AppScreen::Home),
            _ => {}
        },
        TextPanel::Loading => {
            if key.code == KeyCode::Esc {
                app.go_to(AppScreen::Home);
            }
        }
        TextPanel::Ready(_) => {
            if scroll(app, key) {
                return;
            }
            match key.code {
                KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('n') => app.reset_study_plan(),
                KeyCode::Esc | KeyCode::Char('q') => app.go_to(AppScreen::Home),
                _ => {}
            }
        }
    }
}

fn handle_essay_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::F(5) {
        app.open_credit_modal();
        return;
    }
    match app.essay {
        TextPanel::Loading => {
            if key.code == KeyCode::Esc {
                app.go_to(AppScreen::Home);
            }
        }
        TextPanel::Ready(_) => {
            if scroll(app, key) {
                return;
            }
            match key.code {
                KeyCode::Enter | KeyCode::Char('n') => app.reset_essay(),
                KeyCode::Esc | KeyCode::Char('q') => app.go_to(AppScreen::Home),
                _ => {}
            }
        }
        TextPanel::Idle => {
            let input = match app.essay_focus {
                EssayFocus::Theme => &mut app.essay_theme_input,
                EssayFocus::ImagePath => &mut app.essay_path_input,
            };
            match (app.essay_focus, input.handle(key)) {
                (_, InputResult::Cancel) => app.go_to(AppScreen::Home),
                (EssayFocus::Theme, InputResult::Submit | InputResult::NextField) => {
                    app.essay_focus = EssayFocus::ImagePath;
                }
                (EssayFocus::ImagePath, InputResult::NextField) => {
                    app.essay_focus = EssayFocus::Theme;
                }
                (EssayFocus::ImagePath, InputResult::Submit) => {
                    app.text_scroll = 0;
                    app.submit_essay_form();
                }
                (_, InputResult::Continue) => {}
            }
        }
    }
}

// --------------------------------------------------------------- render ---

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let theme = &THEME;
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.colors.bg())),
        area,
    );

    if app.screen == AppScreen::Login || app.user.is_none() {
        render_login(frame, app, theme);
    } else {
        let layout = ScreenLayout::new(area, app.screen.shows_nav_bar());
        render_header(frame, app, theme, layout.header);
        match app.screen {
            AppScreen::Home => render_home(frame, app, theme, layout.main),
            AppScreen::Quiz => render_quiz(frame, app, theme, layout.main),
            AppScreen::Leaderboard => frame.render_widget(
                LeaderboardTable {
                    entries: &app.leaderboard(app.leaderboard_scope),
                    scope: app.leaderboard_scope,
                    theme,
                },
                layout.main,
            ),
            AppScreen::Report => frame.render_widget(
                TextPanelView {
                    title: "Mentor IA",
                    panel: &app.report,
                    idle_hint: "Pressione [r] para gerar seu relatório.",
                    loading_hint: "A IA está analisando seu desempenho...",
                    scroll: app.text_scroll,
                    theme,
                },
                layout.main,
            ),
            AppScreen::StudyPlan => render_study_plan(frame, app, theme, layout.main),
            AppScreen::Essay => render_essay(frame, app, theme, layout.main),
            AppScreen::Login => {}
        }
        if let Some(nav) = layout.nav {
            frame.render_widget(
                NavBar {
                    active: app.screen,
                    theme,
                },
                nav,
            );
        }
        render_footer(frame, app, theme, layout.footer);
    }

    if let Some(modal) = app.modal {
        let popup = centered_rect(50, 60, area);
        frame.render_widget(
            ModalView {
                modal,
                selected_pack: app.credit_pack_selected,
                theme,
            },
            popup,
        );
    }
}

fn input_line<'a>(label: &'a str, input: &'a LineInput, focused: bool, theme: &Theme) -> Line<'a> {
    let colors = &theme.colors;
    let (before, at, after) = input.render_parts();
    let text = Style::default().fg(colors.fg());
    let label_style = if focused {
        Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.muted())
    };
    let mut spans = vec![Span::styled(label, label_style), Span::styled(before, text)];
    if focused {
        let cursor = Style::default().fg(colors.bg()).bg(colors.fg());
        spans.push(Span::styled(at.map_or(" ".to_string(), String::from), cursor));
    } else if let Some(ch) = at {
        spans.push(Span::styled(ch.to_string(), text));
    }
    spans.push(Span::styled(after, text));
    Line::from(spans)
}

fn render_login(frame: &mut ratatui::Frame, app: &App, theme: &Theme) {
    let colors = &theme.colors;
    let area = centered_rect(50, 50, frame.area());
    let block = Block::bordered()
        .border_style(Style::default().fg(colors.border_focused()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "ENEM Quiz",
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Seu mentor de estudos para o ENEM",
            Style::default().fg(colors.muted()),
        )),
        Line::from(""),
        input_line("Seu nome: ", &app.login_input, true, theme),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Entrar   [Ctrl+G] Entrar com Google   [Esc] Sair",
            Style::default().fg(colors.muted()),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false }),
        inner,
    );
}

fn render_header(frame: &mut ratatui::Frame, app: &App, theme: &Theme, area: Rect) {
    let colors = &theme.colors;
    let Some(user) = &app.user else {
        return;
    };
    let plan = match app.free_questions_remaining() {
        None => "👑 Premium".to_string(),
        Some(left) => format!("Grátis: {left} questões restantes"),
    };
    let info = format!(
        " {} | {} XP | Nível {} ({} XP para o próximo) | 🔥 {} | 📝 {} | {}",
        user.name,
        user.score,
        scoring::level_from_score(user.score),
        scoring::xp_to_next_level(user.score),
        user.streak,
        user.essay_credits,
        plan,
    );
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " ENEM Quiz ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info,
            Style::default().fg(colors.header_fg()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()))
    .block(Block::bordered().border_style(Style::default().fg(colors.border())));
    frame.render_widget(header, area);
}

fn render_home(frame: &mut ratatui::Frame, app: &App, theme: &Theme, area: Rect) {
    let colors = &theme.colors;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4)])
        .split(area);

    let summary = match &app.last_outcome {
        Some(outcome) => format!(
            " Último desafio: {} de {} corretas ({:.0}%)",
            outcome.correct,
            outcome.answered,
            outcome.accuracy()
        ),
        None => " Escolha um desafio e comece a pontuar!".to_string(),
    };
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(summary, Style::default().fg(colors.fg()))),
            Line::from(Span::styled(
                format!(" {} questões oficiais no banco", app.bank().len()),
                Style::default().fg(colors.muted()),
            )),
        ]),
        rows[0],
    );

    let is_premium = app.user.as_ref().is_some_and(|u| u.is_premium);
    let menu = Menu::home(app.home_selected, !is_premium, theme);
    frame.render_widget(&menu, rows[1]);
}

fn render_quiz(frame: &mut ratatui::Frame, app: &App, theme: &Theme, area: Rect) {
    if let Some(quiz) = &app.quiz {
        frame.render_widget(QuizCard::new(quiz, app.quiz_cursor, theme), area);
    }
}

fn render_study_plan(frame: &mut ratatui::Frame, app: &App, theme: &Theme, area: Rect) {
    let colors = &theme.colors;
    if app.study_plan != TextPanel::Idle {
        let title = match &app.study_plan_subject {
            Some(subject) => format!("Plano de Estudos: {subject}"),
            None => "Plano de Estudos".to_string(),
        };
        frame.render_widget(
            TextPanelView {
                title: &title,
                panel: &app.study_plan,
                idle_hint: "",
                loading_hint: "Montando seu plano adaptativo de 5 dias...",
                scroll: app.text_scroll,
                theme,
            },
            area,
        );
        return;
    }

    let mut lines = vec![
        Line::from(Span::styled(
            "Escolha a área para o seu plano de 5 dias:",
            Style::default().fg(colors.fg()),
        )),
        Line::from(""),
    ];
    for (i, area_item) in SUBJECT_AREAS.iter().enumerate() {
        let selected = i == app.study_plan_selected;
        let style = if selected {
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.fg())
        };
        let marker = if selected { " > " } else { "   " };
        lines.push(Line::from(Span::styled(
            format!("{marker}{}", area_item.label),
            style,
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::bordered()
                .title(" Plano de Estudos ")
                .border_style(Style::default().fg(colors.border())),
        ),
        area,
    );
}

fn render_essay(frame: &mut ratatui::Frame, app: &App, theme: &Theme, area: Rect) {
    let colors = &theme.colors;
    if app.essay != TextPanel::Idle {
        frame.render_widget(
            TextPanelView {
                title: "Correção de Redação",
                panel: &app.essay,
                idle_hint: "",
                loading_hint: "O corretor está lendo sua redação...",
                scroll: app.text_scroll,
                theme,
            },
            area,
        );
        return;
    }

    let credits = app.user.as_ref().map_or(0, |u| u.essay_credits);
    let lines = vec![
        Line::from(Span::styled(
            format!("Créditos disponíveis: {credits}"),
            Style::default().fg(if credits == 0 {
                colors.warning()
            } else {
                colors.fg()
            }),
        )),
        Line::from(""),
        input_line(
            "Tema: ",
            &app.essay_theme_input,
            app.essay_focus == EssayFocus::Theme,
            theme,
        ),
        Line::from(""),
        input_line(
            "Foto (caminho ou data URL): ",
            &app.essay_path_input,
            app.essay_focus == EssayFocus::ImagePath,
            theme,
        ),
        Line::from(Span::styled(
            if app.essay_path_input.completion_error {
                "Não foi possível listar essa pasta."
            } else {
                ""
            },
            Style::default().fg(colors.incorrect()),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Formatos aceitos: JPG, PNG, WEBP e HEIC.",
            Style::default().fg(colors.muted()),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::bordered()
                .title(" Correção de Redação ")
                .border_style(Style::default().fg(colors.border())),
        ),
        area,
    );
}

fn footer_hints(app: &App) -> Vec<&'static str> {
    match app.screen {
        AppScreen::Login => vec![],
        AppScreen::Home => vec![
            "[↑↓] Navegar",
            "[Enter] Abrir",
            "[g] Desafio Global",
            "[m] Mini Desafio",
            "[c] Créditos",
            "[x] Sair da conta",
            "[q] Fechar",
        ],
        AppScreen::Quiz => match app.quiz.as_ref().map(|q| q.state()) {
            Some(QuizState::Revealed) => vec!["[Enter/n] Próxima", "[Esc] Encerrar desafio"],
            Some(QuizState::Presenting) => vec![
                "[a-e] Responder",
                "[↑↓] Escolher",
                "[Enter] Confirmar",
                "[Esc] Encerrar desafio",
            ],
            _ => vec!["[Esc] Encerrar desafio"],
        },
        AppScreen::Leaderboard => vec!["[Tab/←→] Trocar escopo", "[Esc] Voltar"],
        AppScreen::Report => vec!["[r] Atualizar", "[p] Plano de estudos", "[↑↓] Rolar", "[Esc] Voltar"],
        AppScreen::StudyPlan => match app.study_plan {
            TextPanel::Idle => vec!["[↑↓] Área", "[Enter] Gerar plano", "[Esc] Voltar"],
            TextPanel::Loading => vec!["[Esc] Voltar"],
            TextPanel::Ready(_) => vec!["[↑↓] Rolar", "[Enter] Novo plano", "[Esc] Voltar"],
        },
        AppScreen::Essay => match app.essay {
            TextPanel::Idle => vec![
                "[Tab] Trocar campo",
                "[Enter] Avançar/Enviar",
                "[F5] Comprar créditos",
                "[Esc] Voltar",
            ],
            TextPanel::Loading => vec!["[Esc] Voltar"],
            TextPanel::Ready(_) => vec!["[↑↓] Rolar", "[Enter] Nova redação", "[Esc] Voltar"],
        },
    }
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, theme: &Theme, area: Rect) {
    let colors = &theme.colors;
    let mut lines: Vec<Line> = Vec::new();
    if let Some(notice) = &app.notice {
        lines.push(Line::from(Span::styled(
            format!("  {notice}"),
            Style::default()
                .fg(colors.warning())
                .add_modifier(Modifier::BOLD),
        )));
    }
    for hint in pack_hint_lines(&footer_hints(app), area.width as usize) {
        lines.push(Line::from(Span::styled(hint, Style::default().fg(colors.muted()))));
    }
    frame.render_widget(Paragraph::new(lines), area);
}
