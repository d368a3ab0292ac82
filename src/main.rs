mod app;
mod config;
mod content;
mod engine;
mod event;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use app::App;
use content::Catalog;
use engine::View;
use engine::quiz::QuizPhase;
use engine::topic::{Screen, Topic};
use event::{AppEvent, EventHandler};
use ui::components::quiz::QuizOverlay;
use ui::components::topic::TopicScreen;
use ui::layout::{ScreenFrame, centered_rect, pack_hint_lines};

#[derive(Parser)]
#[command(name = "netwise", version, about = "Terminal internet-safety tutor for kids")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(
        long,
        help = "Open on a screen (intro, passwords, behavior, phishing, data, devices, about)"
    )]
    topic: Option<String>,

    #[arg(long, help = "Skip the intro menu and start on the first lesson")]
    skip_intro: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let catalog = Catalog::load()?;
    let mut app = App::new(catalog);

    if cli.skip_intro {
        app.config.skip_intro = true;
    }
    if let Some(theme_name) = cli.theme {
        match ui::theme::Theme::load(&theme_name) {
            Some(theme) => {
                let theme: &'static ui::theme::Theme = Box::leak(Box::new(theme));
                app.theme = theme;
                app.menu.theme = theme;
            }
            None => bail!(
                "unknown theme '{theme_name}' (bundled: {})",
                ui::theme::Theme::available_themes().join(", ")
            ),
        }
    }
    if app.config.skip_intro {
        app.go_to(Screen::Topic(Topic::Passwords));
    }
    if let Some(ref name) = cli.topic {
        match Screen::parse(name) {
            Some(screen) => app.go_to(screen),
            None => bail!(
                "unknown screen '{name}' (expected intro, passwords, behavior, phishing, data, devices or about)"
            ),
        }
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(200));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // An open quiz sees every key first; the screen below it sees none.
    if app.state.active_quiz().is_some() {
        handle_quiz_key(app, key);
        return;
    }

    match app.state.screen() {
        Some(Screen::Intro) => handle_intro_key(app, key),
        Some(Screen::Topic(_)) => handle_topic_key(app, key),
        Some(Screen::About) => handle_about_key(app, key),
        None => {}
    }
}

fn handle_intro_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Char('a') => app.go_to(Screen::About),
        KeyCode::Char(ch @ '1'..='9') => {
            let idx = (ch as u8 - b'1') as usize;
            if let Some(topic) = Topic::ALL.get(idx) {
                app.go_to(Screen::Topic(*topic));
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => match Topic::ALL.get(app.menu.selected) {
            Some(topic) => app.go_to(Screen::Topic(*topic)),
            None => app.go_to(Screen::About),
        },
        _ => {}
    }
}

fn handle_topic_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc => app.go_to(Screen::Intro),
        KeyCode::Left | KeyCode::Char('h') => app.go_prev(),
        KeyCode::Right | KeyCode::Char('l') => app.go_next(),
        KeyCode::Up | KeyCode::Char('k') => app.exercise_cursor_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.exercise_cursor_next(),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_exercise_item(),
        KeyCode::Char('t') => app.open_quiz(),
        KeyCode::Char(ch @ '1'..='9') => {
            let idx = (ch as u8 - b'1') as usize;
            if idx < app.exercise_item_count() {
                app.exercise_cursor = idx;
                app.activate_exercise_item();
            }
        }
        _ => {}
    }
}

fn handle_about_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc | KeyCode::Enter => app.go_to(Screen::Intro),
        KeyCode::Left | KeyCode::Char('h') => app.go_prev(),
        _ => {}
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    let complete = app
        .state
        .active_quiz()
        .map(|(_, session)| session.is_complete())
        .unwrap_or(false);

    if complete {
        match key.code {
            KeyCode::Char('r') => app.retake_quiz(),
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') => app.close_quiz(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.close_quiz(),
        KeyCode::Up | KeyCode::Char('k') => app.quiz_cursor_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.quiz_cursor_next(),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => app.quiz_focus_prev(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => app.quiz_focus_next(),
        KeyCode::Enter | KeyCode::Char(' ') => app.answer_current(app.quiz_cursor),
        KeyCode::Char(ch @ '1'..='9') => {
            let option = (ch as u8 - b'1') as usize;
            app.answer_current(option);
        }
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    Block::default()
        .style(Style::default().bg(app.theme.colors.bg()))
        .render(area, frame.buffer_mut());

    match app.state.view() {
        View::Quiz { .. } => render_quiz(frame, app),
        View::Screen(Screen::Intro) => render_intro(frame, app),
        View::Screen(Screen::Topic(topic)) => render_topic(frame, app, *topic),
        View::Screen(Screen::About) => render_about(frame, app),
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, context: &str) {
    let colors = &app.theme.colors;
    let (done, total) = app.exercises_done();
    let info = format!(" {context} | Exercises {done}/{total}");
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " netwise ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info,
            Style::default().fg(colors.text_dim()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, hints: &[&str]) {
    if !app.config.show_hints {
        return;
    }
    let colors = &app.theme.colors;
    let lines: Vec<Line> = pack_hint_lines(hints, area.width as usize)
        .into_iter()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(colors.text_dim()))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_intro(frame: &mut ratatui::Frame, app: &App) {
    let layout = ScreenFrame::new(frame.area());
    render_header(frame, app, layout.header, &app.catalog.intro.title);

    let menu_area = centered_rect(60, 90, layout.body);
    frame.render_widget(&app.menu, menu_area);

    render_footer(
        frame,
        app,
        layout.footer,
        &[
            "[j/k] Choose",
            "[Enter] Open",
            "[1-5] Lesson",
            "[a] About",
            "[q] Quit",
        ],
    );
}

fn render_topic(frame: &mut ratatui::Frame, app: &App, topic: Topic) {
    let Some(entry) = app.catalog.topic(topic) else {
        return;
    };
    let layout = ScreenFrame::new(frame.area());

    let position = Topic::ALL.iter().position(|t| *t == topic).unwrap_or(0) + 1;
    let context = format!("{} ({position}/{})", entry.title, Topic::ALL.len());
    render_header(frame, app, layout.header, &context);

    let body = TopicScreen {
        entry,
        catalog: &app.catalog,
        exercises: app.state.exercises(),
        cursor: app.exercise_cursor,
        theme: app.theme,
    };
    frame.render_widget(body, layout.body);

    render_footer(
        frame,
        app,
        layout.footer,
        &[
            "[j/k] Select",
            "[Enter] Do it",
            "[t] Quiz",
            "[h/l] Back/Next",
            "[Esc] Home",
        ],
    );
}

fn render_about(frame: &mut ratatui::Frame, app: &App) {
    let about = &app.catalog.about;
    let colors = &app.theme.colors;
    let layout = ScreenFrame::new(frame.area());
    render_header(frame, app, layout.header, &about.title);

    let mut lines: Vec<Line> = vec![Line::from("")];
    for paragraph in &about.paragraphs {
        lines.push(Line::from(Span::styled(
            format!(" {paragraph}"),
            Style::default().fg(colors.fg()),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        format!(" {}", about.goals_lead),
        Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
    )));
    for goal in &about.goals {
        lines.push(Line::from(Span::styled(
            format!("   \u{2713} {goal}"),
            Style::default().fg(colors.success()),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(" {}", about.closing),
        Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD),
    )));

    let block = Block::bordered()
        .title(format!(" {} ", about.title))
        .border_style(Style::default().fg(colors.border()))
        .style(Style::default().bg(colors.bg()));
    let area = centered_rect(70, 90, layout.body);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );

    render_footer(
        frame,
        app,
        layout.footer,
        &["[h] Previous lesson", "[Enter/Esc] Home", "[q] Quit"],
    );
}

fn render_quiz(frame: &mut ratatui::Frame, app: &App) {
    let Some((topic, session)) = app.state.active_quiz() else {
        return;
    };
    let Some(entry) = app.catalog.topic(topic) else {
        return;
    };
    let layout = ScreenFrame::new(frame.area());
    render_header(frame, app, layout.header, &format!("Quiz: {}", entry.title));

    let popup = centered_rect(70, 95, layout.body);
    frame.render_widget(
        QuizOverlay {
            title: &entry.title,
            questions: app.catalog.questions(topic),
            session,
            focus: app.quiz_focus,
            cursor: app.quiz_cursor,
            theme: app.theme,
        },
        popup,
    );

    let hints: &[&str] = match session.phase() {
        QuizPhase::Complete => {
            if session.score(app.catalog.questions(topic)) < 100 {
                &["[r] Retake", "[Enter/Esc] Back to lesson"]
            } else {
                &["[Enter/Esc] Back to lesson"]
            }
        }
        QuizPhase::Empty | QuizPhase::InProgress => &[
            "[j/k] Option",
            "[Enter] Answer",
            "[1-4] Quick answer",
            "[Tab/h/l] Question",
            "[Esc] Close",
        ],
    };
    render_footer(frame, app, layout.footer, hints);
}
