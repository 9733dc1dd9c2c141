mod app;
mod config;
mod content;
mod deck;
mod event;
mod progress;
mod search;
mod session;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::{App, AppScreen};
use config::Config;
use event::{AppEvent, EventHandler};
use progress::store::ProgressStore;
use session::cursor::Outcome;
use ui::components::card::CardView;
use ui::components::page_bar::PageBar;
use ui::components::progress_bar::DeckProgress;
use ui::components::search_results::SearchResults;
use ui::layout::AppLayout;

#[derive(Parser)]
#[command(name = "flipdeck", version, about = "Terminal flashcard trainer for sentence pairs")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Directory with page1.json, page2.json, ...")]
    data_dir: Option<PathBuf>,

    #[arg(short, long, help = "Page to start studying")]
    page: Option<u32>,

    #[arg(short, long, help = "Start in review mode")]
    review: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = Some(data_dir);
    }

    let events = EventHandler::new(Duration::from_millis(100));
    let store = ProgressStore::new()?;
    let mut app = App::new(config, store, events.sender());

    if let Some(page) = cli.page {
        app.select_page(page);
    }
    if cli.review {
        app.toggle_review();
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

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
            AppEvent::Tick => {}
            AppEvent::Resize(_, _) => {}
            AppEvent::PageCleared {
                generation,
                page,
                cleared,
            } => app.apply_page_cleared(generation, page, cleared),
            AppEvent::SearchDone {
                generation,
                hits,
                warnings,
            } => app.apply_search_done(generation, hits, warnings),
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

    match app.screen {
        AppScreen::Study => handle_study_key(app, key),
        AppScreen::Search => handle_search_key(app, key),
    }
}

fn handle_study_key(app: &mut App, key: KeyEvent) {
    // Reset confirmation takes priority
    if app.confirm_reset {
        match key.code {
            KeyCode::Char('y') => app.reset_progress(),
            KeyCode::Char('n') | KeyCode::Esc => app.cancel_reset(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char(' ') | KeyCode::Enter => app.flip_card(),
        KeyCode::Char('k') => app.classify(Outcome::Known),
        KeyCode::Char('x') => app.classify(Outcome::Unlearned),
        KeyCode::Char('r') => app.toggle_review(),
        KeyCode::Char('R') => app.request_reset(),
        KeyCode::Char('/') => app.open_search(),
        KeyCode::Left | KeyCode::Char('h') => app.select_adjacent_page(false),
        KeyCode::Right | KeyCode::Char('l') => app.select_adjacent_page(true),
        KeyCode::Char(ch) if ch.is_ascii_digit() && ch != '0' => {
            app.select_page(ch.to_digit(10).unwrap_or(0));
        }
        _ => {}
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_search(),
        KeyCode::Enter => app.jump_to_hit(),
        KeyCode::Up => app.search_move(false),
        KeyCode::Down => app.search_move(true),
        KeyCode::Backspace => app.search_backspace(),
        KeyCode::Char(ch) => app.search_input(ch),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Study => render_study(frame, app),
        AppScreen::Search => render_search(frame, app),
    }
}

fn render_study(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let layout = AppLayout::new(frame.area());

    let streak_text = if app.profile.streak_days > 0 {
        format!(" | {} day streak", app.profile.streak_days)
    } else {
        String::new()
    };
    let header_info = format!(
        " {} cards studied | {} known | {} to review{}",
        app.profile.total_classified(),
        app.profile.total_known,
        app.profile.total_unlearned,
        streak_text,
    );
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " flipdeck ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            &*header_info,
            Style::default().fg(colors.hint()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    let page_bar = PageBar::new(
        &app.registry,
        app.current_page,
        app.review_mode,
        &app.cleared,
        app.theme,
    );
    frame.render_widget(page_bar, layout.page_bar);

    render_deck_area(frame, app, layout.main);

    if app.confirm_reset {
        let prompt = Paragraph::new(Line::from(Span::styled(
            " reset all progress? [y/n] ",
            Style::default()
                .fg(colors.error())
                .add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(prompt, layout.status);
    } else if let Some(ref message) = app.status_line {
        let status = Paragraph::new(Line::from(Span::styled(
            format!(" {message} "),
            Style::default().fg(colors.error()),
        )));
        frame.render_widget(status, layout.status);
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        " [space] flip  [k] known  [x] review later  [←/→] page  [r] review  [R] reset  [/] search  [q] quit ",
        Style::default().fg(colors.hint()),
    )));
    frame.render_widget(footer, layout.footer);
}

fn render_deck_area(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let colors = &app.theme.colors;

    if app.session.started_empty() {
        // Nothing to study is not the same state as finished studying
        let message = if app.review_mode {
            "nothing marked for review"
        } else {
            "no cards left on this page"
        };
        let banner = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(colors.hint()),
        )))
        .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(banner, ui::layout::centered_rect(60, 20, area));
        return;
    }

    if app.session.is_complete() {
        let lines = vec![
            Line::from(Span::styled(
                "✔ all cards done",
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "pick another page or press [r] to review",
                Style::default().fg(colors.hint()),
            )),
        ];
        let banner = Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(banner, ui::layout::centered_rect(60, 30, area));
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    if let Ok(item) = app.session.current() {
        let card_area = ui::layout::centered_rect(70, 90, main_layout[0]);
        let card = CardView::new(item, app.card_flipped, app.theme);
        frame.render_widget(card, card_area);
    }

    let progress = DeckProgress::new(app.session.position() + 1, app.session.len(), app.theme);
    frame.render_widget(progress, main_layout[1]);
}

fn render_search(frame: &mut ratatui::Frame, app: &App) {
    let area = ui::layout::centered_rect(70, 80, frame.area());
    let results = SearchResults::new(
        &app.query,
        &app.search_hits,
        app.search_selected,
        app.search_pending,
        app.theme,
    );
    frame.render_widget(results, area);

    let colors = &app.theme.colors;
    let footer_area = AppLayout::new(frame.area()).footer;
    let footer = Paragraph::new(Line::from(Span::styled(
        " [type] search  [↑/↓] select  [Enter] jump to card  [ESC] back ",
        Style::default().fg(colors.hint()),
    )));
    frame.render_widget(footer, footer_area);
}
