//! Ratatui-based interface wired to the user search session.

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{ExecutableCommand, execute};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use std::io;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::search::gateway::SearchGateway;
use crate::search::worker::SearchWorker;
use crate::session::{EditMode, SearchSession, SearchTicket};
use crate::ui::components::theme::ThemePalette;
use crate::ui::components::widgets::{
    empty_state, header_bar, notice_popup, search_bar, user_row,
};
use crate::ui::data::render_plain;
use crate::ui::shortcuts;

/// What a key press asks the loop to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Screen-local state that is not part of the search session.
struct Screen {
    query: String,
    cursor: ListState,
    theme_dark: bool,
    show_help: bool,
    help_scroll: u16,
    tick: usize,
    status: String,
}

impl Screen {
    fn new() -> Self {
        Self {
            query: String::new(),
            cursor: ListState::default(),
            theme_dark: true,
            show_help: false,
            help_scroll: 0,
            tick: 0,
            status: "Type to search (F1 help, Esc/F10 quit)".to_string(),
        }
    }

    fn palette(&self) -> ThemePalette {
        if self.theme_dark {
            ThemePalette::dark()
        } else {
            ThemePalette::light()
        }
    }

    /// Keep the cursor on a real row after the list changed.
    fn clamp_cursor(&mut self, len: usize) {
        match (len, self.cursor.selected()) {
            (0, _) => self.cursor.select(None),
            (_, None) => self.cursor.select(Some(0)),
            (n, Some(i)) if i >= n => self.cursor.select(Some(n - 1)),
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        let cur = self.cursor.selected().unwrap_or(0) as isize;
        let next = (cur + delta).clamp(0, len as isize - 1);
        self.cursor.select(Some(next as usize));
    }
}

fn help_lines(palette: ThemePalette) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    let add_section = |title: &str, items: &[String]| -> Vec<Line<'static>> {
        let mut v = Vec::new();
        v.push(Line::from(Span::styled(title.to_string(), palette.title())));
        for item in items {
            v.push(Line::from(format!("  {item}")));
        }
        v.push(Line::from(""));
        v
    };

    lines.extend(add_section(
        "Search",
        &[
            "type to search; results refresh once typing pauses".to_string(),
            "typing still works in edit mode; a new result set ends editing".to_string(),
        ],
    ));
    lines.extend(add_section(
        "Browsing",
        &[
            format!(
                "{} move; {}/{} jump first/last",
                shortcuts::MOVE,
                shortcuts::JUMP_TOP,
                shortcuts::JUMP_BOTTOM
            ),
            format!("{} edit mode (needs results)", shortcuts::EDIT),
            format!("{} open profile in browser", shortcuts::OPEN_PROFILE),
        ],
    ));
    lines.extend(add_section(
        "Editing",
        &[
            format!("{} toggle row", shortcuts::TOGGLE_SELECT),
            format!("{} select all / none", shortcuts::SELECT_ALL),
            format!("{} duplicate selected", shortcuts::DUPLICATE),
            format!("{} delete selected", shortcuts::DELETE),
            format!("{}/Esc done", shortcuts::DONE),
        ],
    ));
    lines.extend(add_section(
        "General",
        &[
            format!("{} toggle this help", shortcuts::HELP),
            format!("{} theme: dark/light", shortcuts::THEME),
            format!("{} quit", shortcuts::QUIT),
        ],
    ));
    lines
}

fn render_help_overlay(frame: &mut Frame, palette: ThemePalette, scroll: u16) {
    let popup_area = centered_rect(70, 70, frame.area());
    let block = Block::default()
        .title(Span::styled("Help / Shortcuts", palette.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent));

    frame.render_widget(ratatui::widgets::Clear, popup_area);
    frame.render_widget(
        Paragraph::new(help_lines(palette))
            .block(block)
            .wrap(Wrap { trim: true })
            .scroll((scroll, 0)),
        popup_area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub fn footer_legend(mode: EditMode) -> &'static str {
    match mode {
        EditMode::Browsing => {
            "F1 help | Ctrl+E edit | Ctrl+O open profile | Up/Down move | F2 theme | Esc/F10 quit"
        }
        EditMode::Editing => {
            "Space toggle | Ctrl+A all/none | Ctrl+D duplicate | Del delete | Enter/Esc done"
        }
    }
}

fn draw(frame: &mut Frame, session: &SearchSession, screen: &mut Screen) {
    let palette = screen.palette();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // search bar
            Constraint::Length(2), // edit header
            Constraint::Min(0),    // results
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    frame.render_widget(
        search_bar(&screen.query, palette, session.is_loading(), screen.tick),
        chunks[0],
    );
    frame.render_widget(header_bar(session.header(), palette), chunks[1]);

    let rows: Vec<ListItem> = session
        .rows()
        .enumerate()
        .map(|(idx, row)| user_row(row, idx, palette))
        .collect();
    if rows.is_empty() {
        let area = centered_rect(100, 30, chunks[2]);
        frame.render_widget(
            empty_state(session.empty_state(), palette, screen.tick),
            area,
        );
    } else {
        let list = List::new(rows)
            .block(Block::default().borders(Borders::NONE))
            .highlight_style(palette.highlight_style())
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, chunks[2], &mut screen.cursor);
    }

    let footer = Line::from(vec![
        Span::styled(screen.status.clone(), palette.hint_style()),
        Span::raw("  "),
        Span::styled(footer_legend(session.mode()), palette.hint_style()),
    ]);
    frame.render_widget(Paragraph::new(footer), chunks[3]);

    if screen.show_help {
        render_help_overlay(frame, palette, screen.help_scroll);
    }
    if let Some(notice) = session.notice() {
        let area = centered_rect(50, 25, frame.area());
        frame.render_widget(ratatui::widgets::Clear, area);
        frame.render_widget(notice_popup(notice, palette), area);
    }
}

fn handle_key(
    key: KeyEvent,
    session: &mut SearchSession,
    screen: &mut Screen,
    now: Instant,
) -> Flow {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        return Flow::Quit;
    }

    // Modal notice swallows everything until dismissed.
    if session.notice().is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            session.dismiss_notice();
        }
        return Flow::Continue;
    }

    if screen.show_help {
        match key.code {
            KeyCode::F(1) | KeyCode::Esc => {
                screen.show_help = false;
                screen.help_scroll = 0;
            }
            KeyCode::Down => screen.help_scroll = screen.help_scroll.saturating_add(1),
            KeyCode::Up => screen.help_scroll = screen.help_scroll.saturating_sub(1),
            _ => {}
        }
        return Flow::Continue;
    }

    let len = session.items().len();
    match key.code {
        KeyCode::F(10) => return Flow::Quit,
        KeyCode::F(1) => {
            screen.show_help = true;
            return Flow::Continue;
        }
        KeyCode::F(2) => {
            screen.theme_dark = !screen.theme_dark;
            return Flow::Continue;
        }
        KeyCode::Up => screen.move_cursor(-1, len),
        KeyCode::Down => screen.move_cursor(1, len),
        KeyCode::Home => screen.move_cursor(-(len as isize), len),
        KeyCode::End => screen.move_cursor(len as isize, len),
        _ => {}
    }

    match session.mode() {
        EditMode::Browsing => match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('e') if ctrl => {
                if session.enter_edit_mode() {
                    screen.status = "Editing".to_string();
                } else {
                    screen.status = "Nothing to edit yet".to_string();
                }
            }
            KeyCode::Char('o') if ctrl => {
                let url = screen
                    .cursor
                    .selected()
                    .and_then(|i| session.items().get(i))
                    .map(|u| u.html_url.clone());
                if let Some(url) = url.filter(|u| !u.is_empty()) {
                    screen.status = match open_in_browser(&url) {
                        Ok(()) => format!("Opened {url}"),
                        Err(e) => {
                            tracing::warn!("open profile failed: {e}");
                            format!("Could not open {url}")
                        }
                    };
                }
            }
            KeyCode::Backspace => {
                screen.query.pop();
                session.input(&screen.query, now);
            }
            KeyCode::Char(c) if !ctrl => {
                screen.query.push(c);
                session.input(&screen.query, now);
            }
            _ => {}
        },
        EditMode::Editing => match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                session.done();
                screen.status = "Done editing".to_string();
            }
            KeyCode::Char(' ') => {
                let id = screen
                    .cursor
                    .selected()
                    .and_then(|i| session.items().get(i))
                    .map(|u| u.id.clone());
                if let Some(id) = id {
                    session.toggle(&id);
                }
            }
            KeyCode::Char('a') if ctrl => session.toggle_all(),
            KeyCode::Char('d') if ctrl => {
                let created = session.duplicate_selected();
                screen.status = format!("Duplicated {} item(s)", created.len());
            }
            KeyCode::Delete => {
                let removed = session.delete_selected();
                screen.status = format!("Deleted {removed} item(s)");
            }
            // Space is bound to toggle; every other key keeps editing the query.
            KeyCode::Backspace => {
                screen.query.pop();
                session.input(&screen.query, now);
            }
            KeyCode::Char(c) if !ctrl => {
                screen.query.push(c);
                session.input(&screen.query, now);
            }
            _ => {}
        },
    }
    screen.clamp_cursor(session.items().len());
    Flow::Continue
}

/// Commit a settled query and hand it to the worker.
fn pump_debounce(session: &mut SearchSession, worker: &SearchWorker, now: Instant) -> bool {
    let Some(query) = session.poll_debounce(now) else {
        return false;
    };
    match session.begin_search(&query) {
        SearchTicket::Cleared => {}
        SearchTicket::Issued { seq, query } => worker.dispatch(seq, query),
    }
    true
}

fn drain_outcomes(session: &mut SearchSession, worker: &SearchWorker) -> bool {
    let mut changed = false;
    while let Ok(outcome) = worker.outcomes().try_recv() {
        session.complete_search(outcome.seq, outcome.result);
        changed = true;
    }
    changed
}

pub fn run_tui(cfg: &Config, once: bool, initial_query: Option<String>) -> Result<()> {
    let gateway = SearchGateway::from_config(cfg)?;
    tracing::info!(endpoint = gateway.endpoint(), "tui starting");
    let worker = SearchWorker::new(gateway);
    let mut session = SearchSession::new(cfg.debounce());
    let mut screen = Screen::new();
    if let Some(q) = initial_query {
        screen.query = q;
        session.input(&screen.query, Instant::now());
    }

    let mut stdout = io::stdout();
    enable_raw_mode().context("enabling raw mode")?;
    stdout
        .execute(EnterAlternateScreen)
        .context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(80);
    let mut needs_draw = true;

    let result = (|| -> Result<()> {
        loop {
            if needs_draw {
                terminal.draw(|f| draw(f, &session, &mut screen))?;
                needs_draw = false;
                if once {
                    return Ok(());
                }
            }

            let now = Instant::now();
            let timeout = session
                .debounce_deadline()
                .map(|d| d.saturating_duration_since(now))
                .unwrap_or(tick_rate)
                .min(tick_rate);

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if handle_key(key, &mut session, &mut screen, Instant::now())
                            == Flow::Quit
                        {
                            return Ok(());
                        }
                        needs_draw = true;
                    }
                    Event::Resize(..) => needs_draw = true,
                    _ => {}
                }
            }

            let now = Instant::now();
            if pump_debounce(&mut session, &worker, now) {
                needs_draw = true;
            }
            if drain_outcomes(&mut session, &worker) {
                screen.clamp_cursor(session.items().len());
                screen.status = match session.committed_query() {
                    "" => "Type to search (F1 help, Esc/F10 quit)".to_string(),
                    q => format!("{} result(s) for \"{q}\"", session.items().len()),
                };
                needs_draw = true;
            }
            if session.is_loading() {
                screen.tick = screen.tick.wrapping_add(1);
                needs_draw = true;
            }
        }
    })();

    session.close();
    teardown_terminal()?;
    result
}

/// Non-interactive pass: debounce the query, run it once, print the frame
/// as plain text.
pub fn run_tui_headless(
    cfg: &Config,
    query: Option<&str>,
    out: &mut impl io::Write,
) -> Result<()> {
    let gateway = SearchGateway::from_config(cfg)?;
    let mut session = SearchSession::new(cfg.debounce());

    if let Some(q) = query {
        let t0 = Instant::now();
        session.input(q, t0);
        if let Some(committed) = session.poll_debounce(t0 + session.debounce_delay()) {
            session.search_now(&gateway, &committed);
        }
    }
    write!(out, "{}", render_plain(&session))?;
    session.close();
    Ok(())
}

fn teardown_terminal() -> Result<()> {
    let mut stdout = io::stdout();
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;
    Ok(())
}

/// Open a URL in the system's default browser
pub fn open_in_browser(url: &str) -> io::Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", url])
            .spawn()?;
    }
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }
    Ok(())
}
