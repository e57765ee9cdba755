//! Interactive table view
//!
//! Renders the current page of the merged table full-screen, with the
//! time-series column drawn as an inline sparkline and a page selector in the
//! footer. Each interaction triggers a full, blocking re-run of the merge →
//! view → paginate pipeline from the in-memory tables; the only state that
//! outlives a render is the page index held in [`Session`].

use crate::{
    config::Config,
    merge::{self, MergedRow},
    page,
    source::{self, SourceTables},
    theme::Theme,
    view::ViewState,
    Result,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::{io, sync::Arc};

/// Block glyphs used for the inline time-series sparklines
const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Session state fed back by the presentation layer
///
/// Holds the one piece of state that persists across interactions: the page
/// index chosen through the page selector. `None` until the user first
/// navigates, which page selection treats as page 0. Owned by the view and
/// passed into page selection by reference, never kept in a global.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Session {
    selected_page: Option<usize>,
}
//
impl Session {
    /// Page index the selector currently points at
    pub fn current(&self) -> usize {
        self.selected_page.unwrap_or(0)
    }

    /// Persist a new page selection
    pub fn select(&mut self, index: usize) {
        self.selected_page = Some(index);
    }

    /// Selection handed to page selection, `None` before the first navigation
    pub fn selection(&self) -> Option<usize> {
        self.selected_page
    }
}

/// Interactive viewer state
struct App {
    config: Arc<Config>,
    theme: Theme,
    tables: SourceTables,
    view: ViewState,
    session: Session,
    should_quit: bool,
}
//
impl App {
    fn new(config: Arc<Config>, theme: Theme, tables: SourceTables) -> Self {
        let view = config.initial_view;
        Self {
            config,
            theme,
            tables,
            view,
            session: Session::default(),
            should_quit: false,
        }
    }

    /// Re-run the merge and view stages for the current settings
    fn current_rows(&self) -> Vec<MergedRow> {
        self.view
            .apply(merge::merge(&self.tables.stats, &self.tables.yearly))
    }

    /// React to a key press, given the current page count
    fn handle_key(&mut self, code: KeyCode, page_count: usize) -> Result<()> {
        let last_page = page_count.saturating_sub(1);
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Left => self.session.select(self.session.current().saturating_sub(1)),
            KeyCode::Right => self
                .session
                .select((self.session.current() + 1).min(last_page)),
            KeyCode::Home => self.session.select(0),
            KeyCode::End => self.session.select(last_page),
            KeyCode::Char('s') => {
                if let ViewState::Sort { column, .. } = &mut self.view {
                    *column = column.next();
                }
            }
            KeyCode::Char('o') => {
                if let ViewState::Sort { order, .. } = &mut self.view {
                    *order = order.toggled();
                }
            }
            KeyCode::Char('c') => {
                if let ViewState::Category { choice } = &mut self.view {
                    *choice = choice.next();
                }
            }
            KeyCode::Char('r') => {
                // Full reload from disk; the page selection deliberately
                // survives and gets clamped on the next render
                self.tables = source::load_all(&self.config)?;
            }
            _ => {}
        }
        Ok(())
    }
}

/// Run the interactive table view until the user quits
pub fn run(config: Arc<Config>, theme: Theme, tables: SourceTables) -> Result<()> {
    // Set up the terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Panic hook to restore the terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    let mut app = App::new(config, theme, tables);
    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    result
}

/// Blocking render/react loop, one pipeline run per interaction
fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        let rows = app.current_rows();
        let pages = page::paginate(&rows, app.config.page_size);
        // The persisted selection can point beyond the last page after a sort
        // or filter change shrank the table; clamp instead of failing
        let (current, page_rows) = match page::select(&pages, app.session.selection()) {
            Ok(page_rows) => (app.session.current(), page_rows),
            Err(err) => {
                log::debug!("{err}, clamping to the last valid page");
                page::select_clamped(&pages, app.session.selection())
            }
        };

        terminal.draw(|frame| draw(frame, app, page_rows, current, pages.len()))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key.code, pages.len())?;
            }
        }
        if app.should_quit {
            return Ok(());
        }
    }
}

/// Draw the whole view: title bar, table page, page selector
fn draw(frame: &mut Frame, app: &App, page_rows: &[MergedRow], current: usize, page_count: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title and view settings
            Constraint::Min(4),    // Table page
            Constraint::Length(3), // Page selector
        ])
        .split(frame.area());

    draw_title(frame, app, chunks[0]);
    draw_table(frame, app, page_rows, chunks[1]);
    draw_page_selector(frame, app, chunks[2], current, page_count);
}

/// Title bar with the page name and the active view settings
fn draw_title(frame: &mut Frame, app: &App, area: Rect) {
    let settings = match app.view {
        ViewState::Sort { column, order } => {
            format!("Sort By: {}   Order: {}", column.name(), order.name())
        }
        ViewState::Category { choice } => format!("Korpus: {}", choice.name()),
    };
    let title = Line::from(vec![
        Span::styled(
            app.config.variant.title(),
            Style::default()
                .fg(app.theme.header)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(settings, Style::default().fg(app.theme.accent)),
    ]);
    frame.render_widget(
        Paragraph::new(title).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

/// The current page of the merged table
fn draw_table(frame: &mut Frame, app: &App, page_rows: &[MergedRow], area: Rect) {
    let show_index = app.view.shows_index();
    let header_style = Style::default()
        .fg(app.theme.header)
        .add_modifier(Modifier::BOLD);

    let mut header_cells = Vec::with_capacity(9);
    let mut widths = Vec::with_capacity(9);
    if show_index {
        header_cells.push("Lp.");
        widths.push(Constraint::Length(6));
    }
    header_cells.extend([
        "Słowo kluczowe",
        "Log Likelihood",
        "Wystąpienia (A)",
        "Na 1000 słów (A)",
        "Wystąpienia (B)",
        "Na 1000 słów (B)",
        "Korpus",
        "Occurrences Over Time",
    ]);
    widths.extend([
        Constraint::Fill(1),
        Constraint::Length(14),
        Constraint::Length(15),
        Constraint::Length(16),
        Constraint::Length(15),
        Constraint::Length(16),
        Constraint::Length(6),
        Constraint::Length(34),
    ]);

    let rows = page_rows.iter().map(|row| {
        let mut cells = Vec::with_capacity(9);
        if show_index {
            cells.push(Cell::from(
                row.index.map_or_else(String::new, |idx| idx.to_string()),
            ));
        }
        cells.push(
            Cell::from(row.keyword.to_string()).style(Style::default().fg(app.theme.accent)),
        );
        cells.push(Cell::from(format!("{:.2}", row.log_likelihood)));
        cells.push(Cell::from(format!("{:.0}", row.occurrences_a)));
        cells.push(Cell::from(format!("{:.3}", row.occurrences_per_1000_a)));
        cells.push(Cell::from(format!("{:.0}", row.occurrences_b)));
        cells.push(Cell::from(format!("{:.3}", row.occurrences_per_1000_b)));
        cells.push(Cell::from(row.corpus.label().to_string()));
        if row.occurrences_over_time.is_empty() {
            cells.push(Cell::from("—").style(Style::default().fg(app.theme.dim)));
        } else {
            cells.push(Cell::from(sparkline(&row.occurrences_over_time)));
        }
        Row::new(cells)
    });

    let table = Table::new(rows, widths)
        .header(Row::new(header_cells).style(header_style))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(table, area);
}

/// Footer page selector with key hints
fn draw_page_selector(frame: &mut Frame, app: &App, area: Rect, current: usize, page_count: usize) {
    let hints = match app.view {
        ViewState::Sort { .. } => "←/→ page  Home/End  s column  o order  r reload  q quit",
        ViewState::Category { .. } => "←/→ page  Home/End  c corpus  r reload  q quit",
    };
    let selector = Line::from(vec![
        Span::styled(
            format!("Strona {} / {}", current + 1, page_count.max(1)),
            Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(hints, Style::default().fg(app.theme.dim)),
    ]);
    frame.render_widget(
        Paragraph::new(selector).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

/// Render a time series as a line of block glyphs
///
/// Each value is clamped to the [0, 1] display range; the underlying data is
/// left untouched.
fn sparkline(series: &[f64]) -> String {
    series
        .iter()
        .map(|&value| {
            let clamped = value.clamp(0.0, 1.0);
            let level = (clamped * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
            SPARK_LEVELS[level]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparkline_clamps_to_the_display_range() {
        assert_eq!(sparkline(&[0.0, 1.0]), "▁█");
        // Out-of-range values saturate instead of distorting the scale
        assert_eq!(sparkline(&[-3.0, 42.0]), "▁█");
    }

    #[test]
    fn sparkline_levels_follow_the_values() {
        let glyphs = sparkline(&[0.0, 0.15, 0.5, 0.85, 1.0]);
        assert_eq!(glyphs, "▁▂▅▇█");
    }

    #[test]
    fn fresh_session_points_at_page_zero() {
        let session = Session::default();
        assert_eq!(session.selection(), None);
        assert_eq!(session.current(), 0);
    }

    #[test]
    fn session_persists_the_latest_selection() {
        let mut session = Session::default();
        session.select(7);
        assert_eq!(session.selection(), Some(7));
        assert_eq!(session.current(), 7);
    }
}
