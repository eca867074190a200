use anyhow::Result;
use chrono::{Datelike, Days, NaiveDate};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use kalandar::{Calendar, CalendarHooks, CalendarState, DayCell};

use crate::{theme::ThemeConfig, ui::draw};

// ─── Hooks ────────────────────────────────────────────────────────────────────

/// Records what the calendar reported so the detail panel can show it.
#[derive(Debug, Default)]
pub struct TuiHooks {
    pub status:  String,
    pub renders: u64,
}

impl CalendarHooks for TuiHooks {
    fn on_load(&mut self, state: &CalendarState) {
        tracing::info!("Calendar loaded at {}-{:02}", state.year(), state.month0() + 1);
        if let Some(input) = state.date_fallback() {
            self.status = format!("{input:?} is not a date; showing today");
        }
    }

    fn after_render(&mut self, _state: &CalendarState) {
        self.renders += 1;
    }

    fn on_navigation(&mut self, state: &CalendarState) {
        tracing::debug!("Navigated to {}-{:02}", state.year(), state.month0() + 1);
    }

    fn on_day_click(&mut self, _state: &CalendarState, cell: &DayCell<'_>) {
        self.status = match cell.label() {
            Some(label) if !label.is_empty() => format!("Clicked {}: {label}", cell.key()),
            _ => format!("Clicked {}", cell.key()),
        };
        tracing::info!("{}", self.status);
    }
}

// ─── App state ────────────────────────────────────────────────────────────────

pub struct App {
    pub calendar:  Calendar<TuiHooks>,
    pub theme:     ThemeConfig,
    pub theme_idx: usize,
    /// The day the keyboard cursor is on; always inside the displayed month.
    pub cursor:    NaiveDate,
    pub running:   bool,
}

impl App {
    pub fn new(calendar: Calendar<TuiHooks>, theme: ThemeConfig) -> Self {
        let all    = ThemeConfig::all_themes();
        let idx    = all.iter().position(|t| t.name == theme.name).unwrap_or(0);
        let state  = calendar.state();
        let today  = state.today();
        let cursor = if (today.year(), today.month0()) == (state.year(), state.month0()) {
            today
        } else {
            state.first_of_month().unwrap_or(today)
        };

        Self { calendar, theme, theme_idx: idx, cursor, running: true }
    }

    // ── TUI loop ──────────────────────────────────────────────────────────────

    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend  = CrosstermBackend::new(stdout);
        let mut term = Terminal::new(backend)?;

        let result = self.event_loop(&mut term);

        disable_raw_mode()?;
        execute!(term.backend_mut(), LeaveAlternateScreen)?;
        term.show_cursor()?;
        result
    }

    fn event_loop(&mut self, term: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let tick = std::time::Duration::from_millis(250);
        while self.running {
            term.draw(|f| draw(f, self))?;

            if event::poll(tick)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.on_key(key);
                    }
                }
            }
        }
        Ok(())
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    pub fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Right | KeyCode::Char('l') => self.shift_day(1),
            KeyCode::Left  | KeyCode::Char('h') => self.shift_day(-1),
            KeyCode::Down  | KeyCode::Char('j') => self.shift_day(7),
            KeyCode::Up    | KeyCode::Char('k') => self.shift_day(-7),
            KeyCode::Char(']') | KeyCode::Char('n') => { self.calendar.click_next(); self.sync_cursor(); }
            KeyCode::Char('[') | KeyCode::Char('p') => { self.calendar.click_prev(); self.sync_cursor(); }
            KeyCode::Enter => { self.calendar.click_day(self.cursor); }
            // T (Shift+T) cycles through themes
            KeyCode::Char('T') => {
                let themes = ThemeConfig::all_themes();
                self.theme_idx = (self.theme_idx + 1) % themes.len();
                self.theme     = themes[self.theme_idx].clone();
                if let Err(e) = self.theme.save() {
                    tracing::warn!("Saving theme failed: {e}");
                }
            }
            _ => {}
        }
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Moves the cursor; stepping out of the month uses the navigation
    /// controls and stays put if they are disabled.
    fn shift_day(&mut self, d: i64) {
        let target = if d >= 0 {
            self.cursor.checked_add_days(Days::new(d.unsigned_abs()))
        } else {
            self.cursor.checked_sub_days(Days::new(d.unsigned_abs()))
        };
        let Some(target) = target else { return };

        let state   = self.calendar.state();
        let shown   = (state.year(), state.month0());
        let wanted  = (target.year(), target.month0());
        let arrived = if wanted == shown {
            true
        } else if wanted > shown {
            self.calendar.click_next()
        } else {
            self.calendar.click_prev()
        };
        if arrived {
            self.cursor = target;
        }
    }

    /// Keeps the cursor's day of month after a month change, clamped to
    /// the month's length.
    fn sync_cursor(&mut self) {
        let state = self.calendar.state();
        if (self.cursor.year(), self.cursor.month0()) == (state.year(), state.month0()) {
            return;
        }
        let last = kalandar::calendar::days_in_month(state.year(), state.month0()).unwrap_or(28);
        if let Some(date) = NaiveDate::from_ymd_opt(state.year(), state.month0() + 1, self.cursor.day().min(last)) {
            self.cursor = date;
        }
    }
}
