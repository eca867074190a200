//! Lifecycle hooks and the render pass that drives them.
//!
//! [`build_grid`] stays pure; [`Calendar`] owns the state, the resolved
//! config and a [`CalendarHooks`] implementation, and fires the hooks around
//! each render in a fixed order:
//!
//! ```text
//! Calendar::new     render → on_load
//! render            before_render → on_clear → on_day_render (per cell, ascending) → after_render
//! click_prev/next   [control enabled?] → move → render (if moved) → on_navigation
//! click_day         on_day_click (cell in the current window only)
//! ```

use chrono::NaiveDate;

use crate::calendar::{build_grid, weeks, CalendarState, DateInput, DayCell};
use crate::config::{CalendarConfig, CalendarOptions};

/// Host callbacks. Every method defaults to doing nothing.
pub trait CalendarHooks {
    fn on_load(&mut self, _state: &CalendarState) {}
    fn before_render(&mut self, _state: &CalendarState) {}
    /// After the previous render has been discarded.
    fn on_clear(&mut self, _state: &CalendarState) {}
    fn on_day_render(&mut self, _state: &CalendarState, _cell: &DayCell<'_>) {}
    fn after_render(&mut self, _state: &CalendarState) {}
    /// After a navigation control was used, whether or not the month changed.
    fn on_navigation(&mut self, _state: &CalendarState) {}
    fn on_day_click(&mut self, _state: &CalendarState, _cell: &DayCell<'_>) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl CalendarHooks for NoHooks {}

// ─── Rendered view ────────────────────────────────────────────────────────────

/// Everything a host needs to draw one month.
#[derive(Debug, Clone)]
pub struct MonthView<'a> {
    pub month_name:  &'a str,
    pub year:        i32,
    pub day_names:   &'a [String],
    pub can_go_prev: bool,
    pub can_go_next: bool,
    pub cells:       Vec<DayCell<'a>>,
}

impl<'a> MonthView<'a> {
    pub fn title(&self) -> String {
        format!("{} {}", self.month_name, self.year)
    }

    pub fn weeks(&self) -> std::slice::Chunks<'_, DayCell<'a>> {
        weeks(&self.cells)
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell<'a>> {
        self.cells.iter().find(|c| c.date == date)
    }
}

fn month_view<'a>(state: &CalendarState, config: &'a CalendarConfig) -> MonthView<'a> {
    MonthView {
        month_name:  config.month_name(state.month0()),
        year:        state.year(),
        day_names:   config.day_names(),
        can_go_prev: state.can_go_prev(),
        can_go_next: state.can_go_next(),
        cells:       build_grid(state, config),
    }
}

// ─── Calendar ─────────────────────────────────────────────────────────────────

pub struct Calendar<H: CalendarHooks = NoHooks> {
    state:  CalendarState,
    config: CalendarConfig,
    hooks:  H,
}

impl<H: CalendarHooks> Calendar<H> {
    /// Builds the state, renders once, then fires `on_load`.
    pub fn new(input: impl Into<DateInput>, config: CalendarConfig, hooks: H) -> Self {
        let state = CalendarState::initialize(input, &config);
        Self::start(state, config, hooks)
    }

    pub fn with_today(
        input: impl Into<DateInput>,
        config: CalendarConfig,
        hooks: H,
        today: NaiveDate,
    ) -> Self {
        let state = CalendarState::with_today(input, &config, today);
        Self::start(state, config, hooks)
    }

    pub fn from_options(options: &CalendarOptions, hooks: H) -> Self {
        Self::new(options.date_input(), CalendarConfig::resolve(options), hooks)
    }

    fn start(state: CalendarState, config: CalendarConfig, hooks: H) -> Self {
        let mut calendar = Self { state, config, hooks };
        calendar.render();
        calendar.hooks.on_load(&calendar.state);
        calendar
    }

    pub fn state(&self)  -> &CalendarState  { &self.state }
    pub fn config(&self) -> &CalendarConfig { &self.config }
    pub fn hooks(&self)  -> &H              { &self.hooks }
    pub fn hooks_mut(&mut self) -> &mut H   { &mut self.hooks }

    /// The current month without firing any hooks.
    pub fn view(&self) -> MonthView<'_> {
        month_view(&self.state, &self.config)
    }

    /// Rebuilds the month and fires the render hooks.
    pub fn render(&mut self) -> MonthView<'_> {
        let Self { state, config, hooks } = self;
        let (state, config): (&CalendarState, &CalendarConfig) = (state, config);

        hooks.before_render(state);
        hooks.on_clear(state);
        let view = month_view(state, config);
        for cell in &view.cells {
            hooks.on_day_render(state, cell);
        }
        hooks.after_render(state);
        view
    }

    /// Advances one month and re-renders. Not gated by `max_year`.
    pub fn next_month(&mut self) -> bool {
        let moved = self.state.next_month();
        if moved {
            self.render();
        }
        moved
    }

    /// Goes back one month and re-renders, unless blocked by `min_year`.
    pub fn prev_month(&mut self) -> bool {
        let moved = self.state.prev_month();
        if moved {
            self.render();
        }
        moved
    }

    /// The "previous" control. Does nothing while it is disabled.
    pub fn click_prev(&mut self) -> bool {
        if !self.state.can_go_prev() {
            return false;
        }
        let moved = self.prev_month();
        tracing::debug!(year = self.state.year(), month0 = self.state.month0(), moved, "prev");
        self.hooks.on_navigation(&self.state);
        moved
    }

    /// The "next" control. Disabled in December of `max_year`.
    pub fn click_next(&mut self) -> bool {
        if !self.state.can_go_next() {
            return false;
        }
        let moved = self.next_month();
        tracing::debug!(year = self.state.year(), month0 = self.state.month0(), moved, "next");
        self.hooks.on_navigation(&self.state);
        moved
    }

    /// Fires `on_day_click` for a displayed day.
    pub fn click_day(&mut self, date: NaiveDate) -> bool {
        let Self { state, config, hooks } = self;
        let cells = build_grid(state, config);
        match cells.iter().find(|c| c.date == date) {
            Some(cell) => {
                hooks.on_day_click(state, cell);
                true
            }
            None => false,
        }
    }
}
