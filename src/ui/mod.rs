use chrono::Datelike;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::Title, Block, Borders, Paragraph, Wrap},
    Frame,
};

use kalandar::{DayCell, MonthView};

use crate::app::App;
use crate::theme::ThemeConfig;

/// Width of one day cell, e.g. `" 29 "`.
const CELL_WIDTH: u16 = 4;
/// Seven cells plus the two border columns.
pub const CALENDAR_WIDTH: u16 = CELL_WIDTH * 7 + 2;

// ─── Root draw ────────────────────────────────────────────────────────────────

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let t    = &app.theme;
    let view = app.calendar.view();

    // Fill background
    f.render_widget(
        Block::default().style(Style::default().bg(t.bg()).fg(t.fg())),
        area,
    );

    // Layout: [ content | status_bar(1) ]
    let root = Layout::default().direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)]).split(area);

    // Content: [ calendar | day detail ]
    let cols = Layout::default().direction(Direction::Horizontal)
        .constraints([Constraint::Length(CALENDAR_WIDTH), Constraint::Min(0)]).split(root[0]);

    draw_calendar(f, app, &view, cols[0]);
    draw_detail(f, app, &view, cols[1]);
    draw_statusbar(f, app, root[1]);
}

// ─── Calendar ─────────────────────────────────────────────────────────────────

fn draw_calendar(f: &mut Frame, app: &App, view: &MonthView<'_>, area: Rect) {
    let t     = &app.theme;
    let arrow = |enabled: bool, s: &'static str| {
        let fg = if enabled { t.accent() } else { t.fg_dim() };
        Span::styled(s, Style::default().fg(fg))
    };
    let title = Line::from(vec![
        arrow(view.can_go_prev, " ‹ "),
        Span::styled(view.title(), Style::default().fg(t.accent()).add_modifier(Modifier::BOLD)),
        arrow(view.can_go_next, " › "),
    ]);

    let block = Block::default()
        .title(Title::from(title))
        .borders(Borders::ALL)
        .border_type(t.border_type())
        .border_style(Style::default().fg(t.border_active()))
        .style(Style::default().bg(t.bg()));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = vec![];

    // Header row: Sun Mon Tu ... (Sunday first, weekends coloured)
    let hdrs: Vec<Span> = view.day_names.iter().enumerate().map(|(i, d)| {
        let style = if i == 0 || i == 6 {
            Style::default().fg(t.weekend_color()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(t.fg_dim()).add_modifier(Modifier::BOLD)
        };
        Span::styled(format!("{:^w$}", d, w = CELL_WIDTH as usize), style)
    }).collect();
    lines.push(Line::from(hdrs));
    lines.push(Line::from(Span::styled(
        "─".repeat(inner.width as usize),
        Style::default().fg(t.border()),
    )));

    for week in view.weeks() {
        let spans: Vec<Span> = week.iter().map(|cell| {
            Span::styled(
                format!(" {:2} ", cell.date.day()),
                cell_style(t, cell, cell.date == app.cursor),
            )
        }).collect();
        lines.push(Line::from(spans));
    }

    f.render_widget(
        Paragraph::new(lines).style(Style::default().bg(t.bg())).alignment(Alignment::Left),
        inner,
    );
}

/// Cursor beats today, today beats highlight colours, which beat fill and
/// weekend colouring.
fn cell_style(t: &ThemeConfig, cell: &DayCell<'_>, under_cursor: bool) -> Style {
    let mut style = if under_cursor {
        let (bg, fg) = t.cursor_highlight();
        Style::default().bg(bg).fg(fg).add_modifier(Modifier::BOLD)
    } else if cell.is_today {
        let (bg, fg) = t.today_highlight();
        Style::default().bg(bg).fg(fg).add_modifier(Modifier::BOLD)
    } else if let Some(color) = cell.highlight.and_then(|h| t.class_color(h.classes())) {
        Style::default().fg(color)
    } else if cell.is_fill {
        Style::default().fg(t.fill_color())
    } else if cell.is_weekend {
        Style::default().fg(t.weekend_color())
    } else {
        Style::default().fg(t.fg())
    };
    if cell.highlight.is_some_and(|h| h.has_label()) {
        style = style.add_modifier(Modifier::UNDERLINED).underline_color(t.label_color());
    }
    if cell.is_fill {
        style = style.add_modifier(Modifier::DIM);
    }
    style
}

// ─── Day detail ───────────────────────────────────────────────────────────────

fn draw_detail(f: &mut Frame, app: &App, view: &MonthView<'_>, area: Rect) {
    let t     = &app.theme;
    let title = Line::from(Span::styled(
        format!(" {} ", app.cursor.format("%A, %B %-d %Y")),
        Style::default().fg(t.accent()),
    ));
    let block = Block::default()
        .title(Title::from(title))
        .borders(Borders::ALL)
        .border_type(t.border_type())
        .border_style(Style::default().fg(t.border()))
        .style(Style::default().bg(t.bg()));

    let dim = Style::default().fg(t.fg_dim());
    let fg  = Style::default().fg(t.fg());

    let mut lines = vec![Line::from("")];
    match view.cell(app.cursor) {
        Some(cell) => {
            let tags = cell.tags();
            lines.push(Line::from(vec![
                Span::styled("  Key    ", dim),
                Span::styled(cell.key(), fg),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  Tags   ", dim),
                Span::styled(if tags.is_empty() { "-".to_owned() } else { tags.join(" ") }, fg),
            ]));
            if let Some(label) = cell.label() {
                lines.push(Line::from(vec![
                    Span::styled("  Label  ", dim),
                    Span::styled(label.to_owned(), Style::default().fg(t.label_color())),
                ]));
            }
        }
        None => lines.push(Line::from(Span::styled("  Not in this month's view", dim))),
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(format!("  {}", app.calendar.hooks().status), dim)));

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_statusbar(f: &mut Frame, app: &App, area: Rect) {
    let t   = &app.theme;
    let bar = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", app.theme.name),
            Style::default().bg(t.accent()).fg(t.bg()).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  hjkl:day  [/]:month  Enter:click  T:theme  q:quit",
            Style::default().fg(t.fg_dim()),
        ),
    ])).style(Style::default().bg(t.bg2()));
    f.render_widget(bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kalandar::{Calendar, CalendarConfig, Highlight};
    use ratatui::{backend::TestBackend, Terminal};

    use crate::app::TuiHooks;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn screen(app: &App) -> Vec<String> {
        let mut term = Terminal::new(TestBackend::new(72, 14)).unwrap();
        term.draw(|f| draw(f, app)).unwrap();
        let buf = term.backend().buffer();
        buf.content
            .chunks(buf.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }

    #[test]
    fn draws_month_title_and_grid() {
        let config = CalendarConfig::default().with_year_bounds(2000, 2030);
        let cal = Calendar::with_today("2024-02-10", config, TuiHooks::default(), ymd(2024, 2, 10));
        let app = App::new(cal, ThemeConfig::default());
        let lines = screen(&app);

        assert!(lines[0].contains("February 2024"));
        assert!(lines[1].contains("Sun"));
        // First week starts on Sunday Jan 28.
        assert!(lines[3].contains(" 28  29  30  31   1   2   3 "));
        assert!(lines.iter().any(|l| l.contains("Saturday, February 10 2024")));
    }

    #[test]
    fn detail_shows_label_of_cursor_day() {
        let date = ymd(2024, 12, 25);
        let config = CalendarConfig::default()
            .with_highlight(date, Highlight { class: Some("holiday".into()), label: Some("Christmas".into()) });
        let cal = Calendar::with_today(date, config, TuiHooks::default(), date);
        let app = App::new(cal, ThemeConfig::default());
        let lines = screen(&app);

        assert!(lines.iter().any(|l| l.contains("2024-12-25")));
        assert!(lines.iter().any(|l| l.contains("today holiday has-label")));
        assert!(lines.iter().any(|l| l.contains("Christmas")));
    }
}
