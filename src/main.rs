mod app;
mod theme;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::{App, TuiHooks};
use kalandar::{parse_date_key, Calendar, CalendarOptions, DateInput, MonthView, NoHooks};
use theme::ThemeConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        // ── kal grid [DATE] ───────────────────────────────────────────────────
        Some("grid") => cmd_grid(args.get(2).cloned()),
        // ── kal key DATE ──────────────────────────────────────────────────────
        Some("key") => cmd_key(args.get(2).map(|s| s.as_str())),
        Some("-h") | Some("--help") => {
            print_usage();
            Ok(())
        }
        // ── kal [DATE] (TUI) ──────────────────────────────────────────────────
        date => run_tui(date.map(str::to_owned)),
    }
}

fn print_usage() {
    println!("Usage:");
    println!("  kal [DATE]         interactive month calendar");
    println!("  kal grid [DATE]    print the month grid");
    println!("  kal key DATE       print the YYYY-MM-DD key for a date");
    println!();
    println!("Options are read from {}", kalandar::config::config_path().display());
}

fn init_stderr_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Config file options, with the command-line date taking precedence.
fn load_options(date: Option<String>) -> Result<CalendarOptions> {
    let path    = kalandar::config::config_path();
    let mut opt = CalendarOptions::load_from(&path)
        .with_context(|| format!("loading {}", path.display()))?;
    if let Some(date) = date {
        opt.date = Some(serde_json::Value::String(date));
    }
    Ok(opt)
}

// ─── Grid command ─────────────────────────────────────────────────────────────

fn cmd_grid(date: Option<String>) -> Result<()> {
    init_stderr_logging();

    let options  = load_options(date)?;
    let calendar = Calendar::from_options(&options, NoHooks);
    print!("{}", format_grid(&calendar.view()));
    Ok(())
}

/// Plain-text month: fill days in parentheses, today in brackets, then one
/// line per highlighted day.
fn format_grid(view: &MonthView<'_>) -> String {
    use std::fmt::Write;
    use chrono::Datelike;

    let mut out = String::new();
    let _ = writeln!(out, "{:^28}", view.title());
    for name in view.day_names {
        let _ = write!(out, "{name:^4}");
    }
    out.push('\n');
    for week in view.weeks() {
        for cell in week {
            let day = cell.date.day();
            let _ = match (cell.is_today, cell.is_fill) {
                (true, _)      => write!(out, "[{day:>2}]"),
                (false, true)  => write!(out, "({day:>2})"),
                (false, false) => write!(out, " {day:>2} "),
            };
        }
        out.push('\n');
    }
    for cell in view.cells.iter().filter(|c| c.highlight.is_some()) {
        let _ = write!(out, "\n{}  {}", cell.key(), cell.tags().join(" "));
        if let Some(label) = cell.label().filter(|l| !l.is_empty()) {
            let _ = write!(out, "  {label:?}");
        }
    }
    if view.cells.iter().any(|c| c.highlight.is_some()) {
        out.push('\n');
    }
    out
}

// ─── Key command ──────────────────────────────────────────────────────────────

fn cmd_key(date: Option<&str>) -> Result<()> {
    init_stderr_logging();

    let date = date.ok_or_else(|| anyhow!("Usage: kal key DATE"))?;
    let parsed = match parse_date_key(date) {
        Ok(d) => d,
        Err(_) => DateInput::from(date).resolve(chrono::Local::now().date_naive())?,
    };
    println!("{}", kalandar::date_to_key(parsed));
    Ok(())
}

// ─── TUI ─────────────────────────────────────────────────────────────────────

fn run_tui(date: Option<String>) -> Result<()> {
    let log_dir = dirs::data_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("kalandar");
    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "kalandar.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    tracing::info!("Starting kalandar");

    let options  = load_options(date)?;
    let theme    = ThemeConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Theme not loaded ({e}); using default");
        ThemeConfig::default()
    });
    let calendar = Calendar::from_options(&options, TuiHooks::default());

    let mut app = App::new(calendar, theme);
    app.run()
}
