use crate::calc::calendar::format_for_display;
use crate::calc::grid::{DayCell, GridCell, GridStats, GridView};
use crate::data::i18n::{Language, short_month_name};
use crate::data::{CalendarView, KeyValueStore};
use crate::tracker::Tracker;
use anyhow::Result;
use chrono::Datelike;
use std::path::Path;

pub fn run(data_dir: &Path, view: Option<CalendarView>, shift: i32) -> Result<()> {
    let mut tracker = super::open_tracker(data_dir);
    show(&mut tracker, view, shift, &mut std::io::stdout())
}

pub(crate) fn show<S: KeyValueStore, W: std::io::Write>(
    tracker: &mut Tracker<S>,
    view: Option<CalendarView>,
    shift: i32,
    out: &mut W,
) -> Result<()> {
    if let Some(view) = view {
        tracker.preview_calendar_view(view);
    }
    tracker.shift_view(shift);
    let (grid, stats) = tracker.snapshot();
    write_grid(&grid, &stats, tracker.preferences().language, out)
}

/// Marker for one day: the mood level digit, `.` when unlogged, `o` for an
/// unlogged today.
fn day_mark(cell: &DayCell) -> char {
    match cell.level {
        Some(level) => char::from(b'0' + level.value()),
        None if cell.is_today => 'o',
        None => '.',
    }
}

pub(crate) fn write_grid<W: std::io::Write>(
    grid: &GridView,
    stats: &GridStats,
    language: Language,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{}", stats.header_text)?;
    match stats.heat_level {
        Some(heat) => writeln!(out, "{} (heat {}/4)", stats.counter_text, heat)?,
        None => writeln!(out, "{}", stats.counter_text)?,
    }
    writeln!(out, "---")?;

    match grid.mode {
        CalendarView::Year => {
            let mut rows: Vec<String> = (1..=12)
                .map(|month| format!("{:<6}", short_month_name(month, language)))
                .collect();
            for cell in grid.days() {
                rows[cell.date.month0() as usize].push(day_mark(cell));
            }
            for row in rows {
                writeln!(out, "{row}")?;
            }
        }
        CalendarView::Month => {
            let header: Vec<String> = grid.headers.iter().map(|h| format!("{h:>4}")).collect();
            writeln!(out, "{}", header.join(""))?;
            for week in grid.cells.chunks(7) {
                let line: String = week
                    .iter()
                    .map(|cell| match cell {
                        GridCell::Placeholder => "    ".to_string(),
                        GridCell::Day(day) => format!("{:>3}{}", day.date.day(), day_mark(day)),
                    })
                    .collect();
                writeln!(out, "{}", line.trim_end())?;
            }
        }
        CalendarView::Week => {
            for day in grid.days() {
                let label = day.day_label.as_deref().unwrap_or_default();
                let date = format_for_display(day.date, language);
                match (&day.level, &day.tooltip) {
                    (Some(level), Some(tooltip)) => writeln!(
                        out,
                        "{:<10} {:<10} {:<10} {}",
                        label,
                        date,
                        "#".repeat((6 - level.value() as usize) * 2),
                        tooltip
                    )?,
                    _ => writeln!(out, "{label:<10} {date:<10} {}", day_mark(day))?,
                }
            }
        }
    }
    writeln!(out, "---")?;
    writeln!(out, "Logged in view: {}", grid.logged_count)?;
    Ok(())
}
