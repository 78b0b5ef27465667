use crate::calc::calendar::format_for_display;
use crate::calc::grid::{DayCell, GridCell, GridStats, GridView};
use crate::data::i18n::{Language, short_month_name, t};
use crate::data::mood_level::MoodLevel;
use crate::data::palette::ColorTemplate;
use crate::data::persistence::KeyValueStore;
use crate::data::preferences::CalendarView;
use crate::data::template_registry::PaletteSink;
use crate::tracker::Tracker;
use anyhow::Result;
use chrono::Datelike;
use crossterm::event::{self, Event as CEvent, KeyCode, KeyModifiers};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io::Stdout;
use std::time::Duration as StdDuration;
use tracing::error;

// Unlogged day cells
const EMPTY_CELL: Color = Color::DarkGray;

// Streak heat levels 0..=4
const HEAT_COLORS: [Color; 5] = [
    Color::Gray,
    Color::LightYellow,
    Color::Yellow,
    Color::LightRed,
    Color::Red,
];

/// Terminal colours for the active template. Updated through
/// `PaletteSink` whenever a template is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalPalette {
    pub levels: [Color; 5],
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl TerminalPalette {
    pub fn from_template(template: &ColorTemplate) -> Self {
        TerminalPalette {
            levels: std::array::from_fn(|i| {
                parse_css_color(&template.levels[i].color).unwrap_or(EMPTY_CELL)
            }),
            text_primary: parse_css_color(&template.text_primary).unwrap_or(Color::White),
            text_secondary: parse_css_color(&template.text_secondary).unwrap_or(Color::Gray),
        }
    }

    pub fn level(&self, level: MoodLevel) -> Color {
        self.levels[level.index()]
    }
}

impl PaletteSink for TerminalPalette {
    fn apply_palette(&mut self, template: &ColorTemplate) {
        *self = TerminalPalette::from_template(template);
    }
}

pub struct App<S: KeyValueStore> {
    tracker: Tracker<S>,
    palette: TerminalPalette,
    /// Feedback for the last action (message, color). Cleared on next keypress.
    status: Option<(String, Color)>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(tracker: Tracker<S>) -> Self {
        let palette = TerminalPalette::from_template(tracker.registry().active());
        App {
            tracker,
            palette,
            status: None,
        }
    }

    pub fn tracker(&self) -> &Tracker<S> {
        &self.tracker
    }

    /// Handles one key press. Returns true when the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.status = None;

        if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
            return true;
        }

        let result = match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char(c @ '1'..='5') => match MoodLevel::from_value(c as u8 - b'0') {
                Some(level) => self.log_today(level),
                None => Ok(()),
            },
            KeyCode::Left | KeyCode::Char('h') => {
                self.tracker.navigate(false);
                Ok(())
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.tracker.navigate(true);
                Ok(())
            }
            KeyCode::Char('v') => self.tracker.cycle_calendar_view().map(|_| ()),
            KeyCode::Char('c') => self.tracker.toggle_counter_mode().map(|_| ()),
            KeyCode::Char('g') => self.tracker.cycle_language().map(|_| ()),
            KeyCode::Char('t') => self.tracker.cycle_template(&mut self.palette).map(|_| ()),
            KeyCode::Char('r') => {
                self.tracker.reset_view();
                Ok(())
            }
            _ => Ok(()),
        };

        if let Err(err) = result {
            error!("{err:#}");
            self.status = Some((format!("{err:#}"), Color::Red));
        }
        false
    }

    fn log_today(&mut self, level: MoodLevel) -> Result<()> {
        if self.tracker.log_mood(level)? {
            let language = self.tracker.preferences().language;
            let mood = self.tracker.today_mood(language);
            self.status = Some((
                format!("{}: {}", t("logged", language), mood.label),
                self.palette.level(level),
            ));
        }
        Ok(())
    }

    pub fn render(&self, f: &mut Frame) {
        let (view, stats) = self.tracker.snapshot();
        let language = self.tracker.preferences().language;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // title + header/counter
                Constraint::Min(9),    // grid
                Constraint::Length(3), // today's mood + template
                Constraint::Length(2), // status + help
            ])
            .split(f.area());

        self.render_header(f, chunks[0], &stats, language);
        match view.mode {
            CalendarView::Year => self.render_year(f, chunks[1], &view, language),
            CalendarView::Month => self.render_month(f, chunks[1], &view),
            CalendarView::Week => self.render_week(f, chunks[1], &view, language),
        }
        self.render_today(f, chunks[2], language);
        self.render_help(f, chunks[3], language);
    }

    fn render_header(&self, f: &mut Frame, area: Rect, stats: &GridStats, language: Language) {
        let counter_color = stats
            .heat_level
            .map(|level| HEAT_COLORS[(level as usize).min(HEAT_COLORS.len() - 1)])
            .unwrap_or(self.palette.text_secondary);
        let lines = vec![
            Line::from(Span::styled(
                t("title", language),
                Style::default()
                    .fg(self.palette.text_primary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(
                    stats.header_text.clone(),
                    Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                ),
                Span::raw("   "),
                Span::styled(stats.counter_text.clone(), Style::default().fg(counter_color)),
            ]),
        ];
        f.render_widget(Paragraph::new(lines), area);
    }

    fn render_year(&self, f: &mut Frame, area: Rect, view: &GridView, language: Language) {
        let label_style = Style::default().fg(self.palette.text_secondary);
        let mut rows: Vec<Vec<Span>> = (1..=12)
            .map(|month| {
                vec![Span::styled(
                    format!("{:<6}", short_month_name(month, language)),
                    label_style,
                )]
            })
            .collect();
        for cell in view.days() {
            let glyph = if cell.is_today { "◆ " } else { "■ " };
            rows[cell.date.month0() as usize].push(Span::styled(glyph, self.day_style(cell)));
        }
        let lines: Vec<Line> = rows.into_iter().map(Line::from).collect();
        f.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::NONE)),
            area,
        );
    }

    fn render_month(&self, f: &mut Frame, area: Rect, view: &GridView) {
        let mut lines: Vec<Line> = vec![Line::from(
            view.headers
                .iter()
                .map(|h| {
                    Span::styled(
                        format!("{h:^5}"),
                        Style::default().fg(self.palette.text_secondary),
                    )
                })
                .collect::<Vec<_>>(),
        )];
        for week in view.cells.chunks(7) {
            let spans: Vec<Span> = week
                .iter()
                .map(|cell| match cell {
                    GridCell::Placeholder => Span::raw("     "),
                    GridCell::Day(day) => {
                        let text = format!(" {:>2}  ", day.date.day());
                        let style = match day.display_color.as_deref().and_then(parse_css_color) {
                            Some(color) => Style::default().fg(Color::Black).bg(color),
                            None => Style::default().fg(EMPTY_CELL),
                        };
                        let style = if day.is_today {
                            style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                        } else {
                            style
                        };
                        Span::styled(text, style)
                    }
                })
                .collect();
            lines.push(Line::from(spans));
        }
        f.render_widget(Paragraph::new(lines), area);
    }

    fn render_week(&self, f: &mut Frame, area: Rect, view: &GridView, language: Language) {
        let lines: Vec<Line> = view
            .days()
            .map(|day| {
                let label = day.day_label.clone().unwrap_or_default();
                let mut spans = vec![
                    Span::styled(format!("{label:<10}"), self.label_style(day)),
                    Span::styled(
                        format!("{:<10}", format_for_display(day.date, language)),
                        Style::default().fg(self.palette.text_secondary),
                    ),
                ];
                match day.level {
                    // Level 1 gets the tallest bar
                    Some(level) => spans.push(Span::styled(
                        "█".repeat((6 - level.value() as usize) * 4),
                        self.day_style(day),
                    )),
                    None => spans.push(Span::styled("·", Style::default().fg(EMPTY_CELL))),
                }
                Line::from(spans)
            })
            .collect();
        f.render_widget(Paragraph::new(lines), area);
    }

    fn render_today(&self, f: &mut Frame, area: Rect, language: Language) {
        let mood = self.tracker.today_mood(language);
        let mut spans = vec![
            Span::raw(format!("{}: ", t("today", language))),
            Span::styled(
                format!("■ {}", mood.label),
                Style::default()
                    .fg(self.palette.level(mood.level))
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if !mood.logged {
            spans.push(Span::styled(
                format!("  ({})", t("notLogged", language)),
                Style::default().fg(self.palette.text_secondary),
            ));
        }
        let mut template_spans = vec![
            Span::raw(format!("{}: ", t("template", language))),
            Span::styled(
                self.tracker.registry().active().name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
        ];
        for level in MoodLevel::ALL {
            template_spans.push(Span::styled(
                format!("{} ■", level.value()),
                Style::default().fg(self.palette.level(level)),
            ));
            template_spans.push(Span::raw("  "));
        }
        let lines = vec![Line::from(spans), Line::from(template_spans)];
        f.render_widget(Paragraph::new(lines), area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect, language: Language) {
        let mut lines = Vec::new();
        if let Some((msg, color)) = &self.status {
            lines.push(Line::from(Span::styled(
                msg.clone(),
                Style::default().fg(*color).add_modifier(Modifier::BOLD),
            )));
        }
        let help = format!(
            "1-5 {}  ←/→ {}  v {}  c {}  g {}  t {}  r {}  q {}",
            t("helpMood", language),
            t("helpNavigate", language),
            t("helpView", language),
            t("helpCounter", language),
            language.toggle_label(),
            t("template", language),
            t("helpReset", language),
            t("helpQuit", language),
        );
        lines.push(Line::from(Span::styled(
            help,
            Style::default().fg(Color::DarkGray),
        )));
        f.render_widget(Paragraph::new(lines), area);
    }

    fn day_style(&self, cell: &DayCell) -> Style {
        let color = cell
            .display_color
            .as_deref()
            .and_then(parse_css_color)
            .unwrap_or(EMPTY_CELL);
        let style = Style::default().fg(color);
        if cell.is_today {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    fn label_style(&self, cell: &DayCell) -> Style {
        let style = Style::default().fg(self.palette.text_primary);
        if cell.is_today {
            style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            style
        }
    }
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app<S: KeyValueStore>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<S>,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            if let CEvent::Key(key) = event::read()? {
                if app.handle_key(key.code, key.modifiers) {
                    break;
                }
            }
        }
    }
    Ok(())
}

// ── Colour helpers ────────────────────────────────────────────────────────────

/// Parses `#rgb`, `#rrggbb`, `rgb(r, g, b)` or `rgba(r, g, b, a)` into a
/// terminal colour. Translucent colours are blended over white, matching
/// how they look on the light popup background.
pub(crate) fn parse_css_color(css: &str) -> Option<Color> {
    let css = css.trim();
    if let Some(hex) = css.strip_prefix('#') {
        return parse_hex(hex);
    }
    let inner = css
        .strip_prefix("rgba(")
        .or_else(|| css.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    let (r, g, b, alpha) = match parts.as_slice() {
        [r, g, b] => (*r, *g, *b, 1.0),
        [r, g, b, a] => (*r, *g, *b, a.parse::<f32>().ok()?.clamp(0.0, 1.0)),
        _ => return None,
    };
    let blend = |channel: &str| -> Option<u8> {
        let value = channel.parse::<u8>().ok()? as f32;
        Some((value * alpha + 255.0 * (1.0 - alpha)).round() as u8)
    };
    Some(Color::Rgb(blend(r)?, blend(g)?, blend(b)?))
}

fn parse_hex(hex: &str) -> Option<Color> {
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb(
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
        )),
        3 => {
            let short = |i: usize| channel(hex.get(i..i + 1)?).map(|v| v * 17);
            Some(Color::Rgb(short(0)?, short(1)?, short(2)?))
        }
        _ => None,
    }
}
