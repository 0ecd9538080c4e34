//! TUI views and rendering
//!
//! All rendering logic is contained here. The views module draws the UI from
//! AppState but never modifies it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tracing::trace;

use prefstore::Theme;

use crate::domain::{AGE_GROUPS, Budget, INTERESTS, SpotPreference};
use crate::render::{DaySection, MEAL_LABELS};
use crate::state::Page;

use super::content::{ABOUT, SETUP};
use super::state::{AppState, Focus, ResultState};

/// Theme-dependent color set
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub dim: Color,
    pub error: Color,
    pub success: Color,
    pub selection_bg: Color,
}

/// Resolve the palette for the active theme
pub fn palette(theme: Theme) -> Palette {
    trace!(%theme, "palette: called");
    match theme {
        Theme::Dark => Palette {
            bg: Color::Rgb(17, 24, 39),
            fg: Color::Rgb(229, 231, 235),
            accent: Color::Rgb(45, 212, 191),
            dim: Color::DarkGray,
            error: Color::Rgb(248, 113, 113),
            success: Color::Rgb(74, 222, 128),
            selection_bg: Color::Rgb(40, 48, 64),
        },
        Theme::Light => Palette {
            bg: Color::Rgb(250, 250, 249),
            fg: Color::Rgb(31, 41, 55),
            accent: Color::Rgb(13, 148, 136),
            dim: Color::Rgb(120, 120, 120),
            error: Color::Rgb(185, 28, 28),
            success: Color::Rgb(22, 163, 74),
            selection_bg: Color::Rgb(226, 232, 240),
        },
    }
}

/// Main render function
pub fn render(state: &AppState, frame: &mut Frame) {
    trace!(page = ?state.session.page(), "render: called");
    let p = palette(state.session.theme());

    // Paint the whole frame in the theme colors first
    frame.render_widget(
        Block::default().style(Style::default().bg(p.bg).fg(p.fg)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0], &p);

    match state.session.page() {
        Page::Home => render_home(state, frame, chunks[1], &p),
        Page::About => render_markdown(ABOUT, " About ", frame, chunks[1], &p),
        Page::Setup => render_markdown(SETUP, " Setup ", frame, chunks[1], &p),
    }

    render_footer(state, frame, chunks[2], &p);

    if state.show_help {
        render_help_overlay(frame, frame.area(), &p);
    }
}

/// Header with view tabs and status
fn render_header(state: &AppState, frame: &mut Frame, area: Rect, p: &Palette) {
    trace!("render_header: called");
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(26)])
        .split(area);

    let main_tab = if state.session.setup_mode() { "Setup" } else { "Home" };
    let on_main = state.session.page() != Page::About;

    let tab = |name: &str, active: bool| {
        if active {
            Span::styled(name.to_string(), Style::default().fg(p.accent).add_modifier(Modifier::BOLD))
        } else {
            Span::styled(name.to_string(), Style::default().fg(p.dim))
        }
    };

    let left = Line::from(vec![
        Span::styled(" ✈ Voyage", Style::default().fg(p.accent).add_modifier(Modifier::BOLD)),
        Span::styled(" │ ", Style::default().fg(p.dim)),
        tab(main_tab, on_main),
        Span::styled(" · ", Style::default().fg(p.dim)),
        tab("About", !on_main),
    ]);

    let mut right_spans = Vec::new();
    if state.session.is_busy() {
        right_spans.push(Span::styled("● generating ", Style::default().fg(p.accent)));
    }
    right_spans.push(Span::styled(
        format!("{} ", state.session.theme()),
        Style::default().fg(p.dim),
    ));
    let right = Line::from(right_spans);

    let border = Style::default().fg(p.dim);
    frame.render_widget(
        Paragraph::new(left).block(Block::default().borders(Borders::BOTTOM).border_style(border)),
        halves[0],
    );
    frame.render_widget(
        Paragraph::new(right)
            .alignment(Alignment::Right)
            .block(Block::default().borders(Borders::BOTTOM).border_style(border)),
        halves[1],
    );
}

/// Planner view: form on the left, result on the right
fn render_home(state: &AppState, frame: &mut Frame, area: Rect, p: &Palette) {
    trace!("render_home: called");
    let chunks = if area.width >= 96 {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(42), Constraint::Percentage(58)])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area)
    };

    render_form(state, frame, chunks[0], p);
    render_result(state, frame, chunks[1], p);
}

/// The planner form
fn render_form(state: &AppState, frame: &mut Frame, area: Rect, p: &Palette) {
    trace!("render_form: called");
    let label = |name: &str, focus: Focus| {
        let style = if state.focus == focus {
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(p.fg)
        };
        Span::styled(format!("{:<16}", name), style)
    };

    let text_value = |value: &str, focus: Focus| {
        let mut v = value.to_string();
        if state.focus == focus {
            v.push('▏');
        }
        Span::styled(v, Style::default().fg(p.fg))
    };

    let mut lines = vec![
        Line::from(vec![label("Destination", Focus::Destination), text_value(&state.destination, Focus::Destination)]),
        Line::default(),
        Line::from(vec![label("Duration (days)", Focus::Duration), text_value(&state.duration, Focus::Duration)]),
        Line::default(),
        Line::from(vec![
            label("Age group", Focus::AgeGroup),
            Span::styled(
                format!("◂ {} ▸", AGE_GROUPS[state.age_group_idx.min(AGE_GROUPS.len() - 1)]),
                Style::default().fg(p.fg),
            ),
        ]),
        Line::default(),
        Line::from(vec![label("Vibe", Focus::Vibe), text_value(&state.vibe, Focus::Vibe)]),
        Line::default(),
    ];

    // Budget: single-select segments
    let mut budget_spans = vec![label("Budget", Focus::Budget)];
    for tier in Budget::ALL {
        budget_spans.push(segment(
            tier.label(),
            state.session.preferences.budget() == tier,
            state.focus == Focus::Budget,
            p,
        ));
        budget_spans.push(Span::raw(" "));
    }
    lines.push(Line::from(budget_spans));
    lines.push(Line::default());

    // Spot preference: single-select segments
    let mut spot_spans = vec![label("Spots", Focus::Spots)];
    for spot in SpotPreference::ALL {
        spot_spans.push(segment(
            spot.label(),
            state.session.preferences.spot_preference() == spot,
            state.focus == Focus::Spots,
            p,
        ));
        spot_spans.push(Span::raw(" "));
    }
    lines.push(Line::from(spot_spans));
    lines.push(Line::default());

    // Interests: multi-select chips with a cursor
    lines.push(Line::from(label("Interests", Focus::Interests)));
    for (i, interest) in INTERESTS.iter().enumerate() {
        let active = state.session.preferences.has_interest(interest);
        let mark = if active { "[x]" } else { "[ ]" };
        let mut style = if active {
            Style::default().fg(p.accent)
        } else {
            Style::default().fg(p.fg)
        };
        if state.focus == Focus::Interests && i == state.interest_idx {
            style = style.bg(p.selection_bg).add_modifier(Modifier::BOLD);
        }
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{} {}", mark, interest), style),
        ]));
    }
    lines.push(Line::default());

    // Generate button
    let button = if state.session.is_busy() {
        Span::styled("[ Generating... ]", Style::default().fg(p.dim))
    } else if state.focus == Focus::Generate {
        Span::styled(
            "[ Generate Itinerary ]",
            Style::default().fg(p.bg).bg(p.accent).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("[ Generate Itinerary ]", Style::default().fg(p.accent))
    };
    lines.push(Line::from(vec![Span::raw("  "), button]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.dim))
        .title(" Plan your trip ");
    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

/// One single-select segment
fn segment(text: &str, active: bool, focused: bool, p: &Palette) -> Span<'static> {
    let mut style = if active {
        Style::default().fg(p.bg).bg(p.accent)
    } else {
        Style::default().fg(p.dim)
    };
    if focused {
        style = style.add_modifier(Modifier::BOLD);
    }
    Span::styled(format!(" {} ", text), style)
}

/// The result area: empty hint, loader, error, or the itinerary accordion
fn render_result(state: &AppState, frame: &mut Frame, area: Rect, p: &Palette) {
    trace!("render_result: called");
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.dim))
        .title(" Your itinerary ");

    let (lines, scroll) = match &state.result {
        ResultState::Empty => (
            vec![
                Line::default(),
                Line::from(Span::styled(
                    "  Fill in the form and press Generate.",
                    Style::default().fg(p.dim),
                )),
            ],
            0,
        ),
        ResultState::Loading { word } => (
            vec![
                Line::default(),
                Line::from(Span::styled(
                    format!("  ✈  {} your personal journey...", word),
                    Style::default().fg(p.accent),
                )),
                Line::from(Span::styled(
                    "     This can take a little while.",
                    Style::default().fg(p.dim),
                )),
            ],
            0,
        ),
        ResultState::Error(message) => {
            let mut lines = vec![
                Line::default(),
                Line::from(Span::styled(
                    "  Oops!",
                    Style::default().fg(p.error).add_modifier(Modifier::BOLD),
                )),
            ];
            lines.push(Line::from(Span::styled(format!("  {}", message), Style::default().fg(p.fg))));
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "  Press r to retry.",
                Style::default().fg(p.dim),
            )));
            (lines, 0)
        }
        ResultState::Ready(view) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    format!("  {}", view.trip_title),
                    Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(format!("  {}", view.summary), Style::default().fg(p.fg))),
                Line::default(),
            ];

            let mut selected_line = 0;
            for (i, section) in view.sections.iter().enumerate() {
                if i == state.selected_section {
                    selected_line = lines.len();
                }
                lines.push(section_header_line(section, i == state.selected_section && state.focus == Focus::Result, p));
                if section.expanded {
                    lines.extend(section_detail_lines(section, p));
                }
            }

            lines.push(Line::default());
            if let Some(flash) = &state.flash {
                let style = if flash.starts_with("Could not") {
                    Style::default().fg(p.error)
                } else {
                    Style::default().fg(p.success)
                };
                lines.push(Line::from(Span::styled(format!("  {}", flash), style)));
            }

            // Keep the selected header in view
            let visible = area.height.saturating_sub(2) as usize;
            let scroll = if state.focus == Focus::Result {
                selected_line.saturating_sub(visible / 2)
            } else {
                0
            };
            (lines, scroll as u16)
        }
    };

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }).scroll((scroll, 0)),
        area,
    );
}

/// Expansion marker for a section header
fn section_marker(expanded: bool) -> &'static str {
    if expanded { "▾" } else { "▸" }
}

/// Collapsible section header
fn section_header_line(section: &DaySection, selected: bool, p: &Palette) -> Line<'static> {
    let mut style = Style::default().fg(p.fg).add_modifier(Modifier::BOLD);
    if selected {
        style = style.bg(p.selection_bg).fg(p.accent);
    }
    Line::from(Span::styled(
        format!("  {} {}", section_marker(section.expanded), section.header()),
        style,
    ))
}

/// Body of an expanded section
fn section_detail_lines(section: &DaySection, p: &Palette) -> Vec<Line<'static>> {
    let heading = |text: &str| {
        Line::from(Span::styled(
            format!("      {}", text),
            Style::default().fg(p.accent),
        ))
    };
    let entry = |text: String| Line::from(Span::styled(format!("        {}", text), Style::default().fg(p.fg)));

    let mut lines = vec![heading("Activities")];
    for activity in &section.activities {
        lines.push(entry(format!("• {}", activity)));
    }

    lines.push(heading("Dining"));
    for (label, meal) in MEAL_LABELS.iter().zip(section.meals.iter()) {
        lines.push(entry(format!("{}: {}", label, meal)));
    }

    lines.push(heading("Accommodation"));
    lines.push(entry(section.accommodation.clone()));
    lines.push(Line::default());

    lines
}

/// About and Setup views
fn render_markdown(content: &'static str, title: &'static str, frame: &mut Frame, area: Rect, p: &Palette) {
    trace!(%title, "render_markdown: called");
    let text = tui_markdown::from_str(content);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.dim))
        .title(title);
    frame.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: false }), area);
}

/// Context-sensitive keybind footer
fn render_footer(state: &AppState, frame: &mut Frame, area: Rect, p: &Palette) {
    trace!("render_footer: called");
    let key = |k: &str| Span::styled(k.to_string(), Style::default().fg(p.accent));
    let desc = |d: &str| Span::styled(format!(" {}  ", d), Style::default().fg(p.dim));

    let mut spans = vec![Span::raw(" ")];
    match state.session.page() {
        Page::Home => {
            spans.push(key("↑↓"));
            spans.push(desc("focus"));
            spans.push(key("◂▸"));
            spans.push(desc("select"));
            spans.push(key("enter"));
            spans.push(desc("activate"));
            if state.result.is_ready() {
                spans.push(key("e"));
                spans.push(desc("export"));
            }
            if state.result.is_error() {
                spans.push(key("r"));
                spans.push(desc("retry"));
            }
            spans.push(key("tab"));
            spans.push(desc("about"));
            spans.push(key("?"));
            spans.push(desc("help"));
        }
        Page::About | Page::Setup => {
            spans.push(key("tab"));
            spans.push(desc("back"));
            spans.push(key("t"));
            spans.push(desc("theme"));
            spans.push(key("q"));
            spans.push(desc("quit"));
        }
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(p.dim)),
        ),
        area,
    );
}

/// Help overlay listing all keybinds
fn render_help_overlay(frame: &mut Frame, area: Rect, p: &Palette) {
    trace!("render_help_overlay: called");
    let popup = centered_rect(52, 16, area);
    frame.render_widget(Clear, popup);

    let row = |k: &str, d: &str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", k), Style::default().fg(p.accent)),
            Span::styled(d.to_string(), Style::default().fg(p.fg)),
        ])
    };

    let lines = vec![
        Line::default(),
        row("↑ / ↓", "move focus through the form"),
        row("◂ / ▸", "change the focused selection"),
        row("space", "toggle interest / section"),
        row("enter", "activate the focused control"),
        row("tab", "switch between Home and About"),
        row("e", "export the itinerary to a document"),
        row("r", "retry after a failure"),
        row("t", "toggle light/dark theme"),
        row("q", "quit (outside text fields)"),
        row("ctrl+c", "quit from anywhere"),
        Line::default(),
        Line::from(Span::styled("  press any key to close", Style::default().fg(p.dim))),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.accent))
        .title(" Help ")
        .style(Style::default().bg(p.bg).fg(p.fg));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// Fixed-size rect centered in the given area
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
