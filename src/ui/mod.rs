//! Rendering layer: header, results list, detail pane, watched pane, footer.
//!
//! The UI consumes the session states and the watched collection as read-only
//! snapshots; all mutation goes through the event layer.

pub mod helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, Paragraph, Wrap};

use crate::logic::watched_summary;
use crate::state::{AppState, Focus, SessionStatus};
use helpers::{field, stars};

/// What: Draw the whole application frame.
///
/// Inputs:
/// - `f`: Target frame
/// - `app`: Application state snapshot (list states are mutated for scrolling)
pub fn draw(f: &mut Frame, app: &mut AppState) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(f.area());

    draw_header(f, app, header);

    let [left, right] = Layout::horizontal([
        Constraint::Percentage(app.layout_left_pct),
        Constraint::Percentage(app.layout_right_pct),
    ])
    .areas(body);

    draw_results(f, app, left);
    if app.selected_id.is_some() {
        draw_details(f, app, right);
    } else {
        draw_watched(f, app, right);
    }

    draw_footer(f, app, footer);
}

fn draw_header(f: &mut Frame, app: &AppState, area: Rect) {
    let count = app.results().len();
    let title = Line::from(vec![
        Span::styled(" cinefile ", Style::new().bold().fg(Color::Yellow)),
        Span::raw("— search movies"),
    ]);
    let found = Line::from(format!("Found {count} results ")).right_aligned();
    let block = Block::bordered().title(title).title(found);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let prompt = "> ";
    let input = Paragraph::new(Line::from(vec![
        Span::styled(prompt, Style::new().fg(Color::DarkGray)),
        Span::raw(app.input.as_str()),
    ]));
    f.render_widget(input, inner);

    if app.focus == Focus::Search {
        let x = inner.x + prompt.len() as u16 + app.search_caret as u16;
        f.set_cursor_position(Position::new(x.min(inner.right().saturating_sub(1)), inner.y));
    }
}

fn draw_results(f: &mut Frame, app: &mut AppState, area: Rect) {
    let focused = app.focus == Focus::Search;
    let block = Block::bordered()
        .title(" Results ")
        .border_style(border_style(focused));

    match app.search.status() {
        SessionStatus::Idle => {
            let hint = Paragraph::new("Type at least 3 characters to search the catalog.")
                .style(Style::new().fg(Color::DarkGray))
                .block(block)
                .wrap(Wrap { trim: true });
            f.render_widget(hint, area);
        }
        SessionStatus::Loading => {
            let loading = Paragraph::new("Loading…")
                .style(Style::new().fg(Color::Yellow))
                .block(block);
            f.render_widget(loading, area);
        }
        SessionStatus::Failure => {
            let msg = app.search.error().unwrap_or_default().to_string();
            let err = Paragraph::new(msg)
                .style(Style::new().fg(Color::Red))
                .block(block)
                .wrap(Wrap { trim: true });
            f.render_widget(err, area);
        }
        SessionStatus::Success => {
            let items: Vec<ListItem> = app
                .results()
                .iter()
                .map(|hit| {
                    let marker = if app.watched.contains(&hit.imdb_id) {
                        Span::styled("● ", Style::new().fg(Color::Green))
                    } else {
                        Span::raw("  ")
                    };
                    ListItem::new(Line::from(vec![
                        marker,
                        Span::raw(hit.title.clone()),
                        Span::styled(format!("  ({})", hit.year), Style::new().fg(Color::DarkGray)),
                    ]))
                })
                .collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(Style::new().add_modifier(Modifier::REVERSED));
            f.render_stateful_widget(list, area, &mut app.list_state);
        }
    }
}

fn draw_details(f: &mut Frame, app: &AppState, area: Rect) {
    let focused = app.focus == Focus::Details;
    let block = Block::bordered()
        .title(" Movie details ")
        .border_style(border_style(focused));

    match app.detail.status() {
        SessionStatus::Loading | SessionStatus::Idle => {
            let loading = Paragraph::new("Loading…")
                .style(Style::new().fg(Color::Yellow))
                .block(block);
            f.render_widget(loading, area);
        }
        SessionStatus::Failure => {
            let msg = app.detail.error().unwrap_or_default().to_string();
            let err = Paragraph::new(msg)
                .style(Style::new().fg(Color::Red))
                .block(block);
            f.render_widget(err, area);
        }
        SessionStatus::Success => {
            let Some(d) = app.detail.data() else {
                return;
            };
            let mut lines: Vec<Line> = vec![
                Line::from(vec![
                    Span::styled(d.title.clone(), Style::new().bold()),
                    Span::styled(format!("  ({})", field(&d.year)), Style::new().fg(Color::DarkGray)),
                ]),
                Line::from(format!(
                    "{} • {} • {}",
                    field(&d.released),
                    field(&d.runtime),
                    field(&d.genre)
                )),
                Line::from(vec![
                    Span::styled("⭐ ", Style::new().fg(Color::Yellow)),
                    Span::raw(format!("{} imdb rating", d.imdb_rating)),
                ]),
                Line::default(),
                Line::from(Span::styled(
                    field(&d.plot).to_string(),
                    Style::new().italic(),
                )),
                Line::default(),
                Line::from(format!("Starring    {}", field(&d.actors))),
                Line::from(format!("Directed by {}", field(&d.director))),
                Line::from(format!("Written by  {}", field(&d.writer))),
                Line::from(format!("Box office  {}", field(&d.box_office))),
                Line::from(format!("Language    {}", field(&d.language))),
            ];
            if !d.ratings.is_empty() {
                lines.push(Line::default());
                lines.push(Line::from(Span::styled("Ratings", Style::new().underlined())));
                for r in &d.ratings {
                    lines.push(Line::from(format!("  {}: {}", r.source, r.value)));
                }
            }
            lines.push(Line::default());
            match app.watched.user_rating(&d.imdb_id) {
                Some(r) => lines.push(Line::from(Span::styled(
                    format!("You've rated this movie {r}/10 ⭐"),
                    Style::new().fg(Color::Green),
                ))),
                None => {
                    lines.push(Line::from(vec![
                        Span::styled(stars(app.pending_rating), Style::new().fg(Color::Yellow)),
                        Span::raw(if app.pending_rating > 0 {
                            format!("  {}/10", app.pending_rating)
                        } else {
                            String::new()
                        }),
                    ]));
                    lines.push(Line::from(Span::styled(
                        if app.pending_rating > 0 {
                            "[1-9, 0=10] rate   [a] add to watched   [Esc] close"
                        } else {
                            "[1-9, 0=10] rate   [Esc] close"
                        },
                        Style::new().fg(Color::DarkGray),
                    )));
                }
            }
            let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
            f.render_widget(para, area);
        }
    }
}

fn draw_watched(f: &mut Frame, app: &mut AppState, area: Rect) {
    let focused = app.focus == Focus::Watched;
    let [summary_area, list_area] =
        Layout::vertical([Constraint::Length(6), Constraint::Min(0)]).areas(area);

    let summary = watched_summary(app.watched.entries());
    let summary_lines = vec![
        Line::from(format!("#️⃣  {} movies", summary.count)),
        Line::from(format!("⭐ {:.2} avg imdb rating", summary.avg_imdb_rating)),
        Line::from(format!("🌟 {:.2} avg your rating", summary.avg_user_rating)),
        Line::from(format!("⏳ {:.1} min avg runtime", summary.avg_runtime_minutes)),
    ];
    let summary_block = Block::bordered()
        .title(" Movies you watched ")
        .border_style(border_style(focused));
    f.render_widget(Paragraph::new(summary_lines).block(summary_block), summary_area);

    let items: Vec<ListItem> = app
        .watched
        .entries()
        .iter()
        .map(|e| {
            ListItem::new(Line::from(vec![
                Span::raw(e.title.clone()),
                Span::styled(
                    format!("  ⭐{}  🌟{}  ⏳{} min", e.imdb_rating, e.user_rating, e.runtime_minutes),
                    Style::new().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();
    let list = List::new(items)
        .block(Block::bordered().border_style(border_style(focused)))
        .highlight_style(Style::new().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(list, list_area, &mut app.watched_state);
}

fn draw_footer(f: &mut Frame, app: &AppState, area: Rect) {
    let hints = match app.focus {
        Focus::Search => "type to search   [↑/↓] highlight   [Enter] details   [Tab] watched   [Esc] quit",
        Focus::Details => "[1-9, 0=10] rate   [a/Enter] add   [Tab] watched   [Esc] back",
        Focus::Watched => "[↑/↓] highlight   [Enter] details   [d] remove   [Tab/Esc] back",
    };
    f.render_widget(
        Paragraph::new(hints).style(Style::new().fg(Color::DarkGray)),
        area,
    );
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::new().fg(Color::Yellow)
    } else {
        Style::new().fg(Color::DarkGray)
    }
}
