// UI module for rendering the TUI.
// Contains widgets for tabs, the search form, lists, and the modal viewer.

mod list;
mod modal;
mod tabs;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};
use crate::state::SearchForm;

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Length(3), // Search form
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    tabs::draw_tabs(frame, app, chunks[0]);

    match app.active_tab {
        Tab::Search => draw_search_form(frame, &app.search.form, chunks[1]),
        Tab::Favorites => {
            let block = Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray));
            let text = Paragraph::new(format!(" {} saved", app.favorites.len()))
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(text, chunks[1]);
        }
    }

    draw_content(frame, app, chunks[2]);
    draw_status_bar(frame, app, chunks[3]);

    if let Some(modal) = &app.modal {
        modal::draw_modal(frame, modal);
    }

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame);
    }
}

fn draw_content(frame: &mut Frame, app: &mut App, area: Rect) {
    match app.active_tab {
        Tab::Search => {
            let title = app.search.results_title();
            list::render_repositories_list(
                frame,
                &mut app.search.results,
                &app.favorites,
                &title,
                area,
            );
        }
        Tab::Favorites => list::render_favorites_list(frame, &mut app.favorites_list, area),
    }
}

/// Draw the language input, sort mode and good-first-issue toggle.
fn draw_search_form(frame: &mut Frame, form: &SearchForm, area: Rect) {
    let border = if form.editing {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Search ");

    let mut spans = vec![Span::styled(" Language: ", Style::default().fg(Color::DarkGray))];
    if form.language.is_empty() && !form.editing {
        spans.push(Span::styled(
            "(random)",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ));
    } else {
        spans.push(Span::raw(form.language.as_str()));
    }
    if form.editing {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }
    spans.extend([
        Span::styled("   Sort: ", Style::default().fg(Color::DarkGray)),
        Span::styled(form.sort.title(), Style::default().fg(Color::Cyan)),
        Span::styled("   Good first issues: ", Style::default().fg(Color::DarkGray)),
        if form.good_first_issue {
            Span::styled("[x]", Style::default().fg(Color::Green))
        } else {
            Span::raw("[ ]")
        },
    ]);

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Key hint as a key followed by its dimmed label.
fn hint(key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [
        Span::raw(format!("  {} ", key)),
        Span::styled(label, Style::default().fg(Color::DarkGray)),
    ]
}

fn key_hints(app: &App) -> Vec<Span<'static>> {
    let pairs: Vec<(&'static str, &'static str)> = if app.modal.is_some() {
        vec![("↑↓", "Scroll"), ("PgUp/Dn", "Page"), ("Esc", "Close")]
    } else if app.active_tab == Tab::Search && app.search.form.editing {
        vec![("↵", "Search"), ("Esc", "Cancel")]
    } else {
        let mut pairs = vec![("↑↓", "Navigate"), ("↵", "README"), ("i", "Issues")];
        match app.active_tab {
            Tab::Search => pairs.extend([("/", "Language"), ("f", "Favorite")]),
            Tab::Favorites => pairs.push(("x", "Remove")),
        }
        pairs.extend([("Tab", "Switch"), ("?", "Help"), ("q", "Quit")]);
        pairs
    };
    pairs
        .into_iter()
        .flat_map(|(key, label)| hint(key, label))
        .collect()
}

/// Draw the status bar with keybinding hints (or the last message) and rate limit.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = match &app.status_message {
        Some(message) => vec![Span::styled(
            format!(" {}", message),
            Style::default().fg(Color::Green),
        )],
        None => key_hints(app),
    };

    // GitHub reports the rate limit on every response; show it once known
    let rate = app.rate_limit();
    if rate.is_known() {
        let rate_color = match rate.remaining {
            0..10 => Color::Red,
            10..30 => Color::Yellow,
            _ => Color::DarkGray,
        };
        spans.push(Span::styled(
            format!("  API: {}/{}", rate.remaining, rate.limit),
            Style::default().fg(rate_color),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn help_line(keys: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<14}", keys), Style::default().fg(Color::Cyan)),
        Span::raw(action),
    ])
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    let popup_width = area.width.min(55);
    let popup_height = area.height.min(20);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        help_line("↑/↓ or j/k", "Navigate list / scroll modal"),
        help_line("Enter or d", "Show README summary"),
        help_line("i", "Show open issues"),
        help_line("/", "Edit search language"),
        help_line("s", "Cycle sort mode"),
        help_line("g", "Toggle good first issues"),
        help_line("r", "Run search (blank = random)"),
        help_line("f", "Toggle favorite"),
        help_line("x", "Remove favorite"),
        help_line("Tab", "Switch tabs"),
        help_line("Esc", "Close modal / help"),
        help_line("?", "Show/hide this help"),
        help_line("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}
