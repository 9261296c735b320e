// Tab bar with a favorites count and the cache mode on the right.

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};

fn tab_label(app: &App, tab: Tab) -> String {
    match tab {
        Tab::Favorites if !app.favorites.is_empty() => {
            format!("{} ({})", tab.title(), app.favorites.len())
        }
        _ => tab.title().to_string(),
    }
}

/// Draw the tab bar at the top of the screen.
pub fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let labels: Vec<String> = Tab::ALL.iter().map(|tab| tab_label(app, *tab)).collect();
    let selected = Tab::ALL
        .iter()
        .position(|tab| *tab == app.active_tab)
        .unwrap_or_default();

    let cache_note = if app.explorer.cache().is_some() {
        Span::styled(" cached ", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(" no cache ", Style::default().fg(Color::Yellow))
    };

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " repolens ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .title(Line::from(cache_note).right_aligned());

    let tabs = Tabs::new(labels)
        .block(block)
        .style(Style::default().fg(Color::White))
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw(" │ "));

    frame.render_widget(tabs, area);
}
