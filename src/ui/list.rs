// List rendering for repositories and favorites.
// Provides styled list views with loading and empty states.

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use crate::favorites::{FavoriteRepo, FavoritesStore};
use crate::github::Repository;
use crate::state::{LoadingState, SelectableList};

/// Format a timestamp as relative time (e.g., "2h ago").
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    format_relative_time_at(dt, Utc::now())
}

fn format_relative_time_at(dt: &DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(*dt);

    if duration.num_days() > 0 {
        format!("{}d ago", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m ago", duration.num_minutes())
    } else {
        "just now".to_string()
    }
}

/// Compact count, e.g. 1.2k for 1234.
pub fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}m", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}k", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, block: Block, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow))
        .block(block);
    frame.render_widget(text, area);
}

/// Render an error message.
pub fn render_error(frame: &mut Frame, area: Rect, block: Block, error: &str) {
    let text = Paragraph::new(format!("❌ {}", error))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red))
        .block(block);
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, block: Block, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(block);
    frame.render_widget(text, area);
}

fn highlighted(list: List) -> List {
    list.highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ")
}

fn description_line(description: Option<&str>) -> Line<'_> {
    Line::from(Span::styled(
        format!("  {}", description.unwrap_or("No description available")),
        Style::default().fg(Color::DarkGray),
    ))
}

fn stats_spans(stars: u64, forks: u64, updated_at: &DateTime<Utc>) -> Vec<Span<'static>> {
    vec![
        Span::styled(
            format!("  ★ {}", format_count(stars)),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("  ⑂ {}", format_count(forks)),
            Style::default().fg(Color::Blue),
        ),
        Span::styled(
            format!("  {}", format_relative_time(updated_at)),
            Style::default().fg(Color::DarkGray),
        ),
    ]
}

/// Render search results, marking repositories already in favorites.
pub fn render_repositories_list(
    frame: &mut Frame,
    list: &mut SelectableList<Repository>,
    favorites: &FavoritesStore,
    title: &str,
    area: Rect,
) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    match &list.data {
        LoadingState::Idle => render_empty(frame, area, block, "Press r to search"),
        LoadingState::Loading => render_loading(frame, area, block, "Loading repositories"),
        LoadingState::Error(e) => render_error(frame, area, block, e),
        LoadingState::Loaded(repos) => {
            let items: Vec<ListItem> = repos
                .iter()
                .map(|repo| {
                    let marker = if favorites.is_favorite(repo.id) {
                        Span::styled("♥ ", Style::default().fg(Color::Red))
                    } else {
                        Span::raw("  ")
                    };
                    let mut header = vec![
                        marker,
                        Span::styled(&repo.full_name, Style::default().fg(Color::Cyan)),
                    ];
                    header.extend(stats_spans(
                        repo.stargazers_count,
                        repo.forks_count,
                        &repo.updated_at,
                    ));
                    ListItem::new(vec![
                        Line::from(header),
                        description_line(repo.description.as_deref()),
                    ])
                })
                .collect();

            let list_widget = highlighted(List::new(items).block(block));
            frame.render_stateful_widget(list_widget, area, &mut list.list_state);
        }
    }
}

/// Render the favorites list.
pub fn render_favorites_list(
    frame: &mut Frame,
    list: &mut SelectableList<FavoriteRepo>,
    area: Rect,
) {
    let block = Block::default().borders(Borders::ALL).title(" Favorites ");
    match &list.data {
        LoadingState::Idle | LoadingState::Loading => {
            render_loading(frame, area, block, "Loading favorites")
        }
        LoadingState::Error(message) => render_empty(frame, area, block, message),
        LoadingState::Loaded(repos) => {
            let items: Vec<ListItem> = repos
                .iter()
                .map(|repo| {
                    let mut header = vec![
                        Span::styled("♥ ", Style::default().fg(Color::Red)),
                        Span::styled(
                            format!("{}/{}", repo.owner, repo.name),
                            Style::default().fg(Color::Cyan),
                        ),
                    ];
                    header.extend(stats_spans(repo.star_count, repo.fork_count, &repo.updated_at));
                    ListItem::new(vec![
                        Line::from(header),
                        description_line(repo.description.as_deref()),
                    ])
                })
                .collect();

            let list_widget = highlighted(List::new(items).block(block));
            frame.render_stateful_widget(list_widget, area, &mut list.list_state);
        }
    }
}
