// Modal viewer for README summaries and open issues.

use ratatui::{prelude::*, widgets::*};

use crate::explorer::Document;
use crate::github::Issue;
use crate::state::{LoadingState, ModalContent, ModalState};

use super::list::format_relative_time;

const NO_ISSUES_MESSAGE: &str = "No open issues found.";

/// Rect covering `percent_x` by `percent_y` of `area`, centered.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn document_section(lines: &mut Vec<Line<'static>>, title: &str, document: &Document) {
    lines.push(heading(title));
    lines.extend(
        document
            .summary
            .lines()
            .map(|line| Line::from(line.to_string())),
    );
    lines.push(Line::from(""));
}

/// Lines for a loaded README: summaries first, then the full text.
pub fn readme_lines(readme: &Document, contributing: Option<&Document>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    document_section(&mut lines, "Summary", readme);
    if let Some(contributing) = contributing {
        document_section(&mut lines, "How to Contribute", contributing);
    }
    lines.push(heading("Full README"));
    lines.extend(
        readme
            .content
            .lines()
            .map(|line| Line::from(line.to_string())),
    );
    lines
}

/// Lines for an issue list.
pub fn issue_lines(issues: &[Issue]) -> Vec<Line<'static>> {
    if issues.is_empty() {
        return vec![Line::from(Span::styled(
            NO_ISSUES_MESSAGE,
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let mut lines = Vec::new();
    for issue in issues {
        lines.push(Line::from(vec![
            Span::styled(
                format!("#{} ", issue.number),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                issue.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "  Opened by: {} · {} · Comments: {}",
                issue.user.login,
                format_relative_time(&issue.created_at),
                issue.comments
            ),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", issue.html_url),
            Style::default().fg(Color::Blue),
        )));
        lines.push(Line::from(""));
    }
    lines
}

/// Draw the modal on top of the current view.
pub fn draw_modal(frame: &mut Frame, modal: &ModalState) {
    let area = centered_rect(80, 80, frame.area());

    // Clear the area behind the modal
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(modal.title())
        .title_bottom(Line::from(vec![
            Span::styled(" ↑↓", Style::default().fg(Color::Yellow)),
            Span::styled(" = Scroll  ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" = Close ", Style::default().fg(Color::DarkGray)),
        ]));

    let (lines, style) = match &modal.content {
        LoadingState::Idle | LoadingState::Loading => (
            vec![Line::from("⏳ Loading...")],
            Style::default().fg(Color::Yellow),
        ),
        LoadingState::Error(e) => (
            vec![Line::from(format!("❌ {}", e))],
            Style::default().fg(Color::Red),
        ),
        LoadingState::Loaded(ModalContent::Readme {
            readme,
            contributing,
        }) => (readme_lines(readme, contributing.as_ref()), Style::default()),
        LoadingState::Loaded(ModalContent::Issues(issues)) => {
            (issue_lines(issues), Style::default())
        }
    };

    let paragraph = Paragraph::new(lines)
        .style(style)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((modal.scroll, 0));
    frame.render_widget(paragraph, area);
}
