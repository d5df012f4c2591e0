//! The UI renders the application state into the terminal.
//!
//! The draw function dispatches based on the current view. The files view
//! shows the flattened header/file rows with the default section's header
//! styled distinctly; the bottom bar carries help, status messages, or the
//! input buffer.

use crate::app_state::{AppState, InputPurpose, Row, View};
use crate::document::SectionId;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Renders the active view based on current application state.
pub fn draw(f: &mut Frame, app: &AppState) {
    match app.view {
        View::FolderPick => draw_pick(f, app),
        View::Files => draw_files(f, app, &help_text(app)),
        View::Input => draw_files(f, app, &input_text(app)),
    }
}

fn draw_pick(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let mut lines = vec![
        Line::from(""),
        Line::from("Type the path of a folder to open and press Enter."),
        Line::from(""),
        Line::from(Span::styled(
            format!("> {}", app.input_buffer),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(ref msg) = app.message {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Open Folder"));
    f.render_widget(body, chunks[0]);

    let help = Paragraph::new("Enter: Open | Esc: Quit")
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[1]);
}

fn draw_files(f: &mut Frame, app: &AppState, bottom: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let items: Vec<ListItem> = app
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let line = match row {
                Row::Header(id) => {
                    let style = if is_default(app, *id) {
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD)
                    };
                    Line::from(Span::styled(header_label(app, *id), style))
                }
                Row::File { name, .. } => {
                    Line::from(vec![Span::raw("  "), Span::raw(name.clone())])
                }
            };
            let style = if i == app.cursor {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let title = app.session.store().map_or_else(
        || "Files".to_string(),
        |store| {
            format!(
                "{} ({} files)",
                store.folder().display(),
                store.known_files().len()
            )
        },
    );
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, chunks[0]);

    let bar = Paragraph::new(bottom.to_string()).block(Block::default().borders(Borders::ALL));
    f.render_widget(bar, chunks[1]);
}

fn help_text(app: &AppState) -> String {
    app.message.clone().unwrap_or_else(|| {
        "↑/↓: Navigate | Enter: Open/Rename | a: Add Header | d: Delete Header | \
         Ctrl+↑/↓: Move | q: Back"
            .to_string()
    })
}

fn input_text(app: &AppState) -> String {
    match app.input_purpose {
        Some(InputPurpose::AddHeader) => format!("New header: {}", app.input_buffer),
        Some(InputPurpose::RenameHeader(_)) => format!("Rename header: {}", app.input_buffer),
        None => app.input_buffer.clone(),
    }
}

fn header_label(app: &AppState, id: SectionId) -> String {
    app.session
        .store()
        .and_then(|store| store.document().section(id))
        .map_or_else(String::new, |section| section.header.clone())
}

fn is_default(app: &AppState, id: SectionId) -> bool {
    app.session
        .store()
        .is_some_and(|store| store.document().default_id() == id)
}
