use crate::wizard::state::{DestMode, Screen, StatusLine, WizardState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::path::Path;

/// Render the wizard.
pub fn render(frame: &mut Frame, state: &WizardState) {
    // Clear the frame to prevent ghost characters
    frame.render_widget(
        Block::default().style(Style::default().bg(Color::Reset)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Screen body
            Constraint::Length(3), // Status line
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0], state);
    match state.screen {
        Screen::Source => render_source(frame, chunks[1], state),
        Screen::Destination => render_destination(frame, chunks[1], state),
        Screen::Confirm => render_confirm(frame, chunks[1], state),
    }
    render_status(frame, chunks[2], state);
    render_footer(frame, chunks[3], state);
}

fn render_header(frame: &mut Frame, area: Rect, state: &WizardState) {
    let title = match state.screen {
        Screen::Source => "trackswap - Step 1/3: Select source file",
        Screen::Destination => "trackswap - Step 2/3: Select update file",
        Screen::Confirm => "trackswap - Step 3/3: Confirm and apply",
    };

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn render_source(frame: &mut Frame, area: Rect, state: &WizardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let prompt = Paragraph::new("Select the original file (the one with the metadata to keep):");
    frame.render_widget(prompt, chunks[0]);

    render_input(frame, chunks[1], "Source file path", &state.source_input);
}

fn render_destination(frame: &mut Frame, area: Rect, state: &WizardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Source preview
            Constraint::Length(2), // Prompt
            Constraint::Length(3), // Input
            Constraint::Min(0),
        ])
        .split(area);

    render_preview(frame, chunks[0], state);

    let prompt = Paragraph::new("Which file is the update for this file?");
    frame.render_widget(prompt, chunks[1]);

    let (title, value) = match state.dest_mode {
        DestMode::Browse => ("Update file path", state.dest_input.as_str()),
        DestMode::Url => ("Download link", state.dest_input.as_str()),
    };
    render_input(frame, chunks[2], title, value);
}

fn render_preview(frame: &mut Frame, area: Rect, state: &WizardState) {
    let block = Block::default().borders(Borders::ALL).title("Source");

    let (title, art) = match &state.preview {
        Some(p) => {
            let title = if p.title.is_empty() {
                "Unknown Title".to_string()
            } else {
                p.title.clone()
            };
            let art = match &p.artwork {
                Some(a) => {
                    let mime = if a.mime_type.is_empty() {
                        "image"
                    } else {
                        a.mime_type.as_str()
                    };
                    format!("Album art: {} ({} KiB)", mime, a.data.len() / 1024)
                }
                None => "No album art".to_string(),
            };
            (title, art)
        }
        None => ("Unknown Title".to_string(), "No album art".to_string()),
    };

    let lines = vec![
        Line::from(Span::styled(title, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(art, Style::default().fg(Color::DarkGray))),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_confirm(frame: &mut Frame, area: Rect, state: &WizardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // From/to summary
            Constraint::Length(1), // Notes label
            Constraint::Length(3), // Notes input
            Constraint::Min(0),
        ])
        .split(area);

    let source = state
        .session
        .source_file
        .as_deref()
        .map(basename)
        .unwrap_or_default();
    let dest = state
        .session
        .dest_file
        .as_deref()
        .map(basename)
        .unwrap_or_default();

    let summary = Paragraph::new(vec![
        Line::from(format!("Update metadata from: {}", source)),
        Line::from(format!("onto update file:     {}", dest)),
    ]);
    frame.render_widget(summary, chunks[0]);

    let label = Paragraph::new("Update notes (will be saved in Comments):");
    frame.render_widget(label, chunks[1]);

    render_input(frame, chunks[2], "Notes", &state.notes_input);
}

fn render_input(frame: &mut Frame, area: Rect, title: &str, value: &str) {
    let input = Paragraph::new(value)
        .style(Style::default().fg(Color::White))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(input, area);
}

fn render_status(frame: &mut Frame, area: Rect, state: &WizardState) {
    let (text, color) = if state.downloading {
        ("Downloading...".to_string(), Color::Yellow)
    } else {
        match &state.status {
            Some(StatusLine::Info(msg)) => (msg.clone(), Color::Green),
            Some(StatusLine::Error(msg)) => (msg.clone(), Color::Red),
            None => (String::new(), Color::Reset),
        }
    };

    let status = Paragraph::new(text)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn render_footer(frame: &mut Frame, area: Rect, state: &WizardState) {
    let mut spans = vec![
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(match state.screen {
            Screen::Source => " Next | ",
            Screen::Destination => " Next | ",
            Screen::Confirm => " Update | ",
        }),
    ];

    if state.screen == Screen::Destination {
        spans.push(Span::styled(
            "Tab",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(match state.dest_mode {
            DestMode::Browse => " Switch to download link | ",
            DestMode::Url => " Switch to file path | ",
        }));
    }

    spans.push(Span::styled(
        "Esc",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::raw(if state.screen == Screen::Source {
        " Quit"
    } else {
        " Back"
    }));

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
