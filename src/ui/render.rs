use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::simulation::params::EVENT_LOG_LEN;

/// Height of the field area for a frame of `total_rows`.
#[must_use]
pub const fn field_rows(total_rows: u16) -> usize {
    // HUD line plus the bordered event log
    total_rows.saturating_sub(1 + EVENT_LOG_LEN as u16 + 2) as usize
}

pub fn draw_ui<'a>(
    f: &mut Frame,
    grid_lines: Vec<String>,
    hud_info: &str,
    events: impl IntoIterator<Item = &'a str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                          // HUD
            Constraint::Min(0),                             // Field
            Constraint::Length(EVENT_LOG_LEN as u16 + 2),   // Event log
        ])
        .split(f.area());

    // HUD
    let hud = Paragraph::new(Span::styled(
        hud_info,
        Style::default().add_modifier(Modifier::REVERSED),
    ));
    f.render_widget(hud, chunks[0]);

    // Field
    let text: Vec<Line> = grid_lines
        .into_iter()
        .map(|s| Line::from(Span::raw(s)))
        .collect();

    let field = Paragraph::new(text)
        .block(Block::default().borders(Borders::NONE))
        .style(Style::default().fg(Color::White).bg(Color::Black));

    f.render_widget(field, chunks[1]);

    // Event log
    let log: Vec<Line> = events.into_iter().map(Line::from).collect();
    let log = Paragraph::new(log)
        .block(Block::default().borders(Borders::TOP).title(" events "))
        .style(Style::default().fg(Color::Gray));
    f.render_widget(log, chunks[2]);
}
