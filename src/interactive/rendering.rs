//! TUI rendering with ratatui
//!
//! Draws the suggestion, the turn history and the clickable clue tiles. Tile
//! positions are derived from the frame size alone so mouse clicks can be
//! mapped back to a position without keeping render state.

use super::app::{App, MessageStyle};
use crate::core::{Clue, ClueCode, Word};
use crate::session::Phase;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
};

const TILE_WIDTH: u16 = 7;
const TILE_GAP: u16 = 1;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Screen regions for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub header: Rect,
    pub suggestion: Rect,
    pub history: Rect,
    pub messages: Rect,
    pub input: Rect,
    pub status: Rect,
}

/// Split the frame into its panels
#[must_use]
pub fn layout(area: Rect) -> Areas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Main content
            Constraint::Length(5), // Clue input
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(main_chunks[0]);

    Areas {
        header: chunks[0],
        suggestion: left[0],
        history: left[1],
        messages: main_chunks[1],
        input: chunks[2],
        status: chunks[3],
    }
}

/// Rectangles of the clue tiles inside the input panel
///
/// Tiles that do not fit are clipped away.
#[must_use]
pub fn tile_areas(input: Rect, count: usize) -> Vec<Rect> {
    let inner = Block::default().borders(Borders::ALL).inner(input);
    let mut areas = Vec::with_capacity(count);

    let mut x = inner.x.saturating_add(1);
    for _ in 0..count {
        if x.saturating_add(TILE_WIDTH) > inner.right() {
            break;
        }
        areas.push(Rect::new(x, inner.y, TILE_WIDTH, inner.height));
        x += TILE_WIDTH + TILE_GAP;
    }
    areas
}

/// Map a click at (`column`, `row`) to a clue position
#[must_use]
pub fn clue_tile_at(frame: Rect, count: usize, column: u16, row: u16) -> Option<usize> {
    let input = layout(frame).input;
    tile_areas(input, count)
        .iter()
        .position(|tile| tile.contains(Position::new(column, row)))
}

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let areas = layout(f.area());

    render_header(f, areas.header);
    render_suggestion(f, app, areas.suggestion);
    render_history(f, app, areas.history);
    render_messages(f, app, areas.messages);
    render_input(f, app, areas.input);
    render_status(f, app, areas.status);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("🤖 WORDLE BOT - Interactive Mode")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn clue_color(code: ClueCode) -> Color {
    match code {
        ClueCode::Correct => Color::Green,
        ClueCode::Misplaced => Color::Yellow,
        ClueCode::Absent => Color::White,
    }
}

/// Letters of `word` as coloured spans
fn word_spans(word: &Word, clue: &Clue) -> Vec<Span<'static>> {
    word.letters()
        .enumerate()
        .map(|(i, letter)| {
            Span::styled(
                format!(" {} ", letter.to_ascii_uppercase()),
                Style::default()
                    .fg(Color::Black)
                    .bg(clue_color(clue.get(i).unwrap_or_default()))
                    .add_modifier(Modifier::BOLD),
            )
        })
        .collect()
}

fn render_suggestion(f: &mut Frame, app: &App, area: Rect) {
    let state = app.controller.state();

    let content = match (state.phase(), state.current_word()) {
        (Phase::Initializing, _) => vec![Line::from(format!(
            "{} Asking the solver for a first word...",
            app.spinner()
        ))],
        (_, Some(word)) => vec![
            Line::from("Wordle Bot recommends your next guess is:"),
            Line::from(""),
            Line::from(word_spans(word, &state.previous_clue())),
        ],
        (_, None) => vec![Line::from(Span::styled(
            "No suggestion available. Press 'r' to retry.",
            Style::default().fg(Color::Red),
        ))],
    };

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .title(" Suggestion ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}

fn render_history(f: &mut Frame, app: &App, area: Rect) {
    let history = app.controller.state().history();

    // Newest first so the latest turns stay visible
    let items: Vec<ListItem> = history
        .iter()
        .enumerate()
        .rev()
        .map(|(i, entry)| {
            let mut spans = vec![Span::raw(format!("Guess {}: ", i + 1))];
            spans.extend(word_spans(entry.word(), entry.clue()));
            spans.push(Span::raw(format!(" {}", entry.clue().to_emoji())));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!(" History ({}) ", history.len()))
            .borders(Borders::ALL),
    );

    f.render_widget(list, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let mut items: Vec<ListItem> = Vec::new();

    if let Some(error) = app.controller.state().error_message() {
        items.push(ListItem::new(error.to_string()).style(Style::default().fg(Color::Red)));
    }

    items.extend(app.messages.iter().rev().map(|msg| {
        let style = match msg.style {
            MessageStyle::Info => Style::default().fg(Color::White),
            MessageStyle::Success => Style::default().fg(Color::Green),
            MessageStyle::Error => Style::default().fg(Color::Red),
        };
        ListItem::new(msg.text.clone()).style(style)
    }));

    let list = List::new(items).block(Block::default().title(" Messages ").borders(Borders::ALL));
    f.render_widget(list, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let state = app.controller.state();

    let (title, color) = match state.phase() {
        Phase::Won => (
            " 🎉 CONGRATULATIONS! 🎉 | Press 'n' for new session or 'q' to quit ",
            Color::Green,
        ),
        Phase::Submitting => (" Waiting for the solver... ", Color::DarkGray),
        Phase::Ready => (
            " Click a letter (or 1-5 / ←→ + space) to set clue colours | Enter to submit ",
            Color::Yellow,
        ),
        Phase::Initializing | Phase::Errored => (" Clue Input ", Color::DarkGray),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .style(Style::default().fg(color));
    f.render_widget(block, area);

    let Some(word) = state.current_word() else {
        return;
    };

    let clue = state.pending_clue();
    let show_cursor = state.phase() == Phase::Ready;

    for (i, (tile, letter)) in tile_areas(area, word.len())
        .into_iter()
        .zip(word.letters())
        .enumerate()
    {
        let border = if show_cursor && i == app.cursor {
            BorderType::Thick
        } else {
            BorderType::Plain
        };

        let widget = Paragraph::new(letter.to_ascii_uppercase().to_string())
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::Black)
                    .bg(clue_color(clue.get(i).unwrap_or_default()))
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().borders(Borders::ALL).border_type(border));

        f.render_widget(widget, tile);
    }
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(40),
        ])
        .split(area);

    let phase = app.controller.phase();
    let mode_text = if app.controller.is_busy() {
        format!("{} {phase}", app.spinner())
    } else {
        format!("State: {phase}")
    };
    f.render_widget(Paragraph::new(mode_text).alignment(Alignment::Center), chunks[0]);

    let stats_text = format!(
        "Sessions: {} | Solved: {}",
        app.stats.sessions, app.stats.solved
    );
    f.render_widget(Paragraph::new(stats_text).alignment(Alignment::Center), chunks[1]);

    let help_text = match phase {
        Phase::Errored => "q: Quit | r: Retry | n: New Session",
        Phase::Won => "q: Quit | n: New Session",
        _ => "q: Quit | n: New Session | Enter: Submit",
    };
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}

/// Spinner glyph for a tick count
#[must_use]
pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_sit_inside_input_panel() {
        let frame = Rect::new(0, 0, 100, 30);
        let input = layout(frame).input;
        let tiles = tile_areas(input, 5);

        assert_eq!(tiles.len(), 5);
        for tile in &tiles {
            assert!(input.contains(Position::new(tile.x, tile.y)));
            assert!(tile.right() <= input.right());
            assert!(tile.bottom() <= input.bottom());
        }
        // No overlap between neighbours
        for pair in tiles.windows(2) {
            assert!(pair[0].right() <= pair[1].x);
        }
    }

    #[test]
    fn click_maps_to_tile() {
        let frame = Rect::new(0, 0, 100, 30);
        let tiles = tile_areas(layout(frame).input, 5);

        for (i, tile) in tiles.iter().enumerate() {
            let centre_x = tile.x + tile.width / 2;
            let centre_y = tile.y + tile.height / 2;
            assert_eq!(clue_tile_at(frame, 5, centre_x, centre_y), Some(i));
        }

        assert_eq!(clue_tile_at(frame, 5, 0, 0), None);
        assert_eq!(clue_tile_at(frame, 5, 99, tiles[0].y), None);
    }

    #[test]
    fn narrow_frame_clips_tiles() {
        let frame = Rect::new(0, 0, 20, 30);
        assert_eq!(tile_areas(layout(frame).input, 5).len(), 2);
    }

    #[test]
    fn spinner_wraps() {
        assert_eq!(spinner_frame(0), spinner_frame(SPINNER.len()));
    }
}
