use crate::game::{GameOutcome, GameState, Player};
use crate::ui::board_widget;
use crate::ui::theme::BoardTheme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    game_state: &GameState,
    selected_pit: usize,
    theme: &dyn BoardTheme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(6),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, game_state, theme, chunks[0]);
    let selected = if game_state.is_terminal() {
        None
    } else {
        Some(selected_pit)
    };
    board_widget::render_board(frame, &game_state.board_data(), selected, theme, chunks[1]);
    render_message(frame, game_state, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_header(
    frame: &mut Frame,
    game_state: &GameState,
    theme: &dyn BoardTheme,
    area: ratatui::layout::Rect,
) {
    let color = match game_state.current_player() {
        Player::A => Color::Green,
        Player::B => Color::Yellow,
    };

    let status = if game_state.is_terminal() {
        format!("Game Over  |  Theme: {}", theme.name())
    } else {
        format!(
            "Turn: {}  |  Undos left  A: {}  B: {}  |  Theme: {}",
            game_state.turn_label(),
            game_state.undos_remaining(Player::A),
            game_state.undos_remaining(Player::B),
            theme.name(),
        )
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Mancala"));

    frame.render_widget(header, area);
}

fn render_message(frame: &mut Frame, game_state: &GameState, area: ratatui::layout::Rect) {
    let (text, color) = if let Some(outcome) = game_state.outcome() {
        let color = match outcome {
            GameOutcome::Winner(_) => Color::Green,
            GameOutcome::Draw => Color::Yellow,
        };
        (game_state.winner_message(), color)
    } else if !game_state.error_msg().is_empty() {
        (game_state.error_msg().to_string(), Color::Red)
    } else if !game_state.free_turn_msg().is_empty() {
        (game_state.free_turn_msg().to_string(), Color::Cyan)
    } else {
        (String::new(), Color::White)
    };

    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: ratatui::layout::Rect) {
    let line = Line::from(vec![
        Span::raw("←/→: Select pit  |  Enter: Sow  |  "),
        Span::styled("U", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(": Undo  |  "),
        Span::styled("T", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(": Theme  |  "),
        Span::styled("R", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(": Restart  |  "),
        Span::styled("Q", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(": Quit"),
    ]);

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
