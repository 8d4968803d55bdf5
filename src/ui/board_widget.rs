use crate::game::{Player, SLOTS};
use crate::ui::theme::BoardTheme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the board: Player B's pits right-to-left on top, Player A's pits
/// left-to-right below, stores on the outer edges.
///
/// ```text
///        12   11   10    9    8    7
///  [ 0] ( 4) ( 4) ( 4) ( 4) ( 4) ( 4)
///       ( 4) ( 4) ( 4) ( 4) ( 4) ( 4) [ 0]
///         0    1    2    3    4    5
/// ```
pub fn render_board(
    frame: &mut Frame,
    pits: &[u8; SLOTS],
    selected_pit: Option<usize>,
    theme: &dyn BoardTheme,
    area: Rect,
) {
    let mut lines = Vec::new();

    // Player B's pit indices, right to left
    let mut label_line = vec![Span::raw("     ")];
    for pit in (7..13).rev() {
        label_line.push(index_label(pit, selected_pit));
    }
    lines.push(Line::from(label_line));

    // Player B's row with their store on the left
    let mut b_row = vec![store_span(pits[Player::B.store_index()], theme), Span::raw(" ")];
    for pit in (7..13).rev() {
        b_row.push(pit_span(pits[pit], pit, selected_pit, theme));
    }
    lines.push(Line::from(b_row));

    // Player A's row with their store on the right
    let mut a_row = vec![Span::raw("     ")];
    for pit in 0..6 {
        a_row.push(pit_span(pits[pit], pit, selected_pit, theme));
    }
    a_row.push(Span::raw(" "));
    a_row.push(store_span(pits[Player::A.store_index()], theme));
    lines.push(Line::from(a_row));

    let mut label_line = vec![Span::raw("     ")];
    for pit in 0..6 {
        label_line.push(index_label(pit, selected_pit));
    }
    lines.push(Line::from(label_line));

    let widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn pit_span(
    stones: u8,
    pit: usize,
    selected_pit: Option<usize>,
    theme: &dyn BoardTheme,
) -> Span<'static> {
    let (open, close) = theme.pit_shape();
    let text = format!("{open}{stones:>2}{close} ");
    let mut style = Style::default().fg(if stones > 0 {
        theme.stone_color()
    } else {
        Color::DarkGray
    });
    if selected_pit == Some(pit) {
        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
    }
    Span::styled(text, style)
}

fn store_span(stones: u8, theme: &dyn BoardTheme) -> Span<'static> {
    let (open, close) = theme.store_shape();
    Span::styled(
        format!("{open}{stones:>2}{close}"),
        Style::default()
            .fg(theme.pit_color())
            .add_modifier(Modifier::BOLD),
    )
}

fn index_label(pit: usize, selected_pit: Option<usize>) -> Span<'static> {
    let style = if selected_pit == Some(pit) {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(format!("{pit:>3}  "), style)
}
