use crate::game::{Cell, Player, Position, RoundController, RoundStatus, RuleKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    controller: &RoundController,
    selected_column: usize,
    message: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Board + sidebar
            Constraint::Length(3), // Message
            Constraint::Length(4), // Controls
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(28)])
        .split(chunks[1]);

    render_header(frame, controller, chunks[0]);
    render_board(frame, controller, selected_column, body[0]);
    render_sidebar(frame, controller, body[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::P1 => Color::Red,
        Player::P2 => Color::Yellow,
    }
}

fn render_header(frame: &mut Frame, controller: &RoundController, area: Rect) {
    let round = controller.round_number();
    let (status, color) = match controller.status() {
        RoundStatus::InProgress => {
            let player = controller.current_player();
            (
                format!("Round {round}  |  {player} to move"),
                player_color(player),
            )
        }
        RoundStatus::Won(player) => (
            format!("Round {round}  |  {player} wins!"),
            player_color(player),
        ),
        RoundStatus::Tied => (format!("Round {round}  |  Tie"), Color::White),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(
    frame: &mut Frame,
    controller: &RoundController,
    selected_column: usize,
    area: Rect,
) {
    let board = controller.board();
    let winning_line = controller.winning_line();
    let mut lines = Vec::new();

    // Hover marker in the colour of the player to move; gone once the round ends
    let mut hover_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..board.width() {
        match controller.status() {
            RoundStatus::InProgress if col == selected_column => {
                let color = player_color(controller.current_player());
                hover_line.push(Span::styled(" ● ", Style::default().fg(color)));
            }
            _ => hover_line.push(Span::raw("   ")),
        }
    }
    hover_line.push(Span::raw("  "));
    lines.push(Line::from(hover_line));

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")];
    for col in 0..board.width() {
        let label = format!("{:^3}", col + 1);
        if col == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else if board.is_column_full(col) {
            col_line.push(Span::styled(label, Style::default().fg(Color::DarkGray)));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    let rule = "═".repeat(board.width() * 3 + 1);
    lines.push(Line::from(format!("  ╔{rule}╗")));

    for row in 0..board.height() {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..board.width() {
            let winning = winning_line.is_some_and(|line| line.contains(Position::new(row, col)));
            let span = match board.get(row, col) {
                Some(Cell::Occupied(player)) if winning => Span::styled(
                    " ◉ ",
                    Style::default()
                        .fg(player_color(player))
                        .add_modifier(Modifier::BOLD),
                ),
                Some(Cell::Occupied(player)) => {
                    Span::styled(" ● ", Style::default().fg(player_color(player)))
                }
                _ => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
            };
            row_spans.push(span);
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{rule}╝")));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_sidebar(frame: &mut Frame, controller: &RoundController, area: Rect) {
    let score = controller.score_board();
    let rules = controller.rules();

    let mut lines: Vec<Line> = [Player::P1, Player::P2]
        .into_iter()
        .map(|player| {
            Line::from(Span::styled(
                format!("{player}: {}", score.wins(player)),
                Style::default().fg(player_color(player)),
            ))
        })
        .collect();
    lines.push(Line::from(format!("Ties:     {}", score.ties)));
    lines.push(Line::from(""));

    let lock = if controller.rules_locked() { " (locked)" } else { "" };
    lines.push(Line::from(format!("Win rules{lock}")));
    for kind in [RuleKind::Square, RuleKind::FourCorners] {
        let mark = if rules.is_enabled(kind) { "[x]" } else { "[ ]" };
        lines.push(Line::from(format!(" {mark} {kind}")));
    }

    let sidebar = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Score"));
    frame.render_widget(sidebar, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line1 = Line::from("←/→: Move  |  Enter or 1-9: Drop  |  Q: Quit");
    let line2 = Line::from("S: Square  |  C: Four corners  |  N: New round  |  P: New players");

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}
