use crate::error::MoveError;
use crate::game::{GameEvent, RoundController, RoundOutcome, RuleKind};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use tracing::debug;

pub struct App {
    controller: RoundController,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(controller: RoundController) -> Self {
        let selected_column = controller.board().width() / 2; // Start in middle
        let mut app = App {
            controller,
            selected_column,
            should_quit: false,
            message: None,
        };
        app.absorb_events();
        app
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(|e| -> io::Error { e.into() })?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;
        let width = self.controller.board().width();

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < width {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let column = (c as usize) - ('1' as usize);
                if column < width {
                    self.selected_column = column;
                    self.drop_piece();
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('s') => self.toggle_rule(RuleKind::Square),
            KeyCode::Char('c') => self.toggle_rule(RuleKind::FourCorners),
            KeyCode::Char('n') => {
                self.controller.start_new_round();
            }
            KeyCode::Char('p') => {
                self.controller.start_new_session();
            }
            _ => {}
        }

        self.absorb_events();
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        // Full columns and finished rounds come back as events
        if let Err(MoveError::Board(err)) = self.controller.select_column(self.selected_column) {
            if err.is_out_of_bounds() {
                self.message = Some(err.to_string());
            }
        }
    }

    fn toggle_rule(&mut self, kind: RuleKind) {
        let enabled = self.controller.rules().is_enabled(kind);
        // Lock rejections come back as events
        let _ = self.controller.set_rule_enabled(kind, !enabled);
    }

    /// Turn queued controller events into the status line.
    fn absorb_events(&mut self) {
        let mut notes = Vec::new();
        for event in self.controller.drain_events() {
            debug!(?event, "ui event");
            let note = match event {
                GameEvent::RoundEnded(RoundOutcome::Won(player)) => {
                    format!("{player} wins! Press 'n' for another round.")
                }
                GameEvent::RoundEnded(RoundOutcome::Tied) => {
                    "Tie! Press 'n' for another round.".to_string()
                }
                GameEvent::ColumnFullRejection { column } => {
                    format!("Column {} is full!", column + 1)
                }
                GameEvent::RuleSetLockedRejection(kind) => {
                    format!("Can't change {kind} after the first piece is played.")
                }
                GameEvent::RoundOverRejection => {
                    "Round is over! Press 'n' to play again.".to_string()
                }
                GameEvent::RulesChanged(rules) => format!(
                    "Square {}, four corners {}.",
                    on_off(rules.square),
                    on_off(rules.four_corners)
                ),
                GameEvent::RoundStarted { round } => format!("Round {round} started!"),
                GameEvent::SessionStarted => "New players, scores reset.".to_string(),
                GameEvent::PiecePlaced { .. } | GameEvent::TurnChanged(_) => continue,
            };
            notes.push(note);
        }
        if !notes.is_empty() {
            self.message = Some(notes.join(" "));
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.controller, self.selected_column, &self.message);
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(RoundController::new())
    }
}
