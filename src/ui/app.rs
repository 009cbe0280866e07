use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};

use super::game_view::{self, Screen};
use crate::ai::{Decision, Participant, ParticipantKind};
use crate::error::MoveError;
use crate::game::{Board, Player, COLS};

/// What the human asked for on the game-over screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndAction {
    Restart,
    Quit,
}

enum Input {
    Drop,
    Restart,
    Quit,
    Moved,
}

/// A human playing through the full-screen terminal UI.
///
/// Each `choose_action` runs the render/event loop until the human drops a
/// piece or leaves.
pub struct TuiPlayer<B: Backend> {
    terminal: Terminal<B>,
    name: String,
    player: Player,
    selected_column: usize,
    message: Option<String>,
    restart_requested: bool,
}

impl<B: Backend> TuiPlayer<B> {
    pub fn new(terminal: Terminal<B>, name: impl Into<String>, player: Player) -> Self {
        TuiPlayer {
            terminal,
            name: name.into(),
            player,
            selected_column: COLS / 2, // Start in middle
            message: None,
            restart_requested: false,
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    /// Seat the human as `player` for the next game.
    pub fn set_player(&mut self, player: Player) {
        self.player = player;
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Whether the last abandon came from pressing `r`.
    pub fn take_restart_request(&mut self) -> bool {
        std::mem::take(&mut self.restart_requested)
    }

    /// Show the final board until the human restarts or quits.
    pub fn show_result(&mut self, board: &Board, result: &str) -> io::Result<EndAction> {
        self.message = Some(format!("{result}  Press 'r' to play again or 'q' to quit."));
        loop {
            self.draw(board, "Game over", false)?;
            match self.next_input()? {
                Some(Input::Restart) => {
                    self.message = None;
                    return Ok(EndAction::Restart);
                }
                Some(Input::Quit) => return Ok(EndAction::Quit),
                Some(Input::Drop) | Some(Input::Moved) | None => {}
            }
        }
    }

    fn draw(&mut self, board: &Board, status: &str, to_move: bool) -> io::Result<()> {
        let screen = Screen {
            board,
            selected_column: self.selected_column,
            to_move: to_move.then_some(self.player),
            status,
            message: self.message.as_deref(),
        };
        self.terminal.draw(|f| game_view::render(f, &screen))?;
        Ok(())
    }

    fn next_input(&mut self) -> io::Result<Option<Input>> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                return Ok(self.handle_key(key));
            }
        }
        Ok(None)
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Input> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
            KeyCode::Char('r') => Some(Input::Restart),
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
                Some(Input::Moved)
            }
            KeyCode::Right => {
                if self.selected_column + 1 < COLS {
                    self.selected_column += 1;
                }
                Some(Input::Moved)
            }
            KeyCode::Enter | KeyCode::Char(' ') => Some(Input::Drop),
            _ => None,
        }
    }

    fn run_turn(&mut self, legal: &[usize], board: &Board) -> io::Result<Decision> {
        let status = format!("{}'s turn ({})", self.name, self.player.name());
        loop {
            self.draw(board, &status, true)?;
            match self.next_input()? {
                Some(Input::Drop) if legal.contains(&self.selected_column) => {
                    self.message = None;
                    return Ok(Decision::Drop(self.selected_column));
                }
                Some(Input::Drop) => {
                    self.message = Some(format!("Column {} is full!", self.selected_column));
                }
                Some(Input::Restart) => {
                    self.restart_requested = true;
                    self.message = Some("New game started!".to_string());
                    return Ok(Decision::Abandon);
                }
                Some(Input::Quit) => return Ok(Decision::Abandon),
                Some(Input::Moved) => self.message = None,
                None => {}
            }
        }
    }
}

impl<B: Backend> Participant for TuiPlayer<B> {
    fn choose_action(&mut self, legal: &[usize], board: &Board) -> Decision {
        match self.run_turn(legal, board) {
            Ok(decision) => decision,
            Err(e) => {
                log::error!("terminal error: {e}");
                Decision::Abandon
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ParticipantKind {
        ParticipantKind::External
    }

    fn on_rejected(&mut self, _column: usize, error: &MoveError) {
        self.message = Some(format!("{error}!"));
    }
}
