use std::io::{self, BufRead, Write};

use crate::ai::{Decision, Participant, ParticipantKind};
use crate::error::MoveError;
use crate::game::Board;

/// Ask for the player's name, falling back to `default` on a blank line or
/// end of input.
pub fn read_name<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    default: &str,
) -> io::Result<String> {
    write!(output, "Input your name: ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(match line.trim() {
        "" => default.to_string(),
        name => name.to_string(),
    })
}

/// A human entering column numbers on a line-oriented stream.
///
/// `exit`, `quit` or end of input abandons the game.
pub struct TextPlayer<R, W> {
    name: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TextPlayer<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        TextPlayer {
            name: name.into(),
            input,
            output,
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    fn prompt(&mut self, legal: &[usize], board: &Board) -> io::Result<Decision> {
        write!(self.output, "{board}")?;
        loop {
            write!(self.output, "Input your action col: ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(Decision::Abandon);
            }

            let line = line.trim();
            if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
                return Ok(Decision::Abandon);
            }
            match line.parse::<usize>() {
                Ok(column) if legal.contains(&column) => return Ok(Decision::Drop(column)),
                Ok(column) => {
                    writeln!(self.output, "Column {column} is not available, insert again!")?;
                }
                Err(_) => writeln!(self.output, "Wrong format, insert again!")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Participant for TextPlayer<R, W> {
    fn choose_action(&mut self, legal: &[usize], board: &Board) -> Decision {
        match self.prompt(legal, board) {
            Ok(decision) => decision,
            Err(e) => {
                log::warn!("lost the console: {e}");
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
        let _ = writeln!(self.output, "{error}, insert again!");
    }
}
