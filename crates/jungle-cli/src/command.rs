//! Parsing of terminal commands.

use thiserror::Error;

/// Errors from parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("'{0}' needs a cell id")]
    MissingCell(&'static str),
    #[error("'{0}' is not a cell id")]
    InvalidCell(String),
}

/// Commands typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Select the piece on a cell.
    Select(u8),
    /// Move the selected piece to a cell.
    Move(u8),
    /// Print the board.
    Board,
    /// Start over from the initial layout.
    Reset,
    Help,
    Quit,
    /// Blank line.
    Empty,
    Unknown(String),
}

impl Command {
    /// Parse one input line.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();
        let mut parts = input.split_whitespace();

        match parts.next().unwrap_or("") {
            "select" | "s" => Ok(Command::Select(Self::parse_cell("select", parts.next())?)),
            "move" | "m" => Ok(Command::Move(Self::parse_cell("move", parts.next())?)),
            "board" | "b" => Ok(Command::Board),
            "reset" => Ok(Command::Reset),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            "" => Ok(Command::Empty),
            _ => Ok(Command::Unknown(input.to_string())),
        }
    }

    // Syntax only; ids off the board are rejected by the engine.
    fn parse_cell(command: &'static str, arg: Option<&str>) -> Result<u8, CommandError> {
        let arg = arg.ok_or(CommandError::MissingCell(command))?;
        arg.parse()
            .map_err(|_| CommandError::InvalidCell(arg.to_string()))
    }
}

pub const HELP: &str = "\
commands:
  select <cell>  (s)  pick up the piece on <cell>
  move <cell>    (m)  move the selected piece to <cell>
  board          (b)  show the board
  reset               start again from the initial layout
  help           (h)  show this text
  quit           (q)  leave

cells are numbered column * 9 + row: column 0 is the west edge, row 0 the
south edge. On the board, ~ is river, # a trap, @ a den; uppercase pieces
are South, lowercase North; [ ] marks where the selected piece can go.";
