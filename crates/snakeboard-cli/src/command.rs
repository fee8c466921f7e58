// Line-oriented command parsing for the board session.

use std::path::PathBuf;

use thiserror::Error;

/// A command typed at the board prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Select a player for the team currently on the clock.
    Pick(String),
    Undo,
    /// Reset the whole draft. Only produced when confirmed.
    Reset,
    ShowBoard,
    ShowPool,
    ShowOrder,
    /// Write a text snapshot of the board; `None` picks a dated file name.
    Export(Option<PathBuf>),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,

    #[error("`pick` needs a player name")]
    MissingPlayer,

    #[error("reset clears every pick and cannot be undone; type `reset!` or `reset --yes` to confirm")]
    ResetNotConfirmed,

    #[error("unknown command `{0}` (type `help` for a list)")]
    Unknown(String),
}

pub const HELP_TEXT: &str = "\
Commands:
  pick <player>   (p)  select a player for the team on the clock
  undo            (u)  take back the last pick
  reset!               clear every pick (also `reset --yes`)
  board           (b)  show the draft board
  pool                 list remaining players
  order                show the pick order for every round
  export [path]        save a text snapshot of the board
  help            (?)  show this help
  quit            (q)  leave the session";

/// Parse one input line.
///
/// The player name is everything after the command word, trimmed, so names
/// with spaces need no quoting.
pub fn parse_command(line: &str) -> Result<UserCommand, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::Empty);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "pick" | "p" => {
            if rest.is_empty() {
                Err(ParseError::MissingPlayer)
            } else {
                Ok(UserCommand::Pick(rest.to_string()))
            }
        }
        "undo" | "u" => Ok(UserCommand::Undo),
        "reset!" => Ok(UserCommand::Reset),
        "reset" => {
            if rest == "--yes" || rest == "-y" {
                Ok(UserCommand::Reset)
            } else {
                Err(ParseError::ResetNotConfirmed)
            }
        }
        "board" | "b" => Ok(UserCommand::ShowBoard),
        "pool" => Ok(UserCommand::ShowPool),
        "order" => Ok(UserCommand::ShowOrder),
        "export" => Ok(UserCommand::Export(
            (!rest.is_empty()).then(|| PathBuf::from(rest)),
        )),
        "help" | "?" => Ok(UserCommand::Help),
        "quit" | "q" | "exit" => Ok(UserCommand::Quit),
        _ => Err(ParseError::Unknown(word.to_string())),
    }
}
