use minesweeper_core::{Coord2, Difficulty, GameError, ParseDifficultyError, parse_coords};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  r X Y      reveal a cell
  f X Y      toggle a flag
  c X Y      reveal around a number
  tap X Y    touch tap (flag)
  hold X Y   touch and hold (reveal)
  n          new game
  d LEVEL    new game at easy, medium or hard
  s          best times
  h          this help
  q          quit";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    RevealNeighbors(Coord2),
    Tap(Coord2),
    Hold(Coord2),
    NewGame,
    SetDifficulty(Difficulty),
    Scores,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}, try h")]
    Unknown(String),
    #[error("{0} expects {1} argument(s)")]
    Arity(&'static str, usize),
    #[error(transparent)]
    Coordinates(#[from] GameError),
    #[error(transparent)]
    Difficulty(#[from] ParseDifficultyError),
}

impl Command {
    /// Parses one input line against a board of `size`.
    pub fn parse(line: &str, size: Coord2) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Empty);
        };
        let args: Vec<&str> = words.collect();

        let coords = |name: &'static str| -> Result<Coord2, CommandError> {
            match args.as_slice() {
                [x, y] => Ok(parse_coords(x, y, size)?),
                _ => Err(CommandError::Arity(name, 2)),
            }
        };
        let no_args = |name: &'static str, command: Command| {
            if args.is_empty() {
                Ok(command)
            } else {
                Err(CommandError::Arity(name, 0))
            }
        };

        match name.to_ascii_lowercase().as_str() {
            "r" | "reveal" => coords("reveal").map(Command::Reveal),
            "f" | "flag" => coords("flag").map(Command::Flag),
            "c" | "chord" => coords("chord").map(Command::RevealNeighbors),
            "tap" => coords("tap").map(Command::Tap),
            "hold" => coords("hold").map(Command::Hold),
            "n" | "new" => no_args("new", Command::NewGame),
            "d" | "difficulty" => match args.as_slice() {
                [level] => Ok(Command::SetDifficulty(level.parse()?)),
                _ => Err(CommandError::Arity("difficulty", 1)),
            },
            "s" | "scores" => no_args("scores", Command::Scores),
            "h" | "help" | "?" => no_args("help", Command::Help),
            "q" | "quit" | "exit" => no_args("quit", Command::Quit),
            _ => Err(CommandError::Unknown(name.to_string())),
        }
    }
}
