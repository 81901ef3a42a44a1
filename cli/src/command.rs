use minegrid_core::{Coord, Coord2};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  r, reveal <row> <col>   reveal a cell
  f, flag <row> <col>     toggle a flag on a hidden cell
  h, help                 show this help
  q, quit                 leave the game";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command, type `help` for a list")]
    Empty,
    #[error("Unknown command `{0}`, type `help` for a list")]
    Unknown(String),
    #[error("Expected `{0} <row> <col>`")]
    MissingPosition(&'static str),
    #[error("Invalid coordinate `{0}`")]
    InvalidCoordinate(String),
    #[error("Unexpected argument `{0}`")]
    TrailingArgument(String),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;

        let command = match name.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Self::Reveal(parse_position(&mut words, "reveal")?),
            "f" | "flag" => Self::Flag(parse_position(&mut words, "flag")?),
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => return Err(CommandError::Unknown(name.to_owned())),
        };

        match words.next() {
            Some(extra) => Err(CommandError::TrailingArgument(extra.to_owned())),
            None => Ok(command),
        }
    }
}

fn parse_position<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    name: &'static str,
) -> Result<Coord2, CommandError> {
    let mut coord = || -> Result<Coord, CommandError> {
        let word = words.next().ok_or(CommandError::MissingPosition(name))?;
        word.parse()
            .map_err(|_| CommandError::InvalidCoordinate(word.to_owned()))
    };
    Ok((coord()?, coord()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves() {
        assert_eq!(Command::parse("r 3 4"), Ok(Command::Reveal((3, 4))));
        assert_eq!(Command::parse("  REVEAL 0  12 "), Ok(Command::Reveal((0, 12))));
        assert_eq!(Command::parse("f 1 2"), Ok(Command::Flag((1, 2))));
        assert_eq!(Command::parse("flag 9 0"), Ok(Command::Flag((9, 0))));
    }

    #[test]
    fn parses_control_commands() {
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
        assert_eq!(Command::parse("exit"), Ok(Command::Quit));
        assert_eq!(Command::parse("help"), Ok(Command::Help));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(Command::parse("   "), Err(CommandError::Empty));
        assert_eq!(
            Command::parse("dig 1 1"),
            Err(CommandError::Unknown("dig".to_owned()))
        );
        assert_eq!(
            Command::parse("r 1"),
            Err(CommandError::MissingPosition("reveal"))
        );
        assert_eq!(
            Command::parse("f 1 -2"),
            Err(CommandError::InvalidCoordinate("-2".to_owned()))
        );
        assert_eq!(
            Command::parse("r 1 256"),
            Err(CommandError::InvalidCoordinate("256".to_owned()))
        );
        assert_eq!(
            Command::parse("r 1 2 3"),
            Err(CommandError::TrailingArgument("3".to_owned()))
        );
    }
}
