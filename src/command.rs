//! Text commands accepted by the session driver.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CommandError;
use crate::world::{Coord, GameSnapshot, SelectedTile, UnitKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Select { row: i64, col: i64 },
    Move { row: i64, col: i64 },
    Settle,
    Build { unit: UnitKind },
    EndTurn,
    Show,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    Selected(SelectedTile),
    Moved { moved: bool, settler: Coord },
    Settled(Coord),
    Built { at: Coord, unit: UnitKind },
    TurnEnded { turn: u64 },
    Snapshot(Box<GameSnapshot>),
    Quit,
}

impl Command {
    /// Parses one script line. Blank lines and `#` comments yield `None`.
    pub fn parse_line(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            return Ok(None);
        }
        line.parse().map(Some)
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        let (verb, rest) = match text.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (text, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "select" | "sel" => {
                let (row, col) = parse_pair("select", rest)?;
                Ok(Command::Select { row, col })
            }
            "move" | "mv" => {
                let (row, col) = parse_pair("move", rest)?;
                Ok(Command::Move { row, col })
            }
            "settle" => Ok(Command::Settle),
            "build" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument {
                        verb: "build",
                        expected: "a unit type",
                    });
                }
                match rest.parse()? {
                    UnitKind::Settler => Err(CommandError::NotBuildable(UnitKind::Settler)),
                    unit => Ok(Command::Build { unit }),
                }
            }
            "end" | "endturn" | "end_turn" => Ok(Command::EndTurn),
            "show" | "state" => Ok(Command::Show),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::UnknownVerb(other.to_string())),
        }
    }
}

fn parse_pair(verb: &'static str, rest: &str) -> Result<(i64, i64), CommandError> {
    let mut parts = rest
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty());
    let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CommandError::MissingArgument {
            verb,
            expected: "<row> <col>",
        });
    };
    Ok((parse_i64(row)?, parse_i64(col)?))
}

fn parse_i64(value: &str) -> Result<i64, CommandError> {
    value
        .parse::<i64>()
        .map_err(|_| CommandError::InvalidNumber(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_verb() {
        assert_eq!(
            "select 3 4".parse::<Command>(),
            Ok(Command::Select { row: 3, col: 4 })
        );
        assert_eq!(
            "MOVE 1,0".parse::<Command>(),
            Ok(Command::Move { row: 1, col: 0 })
        );
        assert_eq!(
            "move -1 2".parse::<Command>(),
            Ok(Command::Move { row: -1, col: 2 })
        );
        assert_eq!("settle".parse::<Command>(), Ok(Command::Settle));
        assert_eq!(
            "build Melee Fighter".parse::<Command>(),
            Ok(Command::Build {
                unit: UnitKind::MeleeFighter
            })
        );
        assert_eq!("end".parse::<Command>(), Ok(Command::EndTurn));
        assert_eq!("show".parse::<Command>(), Ok(Command::Show));
        assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!(
            "fly 1 2".parse::<Command>(),
            Err(CommandError::UnknownVerb("fly".into()))
        );
        assert!(matches!(
            "select 3".parse::<Command>(),
            Err(CommandError::MissingArgument { verb: "select", .. })
        ));
        assert!(matches!(
            "select 1 2 3".parse::<Command>(),
            Err(CommandError::MissingArgument { .. })
        ));
        assert_eq!(
            "move a 2".parse::<Command>(),
            Err(CommandError::InvalidNumber("a".into()))
        );
        assert_eq!(
            "build Trebuchet".parse::<Command>(),
            Err(CommandError::UnknownUnit("Trebuchet".into()))
        );
        assert_eq!(
            "build Settler".parse::<Command>(),
            Err(CommandError::NotBuildable(UnitKind::Settler))
        );
        assert!(matches!(
            "build".parse::<Command>(),
            Err(CommandError::MissingArgument { verb: "build", .. })
        ));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        assert_eq!(Command::parse_line("   "), Ok(None));
        assert_eq!(Command::parse_line("# opening moves"), Ok(None));
        assert_eq!(
            Command::parse_line("settle  # found the capital"),
            Ok(Some(Command::Settle))
        );
    }

    #[test]
    fn json_form_is_tagged() {
        let json = serde_json::to_string(&Command::Select { row: 2, col: 5 }).unwrap();
        assert_eq!(json, r#"{"op":"select","row":2,"col":5}"#);
        let parsed: Command = serde_json::from_str(r#"{"op":"end_turn"}"#).unwrap();
        assert_eq!(parsed, Command::EndTurn);
    }
}
