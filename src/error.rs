use thiserror::Error;

use crate::world::UnitKind;

#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    #[error("tile ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfBounds { row: i64, col: i64, size: usize },
    #[error("grid size {size} must be between 1 and {max}")]
    InvalidGridSize { size: usize, max: usize },
    #[error("noise seed {0} is not a finite number")]
    NonFiniteSeed(f64),
}

#[derive(Debug, Error, PartialEq)]
pub enum ScenarioError {
    #[error("scenario validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Game(#[from] GameError),
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    UnknownVerb(String),
    #[error("'{verb}' expects {expected}")]
    MissingArgument {
        verb: &'static str,
        expected: &'static str,
    },
    #[error("unable to parse integer from '{0}'")]
    InvalidNumber(String),
    #[error("unknown unit type '{0}'")]
    UnknownUnit(String),
    #[error("{0} cannot be built; the settler is unique")]
    NotBuildable(UnitKind),
    #[error(transparent)]
    Game(#[from] GameError),
}
