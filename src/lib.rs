pub mod command;
pub mod error;
pub mod game;
pub mod logging;
pub mod rng;
pub mod scenario;
pub mod terrain;
pub mod world;

pub use command::{Command, Outcome};
pub use error::{CommandError, GameError, ScenarioError};
pub use game::{Game, GameBuilder};
pub use scenario::{Scenario, ScenarioLoader};
pub use terrain::{generate_noise_map, TerrainMode};
pub use world::{Coord, GameSnapshot, Grid, SelectedTile, Terrain, Tile, TileView, UnitKind};
