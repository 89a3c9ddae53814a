use tracing::{debug, info};

use crate::command::{Command, Outcome};
use crate::error::{CommandError, GameError};
use crate::rng::{noise_seed_from, random_noise_seed};
use crate::terrain::{build_grid, TerrainMode};
use crate::world::{
    Coord, GameSnapshot, Grid, SelectedTile, TileView, UnitKind, DEFAULT_GRID_SIZE, MAX_GRID_SIZE,
};

pub struct GameBuilder {
    size: usize,
    terrain: TerrainMode,
    noise_seed: Option<f64>,
    settler_start: Coord,
    city_name: String,
}

impl GameBuilder {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            terrain: TerrainMode::Generated,
            noise_seed: None,
            settler_start: Coord::new(0, 0),
            city_name: "City".to_string(),
        }
    }

    pub fn terrain(mut self, terrain: TerrainMode) -> Self {
        self.terrain = terrain;
        self
    }

    /// Pins the map to an integer seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.noise_seed = Some(noise_seed_from(seed));
        self
    }

    /// Pins the map to a raw noise seed, bypassing the integer mapping.
    pub fn noise_seed(mut self, noise_seed: f64) -> Self {
        self.noise_seed = Some(noise_seed);
        self
    }

    pub fn settler_start(mut self, start: Coord) -> Self {
        self.settler_start = start;
        self
    }

    pub fn city_name(mut self, name: impl Into<String>) -> Self {
        self.city_name = name.into();
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        if self.size == 0 || self.size > MAX_GRID_SIZE {
            return Err(GameError::InvalidGridSize {
                size: self.size,
                max: MAX_GRID_SIZE,
            });
        }

        let start = self.settler_start;
        if start.row >= self.size || start.col >= self.size {
            return Err(GameError::OutOfBounds {
                row: start.row as i64,
                col: start.col as i64,
                size: self.size,
            });
        }

        let noise_seed = self.noise_seed.unwrap_or_else(random_noise_seed);
        if !noise_seed.is_finite() {
            return Err(GameError::NonFiniteSeed(noise_seed));
        }
        let grid = build_grid(self.terrain, noise_seed, self.size);
        info!(
            size = self.size,
            noise_seed,
            terrain = ?self.terrain,
            "generated map"
        );

        Ok(Game {
            grid,
            turn: 0,
            selected: None,
            settler: start,
            settled: false,
            city_name: self.city_name,
            noise_seed,
        })
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE)
    }
}

/// Single-session game state. Every mutation goes through one of the five
/// operations below; nothing happens between calls.
#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    turn: u64,
    selected: Option<Coord>,
    settler: Coord,
    settled: bool,
    city_name: String,
    noise_seed: f64,
}

impl Game {
    pub fn builder(size: usize) -> GameBuilder {
        GameBuilder::new(size)
    }

    /// Makes `(row, col)` the only selected tile.
    pub fn select_tile(&mut self, row: i64, col: i64) -> Result<SelectedTile, GameError> {
        let size = self.grid.size();
        let target = Coord::checked(row, col, size)
            .and_then(|coord| self.grid.get(coord).map(|tile| (coord, tile.terrain)));
        let Some((coord, terrain)) = target else {
            return Err(GameError::OutOfBounds { row, col, size });
        };

        if self.unit_at(coord).is_some() {
            info!(row = coord.row, col = coord.col, "selected a unit");
        } else {
            info!(row = coord.row, col = coord.col, "selected an empty tile");
        }

        self.selected = Some(coord);
        Ok(SelectedTile {
            row: coord.row,
            col: coord.col,
            terrain,
        })
    }

    /// Moves the settler anywhere on the grid, terrain notwithstanding.
    /// Out-of-range targets are ignored; returns whether the settler moved.
    pub fn move_settler(&mut self, row: i64, col: i64) -> bool {
        match Coord::checked(row, col, self.grid.size()) {
            Some(target) => {
                debug!(from = %self.settler, to = %target, "settler moved");
                self.settler = target;
                true
            }
            None => {
                debug!(row, col, "ignored settler move outside the grid");
                false
            }
        }
    }

    /// Founds the city on the settler's tile and clears any unit there.
    /// Repeating it is harmless.
    pub fn settle(&mut self) -> Coord {
        let at = self.settler;
        if let Some(tile) = self.grid.get_mut(at) {
            tile.city = Some(self.city_name.clone());
            tile.unit = None;
        }
        self.settled = true;
        debug!(at = %at, city = %self.city_name, "settled");
        at
    }

    /// Places `unit` on the settler's last known tile whether or not a city
    /// stands there. `UnitKind::Settler` here is only a garrison label; the
    /// mobile settler is tracked by [`Game::settler`].
    pub fn build_unit(&mut self, unit: UnitKind) -> Coord {
        let at = self.settler;
        if let Some(tile) = self.grid.get_mut(at) {
            tile.unit = Some(unit);
        }
        debug!(at = %at, %unit, "unit built");
        at
    }

    /// Advances the turn counter and returns the new turn. Nothing else ticks.
    pub fn end_turn(&mut self) -> u64 {
        info!(turn = self.turn, "turn ended");
        self.turn = self.turn.saturating_add(1);
        self.turn
    }

    pub fn apply(&mut self, command: &Command) -> Result<Outcome, CommandError> {
        let outcome = match command {
            Command::Select { row, col } => Outcome::Selected(self.select_tile(*row, *col)?),
            Command::Move { row, col } => Outcome::Moved {
                moved: self.move_settler(*row, *col),
                settler: self.settler,
            },
            Command::Settle => Outcome::Settled(self.settle()),
            Command::Build { unit } => Outcome::Built {
                at: self.build_unit(*unit),
                unit: *unit,
            },
            Command::EndTurn => Outcome::TurnEnded {
                turn: self.end_turn(),
            },
            Command::Show => Outcome::Snapshot(Box::new(self.snapshot())),
            Command::Quit => Outcome::Quit,
        };
        Ok(outcome)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    pub fn selected_tile(&self) -> Option<SelectedTile> {
        let coord = self.selected?;
        let tile = self.grid.get(coord)?;
        Some(SelectedTile {
            row: coord.row,
            col: coord.col,
            terrain: tile.terrain,
        })
    }

    /// Last known settler position, kept after settling.
    pub fn settler(&self) -> Coord {
        self.settler
    }

    pub fn has_settled(&self) -> bool {
        self.settled
    }

    pub fn city_name(&self) -> &str {
        &self.city_name
    }

    pub fn noise_seed(&self) -> f64 {
        self.noise_seed
    }

    /// Unit shown on `coord`: a built unit first, otherwise the settler while
    /// it is still on the move.
    pub fn unit_at(&self, coord: Coord) -> Option<UnitKind> {
        let tile = self.grid.get(coord)?;
        tile.unit
            .or_else(|| (!self.settled && self.settler == coord).then_some(UnitKind::Settler))
    }

    pub fn tile(&self, coord: Coord) -> Option<TileView> {
        let tile = self.grid.get(coord)?;
        Some(TileView {
            row: coord.row,
            col: coord.col,
            terrain: tile.terrain,
            unit: self.unit_at(coord),
            city: tile.city.clone(),
            is_selected: self.selected == Some(coord),
        })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let tiles = self
            .grid
            .tiles()
            .filter_map(|(coord, _)| self.tile(coord))
            .collect();
        GameSnapshot {
            grid_size: self.grid.size(),
            turn: self.turn,
            selected: self.selected_tile(),
            settler: self.settler,
            settled: self.settled,
            tiles,
        }
    }
}
