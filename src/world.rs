use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CommandError;

/// Side length of a generated map when none is configured.
pub const DEFAULT_GRID_SIZE: usize = 15;

/// Largest side length a session accepts.
pub const MAX_GRID_SIZE: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Converts signed caller input into a grid coordinate, or `None` when
    /// either component falls outside `[0, size)`.
    pub fn checked(row: i64, col: i64, size: usize) -> Option<Self> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        (row < size && col < size).then_some(Self { row, col })
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    Water,
    Grass,
    Mountain,
}

impl Terrain {
    pub fn as_str(self) -> &'static str {
        match self {
            Terrain::Water => "water",
            Terrain::Grass => "grass",
            Terrain::Mountain => "mountain",
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything that can stand on a tile. The settler normally lives outside the
/// grid (see [`crate::game::Game::settler`]); it only appears here in views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    Settler,
    MeleeFighter,
    Crossbowman,
    Generic,
}

impl UnitKind {
    pub fn label(self) -> &'static str {
        match self {
            UnitKind::Settler => "Settler",
            UnitKind::MeleeFighter => "Melee Fighter",
            UnitKind::Crossbowman => "Crossbowman",
            UnitKind::Generic => "U",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for UnitKind {
    type Err = CommandError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key: String = value
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "settler" => Ok(UnitKind::Settler),
            "meleefighter" | "melee" => Ok(UnitKind::MeleeFighter),
            "crossbowman" => Ok(UnitKind::Crossbowman),
            "u" | "generic" => Ok(UnitKind::Generic),
            _ => Err(CommandError::UnknownUnit(value.trim().to_string())),
        }
    }
}

/// One grid cell. Terrain never changes after generation; `unit` and `city`
/// are the only mutable parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub terrain: Terrain,
    pub unit: Option<UnitKind>,
    pub city: Option<String>,
}

impl Tile {
    pub fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            unit: None,
            city: None,
        }
    }
}

/// Fixed-size square matrix of tiles, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Grid where every tile has the same terrain.
    pub fn filled(size: usize, terrain: Terrain) -> Self {
        Self {
            size,
            tiles: vec![Tile::new(terrain); size * size],
        }
    }

    /// Builds a grid by asking `terrain_at` for every coordinate in row-major
    /// order.
    pub fn from_fn(size: usize, mut terrain_at: impl FnMut(Coord) -> Terrain) -> Self {
        let mut tiles = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                tiles.push(Tile::new(terrain_at(Coord { row, col })));
            }
        }
        Self { size, tiles }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    pub fn get(&self, coord: Coord) -> Option<&Tile> {
        self.index(coord).map(|index| &self.tiles[index])
    }

    pub(crate) fn get_mut(&mut self, coord: Coord) -> Option<&mut Tile> {
        let index = self.index(coord)?;
        Some(&mut self.tiles[index])
    }

    pub fn tiles(&self) -> impl Iterator<Item = (Coord, &Tile)> + '_ {
        let size = self.size;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(index, tile)| (Coord::new(index / size, index % size), tile))
    }

    pub fn count_terrain(&self, terrain: Terrain) -> usize {
        self.tiles.iter().filter(|t| t.terrain == terrain).count()
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        self.contains(coord).then(|| coord.row * self.size + coord.col)
    }
}

/// Selection as the UI sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedTile {
    pub row: usize,
    pub col: usize,
    pub terrain: Terrain,
}

/// Render-ready view of one tile with the derived fields filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    pub row: usize,
    pub col: usize,
    pub terrain: Terrain,
    pub unit: Option<UnitKind>,
    pub city: Option<String>,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub grid_size: usize,
    pub turn: u64,
    pub selected: Option<SelectedTile>,
    pub settler: Coord,
    pub settled: bool,
    pub tiles: Vec<TileView>,
}
