//! Board generation, cascading reveal and win/loss rules for a single-player
//! Minesweeper game. Rendering and input handling are left to the caller,
//! which drives a [`Board`] (or a [`SharedBoard`]) through `reveal` and
//! `toggle_flag` and re-renders from [`CellSnapshot`]s.

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use shared::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod shared;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoardConfig")]
pub struct BoardConfig {
    height: Coord,
    width: Coord,
    mine_percent: u8,
}

/// Unchecked wire form of [`BoardConfig`].
#[derive(Deserialize)]
struct RawBoardConfig {
    height: Coord,
    width: Coord,
    mine_percent: u8,
}

impl TryFrom<RawBoardConfig> for BoardConfig {
    type Error = GameError;

    fn try_from(raw: RawBoardConfig) -> Result<Self> {
        Self::new(raw.height, raw.width, raw.mine_percent)
    }
}

impl BoardConfig {
    pub fn new(height: Coord, width: Coord, mine_percent: u8) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(GameError::InvalidConfiguration(
                "height and width must be positive",
            ));
        }
        if !(1..=99).contains(&mine_percent) {
            return Err(GameError::InvalidConfiguration(
                "mine percent must be between 1 and 99",
            ));
        }
        Ok(Self {
            height,
            width,
            mine_percent,
        })
    }

    pub const fn size(&self) -> Coord2 {
        (self.height, self.width)
    }

    pub const fn height(&self) -> Coord {
        self.height
    }

    pub const fn width(&self) -> Coord {
        self.width
    }

    pub const fn mine_percent(&self) -> u8 {
        self.mine_percent
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.height, self.width)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            height: 10,
            width: 10,
            mine_percent: 10,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMineLayout")]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

/// Wire form of [`MineLayout`], the mine count is always recomputed from the mask.
#[derive(Deserialize)]
struct RawMineLayout {
    mine_mask: Array2<bool>,
}

impl TryFrom<RawMineLayout> for MineLayout {
    type Error = GameError;

    fn try_from(raw: RawMineLayout) -> Result<Self> {
        Self::from_mine_mask(raw.mine_mask)
    }
}

impl MineLayout {
    /// Builds a layout from a `(height, width)` shaped mask.
    ///
    /// Masks larger than 255 in either dimension are rejected.
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (height, width) = mine_mask.dim();
        if height == 0 || width == 0 {
            return Err(GameError::InvalidConfiguration(
                "height and width must be positive",
            ));
        }
        if Coord::try_from(height).is_err() || Coord::try_from(width).is_err() {
            return Err(GameError::InvalidConfiguration(
                "height and width must fit in a coordinate",
            ));
        }

        Ok(Self::from_mine_mask_unchecked(mine_mask))
    }

    pub(crate) fn from_mine_mask_unchecked(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn size(&self) -> Coord2 {
        let (height, width) = self.mine_mask.dim();
        // checked on construction
        (height as Coord, width as Coord)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::moore(coords, self.size())
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    NoChange,
    Continue,
    Won,
    Lost,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Continue => true,
            Won => true,
            Lost => true,
        }
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}
