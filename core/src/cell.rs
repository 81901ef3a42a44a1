use serde::{Deserialize, Serialize};

use crate::*;

/// What a cell holds, fixed when the board is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellType {
    Mine,
    /// Safe cell with `1..=8` mines around it.
    Hint(u8),
    /// Safe cell with no mines around it, revealing it cascades.
    Empty,
}

impl CellType {
    pub const fn from_adjacent(count: u8) -> Self {
        match count {
            0 => Self::Empty,
            count => Self::Hint(count),
        }
    }

    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    /// Number of surrounding mines, `None` for a mine.
    pub const fn adjacent_mines(self) -> Option<u8> {
        match self {
            Self::Mine => None,
            Self::Hint(count) => Some(count),
            Self::Empty => Some(0),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    cell_type: CellType,
    position: Coord2,
    revealed: bool,
    flagged: bool,
}

impl Cell {
    pub const fn new(cell_type: CellType, position: Coord2) -> Self {
        Self {
            cell_type,
            position,
            revealed: false,
            flagged: false,
        }
    }

    /// Reveals the cell and clears its flag.
    ///
    /// Returns the cell type when the cell was hidden, `None` when it was
    /// already revealed and nothing changed.
    pub fn reveal(&mut self) -> Option<CellType> {
        if self.revealed {
            return None;
        }
        self.revealed = true;
        self.flagged = false;
        Some(self.cell_type)
    }

    pub fn toggle_flag(&mut self) -> MarkOutcome {
        if self.revealed {
            return MarkOutcome::NoChange;
        }
        self.flagged = !self.flagged;
        MarkOutcome::Changed
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub const fn cell_type(&self) -> CellType {
        self.cell_type
    }

    pub const fn position(&self) -> Coord2 {
        self.position
    }

    pub const fn snapshot(&self) -> CellSnapshot {
        CellSnapshot {
            position: self.position,
            cell_type: if self.revealed {
                Some(self.cell_type)
            } else {
                None
            },
            revealed: self.revealed,
            flagged: self.flagged,
        }
    }
}

/// Player-visible view of a cell, the type is only exposed once revealed.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub position: Coord2,
    pub cell_type: Option<CellType>,
    pub revealed: bool,
    pub flagged: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_adjacent_maps_zero_to_empty() {
        assert_eq!(CellType::from_adjacent(0), CellType::Empty);
        assert_eq!(CellType::from_adjacent(3), CellType::Hint(3));
        assert_eq!(CellType::Empty.adjacent_mines(), Some(0));
        assert_eq!(CellType::Mine.adjacent_mines(), None);
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut cell = Cell::new(CellType::Hint(2), (1, 4));

        assert_eq!(cell.reveal(), Some(CellType::Hint(2)));
        assert!(cell.is_revealed());
        assert_eq!(cell.reveal(), None);
        assert!(cell.is_revealed());
    }

    #[test]
    fn reveal_clears_flag() {
        let mut cell = Cell::new(CellType::Empty, (0, 0));
        cell.toggle_flag();
        assert!(cell.is_flagged());

        cell.reveal();

        assert!(!cell.is_flagged());
    }

    #[test]
    fn flag_is_blocked_once_revealed() {
        let mut cell = Cell::new(CellType::Mine, (2, 2));
        assert_eq!(cell.toggle_flag(), MarkOutcome::Changed);
        assert_eq!(cell.toggle_flag(), MarkOutcome::Changed);
        assert!(!cell.is_flagged());

        cell.reveal();

        assert_eq!(cell.toggle_flag(), MarkOutcome::NoChange);
        assert!(!cell.is_flagged());
    }

    #[test]
    fn snapshot_hides_type_until_revealed() {
        let mut cell = Cell::new(CellType::Mine, (3, 1));

        let hidden = cell.snapshot();
        assert_eq!(hidden.position, (3, 1));
        assert_eq!(hidden.cell_type, None);
        assert!(!hidden.revealed);

        cell.reveal();
        assert_eq!(cell.snapshot().cell_type, Some(CellType::Mine));
    }
}
