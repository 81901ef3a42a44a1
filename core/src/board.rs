use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Result of a reveal, along with the cells that got revealed by it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealReport {
    pub outcome: RevealOutcome,
    /// Newly revealed positions, in the order they were revealed.
    pub changed: Vec<Coord2>,
}

impl RevealReport {
    const fn no_change() -> Self {
        Self {
            outcome: RevealOutcome::NoChange,
            changed: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    layout: MineLayout,
    cells: Array2<Cell>,
    revealed_safe: CellCount,
    flag_count: CellCount,
    state: GameState,
}

impl Board {
    /// Generates a new board with a random seed.
    pub fn generate(height: Coord, width: Coord, mine_percent: u8) -> Result<Self> {
        let config = BoardConfig::new(height, width, mine_percent)?;
        Ok(Self::generate_with(config, DensityGenerator::from_entropy()))
    }

    pub fn generate_seeded(config: BoardConfig, seed: u64) -> Self {
        Self::generate_with(config, DensityGenerator::new(seed))
    }

    pub fn generate_with(config: BoardConfig, generator: impl MinefieldGenerator) -> Self {
        Self::from_layout(generator.generate(config))
    }

    pub fn from_layout(layout: MineLayout) -> Self {
        let cells = Array2::from_shape_fn(layout.size().to_nd_index(), |(row, col)| {
            let position = (row as Coord, col as Coord);
            let cell_type = if layout.contains_mine(position) {
                CellType::Mine
            } else {
                CellType::from_adjacent(layout.adjacent_mine_count(position))
            };
            Cell::new(cell_type, position)
        });

        Self {
            layout,
            cells,
            revealed_safe: 0,
            flag_count: 0,
            state: Default::default(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.layout.mine_count()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.layout.safe_cell_count()
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.revealed_safe
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// How many mines have not been flagged yet, negative with too many flags.
    pub fn mines_left(&self) -> isize {
        (self.layout.mine_count() as isize) - (self.flag_count as isize)
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.layout.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn snapshot_at(&self, coords: Coord2) -> Result<CellSnapshot> {
        self.cell_at(coords).map(|cell| cell.snapshot())
    }

    /// Snapshots of every cell in row-major order.
    pub fn snapshots(&self) -> impl Iterator<Item = CellSnapshot> + '_ {
        self.cells.iter().map(Cell::snapshot)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.layout.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        let outcome = cell.toggle_flag();
        if outcome.has_update() {
            if cell.is_flagged() {
                self.flag_count += 1;
            } else {
                self.flag_count -= 1;
            }
        }
        Ok(outcome)
    }

    /// Reveals a hidden, unflagged cell.
    ///
    /// Revealing an empty cell cascades through its orthogonal neighbors, while hint counts are taken over
    /// all 8 surrounding cells, so empty regions touching only diagonally do not open each other.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealReport> {
        use RevealOutcome::*;

        let coords = self.layout.validate_coords(coords)?;
        let cell = self.cells[coords.to_nd_index()];

        if self.state.is_finished() || cell.is_revealed() || cell.is_flagged() {
            return Ok(RevealReport::no_change());
        }

        let mut changed = Vec::new();
        let outcome = match self.reveal_cell(coords, &mut changed) {
            Some(CellType::Mine) => {
                log::debug!("Mine hit at {:?}", coords);
                self.end_game(GameState::Lost, &mut changed);
                Lost
            }
            revealed => {
                if revealed == Some(CellType::Empty) {
                    self.cascade(coords, &mut changed);
                }

                if self.revealed_safe == self.layout.safe_cell_count() {
                    self.end_game(GameState::Won, &mut changed);
                    Won
                } else {
                    Continue
                }
            }
        };

        Ok(RevealReport { outcome, changed })
    }

    fn cascade(&mut self, origin: Coord2, changed: &mut Vec<Coord2>) {
        let mut to_visit = vec![origin];

        while let Some(visit_coords) = to_visit.pop() {
            for neighbor in NeighborIter::orthogonal(visit_coords, self.size()) {
                let cell = self.cells[neighbor.to_nd_index()];
                if cell.is_revealed() || cell.is_flagged() {
                    continue;
                }

                let revealed = self.reveal_cell(neighbor, changed);
                log::trace!("Cascade revealed {:?}: {:?}", neighbor, revealed);

                // only hidden cells are revealed, so each one is queued at most once
                if revealed == Some(CellType::Empty) {
                    to_visit.push(neighbor);
                }
            }
        }
    }

    fn reveal_cell(&mut self, coords: Coord2, changed: &mut Vec<Coord2>) -> Option<CellType> {
        let cell = &mut self.cells[coords.to_nd_index()];
        let was_flagged = cell.is_flagged();
        let revealed = cell.reveal()?;

        if was_flagged {
            self.flag_count -= 1;
        }
        if !revealed.is_mine() {
            self.revealed_safe += 1;
        }
        changed.push(coords);
        Some(revealed)
    }

    fn end_game(&mut self, state: GameState, changed: &mut Vec<Coord2>) {
        if self.state.is_finished() {
            return;
        }

        self.state = state;
        let (height, width) = self.size();
        for row in 0..height {
            for col in 0..width {
                self.reveal_cell((row, col), changed);
            }
        }
        log::debug!(
            "Game ended: {:?}, {} of {} safe cells revealed",
            state,
            self.revealed_safe,
            self.layout.safe_cell_count()
        );
    }
}
