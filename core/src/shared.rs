use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::*;

/// A [`Board`] that can be driven from several threads.
///
/// Every call holds one lock for its whole duration, so a reveal together with its cascade and win check is
/// never observed half done. Clones share the same board.
#[derive(Clone, Debug)]
pub struct SharedBoard {
    inner: Arc<Mutex<Board>>,
}

impl SharedBoard {
    pub fn new(board: Board) -> Self {
        Self {
            inner: Arc::new(Mutex::new(board)),
        }
    }

    pub fn reveal(&self, coords: Coord2) -> Result<RevealReport> {
        self.lock().reveal(coords)
    }

    pub fn toggle_flag(&self, coords: Coord2) -> Result<MarkOutcome> {
        self.lock().toggle_flag(coords)
    }

    pub fn state(&self) -> GameState {
        self.lock().state()
    }

    /// Snapshots of every cell in row-major order, all taken under the same lock.
    pub fn snapshots(&self) -> Vec<CellSnapshot> {
        self.lock().snapshots().collect()
    }

    pub fn with_board<R>(&self, f: impl FnOnce(&Board) -> R) -> R {
        f(&self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Board> {
        // board updates don't panic halfway, the state behind a poisoned lock is still whole
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<Board> for SharedBoard {
    fn from(board: Board) -> Self {
        Self::new(board)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn clones_share_the_board() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(1, 1)]).unwrap();
        let shared = SharedBoard::new(Board::from_layout(layout));
        let other = shared.clone();

        shared.toggle_flag((1, 1)).unwrap();

        assert!(other.with_board(|board| board.cell_at((1, 1)).unwrap().is_flagged()));
    }

    #[test]
    fn concurrent_reveals_finish_exactly_once() {
        let config = BoardConfig::new(24, 24, 15).unwrap();
        let shared = SharedBoard::new(Board::generate_seeded(config, 1234));
        let (height, width) = config.size();

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let mut finals = Vec::new();
                    for row in (worker..height).step_by(4) {
                        for col in 0..width {
                            let report = shared.reveal((row, col)).unwrap();
                            if report.outcome.is_final() {
                                finals.push(report.outcome);
                            }
                        }
                    }
                    finals
                })
            })
            .collect();

        let finals: Vec<_> = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect();

        assert_eq!(finals.len(), 1);
        assert!(shared.state().is_finished());
        assert!(shared.snapshots().iter().all(|snapshot| snapshot.revealed));
    }

    #[test]
    fn snapshots_never_see_partial_cascade() {
        // mine-free board: one reveal opens everything
        let layout = MineLayout::from_mine_coords((40, 40), &[]).unwrap();
        let shared = SharedBoard::new(Board::from_layout(layout));

        let observer = {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    let revealed = shared
                        .snapshots()
                        .iter()
                        .filter(|snapshot| snapshot.revealed)
                        .count();
                    assert!(revealed == 0 || revealed == 1600, "revealed: {revealed}");
                }
            })
        };

        let report = shared.reveal((20, 20)).unwrap();
        observer.join().unwrap();

        assert_eq!(report.outcome, RevealOutcome::Won);
        assert_eq!(report.changed.len(), 1600);
    }
}
