use ndarray::Array2;

use super::*;

/// Generation strategy that rolls every cell independently, each one being a mine with probability
/// `mine_percent / 100`. The resulting mine count is not fixed.
#[derive(Clone, Debug, PartialEq)]
pub struct DensityGenerator {
    seed: u64,
}

impl DensityGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seeds the generator from the thread-local RNG.
    pub fn from_entropy() -> Self {
        use rand::prelude::*;

        Self::new(rand::rng().random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MinefieldGenerator for DensityGenerator {
    fn generate(self, config: BoardConfig) -> MineLayout {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mine_percent = config.mine_percent();
        let mine_mask = Array2::from_shape_simple_fn(config.size().to_nd_index(), || {
            rng.random_range(0..100u8) < mine_percent
        });

        // dimensions come from a validated config
        let layout = MineLayout::from_mine_mask_unchecked(mine_mask);
        log::debug!(
            "Generated {}x{} minefield with seed {}, mines: {} ({}% requested)",
            config.height(),
            config.width(),
            self.seed,
            layout.mine_count(),
            mine_percent
        );
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_layout() {
        let config = BoardConfig::new(12, 17, 30).unwrap();

        let first = DensityGenerator::new(42).generate(config);
        let second = DensityGenerator::new(42).generate(config);

        assert_eq!(first, second);
        assert_eq!(first.size(), (12, 17));
    }

    #[test]
    fn density_is_roughly_respected() {
        let config = BoardConfig::new(100, 100, 25).unwrap();

        let layout = DensityGenerator::new(7).generate(config);

        // 10000 independent rolls at p = 0.25, six standard deviations is ~260
        let mines = i32::from(layout.mine_count());
        assert!((2240..=2760).contains(&mines), "mines: {mines}");
    }

    #[test]
    fn extreme_densities() {
        let sparse = DensityGenerator::new(1).generate(BoardConfig::new(50, 50, 1).unwrap());
        let dense = DensityGenerator::new(1).generate(BoardConfig::new(50, 50, 99).unwrap());

        assert!(sparse.mine_count() < 100);
        assert!(dense.mine_count() > 2400);
    }
}
