use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::{self, Occupancy, GRID_HEIGHT, GRID_WIDTH};
use crate::Cell;

// Sampling budget before falling back to enumerating the free cells. The
// snake covers a tiny fraction of the 768-cell grid in normal play, so the
// fast path all but always wins within a few draws.
const SAMPLE_ATTEMPTS: u32 = 100;

/// The single food item on the grid. Its position is never a cell the snake
/// occupies at the moment it is set.
pub struct Apple {
    position: Cell,
}

impl Apple {
    pub fn spawn(occupied: &Occupancy, rng: &mut impl Rng) -> Option<Self> {
        random_free_cell(occupied, rng).map(|position| Apple { position })
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// Moves the apple to a fresh cell outside `occupied`. `None` only when
    /// the snake covers the entire grid.
    pub fn relocate(&mut self, occupied: &Occupancy, rng: &mut impl Rng) -> Option<Cell> {
        let cell = random_free_cell(occupied, rng)?;
        self.position = cell;
        Some(cell)
    }
}

fn random_free_cell(occupied: &Occupancy, rng: &mut impl Rng) -> Option<Cell> {
    if occupied.len() >= (GRID_WIDTH * GRID_HEIGHT) as usize {
        return None;
    }

    // Rejection sampling over the whole grid
    for _ in 0..SAMPLE_ATTEMPTS {
        let cell = (rng.gen_range(0..GRID_WIDTH), rng.gen_range(0..GRID_HEIGHT));
        if !occupied.contains(cell) {
            return Some(cell);
        }
    }

    // Nearly full grid: pick among the remaining free cells directly
    let free: Vec<Cell> = grid::cells().filter(|&c| !occupied.contains(c)).collect();
    free.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    #[test]
    fn spawn_avoids_the_occupied_cells() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let occupied: Occupancy = (0..GRID_WIDTH).map(|x| (x, 12)).collect();

        for _ in 0..500 {
            let apple = Apple::spawn(&occupied, &mut rng).unwrap();
            assert!(!occupied.contains(apple.position()));
        }
    }

    #[test]
    fn relocate_never_lands_on_the_snake_across_seeds() {
        // A snake coiled over a solid block of the grid
        let occupied: Occupancy = (4..20u16).flat_map(|y| (4..28u16).map(move |x| (x, y))).collect();

        for seed in 0..200 {
            let mut rng = ChaCha12Rng::seed_from_u64(seed);
            let mut apple = Apple::spawn(&occupied, &mut rng).unwrap();
            for _ in 0..20 {
                let cell = apple.relocate(&occupied, &mut rng).unwrap();
                assert!(!occupied.contains(cell));
                assert_eq!(apple.position(), cell);
            }
        }
    }

    #[test]
    fn relocate_finds_the_single_free_cell() {
        let hole = (31, 23);
        let occupied: Occupancy = grid::cells().filter(|&c| c != hole).collect();

        for seed in 0..20 {
            let mut rng = ChaCha12Rng::seed_from_u64(seed);
            let mut apple = Apple::spawn(&occupied, &mut rng).unwrap();
            assert_eq!(apple.position(), hole);
            assert_eq!(apple.relocate(&occupied, &mut rng), Some(hole));
        }
    }

    #[test]
    fn full_grid_has_no_placement() {
        let occupied: Occupancy = grid::cells().collect();
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);

        assert!(Apple::spawn(&occupied, &mut rng).is_none());
    }
}
