use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Purely random generation strategy: symbols are drawn with replacement and the
/// altered cells are picked uniformly without replacement.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomPuzzleGenerator {
    seed: u64,
}

impl RandomPuzzleGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl PuzzleGenerator for RandomPuzzleGenerator {
    fn generate(self, config: PuzzleConfig, alphabet: &Alphabet) -> Result<Puzzle> {
        log::debug!("generating puzzle {:?} with seed {}", config, self.seed);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        generate_with_rng(config, alphabet, &mut rng)
    }
}

/// Same as [`RandomPuzzleGenerator`] but drawing from a caller supplied source.
pub fn generate_with_rng<R: Rng + ?Sized>(
    config: PuzzleConfig,
    alphabet: &Alphabet,
    rng: &mut R,
) -> Result<Puzzle> {
    config.validate()?;
    if alphabet.distinct_count() < 2 {
        return Err(GameError::AlphabetTooSmall);
    }

    let symbols = alphabet.as_slice();
    let base = Grid::from_fn(config.size, |_| draw(symbols, &mut *rng));
    let mut modified = base.clone();

    let total_cells = usize::from(config.total_cells());
    let wanted = usize::from(config.differences);

    // partial Fisher-Yates over the flattened cells, first `wanted` entries are the pick
    let mut cells: Vec<usize> = (0..total_cells).collect();
    for i in 0..wanted {
        let j = rng.random_range(i..total_cells);
        cells.swap(i, j);
    }

    let mut differences = BTreeSet::new();
    for &index in &cells[..wanted] {
        let pos = CellPos::from_flat_index(index, config.size);
        let current = modified[pos];
        let replacement = loop {
            let candidate = draw(symbols, rng);
            if candidate != current {
                break candidate;
            }
        };
        modified.set(pos, replacement);
        differences.insert(pos);
        log::trace!("altered {}: {} -> {}", pos, current, replacement);
    }

    Ok(Puzzle::new_unchecked(base, modified, differences))
}

fn draw<R: Rng + ?Sized>(symbols: &[Symbol], rng: &mut R) -> Symbol {
    symbols[rng.random_range(0..symbols.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> Alphabet {
        SymbolSet::new(true, false, false).build().unwrap()
    }

    fn differing_cells(puzzle: &Puzzle) -> BTreeSet<CellPos> {
        iter_cells(puzzle.size())
            .filter(|&pos| !puzzle.looks_same(pos))
            .collect()
    }

    #[test]
    fn differing_cells_match_requested_count() {
        let alphabet = SymbolSet::ALL.build().unwrap();
        for seed in 0..200 {
            let size = 2 + (seed % 7) as Coord;
            let differences = 1 + (seed as CellCount % mult(size, size));
            let puzzle = generate_puzzle(size, &alphabet, differences, seed).unwrap();

            assert_eq!(puzzle.difference_count(), differences);
            assert_eq!(differing_cells(&puzzle).len(), usize::from(differences));
        }
    }

    #[test]
    fn difference_set_is_exactly_the_differing_cells() {
        let alphabet = letters();
        for seed in 0..100 {
            let puzzle = generate_puzzle(6, &alphabet, 9, seed).unwrap();

            assert_eq!(&differing_cells(&puzzle), puzzle.differences());
            for pos in iter_cells(6) {
                assert_eq!(puzzle.is_difference(pos), !puzzle.looks_same(pos));
            }
        }
    }

    #[test]
    fn selection_is_not_biased_towards_any_cell() {
        let alphabet = letters();
        let runs = 8000u64;
        let mut hits = [0u32; 16];

        for seed in 0..runs {
            let puzzle = generate_puzzle(4, &alphabet, 3, seed).unwrap();
            assert_eq!(puzzle.differences().len(), 3);
            for pos in puzzle.differences() {
                hits[pos.flat_index(4)] += 1;
            }
        }

        // each cell is expected 8000 * 3 / 16 = 1500 times
        let expected = (runs * 3 / 16) as u32;
        let tolerance = expected * 15 / 100;
        for (cell, &count) in hits.iter().enumerate() {
            assert!(
                count.abs_diff(expected) < tolerance,
                "cell {cell} picked {count} times"
            );
        }
    }

    #[test]
    fn same_seed_reproduces_puzzle() {
        let alphabet = letters();
        let first = generate_puzzle(4, &alphabet, 3, 42).unwrap();
        let second = generate_puzzle(4, &alphabet, 3, 42).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.size(), 4);
        assert_eq!(first.difference_count(), 3);
    }

    #[test]
    fn every_cell_can_be_a_difference() {
        let alphabet = Alphabet::from_chars("XY").unwrap();
        let puzzle = generate_puzzle(3, &alphabet, 9, 7).unwrap();

        assert_eq!(puzzle.difference_count(), 9);
        assert!(iter_cells(3).all(|pos| !puzzle.looks_same(pos)));
    }

    #[test]
    fn base_grid_is_untouched_by_alteration() {
        let alphabet = letters();
        let mut rng = SmallRng::seed_from_u64(3);
        let puzzle = generate_with_rng(PuzzleConfig { size: 5, differences: 4 }, &alphabet, &mut rng)
            .unwrap();

        let mut rng = SmallRng::seed_from_u64(3);
        let expected_base = Grid::from_fn(5, |_| draw(alphabet.as_slice(), &mut rng));
        assert_eq!(puzzle.base(), &expected_base);
    }

    #[test]
    fn invalid_requests_are_rejected() {
        let alphabet = letters();

        assert_eq!(generate_puzzle(1, &alphabet, 1, 0), Err(GameError::InvalidSize));
        assert_eq!(generate_puzzle(0, &alphabet, 1, 0), Err(GameError::InvalidSize));
        assert_eq!(
            generate_puzzle(3, &alphabet, 0, 0),
            Err(GameError::InvalidDifferenceCount)
        );
        assert_eq!(
            generate_puzzle(3, &alphabet, 10, 0),
            Err(GameError::InvalidDifferenceCount)
        );
    }

    #[test]
    fn single_symbol_alphabet_fails_instead_of_looping() {
        let single = Alphabet::from_chars("A").unwrap();
        assert_eq!(
            generate_puzzle(3, &single, 2, 0),
            Err(GameError::AlphabetTooSmall)
        );

        let repeated = Alphabet::from_chars("BBBB").unwrap();
        assert_eq!(
            generate_puzzle(3, &repeated, 2, 0),
            Err(GameError::AlphabetTooSmall)
        );
    }
}
