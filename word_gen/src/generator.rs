use log::info;
use rand::Rng;
use word_dict::Trie;

use crate::crossword_grid::CrosswordGrid;

/// A filled and cropped grid, along with how many candidate words it was
/// built from.
#[derive(Clone, Debug)]
pub struct Generation {
  grid: CrosswordGrid,
  candidate_count: usize,
}

impl Generation {
  pub fn grid(&self) -> &CrosswordGrid {
    &self.grid
  }

  pub fn candidate_count(&self) -> usize {
    self.candidate_count
  }

  pub fn placed_count(&self) -> usize {
    self.grid.placements().len()
  }

  pub fn all_placed(&self) -> bool {
    self.placed_count() == self.candidate_count
  }
}

/// Builds grids from letter bags against one dictionary.
pub struct CrosswordGenerator {
  trie: Trie,
}

impl CrosswordGenerator {
  pub fn new(trie: Trie) -> Self {
    Self { trie }
  }

  pub fn trie(&self) -> &Trie {
    &self.trie
  }

  /// Side length of the square grid used for `letters`: twice the number of
  /// letters, which leaves room to center the longest possible word with
  /// crossings reaching out in every direction.
  pub fn grid_side(letters: &str) -> u32 {
    let letter_count = letters.chars().filter(|c| !c.is_whitespace()).count() as u32;
    (2 * letter_count).max(1)
  }

  pub fn candidate_words<R: Rng + ?Sized>(&self, letters: &str, rng: &mut R) -> Vec<String> {
    self.trie.make_words_shuffled(letters, rng)
  }

  pub fn generate<R: Rng + ?Sized>(&self, letters: &str, rng: &mut R) -> Generation {
    self.generate_with_side(letters, Self::grid_side(letters), rng)
  }

  pub fn generate_with_side<R: Rng + ?Sized>(
    &self,
    letters: &str,
    side: u32,
    rng: &mut R,
  ) -> Generation {
    let candidates = self.candidate_words(letters, rng);
    let candidate_count = candidates.len();

    let mut grid = CrosswordGrid::new(side, side);
    grid.fill(candidates, rng);
    grid.crop();
    info!(
      "Generated {}x{} grid from \"{letters}\" with {} of {candidate_count} candidates",
      grid.width(),
      grid.height(),
      grid.placements().len()
    );

    Generation { grid, candidate_count }
  }
}
