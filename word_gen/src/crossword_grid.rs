use std::{
  cmp::Reverse,
  collections::{HashMap, HashSet},
  fmt::Display,
};

use bitcode::{Decode, Encode};
use itertools::Itertools;
use log::{debug, info, warn};
use rand::Rng;
use util::{
  error::{LetterGridError, LetterGridResult},
  grid::{Grid, Gridlike, MutGridlike},
  pos::{Diff, Pos},
};

use crate::{
  cell::Cell,
  placement::{Direction, Placement, PlacementSignature},
  placement_search::valid_placements,
};

#[derive(Clone, Debug)]
pub struct CrosswordGrid {
  grid: Grid<Cell>,
  placements: Vec<Placement>,
  used_words: HashSet<String>,
  signatures: HashSet<PlacementSignature>,
}

impl CrosswordGrid {
  pub fn new(width: u32, height: u32) -> Self {
    Self::from_grid(Grid::new(width, height))
  }

  fn from_grid(grid: Grid<Cell>) -> Self {
    Self {
      grid,
      placements: Vec::new(),
      used_words: HashSet::new(),
      signatures: HashSet::new(),
    }
  }

  /// Parses a layout of `_` (empty) and `#` (blocked) cells, one row per
  /// line. Leading and trailing whitespace on each line is ignored.
  pub fn from_layout(layout: &str) -> LetterGridResult<Self> {
    let (width, height, cells) = layout.lines().try_fold(
      (None, 0, vec![]),
      |(width, height, mut cells), line| -> LetterGridResult<_> {
        let line = line.trim();
        cells.extend(
          line
            .chars()
            .map(|c| match c {
              '_' => Ok(Cell::Empty),
              '#' => Ok(Cell::Blocked),
              _ => Err(LetterGridError::Parse(format!("Unrecognized layout character '{c}'")).into()),
            })
            .collect::<LetterGridResult<Vec<_>>>()?,
        );
        let line_width = line.chars().count();
        if let Some(width) = width {
          if line_width != width {
            return Err(
              LetterGridError::Parse(format!(
                "Layout line lengths differ: {line_width} vs {width}"
              ))
              .into(),
            );
          }
        }

        Ok((Some(line_width), height + 1, cells))
      },
    )?;

    let width = width.ok_or_else(|| LetterGridError::Parse("Empty layout string".to_owned()))?;
    Ok(Self::from_grid(Grid::from_vec(cells, width as u32, height)?))
  }

  pub fn width(&self) -> u32 {
    self.grid.width()
  }

  pub fn height(&self) -> u32 {
    self.grid.height()
  }

  pub fn in_bounds(&self, pos: Pos) -> bool {
    self.grid.in_bounds(pos)
  }

  pub fn placements(&self) -> &[Placement] {
    &self.placements
  }

  pub fn used_words(&self) -> &HashSet<String> {
    &self.used_words
  }

  pub fn has_placement(&self, signature: &PlacementSignature) -> bool {
    self.signatures.contains(signature)
  }

  /// Out-of-bounds positions read as `Blocked`, so the edge of the grid
  /// behaves like a wall.
  pub fn cell(&self, pos: Pos) -> Cell {
    self.grid.get(pos).cloned().unwrap_or(Cell::Blocked)
  }

  /// Writes to out-of-bounds positions are ignored.
  pub fn set_cell(&mut self, pos: Pos, cell: Cell) {
    if let Some(tile) = self.grid.get_mut(pos) {
      *tile = cell;
    }
  }

  /// Empties every letter cell and forgets all placements. Blocked cells are
  /// kept.
  pub fn clear_grid(&mut self) {
    self.grid = self.grid.map(Cell::cleared);
    self.placements.clear();
    self.used_words.clear();
    self.signatures.clear();
  }

  fn fits(&self, word: &str) -> bool {
    let len = word.chars().count() as u32;
    len > 0 && (len <= self.width() || len <= self.height())
  }

  /// Whether every cell of `placement` is on the grid and free for its
  /// letter.
  fn can_hold(&self, placement: &Placement) -> bool {
    placement
      .letters()
      .all(|(letter, pos)| self.in_bounds(pos) && self.cell(pos).accepts(letter))
  }

  fn commit(&mut self, placement: Placement) {
    let Some(signature) = placement.signature() else {
      return;
    };
    if !self.signatures.insert(signature) {
      return;
    }

    for (letter, pos) in placement.letters() {
      self.set_cell(pos, Cell::Letter(letter));
    }
    self.used_words.insert(placement.word().to_owned());
    self.placements.push(placement);
  }

  fn centered(&self, word: &str, direction: Direction) -> Placement {
    let len = word.chars().count() as i32;
    let (width, height) = (self.width() as i32, self.height() as i32);
    let start = match direction {
      Direction::Horizontal => Pos { x: (width - len).div_euclid(2), y: height / 2 },
      Direction::Vertical => Pos { x: width / 2, y: (height - len).div_euclid(2) },
    };
    Placement::new(word, direction, start)
  }

  /// Centers `word` in the grid, picking its orientation with a fair coin.
  /// Falls back to the other orientation if blocked cells or the grid edge
  /// get in the way, and places nothing if neither works.
  fn place_first_word<R: Rng + ?Sized>(&mut self, word: &str, rng: &mut R) -> bool {
    let direction = if rng.random_bool(0.5) {
      Direction::Horizontal
    } else {
      Direction::Vertical
    };

    let placement = [direction, direction.perpendicular()]
      .into_iter()
      .map(|direction| self.centered(word, direction))
      .find(|placement| self.can_hold(placement));
    match placement {
      Some(placement) => {
        debug!(
          "First word {word} placed {} at {}",
          placement.direction(),
          placement.start().unwrap_or(Pos::zero())
        );
        self.commit(placement);
        true
      }
      None => {
        warn!("No room to center first word {word}");
        false
      }
    }
  }

  /// Greedily lays out `word_pool`: the longest word is centered first, then
  /// every remaining word in pool order takes its first legal crossing, if it
  /// has one. Placed words are never moved to make room for later ones.
  pub fn fill<R: Rng + ?Sized>(&mut self, word_pool: Vec<String>, rng: &mut R) -> &[Placement] {
    self.clear_grid();
    if word_pool.is_empty() {
      return &self.placements;
    }

    let (word_pool, oversized): (Vec<_>, Vec<_>) =
      word_pool.into_iter().partition(|word| self.fits(word));
    for word in &oversized {
      warn!(
        "Dropping \"{word}\", which cannot fit in a {}x{} grid",
        self.width(),
        self.height()
      );
    }

    let Some(first_idx) = word_pool
      .iter()
      .enumerate()
      .min_by_key(|(_, word)| Reverse(word.chars().count()))
      .map(|(idx, _)| idx)
    else {
      return &self.placements;
    };
    let first_word = word_pool[first_idx].clone();
    let remaining = word_pool
      .into_iter()
      .filter(|word| *word != first_word)
      .collect_vec();
    let candidate_count = remaining.len() + 1;
    if !self.place_first_word(&first_word, rng) {
      return &self.placements;
    }

    for word in remaining {
      if self.used_words.contains(&word) {
        debug!("Skipping repeated word {word}");
        continue;
      }

      match valid_placements(self, &word, &self.placements)
        .into_iter()
        .next()
      {
        Some(placement) => {
          debug!(
            "Placed {word} {} at {}",
            placement.direction(),
            placement.start().unwrap_or(Pos::zero())
          );
          self.commit(placement);
        }
        None => debug!("No valid placement for {word}"),
      }
    }

    info!(
      "Placed {} of {candidate_count} words in a {}x{} grid",
      self.placements.len(),
      self.width(),
      self.height()
    );
    &self.placements
  }

  fn occupied_span(occupied: &[bool]) -> Option<(u32, u32)> {
    let first = occupied.iter().position(|&filled| filled)?;
    let last = occupied.iter().rposition(|&filled| filled)?;
    Some((first as u32, last as u32))
  }

  /// Shrinks the grid to the bounding box of its non-empty cells and shifts
  /// placements to match. An entirely empty grid shrinks to its top-left
  /// cell.
  pub fn crop(&mut self) -> &[Placement] {
    if self.width() == 0 || self.height() == 0 {
      return &self.placements;
    }

    let rows = (0..self.height())
      .map(|y| self.grid.iter_row(y).any(|cell| !cell.is_empty()))
      .collect_vec();
    let cols = (0..self.width())
      .map(|x| self.grid.iter_col(x).any(|cell| !cell.is_empty()))
      .collect_vec();
    let ((top, bottom), (left, right)) =
      match (Self::occupied_span(&rows), Self::occupied_span(&cols)) {
        (Some(row_span), Some(col_span)) => (row_span, col_span),
        _ => ((0, 0), (0, 0)),
      };

    if top == 0 && left == 0 && bottom + 1 == self.height() && right + 1 == self.width() {
      return &self.placements;
    }

    let offset = Diff { x: left as i32, y: top as i32 };
    self.grid = Grid::from_fn(right - left + 1, bottom - top + 1, |pos| {
      self.grid.get(pos + offset).cloned().unwrap_or_default()
    });
    for placement in &mut self.placements {
      placement.translate(offset);
    }
    self.signatures = self
      .placements
      .iter()
      .filter_map(Placement::signature)
      .collect();
    debug!("Cropped grid to {}x{} at offset {offset}", self.width(), self.height());

    &self.placements
  }

  /// One line per row with cells separated by spaces. Two grids render
  /// identically exactly when their cells match, so this doubles as a dedup
  /// key.
  pub fn render(&self) -> String {
    (0..self.height())
      .map(|y| self.grid.iter_row(y).join(" "))
      .join("\n")
  }

  /// Clue numbers for the start cell of each placement, numbered from 1 in
  /// placement order. Placements sharing a start cell share a number.
  pub fn clue_starts(&self) -> Vec<(u32, Pos)> {
    let mut numbers = HashMap::new();
    self
      .placements
      .iter()
      .filter_map(Placement::start)
      .filter_map(|start| {
        let next_number = numbers.len() as u32 + 1;
        numbers
          .insert(start, next_number)
          .is_none()
          .then_some((next_number, start))
      })
      .collect()
  }
}

impl Display for CrosswordGrid {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.render())
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct CrosswordEncoding {
  grid: Grid<Cell>,
  placements: Vec<Placement>,
}

impl From<&CrosswordGrid> for CrosswordEncoding {
  fn from(value: &CrosswordGrid) -> Self {
    Self {
      grid: value.grid.clone(),
      placements: value.placements.clone(),
    }
  }
}

impl From<CrosswordEncoding> for CrosswordGrid {
  fn from(value: CrosswordEncoding) -> Self {
    let mut xword = Self::from_grid(value.grid);
    for placement in value.placements {
      xword.commit(placement);
    }
    xword
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use googletest::prelude::*;
  use itertools::Itertools;
  use rand::{rngs::StdRng, SeedableRng};
  use util::pos::Pos;
  use word_dict::Trie;

  use crate::{
    cell::Cell,
    placement::{Direction, Placement, PlacementSignature},
  };

  use super::{CrosswordEncoding, CrosswordGrid};

  fn words(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| (*word).to_owned()).collect()
  }

  fn letter_at(placement: &Placement, pos: Pos) -> Option<char> {
    placement
      .letters()
      .find(|&(_, cell)| cell == pos)
      .map(|(letter, _)| letter)
  }

  /// Checks the structural guarantees every filled grid must satisfy.
  fn check_invariants(xword: &CrosswordGrid) {
    for placement in xword.placements() {
      expect_eq!(placement.len(), placement.word().chars().count());
      for (letter, pos) in placement.letters() {
        expect_eq!(xword.cell(pos), Cell::Letter(letter));
      }
    }

    for (a, b) in xword.placements().iter().tuple_combinations() {
      for &pos in a.cells() {
        if let Some(other) = letter_at(b, pos) {
          expect_eq!(letter_at(a, pos), Some(other));
        }
      }
      if a.direction() == b.direction() {
        expect_false!(a.is_covered_by(b));
        expect_false!(b.is_covered_by(a));
      }
    }

    let used = xword.placements().iter().map(Placement::word).collect_vec();
    expect_eq!(used.iter().unique().count(), used.len());
  }

  #[gtest]
  fn test_out_of_bounds_cells() {
    let mut xword = CrosswordGrid::new(3, 2);
    expect_eq!(xword.cell(Pos { x: -1, y: 0 }), Cell::Blocked);
    expect_eq!(xword.cell(Pos { x: 0, y: 2 }), Cell::Blocked);
    expect_eq!(xword.cell(Pos { x: 2, y: 1 }), Cell::Empty);

    xword.set_cell(Pos { x: 3, y: 0 }, Cell::Letter('A'));
    xword.set_cell(Pos { x: 1, y: 1 }, Cell::Letter('B'));
    let rendered = xword.render();
    expect_eq!(rendered.as_str(), "_ _ _\n_ B _");
  }

  #[gtest]
  fn test_from_layout() {
    let xword = CrosswordGrid::from_layout(
      "_#_
       ___",
    );
    assert_that!(xword, ok(anything()));
    let xword = xword.unwrap();
    expect_eq!(xword.width(), 3);
    expect_eq!(xword.height(), 2);
    expect_eq!(xword.cell(Pos { x: 1, y: 0 }), Cell::Blocked);

    expect_that!(CrosswordGrid::from_layout(""), err(anything()));
    expect_that!(CrosswordGrid::from_layout("__\n_"), err(anything()));
    expect_that!(CrosswordGrid::from_layout("_x"), err(anything()));
  }

  #[gtest]
  fn test_clear_grid_keeps_blocks() {
    let mut xword = CrosswordGrid::from_layout("#__\n___").unwrap();
    xword.commit(Placement::new("AT", Direction::Horizontal, Pos { x: 1, y: 0 }));
    expect_eq!(xword.placements().len(), 1);

    xword.clear_grid();
    expect_true!(xword.placements().is_empty());
    expect_true!(xword.used_words().is_empty());
    let rendered = xword.render();
    expect_eq!(rendered.as_str(), "# _ _\n_ _ _");
  }

  #[gtest]
  fn test_fill_empty_pool() {
    let mut xword = CrosswordGrid::new(5, 5);
    xword.set_cell(Pos { x: 0, y: 0 }, Cell::Letter('Z'));
    let placements = xword.fill(vec![], &mut StdRng::seed_from_u64(0));
    expect_true!(placements.is_empty());
    expect_eq!(xword.cell(Pos { x: 0, y: 0 }), Cell::Empty);
  }

  #[gtest]
  fn test_fill_cats_and_cat() {
    for seed in 0..8 {
      let mut xword = CrosswordGrid::new(8, 8);
      xword.fill(words(&["CAT", "CATS"]), &mut StdRng::seed_from_u64(seed));
      check_invariants(&xword);

      let placements = xword.placements();
      assert_eq!(placements.len(), 2);
      let (cats, cat) = (&placements[0], &placements[1]);
      expect_eq!(cats.word(), "CATS");
      expect_eq!(cat.word(), "CAT");
      expect_eq!(cat.direction(), cats.direction().perpendicular());
      expect_eq!(cat.start(), cats.start());

      let start = cats.start().unwrap();
      match cats.direction() {
        Direction::Horizontal => {
          expect_eq!(start, Pos { x: 2, y: 4 });
        }
        Direction::Vertical => {
          expect_eq!(start, Pos { x: 4, y: 2 });
        }
      }
    }
  }

  #[gtest]
  fn test_fill_picks_first_longest() {
    let mut xword = CrosswordGrid::new(12, 12);
    xword.fill(
      words(&["AT", "TEAS", "SEAT", "EAT"]),
      &mut StdRng::seed_from_u64(5),
    );
    expect_eq!(xword.placements()[0].word(), "TEAS");
    check_invariants(&xword);
  }

  #[gtest]
  fn test_fill_skips_repeats() {
    let mut xword = CrosswordGrid::new(10, 10);
    xword.fill(
      words(&["TEA", "SEAT", "TEA", "SEAT"]),
      &mut StdRng::seed_from_u64(1),
    );
    let placed = xword.placements().iter().map(Placement::word).collect_vec();
    expect_that!(placed, container_eq(["SEAT", "TEA"]));
    check_invariants(&xword);
  }

  #[gtest]
  fn test_fill_is_reproducible() {
    let trie = Trie::from_words(["rate", "tear", "ear", "are", "era", "eat", "tea", "ate", "art"]);
    let pool = trie.make_words("tearx");

    let mut first = CrosswordGrid::new(10, 10);
    first.fill(pool.clone(), &mut StdRng::seed_from_u64(42));
    let mut second = CrosswordGrid::new(10, 10);
    second.fill(pool, &mut StdRng::seed_from_u64(42));

    expect_eq!(first.placements(), second.placements());
    expect_eq!(first.render(), second.render());
  }

  #[gtest]
  fn test_fill_invariants_over_seeds() {
    let trie = Trie::from_words([
      "stare", "tears", "rates", "aster", "star", "rats", "arts", "tsar", "tar", "rat", "art",
      "sat", "set", "tea", "eat", "ate", "ear", "are", "era", "sea", "tees",
    ]);
    for seed in 0..20 {
      let mut rng = StdRng::seed_from_u64(seed);
      let pool = trie.make_words_shuffled("stare", &mut rng);
      let mut xword = CrosswordGrid::new(10, 10);
      xword.fill(pool.clone(), &mut rng);

      let longest = pool.iter().map(|word| word.chars().count()).max().unwrap();
      expect_eq!(xword.placements()[0].len(), longest);
      check_invariants(&xword);

      xword.crop();
      check_invariants(&xword);
    }
  }

  #[gtest]
  fn test_fill_drops_oversized_words() {
    let mut xword = CrosswordGrid::new(3, 3);
    xword.fill(words(&["LONGER", "CAT"]), &mut StdRng::seed_from_u64(0));
    let placed = xword.placements().iter().map(Placement::word).collect_vec();
    expect_that!(placed, container_eq(["CAT"]));
  }

  #[gtest]
  fn test_fill_respects_blocks() {
    let mut xword = CrosswordGrid::from_layout(
      "_____
       __#__
       _____
       __#__
       _____",
    )
    .unwrap();
    for seed in 0..4 {
      xword.fill(words(&["CAT"]), &mut StdRng::seed_from_u64(seed));
      expect_eq!(xword.placements().len(), 1);
      expect_eq!(xword.placements()[0].direction(), Direction::Horizontal);
    }
    expect_eq!(xword.cell(Pos { x: 2, y: 1 }), Cell::Blocked);
    expect_eq!(xword.cell(Pos { x: 2, y: 3 }), Cell::Blocked);
    check_invariants(&xword);
  }

  #[gtest]
  fn test_fill_with_no_room_for_first_word() {
    let mut xword = CrosswordGrid::from_layout(
      "___
       _#_
       ___",
    )
    .unwrap();
    let placements = xword.fill(words(&["ART", "AT"]), &mut StdRng::seed_from_u64(2));
    expect_true!(placements.is_empty());
    expect_eq!(xword.cell(Pos { x: 1, y: 1 }), Cell::Blocked);
  }

  #[gtest]
  fn test_crop() {
    let mut xword = CrosswordGrid::new(8, 8);
    xword.commit(Placement::new("CATS", Direction::Horizontal, Pos { x: 2, y: 4 }));
    xword.commit(Placement::new("CAT", Direction::Vertical, Pos { x: 2, y: 4 }));
    xword.crop();

    expect_eq!(xword.width(), 4);
    expect_eq!(xword.height(), 3);
    let rendered = xword.render();
    expect_eq!(rendered.as_str(), "C A T S\nA _ _ _\nT _ _ _");
    expect_that!(
      xword.placements()[0].cells().to_vec(),
      container_eq([Pos { x: 0, y: 0 }, Pos { x: 1, y: 0 }, Pos { x: 2, y: 0 }, Pos { x: 3, y: 0 }])
    );
    expect_true!(xword.has_placement(&PlacementSignature {
      word: "CAT".to_owned(),
      direction: Direction::Vertical,
      start: Pos::zero(),
    }));
    check_invariants(&xword);
  }

  #[gtest]
  fn test_crop_is_idempotent() {
    let mut xword = CrosswordGrid::new(9, 9);
    xword.fill(words(&["STARE", "TEA", "RAT"]), &mut StdRng::seed_from_u64(3));
    xword.crop();
    let (width, height, rendered) = (xword.width(), xword.height(), xword.render());
    let placements = xword.placements().to_vec();

    xword.crop();
    expect_eq!(xword.width(), width);
    expect_eq!(xword.height(), height);
    expect_eq!(xword.render(), rendered);
    expect_eq!(xword.placements().to_vec(), placements);
  }

  #[gtest]
  fn test_crop_keeps_blocked_cells() {
    let mut xword = CrosswordGrid::from_layout(
      "____
       _#__
       ____",
    )
    .unwrap();
    xword.set_cell(Pos { x: 2, y: 1 }, Cell::Letter('A'));
    xword.crop();
    let rendered = xword.render();
    expect_eq!(rendered.as_str(), "# A");
  }

  #[gtest]
  fn test_crop_empty_grid() {
    let mut xword = CrosswordGrid::new(4, 3);
    xword.crop();
    expect_eq!(xword.width(), 1);
    expect_eq!(xword.height(), 1);
    xword.crop();
    let rendered = xword.render();
    expect_eq!(rendered.as_str(), "_");
  }

  #[gtest]
  fn test_render_shape() {
    let xword = CrosswordGrid::new(4, 3);
    let rendered = xword.render();
    let lines = rendered.lines().collect_vec();
    expect_eq!(lines.len(), 3);
    for line in lines {
      expect_eq!(line.split(' ').count(), 4);
    }
    expect_eq!(xword.to_string(), rendered);
  }

  #[gtest]
  fn test_clue_starts() {
    let mut xword = CrosswordGrid::new(8, 8);
    xword.commit(Placement::new("CATS", Direction::Horizontal, Pos { x: 2, y: 4 }));
    xword.commit(Placement::new("CAT", Direction::Vertical, Pos { x: 2, y: 4 }));
    xword.commit(Placement::new("SEA", Direction::Vertical, Pos { x: 5, y: 4 }));
    expect_that!(
      xword.clue_starts(),
      container_eq([(1, Pos { x: 2, y: 4 }), (2, Pos { x: 5, y: 4 })])
    );
  }

  #[gtest]
  fn test_encoding_round_trip() {
    let mut xword = CrosswordGrid::new(9, 9);
    xword.fill(words(&["STARE", "TEA", "RAT"]), &mut StdRng::seed_from_u64(11));
    xword.crop();

    let bytes = bitcode::encode(&CrosswordEncoding::from(&xword));
    let decoded: CrosswordEncoding = bitcode::decode(&bytes).unwrap();
    let restored = CrosswordGrid::from(decoded);
    expect_eq!(restored.render(), xword.render());
    expect_eq!(restored.placements(), xword.placements());
    expect_eq!(restored.used_words(), xword.used_words());
  }
}
