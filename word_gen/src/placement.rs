use std::fmt::Display;

use bitcode::{Decode, Encode};
use util::pos::{Diff, Pos};

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Encode, Decode)]
pub enum Direction {
  Horizontal,
  Vertical,
}

impl Direction {
  pub fn perpendicular(&self) -> Direction {
    match self {
      Direction::Horizontal => Direction::Vertical,
      Direction::Vertical => Direction::Horizontal,
    }
  }

  /// Offset from one letter of a word to the next.
  pub fn step(&self) -> Diff {
    match self {
      Direction::Horizontal => Diff::DX,
      Direction::Vertical => Diff::DY,
    }
  }
}

impl Display for Direction {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{}",
      match self {
        Direction::Horizontal => 'H',
        Direction::Vertical => 'V',
      }
    )
  }
}

/// Identifies a placement without carrying its cells.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct PlacementSignature {
  pub word: String,
  pub direction: Direction,
  pub start: Pos,
}

/// A word laid on the grid. `cells[k]` holds the `k`-th letter of `word`.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct Placement {
  word: String,
  direction: Direction,
  cells: Vec<Pos>,
}

impl Placement {
  pub fn new(word: impl Into<String>, direction: Direction, start: Pos) -> Self {
    let word = word.into();
    let cells = (0..word.chars().count() as i32)
      .map(|idx| start + idx * direction.step())
      .collect();
    Self { word, direction, cells }
  }

  pub fn word(&self) -> &str {
    &self.word
  }

  pub fn direction(&self) -> Direction {
    self.direction
  }

  pub fn cells(&self) -> &[Pos] {
    &self.cells
  }

  pub fn len(&self) -> usize {
    self.cells.len()
  }

  pub fn is_empty(&self) -> bool {
    self.cells.is_empty()
  }

  pub fn start(&self) -> Option<Pos> {
    self.cells.first().cloned()
  }

  pub fn end(&self) -> Option<Pos> {
    self.cells.last().cloned()
  }

  /// Each letter of the word paired with the cell it occupies.
  pub fn letters(&self) -> impl Iterator<Item = (char, Pos)> + '_ {
    self.word.chars().zip(self.cells.iter().cloned())
  }

  pub fn signature(&self) -> Option<PlacementSignature> {
    self.start().map(|start| PlacementSignature {
      word: self.word.clone(),
      direction: self.direction,
      start,
    })
  }

  /// Whether every cell of this placement is also a cell of `other`.
  pub fn is_covered_by(&self, other: &Placement) -> bool {
    self.cells.iter().all(|cell| other.cells.contains(cell))
  }

  pub(crate) fn translate(&mut self, offset: Diff) {
    for cell in &mut self.cells {
      *cell -= offset;
    }
  }
}
