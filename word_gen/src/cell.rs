use std::fmt::Display;

use bitcode::{Decode, Encode};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Encode, Decode)]
pub enum Cell {
  #[default]
  Empty,
  Blocked,
  Letter(char),
}

impl Cell {
  pub fn is_empty(&self) -> bool {
    matches!(self, Cell::Empty)
  }

  pub fn is_letter(&self) -> bool {
    matches!(self, Cell::Letter(_))
  }

  /// Whether `letter` may be written here.
  pub fn accepts(&self, letter: char) -> bool {
    match self {
      Cell::Empty => true,
      Cell::Letter(existing) => *existing == letter,
      Cell::Blocked => false,
    }
  }

  pub fn cleared(&self) -> Cell {
    match self {
      Cell::Empty | Cell::Letter(_) => Cell::Empty,
      Cell::Blocked => Cell::Blocked,
    }
  }
}

impl Display for Cell {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{}",
      match self {
        Cell::Letter(c) => *c,
        Cell::Empty => '_',
        Cell::Blocked => '#',
      }
    )
  }
}
