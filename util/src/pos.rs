use std::{
  fmt::Display,
  ops::{Add, Mul, Sub, SubAssign},
};

use bitcode::{Decode, Encode};

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Encode, Decode)]
pub struct Pos {
  pub x: i32,
  pub y: i32,
}

impl Pos {
  pub const fn zero() -> Self {
    Self { x: 0, y: 0 }
  }
}

impl Sub<Diff> for Pos {
  type Output = Self;

  fn sub(self, rhs: Diff) -> Self {
    Self { x: self.x - rhs.x, y: self.y - rhs.y }
  }
}

impl SubAssign<Diff> for Pos {
  fn sub_assign(&mut self, rhs: Diff) {
    self.x -= rhs.x;
    self.y -= rhs.y;
  }
}

impl Add<Diff> for Pos {
  type Output = Self;

  fn add(self, rhs: Diff) -> Self {
    Self { x: self.x + rhs.x, y: self.y + rhs.y }
  }
}

impl Display for Pos {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "({}, {})", self.x, self.y)
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Diff {
  pub x: i32,
  pub y: i32,
}

impl Diff {
  pub const DX: Diff = Diff { x: 1, y: 0 };
  pub const DY: Diff = Diff { x: 0, y: 1 };
}

impl Mul<Diff> for i32 {
  type Output = Diff;

  fn mul(self, rhs: Diff) -> Diff {
    Diff { x: self * rhs.x, y: self * rhs.y }
  }
}

impl Display for Diff {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "({}, {})", self.x, self.y)
  }
}

#[cfg(test)]
mod tests {
  use googletest::prelude::*;

  use super::{Diff, Pos};

  #[gtest]
  fn test_offsets() {
    let pos = Pos { x: 3, y: 4 };
    expect_eq!(pos + 2 * Diff::DX, Pos { x: 5, y: 4 });
    expect_eq!(pos - 3 * Diff::DY, Pos { x: 3, y: 1 });
  }

  #[gtest]
  fn test_sub_assign() {
    let mut pos = Pos { x: 1, y: 1 };
    pos -= Diff { x: 1, y: 0 };
    expect_eq!(pos, Pos { x: 0, y: 1 });
  }
}
