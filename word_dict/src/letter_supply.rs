use std::collections::HashMap;

use crate::normalize;

/// Remaining uses of each letter of a letter bag during one enumeration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LetterSupply {
  counts: HashMap<char, u32>,
}

impl LetterSupply {
  pub fn from_letters(letters: &str) -> Self {
    Self {
      counts: normalize(letters).fold(HashMap::new(), |mut counts, letter| {
        *counts.entry(letter).or_default() += 1;
        counts
      }),
    }
  }

  pub fn remaining(&self, letter: char) -> u32 {
    self.counts.get(&letter).cloned().unwrap_or(0)
  }

  pub fn is_empty(&self) -> bool {
    self.counts.values().all(|&count| count == 0)
  }

  /// Consumes one `letter`, returning false if none are left.
  pub fn take(&mut self, letter: char) -> bool {
    match self.counts.get_mut(&letter) {
      Some(count) if *count > 0 => {
        *count -= 1;
        true
      }
      _ => false,
    }
  }

  /// Returns a letter previously consumed with `take`.
  pub fn restore(&mut self, letter: char) {
    *self.counts.entry(letter).or_default() += 1;
  }

  /// Whether `word` can be spelled without exceeding any letter's count.
  pub fn can_spell(&self, word: &str) -> bool {
    let needed = Self::from_letters(word);
    needed
      .counts
      .iter()
      .all(|(&letter, &count)| count <= self.remaining(letter))
  }
}

#[cfg(test)]
mod tests {
  use googletest::prelude::*;

  use super::LetterSupply;

  #[gtest]
  fn test_counts_are_case_insensitive() {
    let supply = LetterSupply::from_letters("aAb");
    expect_eq!(supply.remaining('A'), 2);
    expect_eq!(supply.remaining('B'), 1);
    expect_eq!(supply.remaining('C'), 0);
  }

  #[gtest]
  fn test_take_and_restore() {
    let mut supply = LetterSupply::from_letters("TT");
    expect_true!(supply.take('T'));
    expect_true!(supply.take('T'));
    expect_false!(supply.take('T'));
    expect_eq!(supply.remaining('T'), 0);
    expect_true!(supply.is_empty());

    supply.restore('T');
    expect_eq!(supply.remaining('T'), 1);
    expect_false!(supply.is_empty());
  }

  #[gtest]
  fn test_take_missing_letter() {
    let mut supply = LetterSupply::from_letters("");
    expect_true!(supply.is_empty());
    expect_false!(supply.take('Z'));
    expect_eq!(supply.remaining('Z'), 0);
  }

  #[gtest]
  fn test_can_spell() {
    let supply = LetterSupply::from_letters("CATS");
    expect_true!(supply.can_spell("cat"));
    expect_true!(supply.can_spell("TACS"));
    expect_false!(supply.can_spell("CATT"));
    expect_false!(supply.can_spell("DOG"));
  }
}
