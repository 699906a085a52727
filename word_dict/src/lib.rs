#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod letter_supply;
mod trie;

pub use letter_supply::LetterSupply;
pub use trie::{Trie, TrieEncoding};

/// Uppercases `word` the same way for insertion, lookup and letter bags.
pub(crate) fn normalize(word: &str) -> impl Iterator<Item = char> + '_ {
  word.chars().flat_map(char::to_uppercase)
}
