use bitcode::{Decode, Encode};
use rand::{seq::SliceRandom, Rng};

use crate::{letter_supply::LetterSupply, normalize};

#[derive(Clone, Debug, Default)]
struct TrieNode {
  /// `None` only for the root.
  letter: Option<char>,
  /// Kept in insertion order, which fixes the order `make_words` reports
  /// words in.
  children: Vec<TrieNode>,
  is_word_end: bool,
}

impl TrieNode {
  fn with_letter(letter: char) -> Self {
    Self { letter: Some(letter), ..Self::default() }
  }

  fn child(&self, letter: char) -> Option<&TrieNode> {
    self.children.iter().find(|child| child.letter == Some(letter))
  }

  fn child_or_insert(&mut self, letter: char) -> &mut TrieNode {
    let idx = match self
      .children
      .iter()
      .position(|child| child.letter == Some(letter))
    {
      Some(idx) => idx,
      None => {
        self.children.push(TrieNode::with_letter(letter));
        self.children.len() - 1
      }
    };
    &mut self.children[idx]
  }
}

/// Prefix tree over uppercased dictionary words.
#[derive(Clone, Debug, Default)]
pub struct Trie {
  root: TrieNode,
  word_count: usize,
}

impl Trie {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_words<S: AsRef<str>>(words: impl IntoIterator<Item = S>) -> Self {
    let mut trie = Self::new();
    for word in words {
      trie.insert(word.as_ref());
    }
    trie
  }

  /// Builds a trie from a newline-separated word list. Surrounding
  /// whitespace and blank lines are ignored.
  pub fn parse_word_list(text: &str) -> Self {
    Self::from_words(text.lines().map(str::trim).filter(|line| !line.is_empty()))
  }

  pub fn len(&self) -> usize {
    self.word_count
  }

  pub fn is_empty(&self) -> bool {
    self.word_count == 0
  }

  pub fn insert(&mut self, word: &str) {
    if word.is_empty() {
      return;
    }

    let node = normalize(word).fold(&mut self.root, |node, letter| node.child_or_insert(letter));
    if !node.is_word_end {
      node.is_word_end = true;
      self.word_count += 1;
    }
  }

  pub fn has(&self, word: &str) -> bool {
    !word.is_empty()
      && normalize(word)
        .try_fold(&self.root, |node, letter| node.child(letter))
        .is_some_and(|node| node.is_word_end)
  }

  /// All stored words, in trie-edge order.
  pub fn words(&self) -> Vec<String> {
    fn collect(node: &TrieNode, path: &mut String, words: &mut Vec<String>) {
      if node.is_word_end {
        words.push(path.clone());
      }
      for child in &node.children {
        if let Some(letter) = child.letter {
          path.push(letter);
          collect(child, path, words);
          path.pop();
        }
      }
    }

    let mut words = Vec::with_capacity(self.word_count);
    collect(&self.root, &mut String::new(), &mut words);
    words
  }

  /// Every stored word that can be spelled using each letter of `letters` at
  /// most as many times as it appears there, in trie-edge order.
  pub fn make_words(&self, letters: &str) -> Vec<String> {
    fn search(
      node: &TrieNode,
      supply: &mut LetterSupply,
      path: &mut String,
      words: &mut Vec<String>,
    ) {
      if node.is_word_end && !path.is_empty() {
        words.push(path.clone());
      }

      for child in &node.children {
        let Some(letter) = child.letter else {
          continue;
        };
        if supply.take(letter) {
          path.push(letter);
          search(child, supply, path, words);
          path.pop();
          supply.restore(letter);
        }
      }
    }

    let mut supply = LetterSupply::from_letters(letters);
    let mut words = Vec::new();
    if !supply.is_empty() {
      search(&self.root, &mut supply, &mut String::new(), &mut words);
    }
    words
  }

  /// `make_words` in a uniformly random order drawn from `rng`.
  pub fn make_words_shuffled<R: Rng + ?Sized>(&self, letters: &str, rng: &mut R) -> Vec<String> {
    let mut words = self.make_words(letters);
    words.shuffle(rng);
    words
  }
}

/// Compact on-disk form of a trie: its words in edge order, so decoding
/// rebuilds the same child ordering.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct TrieEncoding {
  words: Vec<String>,
}

impl From<&Trie> for TrieEncoding {
  fn from(value: &Trie) -> Self {
    Self { words: value.words() }
  }
}

impl From<TrieEncoding> for Trie {
  fn from(value: TrieEncoding) -> Self {
    Trie::from_words(value.words)
  }
}
