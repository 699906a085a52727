use core::fmt;
use std::{
  error::Error,
  fmt::{Display, Formatter},
};

#[derive(Debug)]
pub enum LetterGridError {
  Internal(String),
  Parse(String),
}

impl Display for LetterGridError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      LetterGridError::Internal(msg) => write!(f, "Internal error: {msg}"),
      LetterGridError::Parse(msg) => write!(f, "Parse error: {msg}"),
    }
  }
}

impl Error for LetterGridError {}

pub type LetterGridResult<T = ()> = Result<T, Box<dyn Error>>;
