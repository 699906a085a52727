#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod cell;
pub mod crossword_grid;
pub mod generator;
pub mod placement;
pub mod placement_search;
