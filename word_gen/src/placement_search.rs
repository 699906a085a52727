use crate::{
  crossword_grid::CrosswordGrid,
  placement::{Direction, Placement},
};

/// Every cell lies on the grid.
fn in_bounds(grid: &CrosswordGrid, candidate: &Placement) -> bool {
  match (candidate.start(), candidate.end()) {
    (Some(start), Some(end)) => grid.in_bounds(start) && grid.in_bounds(end),
    _ => false,
  }
}

/// Every cell is empty or already holds the letter being written there.
fn letter_compatible(grid: &CrosswordGrid, candidate: &Placement) -> bool {
  candidate
    .letters()
    .all(|(letter, pos)| grid.cell(pos).accepts(letter))
}

/// Newly written cells may not touch a letter on either side, or they would
/// extend some unrelated parallel run into a word nobody placed.
fn no_incidental_adjacency(grid: &CrosswordGrid, candidate: &Placement) -> bool {
  let side = candidate.direction().perpendicular().step();
  candidate
    .cells()
    .iter()
    .filter(|&&pos| grid.cell(pos).is_empty())
    .all(|&pos| !grid.cell(pos + side).is_letter() && !grid.cell(pos - side).is_letter())
}

/// The cells just before the first letter and just after the last must not
/// hold letters.
fn clear_ends(grid: &CrosswordGrid, candidate: &Placement) -> bool {
  let step = candidate.direction().step();
  match (candidate.start(), candidate.end()) {
    (Some(start), Some(end)) => {
      !grid.cell(start - step).is_letter() && !grid.cell(end + step).is_letter()
    }
    _ => false,
  }
}

/// No collinear placement may contain the candidate or be contained by it.
fn not_nested(candidate: &Placement, placements: &[Placement]) -> bool {
  placements
    .iter()
    .filter(|placed| placed.direction() == candidate.direction())
    .all(|placed| !candidate.is_covered_by(placed) && !placed.is_covered_by(candidate))
}

fn is_valid(grid: &CrosswordGrid, candidate: &Placement, placements: &[Placement]) -> bool {
  in_bounds(grid, candidate)
    && letter_compatible(grid, candidate)
    && no_incidental_adjacency(grid, candidate)
    && clear_ends(grid, candidate)
    && not_nested(candidate, placements)
}

/// All legal ways to lay `word` across one of `placements`, perpendicular to
/// the word it crosses.
///
/// Options are listed placement by placement, then by the index of the shared
/// letter in the placed word, then by its index in `word`. Callers that only
/// want one option should take the first.
pub fn valid_placements(
  grid: &CrosswordGrid,
  word: &str,
  placements: &[Placement],
) -> Vec<Placement> {
  let letters: Vec<char> = word.chars().collect();
  let mut candidates = Vec::new();

  for placed in placements {
    let direction: Direction = placed.direction().perpendicular();
    for (placed_letter, pivot) in placed.letters() {
      for (idx, _) in letters
        .iter()
        .enumerate()
        .filter(|&(_, &letter)| letter == placed_letter)
      {
        let start = pivot - idx as i32 * direction.step();
        let candidate = Placement::new(word, direction, start);
        if is_valid(grid, &candidate, placements) {
          candidates.push(candidate);
        }
      }
    }
  }

  candidates
}
