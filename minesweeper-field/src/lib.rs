//! Minefield generation and the cascading reveal used by the terminal game.
//!
//! A [`Minefield`] is produced once per session, either by [`generate`] or by
//! placing mines by hand through a [`MinefieldBuilder`], and then mutated in place
//! by the actions of a [`game::Game`].

use core::fmt;
use std::borrow::Borrow;

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use board::{Board, BoardVec};

pub mod board;
pub mod difficulty;
pub mod error;
pub mod game;
mod reveal;

pub use difficulty::{Difficulty, FieldConfig};
pub use error::FieldError;

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Cell {
  mine: bool,
  cleared: bool,
  marked: bool,
  adjacent: u8,
}

impl Cell {
  pub fn has_mine(self) -> bool {
    self.mine
  }

  pub fn is_cleared(self) -> bool {
    self.cleared
  }

  pub fn has_mark(self) -> bool {
    self.marked
  }

  pub fn adjacent_mines(self) -> u8 {
    self.adjacent
  }

  pub fn is_blank(self) -> bool {
    !self.mine && self.adjacent == 0
  }

  fn notify_mine(cell: &mut Cell) {
    cell.adjacent += 1;
    debug_assert!(cell.adjacent <= 8);
  }
}

impl fmt::Display for Cell {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Cell { cleared: true, mine: true, .. } => write!(f, "*"),
      Cell { cleared: true, adjacent: 0, .. } => write!(f, " "),
      Cell { cleared: true, adjacent, .. } => write!(f, "{}", adjacent),
      Cell { marked: true, .. } => write!(f, "!"),
      _ => write!(f, "#"),
    }
  }
}

/// The grid of cells plus the number of mines hidden in it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Minefield {
  board: Board<Cell>,
  mines: u32,
}

impl Minefield {
  fn new(mines: &Board<bool>) -> Self {
    let mut board = Board::new(mines.width, mines.height, Cell::default());
    let mut count = 0;
    for (pos, &is_mine) in mines.enumerate() {
      if is_mine {
        count += 1;
        board[pos].mine = true;
        for neighbour_pos in pos.neighbours() {
          if let Some(neighbour) = board.get_mut(neighbour_pos) {
            Cell::notify_mine(neighbour);
          }
        }
      }
    }

    Minefield { board, mines: count }
  }

  pub fn board(&self) -> &Board<Cell> {
    &self.board
  }

  pub fn width(&self) -> u32 {
    self.board.width
  }

  pub fn height(&self) -> u32 {
    self.board.height
  }

  pub fn mine_count(&self) -> u32 {
    self.mines
  }

  pub fn contains(&self, pos: BoardVec) -> bool {
    self.board.contains(pos)
  }

  pub fn cell(&self, pos: BoardVec) -> Result<Cell, FieldError> {
    self.board.try_get(pos).copied()
  }

  /// Marks the cell as revealed. Returns whether it was hidden before.
  pub fn set_cleared(&mut self, pos: BoardVec) -> Result<bool, FieldError> {
    let cell = self.board.try_get_mut(pos)?;
    let was_hidden = !cell.cleared;
    cell.cleared = true;
    Ok(was_hidden)
  }

  /// Flips the mark of a hidden cell. Cleared cells keep their state.
  pub fn toggle_mark(&mut self, pos: BoardVec) -> Result<(), FieldError> {
    let cell = self.board.try_get_mut(pos)?;
    if !cell.cleared {
      cell.marked = !cell.marked;
    }
    Ok(())
  }

  pub fn mine_positions(&self) -> impl Iterator<Item = BoardVec> + '_ {
    self.board.enumerate().filter(|(_, cell)| cell.mine).map(|(pos, _)| pos)
  }

  pub fn count_cleared(&self) -> usize {
    self.board.iter().filter(|cell| cell.cleared).count()
  }

  /// Uncovers every mine, leaving all other cells untouched.
  pub fn reveal_mines(&mut self) {
    for (_, cell) in self.board.enumerate_mut() {
      if cell.mine {
        cell.cleared = true;
      }
    }
  }
}

impl<B: Borrow<MinefieldBuilder>> From<B> for Minefield {
  fn from(builder: B) -> Self {
    let builder: &MinefieldBuilder = builder.borrow();
    Self::new(&builder.mines)
  }
}

impl fmt::Debug for Minefield {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for row in self.board.rows() {
      for cell in row {
        write!(f, "{}", cell)?;
      }
      writeln!(f)?;
    }

    Ok(())
  }
}

pub struct MinefieldBuilder {
  mines: Board<bool>,
}

impl MinefieldBuilder {
  pub fn new(width: u32, height: u32) -> Self {
    Self {
      mines: Board::new(width, height, false),
    }
  }

  pub fn has_mine(&self, pos: BoardVec) -> bool {
    self.mines.get(pos).copied().unwrap_or(false)
  }

  pub fn set_mine(&mut self, pos: BoardVec) -> Result<&mut Self, FieldError> {
    *self.mines.try_get_mut(pos)? = true;
    Ok(self)
  }

  pub fn mine_count(&self) -> u32 {
    self.mines.iter().filter(|&&mine| mine).count() as u32
  }

  /// Places `mines` additional mines on a uniformly random subset of the free cells.
  ///
  /// At least one cell has to stay free of mines afterwards.
  pub fn add_random_mines(&mut self, mines: u32, rng: &mut impl Rng) -> Result<&mut Self, FieldError> {
    let mut free: Vec<_> = self.mines.positions().filter(|&pos| !self.has_mine(pos)).collect();
    if mines as usize >= free.len() {
      return Err(FieldError::InvalidConfiguration {
        width: self.mines.width,
        height: self.mines.height,
        mines: self.mine_count() + mines,
      });
    }

    let (chosen, _) = free.partial_shuffle(rng, mines as usize);
    for &pos in chosen.iter() {
      self.mines[pos] = true;
    }

    Ok(self)
  }

  pub fn build(&self) -> Minefield {
    Minefield::from(self)
  }
}

/// Creates a fresh minefield with `config.mines()` randomly placed mines.
pub fn generate(config: FieldConfig, rng: &mut impl Rng) -> Result<Minefield, FieldError> {
  let mut builder = MinefieldBuilder::new(config.width(), config.height());
  builder.add_random_mines(config.mines(), rng)?;
  debug!(
    "generated {}x{} field with {} mines",
    config.width(),
    config.height(),
    config.mines()
  );
  Ok(builder.build())
}

#[cfg(test)]
mod tests {
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  use super::*;

  fn field_with_mines(width: u32, height: u32, mines: &[(i32, i32)]) -> Minefield {
    let mut builder = MinefieldBuilder::new(width, height);
    for &(x, y) in mines {
      builder.set_mine(BoardVec::new(x, y)).unwrap();
    }
    builder.build()
  }

  fn brute_force_count(field: &Minefield, pos: BoardVec) -> u8 {
    let mut count = 0;
    for dy in -1..=1 {
      for dx in -1..=1 {
        if dx == 0 && dy == 0 {
          continue;
        }
        if let Ok(cell) = field.cell(BoardVec::new(pos.x + dx, pos.y + dy)) {
          if cell.has_mine() {
            count += 1;
          }
        }
      }
    }
    count
  }

  #[test]
  fn generates_exact_mine_count() {
    let mut rng = StdRng::seed_from_u64(7);
    for &(width, height, mines) in &[(1, 1, 0), (10, 10, 20), (40, 15, 170), (5, 3, 14), (1, 9, 4)] {
      let config = FieldConfig::new(width, height, mines).unwrap();
      let field = generate(config, &mut rng).unwrap();
      assert_eq!(field.mine_count(), mines);
      assert_eq!(field.mine_positions().count(), mines as usize);
      assert_eq!(field.width(), width);
      assert_eq!(field.height(), height);
    }
  }

  #[test]
  fn adjacent_counts_match_brute_force() {
    for seed in 0..20 {
      let mut rng = StdRng::seed_from_u64(seed);
      let field = generate(FieldConfig::new(13, 7, 30).unwrap(), &mut rng).unwrap();
      for pos in field.board().positions() {
        assert_eq!(field.cell(pos).unwrap().adjacent_mines(), brute_force_count(&field, pos), "at {:?}", pos);
      }
    }
  }

  #[test]
  fn same_seed_same_field() {
    let config = FieldConfig::new(16, 16, 40).unwrap();
    let a = generate(config, &mut StdRng::seed_from_u64(99)).unwrap();
    let b = generate(config, &mut StdRng::seed_from_u64(99)).unwrap();
    assert_eq!(a, b);
  }

  #[test]
  fn single_cell_without_mines() {
    let field = generate(FieldConfig::new(1, 1, 0).unwrap(), &mut StdRng::seed_from_u64(1)).unwrap();
    let cell = field.cell(BoardVec::new(0, 0)).unwrap();
    assert!(!cell.has_mine());
    assert_eq!(cell.adjacent_mines(), 0);
  }

  #[test]
  fn counts_around_two_corner_mines() {
    let field = field_with_mines(3, 3, &[(0, 0), (2, 2)]);
    assert_eq!(field.cell(BoardVec::new(1, 1)).unwrap().adjacent_mines(), 2);
    assert_eq!(field.cell(BoardVec::new(0, 1)).unwrap().adjacent_mines(), 1);
    assert_eq!(field.cell(BoardVec::new(2, 0)).unwrap().adjacent_mines(), 0);
  }

  #[test]
  fn random_mines_fill_all_but_one_cell() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut builder = MinefieldBuilder::new(2, 2);
    builder.set_mine(BoardVec::new(0, 0)).unwrap();
    builder.add_random_mines(2, &mut rng).unwrap();
    assert_eq!(builder.mine_count(), 3);
    assert!(builder.add_random_mines(1, &mut rng).is_err());
  }

  #[test]
  fn out_of_bounds_access_fails() {
    let mut field = field_with_mines(2, 2, &[]);
    let outside = BoardVec::new(2, 0);
    assert!(matches!(field.cell(outside), Err(FieldError::OutOfBounds { .. })));
    assert!(field.set_cleared(outside).is_err());
    assert!(field.toggle_mark(BoardVec::new(0, -1)).is_err());
    assert!(MinefieldBuilder::new(2, 2).set_mine(outside).is_err());
  }

  #[test]
  fn marks_only_toggle_on_hidden_cells() {
    let mut field = field_with_mines(2, 1, &[]);
    let pos = BoardVec::new(0, 0);
    field.toggle_mark(pos).unwrap();
    assert!(field.cell(pos).unwrap().has_mark());
    field.toggle_mark(pos).unwrap();
    assert!(!field.cell(pos).unwrap().has_mark());

    assert!(field.set_cleared(pos).unwrap());
    assert!(!field.set_cleared(pos).unwrap());
    field.toggle_mark(pos).unwrap();
    assert!(!field.cell(pos).unwrap().has_mark());
  }

  #[test]
  fn glyphs() {
    let mut field = field_with_mines(3, 1, &[(0, 0)]);
    field.toggle_mark(BoardVec::new(2, 0)).unwrap();
    assert_eq!(format!("{:?}", field), "##!\n");

    field.set_cleared(BoardVec::new(1, 0)).unwrap();
    field.reveal_mines();
    assert_eq!(format!("{:?}", field), "*1!\n");

    field.set_cleared(BoardVec::new(2, 0)).unwrap();
    assert_eq!(format!("{:?}", field), "*1 \n");
  }
}
