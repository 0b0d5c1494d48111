use log::debug;

use crate::board::{BoardExplorer, BoardVec};
use crate::{FieldError, Minefield};

impl Minefield {
  /// Reveals the blank region around `start` together with its numbered border.
  ///
  /// Every blank cell reached is expanded exactly once; numbered cells are
  /// uncovered but never expanded, so no mine is ever uncovered here. Returns
  /// the positions that were hidden before the call.
  pub fn reveal_blank(&mut self, start: BoardVec) -> Result<Vec<BoardVec>, FieldError> {
    if !self.cell(start)?.is_blank() {
      return Err(FieldError::NotBlank(start));
    }

    let mut revealed = Vec::new();
    let mut explorer = BoardExplorer::from(&self.board);
    explorer.enqueue(start);

    while let Some(pos) = explorer.pop() {
      if self.set_cleared(pos)? {
        revealed.push(pos);
      }

      let neighbours: Vec<_> = self.board.positions_around(pos).collect();
      for neighbour in neighbours {
        if self.set_cleared(neighbour)? {
          revealed.push(neighbour);
        }
        if self.board[neighbour].is_blank() {
          explorer.enqueue(neighbour);
        }
      }
    }

    debug!("flood fill from {} revealed {} cells", start, revealed.len());
    Ok(revealed)
  }
}

#[cfg(test)]
mod tests {
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  use crate::{generate, FieldConfig, MinefieldBuilder};

  use super::*;

  fn single_mine_field() -> Minefield {
    let mut builder = MinefieldBuilder::new(5, 5);
    builder.set_mine(BoardVec::new(4, 4)).unwrap();
    builder.build()
  }

  #[test]
  fn cascades_up_to_the_single_mine() {
    let mut field = single_mine_field();
    let revealed = field.reveal_blank(BoardVec::new(0, 0)).unwrap();

    assert_eq!(revealed.len(), 24);
    for pos in field.board().positions() {
      let cell = field.cell(pos).unwrap();
      assert_eq!(cell.is_cleared(), pos != BoardVec::new(4, 4), "at {:?}", pos);
    }
  }

  #[test]
  fn stops_expanding_at_numbered_cells() {
    // Column 2 is a wall of numbers, so the right side stays hidden.
    let mut builder = MinefieldBuilder::new(5, 3);
    for y in 0..3 {
      builder.set_mine(BoardVec::new(3, y)).unwrap();
    }
    let mut field = builder.build();
    field.reveal_blank(BoardVec::new(0, 1)).unwrap();

    assert_eq!(format!("{:?}", field), "  2##\n  3##\n  2##\n");
  }

  #[test]
  fn rejects_non_blank_start() {
    let mut field = single_mine_field();
    assert_eq!(
      field.reveal_blank(BoardVec::new(3, 3)),
      Err(FieldError::NotBlank(BoardVec::new(3, 3)))
    );
    assert_eq!(
      field.reveal_blank(BoardVec::new(4, 4)),
      Err(FieldError::NotBlank(BoardVec::new(4, 4)))
    );
    assert!(matches!(
      field.reveal_blank(BoardVec::new(5, 0)),
      Err(FieldError::OutOfBounds { .. })
    ));
    assert_eq!(field.count_cleared(), 0);
  }

  #[test]
  fn second_fill_changes_nothing() {
    let mut field = single_mine_field();
    field.reveal_blank(BoardVec::new(2, 2)).unwrap();
    let after_first = field.clone();

    assert!(field.reveal_blank(BoardVec::new(2, 2)).unwrap().is_empty());
    assert!(field.reveal_blank(BoardVec::new(0, 4)).unwrap().is_empty());
    assert_eq!(field, after_first);
  }

  #[test]
  fn random_fields_never_uncover_mines() {
    for seed in 0..50 {
      let mut rng = StdRng::seed_from_u64(seed);
      let mut field = generate(FieldConfig::new(16, 12, 35).unwrap(), &mut rng).unwrap();
      let blanks: Vec<_> = field
        .board()
        .enumerate()
        .filter(|(_, cell)| cell.is_blank())
        .map(|(pos, _)| pos)
        .collect();

      for pos in blanks {
        let revealed = field.reveal_blank(pos).unwrap();
        assert!(revealed.iter().all(|&p| !field.cell(p).unwrap().has_mine()));
        let mut unique = revealed.clone();
        unique.sort_by_key(|p| (p.y, p.x));
        unique.dedup();
        assert_eq!(unique.len(), revealed.len());
      }
      assert!(field.mine_positions().all(|p| !field.cell(p).unwrap().is_cleared()));
    }
  }
}
