use thiserror::Error;

use crate::board::BoardVec;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
  #[error("position {pos} is outside of the {width}x{height} field")]
  OutOfBounds { pos: BoardVec, width: u32, height: u32 },
  #[error("cannot place {mines} mines on a {width}x{height} field")]
  InvalidConfiguration { width: u32, height: u32, mines: u32 },
  /// Flood fill may only start on a cell without a mine and without mined neighbours.
  #[error("position {0} is not a blank cell")]
  NotBlank(BoardVec),
}
