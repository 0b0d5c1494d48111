use core::fmt;

use log::{debug, info};

use crate::board::BoardVec;
use crate::{FieldError, Minefield};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorMode {
  Clear,
  Mark,
}

impl CursorMode {
  pub fn glyph(self) -> char {
    match self {
      CursorMode::Clear => 'c',
      CursorMode::Mark => 'm',
    }
  }
}

impl fmt::Display for CursorMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CursorMode::Clear => write!(f, "CLEAR MODE: (c)"),
      CursorMode::Mark => write!(f, "MARK MODE: (m)"),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
  Left,
  Right,
  Up,
  Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
  pub pos: BoardVec,
  pub mode: CursorMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
  Playing,
  Lost,
}

/// One session: the field, the player's cursor and whether a mine went off.
///
/// There is no winning state: a session ends on a mine or when the
/// player quits.
#[derive(Clone, PartialEq, Eq)]
pub struct Game {
  field: Minefield,
  cursor: Cursor,
  state: GameState,
}

impl Game {
  pub fn field(&self) -> &Minefield {
    &self.field
  }

  pub fn cursor(&self) -> Cursor {
    self.cursor
  }

  pub fn state(&self) -> GameState {
    self.state
  }

  pub fn is_over(&self) -> bool {
    self.state == GameState::Lost
  }

  pub fn set_mode(&mut self, mode: CursorMode) {
    self.cursor.mode = mode;
  }

  /// Moves the cursor `steps` cells, stopping at the edge of the field.
  pub fn move_cursor(&mut self, direction: Direction, steps: u32) {
    let steps = i64::from(steps);
    let max_x = i64::from(self.field.width()) - 1;
    let max_y = i64::from(self.field.height()) - 1;
    let (x, y) = (i64::from(self.cursor.pos.x), i64::from(self.cursor.pos.y));

    let (x, y) = match direction {
      Direction::Left => ((x - steps).max(0), y),
      Direction::Right => ((x + steps).min(max_x), y),
      Direction::Up => (x, (y - steps).max(0)),
      Direction::Down => (x, (y + steps).min(max_y)),
    };
    self.cursor.pos = BoardVec::new(x as i32, y as i32);
  }

  /// Applies the cursor's current mode to the cell below it.
  pub fn activate(&mut self) -> Result<GameState, FieldError> {
    if self.is_over() {
      return Ok(self.state);
    }

    let pos = self.cursor.pos;
    match self.cursor.mode {
      CursorMode::Clear => {
        self.field.set_cleared(pos)?;
        let cell = self.field.cell(pos)?;
        if cell.has_mine() {
          info!("mine hit at {}", pos);
          self.state = GameState::Lost;
          self.field.reveal_mines();
        } else if cell.is_blank() {
          self.field.reveal_blank(pos)?;
        }
      }
      CursorMode::Mark => {
        debug!("toggling mark at {}", pos);
        self.field.toggle_mark(pos)?;
      }
    }

    Ok(self.state)
  }

  pub fn clear_here(&mut self) -> Result<GameState, FieldError> {
    self.set_mode(CursorMode::Clear);
    self.activate()
  }

  pub fn mark_here(&mut self) -> Result<GameState, FieldError> {
    self.set_mode(CursorMode::Mark);
    self.activate()
  }

  /// The field as text, one string per row. The cursor cell shows the mode
  /// glyph while `cursor_drawn` is set.
  pub fn rows(&self, cursor_drawn: bool) -> Vec<String> {
    let cursor = self.cursor;
    self
      .field
      .board()
      .rows()
      .enumerate()
      .map(|(y, row)| {
        row
          .iter()
          .enumerate()
          .map(|(x, cell)| {
            if cursor_drawn && cursor.pos == BoardVec::new(x as i32, y as i32) {
              cursor.mode.glyph().to_string()
            } else {
              cell.to_string()
            }
          })
          .collect()
      })
      .collect()
  }
}

impl From<Minefield> for Game {
  fn from(field: Minefield) -> Self {
    let pos = BoardVec::new((field.width() / 2) as i32, (field.height() / 2) as i32);
    Self {
      field,
      cursor: Cursor {
        pos,
        mode: CursorMode::Clear,
      },
      state: GameState::Playing,
    }
  }
}

impl fmt::Debug for Game {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for row in self.rows(true) {
      writeln!(f, "{}", row)?;
    }
    write!(f, "{}", self.cursor.mode)
  }
}
