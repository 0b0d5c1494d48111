use core::fmt;

use crate::error::FieldError;

/// Dimensions and mine count of a field that is known to be generatable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldConfig {
  width: u32,
  height: u32,
  mines: u32,
}

impl FieldConfig {
  pub fn new(width: u32, height: u32, mines: u32) -> Result<Self, FieldError> {
    let cells = width.checked_mul(height);
    match cells {
      Some(cells) if width > 0 && height > 0 && mines < cells => Ok(Self { width, height, mines }),
      _ => Err(FieldError::InvalidConfiguration { width, height, mines }),
    }
  }

  pub fn width(&self) -> u32 {
    self.width
  }

  pub fn height(&self) -> u32 {
    self.height
  }

  pub fn mines(&self) -> u32 {
    self.mines
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
  Expert,
  Custom,
}

impl Difficulty {
  pub const ALL: [Difficulty; 5] = [
    Difficulty::Easy,
    Difficulty::Medium,
    Difficulty::Hard,
    Difficulty::Expert,
    Difficulty::Custom,
  ];

  pub fn name(self) -> &'static str {
    match self {
      Difficulty::Easy => "Easy",
      Difficulty::Medium => "Medium",
      Difficulty::Hard => "Hard",
      Difficulty::Expert => "Expert",
      Difficulty::Custom => "Custom",
    }
  }

  /// The preset field, or `None` for [`Difficulty::Custom`] which has to be asked for.
  pub fn preset(self) -> Option<FieldConfig> {
    let (width, height, mines) = match self {
      Difficulty::Easy => (10, 10, 20),
      Difficulty::Medium => (20, 14, 65),
      Difficulty::Hard => (32, 15, 120),
      Difficulty::Expert => (40, 15, 170),
      Difficulty::Custom => return None,
    };
    Some(FieldConfig { width, height, mines })
  }
}

impl fmt::Display for Difficulty {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
