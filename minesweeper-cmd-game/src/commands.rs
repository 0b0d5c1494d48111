use minesweeper_field::game::Direction;

use crate::keys::{Key, Keystroke};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
  Quit,
  Move(Direction, u32),
  /// Apply the current cursor mode.
  Activate,
  ClearHere,
  MarkHere,
}

/// Turns keystrokes into commands, collecting a numeric count prefix
/// (`5l` moves five cells right).
#[derive(Debug, Default)]
pub struct CommandReader {
  repeat: String,
}

impl CommandReader {
  /// The digits typed so far, empty when no count is pending.
  pub fn pending_count(&self) -> &str {
    &self.repeat
  }

  fn count(&self) -> u32 {
    self.repeat.parse::<u32>().map(|n| n.max(1)).unwrap_or(1)
  }

  pub fn read(&mut self, stroke: Keystroke) -> Option<Command> {
    if !self.repeat.is_empty() && stroke.key == Some(Key::Escape) {
      self.repeat.clear();
      return None;
    }
    if stroke.is_quit() {
      return Some(Command::Quit);
    }

    if let Some(ch) = stroke.ch.filter(char::is_ascii_digit) {
      self.repeat.push(ch);
      return None;
    }

    let count = self.count();
    let command = match (stroke.key, stroke.ch) {
      (Some(Key::Left), _) | (_, Some('h')) => Command::Move(Direction::Left, count),
      (Some(Key::Right), _) | (_, Some('l')) => Command::Move(Direction::Right, count),
      (Some(Key::Up), _) | (_, Some('k')) => Command::Move(Direction::Up, count),
      (Some(Key::Down), _) | (_, Some('j')) => Command::Move(Direction::Down, count),
      (Some(Key::Space), _) | (Some(Key::Enter), _) => Command::Activate,
      (_, Some('c')) => Command::ClearHere,
      (_, Some('m')) => Command::MarkHere,
      _ => return None,
    };
    self.repeat.clear();
    Some(command)
  }
}
