use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
  Left,
  Right,
  Up,
  Down,
  Space,
  Enter,
  Escape,
  Backspace,
  CtrlC,
}

/// A single key press: a printable character, a named key, or neither for keys we ignore.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Keystroke {
  pub ch: Option<char>,
  pub key: Option<Key>,
}

impl Keystroke {
  pub fn char(ch: char) -> Self {
    Self { ch: Some(ch), key: None }
  }

  pub fn key(key: Key) -> Self {
    Self { ch: None, key: Some(key) }
  }

  pub fn digit(self) -> Option<u32> {
    self.ch.and_then(|ch| ch.to_digit(10))
  }

  /// Escape, Ctrl-C and `q` leave the game from anywhere.
  pub fn is_quit(self) -> bool {
    matches!(self.key, Some(Key::Escape) | Some(Key::CtrlC)) || self.ch == Some('q')
  }

  /// Converts a terminal key event. Releases are dropped.
  pub fn from_event(event: KeyEvent) -> Option<Self> {
    if event.kind == KeyEventKind::Release {
      return None;
    }

    let stroke = match event.code {
      KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Keystroke::key(Key::CtrlC),
      KeyCode::Char(' ') => Keystroke::key(Key::Space),
      KeyCode::Char(ch) => Keystroke::char(ch),
      KeyCode::Left => Keystroke::key(Key::Left),
      KeyCode::Right => Keystroke::key(Key::Right),
      KeyCode::Up => Keystroke::key(Key::Up),
      KeyCode::Down => Keystroke::key(Key::Down),
      KeyCode::Enter => Keystroke::key(Key::Enter),
      KeyCode::Esc => Keystroke::key(Key::Escape),
      KeyCode::Backspace => Keystroke::key(Key::Backspace),
      _ => Keystroke::default(),
    };
    Some(stroke)
  }
}
