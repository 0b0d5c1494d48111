use std::io;
use std::thread;
use std::time::Duration;

use log::info;
use minesweeper_field::{Difficulty, FieldConfig};

use crate::input::read_keystroke;
use crate::keys::{Key, Keystroke};
use crate::screen::Screen;

const TITLE: &str = "Minesweeper - Q to quit";
const REJECTED_PAUSE: Duration = Duration::from_millis(1000);

/// Underlines every option, `#` for the selected one and `_` for the rest.
/// Words long enough are inset by `spacing` blanks on both sides.
pub fn selector_line(options: &[&str], spacing: usize, selected: usize) -> String {
  let mut line = String::new();
  for (i, option) in options.iter().enumerate() {
    let mark = if i == selected { "#" } else { "_" };
    let inset = if option.len() / 2 <= spacing { 0 } else { spacing };
    line.push_str(&" ".repeat(inset));
    line.push_str(&mark.repeat(option.len() - inset * 2));
    line.push_str(&" ".repeat(inset));
    line.push(' ');
  }
  line
}

/// Moves the selection one step for arrow and `hjkl` keys, wrapping at both ends.
pub fn next_selection(selected: usize, count: usize, stroke: Keystroke) -> usize {
  let backwards = matches!(stroke.key, Some(Key::Left) | Some(Key::Up)) || matches!(stroke.ch, Some('h') | Some('j'));
  let forwards = matches!(stroke.key, Some(Key::Right) | Some(Key::Down)) || matches!(stroke.ch, Some('k') | Some('l'));
  if backwards {
    (selected + count - 1) % count
  } else if forwards {
    (selected + 1) % count
  } else {
    selected
  }
}

fn difficulty_screen(selected: usize) -> Vec<String> {
  let names: Vec<_> = Difficulty::ALL.iter().map(|d| d.name()).collect();
  vec![
    TITLE.to_string(),
    "Choose game type:".to_string(),
    names.join(" "),
    selector_line(&names, 1, selected),
  ]
}

/// Lets the player pick a difficulty. `None` if they quit.
pub fn choose_difficulty(screen: &mut Screen) -> io::Result<Option<Difficulty>> {
  let count = Difficulty::ALL.len();
  let mut selected = 0;
  screen.draw(&difficulty_screen(selected))?;

  loop {
    let stroke = read_keystroke()?;
    if stroke.is_quit() {
      return Ok(None);
    }
    if stroke.key == Some(Key::Enter) {
      return Ok(Some(Difficulty::ALL[selected]));
    }

    let next = next_selection(selected, count, stroke);
    if next != selected {
      selected = next;
      screen.draw(&difficulty_screen(selected))?;
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStep {
  Editing,
  Accepted(u32),
  Quit,
}

/// A number typed digit by digit; Enter accepts it only when `min < value < max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberPrompt {
  value: u32,
  min: u32,
  max: u32,
}

impl NumberPrompt {
  pub fn new(min: u32, max: u32) -> Self {
    Self { value: 0, min, max }
  }

  pub fn value(&self) -> u32 {
    self.value
  }

  pub fn feed(&mut self, stroke: Keystroke) -> PromptStep {
    if stroke.is_quit() {
      return PromptStep::Quit;
    }
    if stroke.key == Some(Key::Enter) {
      if self.value > self.min && self.value < self.max {
        return PromptStep::Accepted(self.value);
      }
    } else if let Some(digit) = stroke.digit() {
      self.value = self.value.saturating_mul(10).saturating_add(digit);
    } else if stroke.key == Some(Key::Backspace) {
      self.value /= 10;
    }
    PromptStep::Editing
  }

  fn lines(&self, message: &str) -> Vec<String> {
    let mut lines = vec![message.to_string()];
    if self.value != 0 {
      lines.push(self.value.to_string());
    }
    lines
  }
}

fn ask_number(screen: &mut Screen, message: &str, min: u32, max: u32) -> io::Result<Option<u32>> {
  let mut prompt = NumberPrompt::new(min, max);
  screen.draw(&prompt.lines(message))?;
  loop {
    match prompt.feed(read_keystroke()?) {
      PromptStep::Accepted(value) => return Ok(Some(value)),
      PromptStep::Quit => return Ok(None),
      PromptStep::Editing => screen.draw(&prompt.lines(message))?,
    }
  }
}

/// Asks for width, height and mine count until they describe a playable field.
pub fn ask_custom_config(screen: &mut Screen) -> io::Result<Option<FieldConfig>> {
  loop {
    let Some(width) = ask_number(screen, "Choose Width:", 0, 100)? else {
      return Ok(None);
    };
    let Some(height) = ask_number(screen, "Choose Height:", 0, 100)? else {
      return Ok(None);
    };
    let Some(mines) = ask_number(screen, "Choose Number of Mines:", 0, 1000)? else {
      return Ok(None);
    };

    match FieldConfig::new(width, height, mines) {
      Ok(config) => return Ok(Some(config)),
      Err(err) => {
        info!("rejected custom field: {}", err);
        screen.draw(&["Too many mines! :("])?;
        thread::sleep(REJECTED_PAUSE);
      }
    }
  }
}

/// Runs the whole pre-game menu. `None` if the player quit.
pub fn choose_field(screen: &mut Screen) -> io::Result<Option<FieldConfig>> {
  let Some(difficulty) = choose_difficulty(screen)? else {
    return Ok(None);
  };
  match difficulty.preset() {
    Some(config) => Ok(Some(config)),
    None => ask_custom_config(screen),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn selector_marks_selected_option() {
    let names = ["Easy", "Medium", "Custom"];
    assert_eq!(selector_line(&names, 1, 1), " __   ####   ____  ");
    assert_eq!(selector_line(&["Ok"], 1, 0), "## ");
  }

  #[test]
  fn selection_wraps() {
    assert_eq!(next_selection(0, 5, Keystroke::key(Key::Left)), 4);
    assert_eq!(next_selection(0, 5, Keystroke::char('j')), 4);
    assert_eq!(next_selection(4, 5, Keystroke::key(Key::Down)), 0);
    assert_eq!(next_selection(2, 5, Keystroke::char('k')), 3);
    assert_eq!(next_selection(2, 5, Keystroke::char('x')), 2);
  }

  #[test]
  fn prompt_accepts_only_values_in_range() {
    let mut prompt = NumberPrompt::new(0, 100);
    assert_eq!(prompt.feed(Keystroke::key(Key::Enter)), PromptStep::Editing);
    for ch in "120".chars() {
      prompt.feed(Keystroke::char(ch));
    }
    assert_eq!(prompt.value(), 120);
    assert_eq!(prompt.feed(Keystroke::key(Key::Enter)), PromptStep::Editing);

    prompt.feed(Keystroke::key(Key::Backspace));
    assert_eq!(prompt.value(), 12);
    assert_eq!(prompt.feed(Keystroke::key(Key::Enter)), PromptStep::Accepted(12));
  }

  #[test]
  fn prompt_ignores_letters_and_quits() {
    let mut prompt = NumberPrompt::new(0, 1000);
    prompt.feed(Keystroke::char('x'));
    prompt.feed(Keystroke::char('7'));
    assert_eq!(prompt.lines("Choose Width:"), vec!["Choose Width:", "7"]);
    assert_eq!(prompt.feed(Keystroke::char('q')), PromptStep::Quit);
  }

  #[test]
  fn prompt_saturates_instead_of_overflowing() {
    let mut prompt = NumberPrompt::new(0, 100);
    for _ in 0..15 {
      prompt.feed(Keystroke::char('9'));
    }
    assert_eq!(prompt.value(), u32::MAX);
  }
}
