use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{ExecutableCommand, QueueableCommand};

/// The terminal in raw mode. Dropping it restores the terminal.
pub struct Screen {
  out: Stdout,
}

impl Screen {
  pub fn enter() -> io::Result<Self> {
    terminal::enable_raw_mode()?;
    let mut out = io::stdout();
    out.execute(Hide)?;
    Ok(Self { out })
  }

  /// Clears the screen and prints one line per entry, leaving the cursor below them.
  pub fn draw<S: AsRef<str>>(&mut self, lines: &[S]) -> io::Result<()> {
    self.out.queue(Clear(ClearType::All))?;
    for (row, line) in lines.iter().enumerate() {
      self.out.queue(MoveTo(0, row as u16))?.queue(Print(line.as_ref()))?;
    }
    self.out.queue(MoveTo(0, lines.len() as u16))?;
    self.out.flush()
  }
}

impl Drop for Screen {
  fn drop(&mut self) {
    let _ = self.out.execute(Show);
    let _ = terminal::disable_raw_mode();
  }
}
