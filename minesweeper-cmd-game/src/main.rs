use std::env;
use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use log::{info, warn};
use minesweeper_field::game::Game;
use rand::rngs::StdRng;
use rand::SeedableRng;

use commands::{Command, CommandReader};
use mailbox::KeyMailbox;
use screen::Screen;

mod commands;
mod input;
mod keys;
mod mailbox;
mod menu;
mod screen;

const SEED_VAR: &str = "MINESWEEPER_SEED";

struct LoopConfig {
  frame: Duration,
  /// The cursor blinks and the board is redrawn every this many frames.
  blink_frames: u64,
}

impl Default for LoopConfig {
  fn default() -> Self {
    Self {
      frame: Duration::from_millis(20),
      blink_frames: 20,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
  Quit,
  Lost,
}

fn seed() -> u64 {
  if let Ok(value) = env::var(SEED_VAR) {
    match value.parse() {
      Ok(seed) => return seed,
      Err(err) => warn!("ignoring {}={:?}: {}", SEED_VAR, value, err),
    }
  }
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|elapsed| elapsed.as_nanos() as u64)
    .unwrap_or_default()
}

fn frame_lines(game: &Game, commands: &CommandReader, cursor_drawn: bool) -> Vec<String> {
  let mut lines = game.rows(cursor_drawn);
  let mut status = game.cursor().mode.to_string();
  if !commands.pending_count().is_empty() {
    status.push_str(" - ");
    status.push_str(commands.pending_count());
  }
  lines.push(status);
  lines
}

fn play(
  screen: &mut Screen,
  game: &mut Game,
  mailbox: &KeyMailbox,
  config: &LoopConfig,
) -> Result<Outcome, Box<dyn Error>> {
  let mut commands = CommandReader::default();
  let mut cursor_drawn = true;
  let mut frame: u64 = 0;

  while !game.is_over() {
    let start = Instant::now();

    let stroke = mailbox.take();
    if let Some(stroke) = stroke {
      match commands.read(stroke) {
        Some(Command::Quit) => return Ok(Outcome::Quit),
        Some(Command::Move(direction, steps)) => game.move_cursor(direction, steps),
        Some(Command::Activate) => {
          game.activate()?;
        }
        Some(Command::ClearHere) => {
          game.clear_here()?;
        }
        Some(Command::MarkHere) => {
          game.mark_here()?;
        }
        None => {}
      }
    }

    if let Some(rest) = config.frame.checked_sub(start.elapsed()) {
      thread::sleep(rest);
    }

    let blink = frame % config.blink_frames == 0;
    if blink {
      cursor_drawn = !cursor_drawn;
    }
    if stroke.is_some() || blink {
      screen.draw(&frame_lines(game, &commands, cursor_drawn))?;
    }
    frame += 1;
  }

  Ok(Outcome::Lost)
}

fn run(screen: &mut Screen, mut game: Game, config: LoopConfig) -> Result<(), Box<dyn Error>> {
  let mailbox = Arc::new(KeyMailbox::new());
  let ended = Arc::new(AtomicBool::new(false));
  let reader = input::spawn_reader(Arc::clone(&mailbox), Arc::clone(&ended))?;

  let outcome = play(screen, &mut game, &mailbox, &config);
  ended.store(true, Ordering::Release);
  if reader.join().is_err() {
    warn!("key reader thread panicked");
  }

  match outcome? {
    Outcome::Quit => info!("player quit"),
    Outcome::Lost => {
      info!("game lost after clearing {} cells", game.field().count_cleared());
      let mut lines = game.rows(false);
      lines.push("You lose! :(".to_string());
      screen.draw(&lines)?;
    }
  }
  Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

  let seed = seed();
  let mut rng = StdRng::seed_from_u64(seed);
  let mut screen = Screen::enter()?;

  let Some(config) = menu::choose_field(&mut screen)? else {
    info!("player quit in the menu");
    return Ok(());
  };
  info!(
    "starting {}x{} field with {} mines, seed {}",
    config.width(),
    config.height(),
    config.mines(),
    seed
  );

  let game = Game::from(minesweeper_field::generate(config, &mut rng)?);
  run(&mut screen, game, LoopConfig::default())
}
