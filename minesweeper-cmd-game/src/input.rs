use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event};
use log::{debug, warn};

use crate::keys::Keystroke;
use crate::mailbox::KeyMailbox;

const POLL_TIMEOUT: Duration = Duration::from_millis(10);
const RETRY_DELAY: Duration = Duration::from_millis(50);

/// Waits for the next key press, ignoring every other terminal event.
pub fn read_keystroke() -> io::Result<Keystroke> {
  loop {
    if let Event::Key(key) = event::read()? {
      if let Some(stroke) = Keystroke::from_event(key) {
        return Ok(stroke);
      }
    }
  }
}

fn poll_keystroke() -> io::Result<Option<Keystroke>> {
  if !event::poll(POLL_TIMEOUT)? {
    return Ok(None);
  }
  match event::read()? {
    Event::Key(key) => Ok(Keystroke::from_event(key)),
    _ => Ok(None),
  }
}

/// Feeds key presses into `mailbox` until `ended` is set.
///
/// Reads are bounded by a short poll so the thread notices `ended` without
/// another key press.
pub fn spawn_reader(mailbox: Arc<KeyMailbox>, ended: Arc<AtomicBool>) -> io::Result<JoinHandle<()>> {
  thread::Builder::new().name("key-reader".into()).spawn(move || {
    while !ended.load(Ordering::Acquire) {
      match poll_keystroke() {
        Ok(Some(stroke)) => {
          if !mailbox.offer(stroke) {
            debug!("dropped {:?}, previous key still pending", stroke);
          }
        }
        Ok(None) => {}
        Err(err) => {
          warn!("reading key failed: {}", err);
          thread::sleep(RETRY_DELAY);
        }
      }
    }
  })
}
