use std::sync::{Mutex, PoisonError};

use crate::keys::Keystroke;

struct Slot {
  stroke: Keystroke,
  fired: bool,
}

/// Single-slot hand-over of keystrokes from the input thread to the main loop.
///
/// A keystroke offered while another one is still pending is dropped; the
/// pending one is never replaced.
pub struct KeyMailbox {
  slot: Mutex<Slot>,
}

impl KeyMailbox {
  pub fn new() -> Self {
    Self {
      slot: Mutex::new(Slot {
        stroke: Keystroke::default(),
        fired: true,
      }),
    }
  }

  /// Stores `stroke` if the previous one was already taken. Returns whether it was stored.
  pub fn offer(&self, stroke: Keystroke) -> bool {
    let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
    if slot.fired {
      slot.stroke = stroke;
      slot.fired = false;
      true
    } else {
      false
    }
  }

  pub fn take(&self) -> Option<Keystroke> {
    let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
    if slot.fired {
      None
    } else {
      slot.fired = true;
      Some(slot.stroke)
    }
  }
}

impl Default for KeyMailbox {
  fn default() -> Self {
    Self::new()
  }
}
