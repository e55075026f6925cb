//! Text display targets
//!
//! A counting label owns its display target and overwrites its text on every
//! tick.

use std::sync::{Arc, Mutex};

/// The host element that shows a label's text
pub trait TextDisplay: Send + 'static {
    fn set_text(&mut self, text: String);
}

/// A clonable text cell the host can read back
///
/// Clones share the same text, so the host keeps one clone and hands the
/// other to the label.
#[derive(Clone, Debug, Default)]
pub struct SharedText {
    text: Arc<Mutex<String>>,
}

impl SharedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text
    pub fn get(&self) -> String {
        self.text.lock().unwrap().clone()
    }
}

impl TextDisplay for SharedText {
    fn set_text(&mut self, text: String) {
        *self.text.lock().unwrap() = text;
    }
}
