//! Terminal text display
//!
//! Rewrites a single line of stdout in place.

use std::io::{self, Write};
use tally_widgets::TextDisplay;

/// Shows a label's text on the current terminal line
pub struct TerminalDisplay {
    prefix: String,
    /// Width of the last line written, used to blank leftovers
    last_width: usize,
}

impl TerminalDisplay {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            last_width: 0,
        }
    }

    fn line(&mut self, text: &str) -> String {
        let line = format!("{}{}", self.prefix, text);
        let width = line.chars().count();
        let padding = self.last_width.saturating_sub(width);
        self.last_width = width;
        format!("\r{}{}", line, " ".repeat(padding))
    }
}

impl TextDisplay for TerminalDisplay {
    fn set_text(&mut self, text: String) {
        let line = self.line(&text);
        let mut stdout = io::stdout().lock();
        if let Err(err) = stdout.write_all(line.as_bytes()).and_then(|_| stdout.flush()) {
            tracing::warn!("Failed to write counter to terminal: {}", err);
        }
    }
}
