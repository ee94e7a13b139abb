//! ANSI colour choices for terminal output.

use crate::models::{Label, Mode};
use ansi_term::Colour;

pub fn colour_for_mode(mode: Mode) -> Colour {
    match mode {
        Mode::Working => Colour::Green,
        Mode::Resting => Colour::Cyan,
        Mode::Paused => Colour::Yellow,
    }
}

/// Pauses are yellow, unlabeled entries grey, activities plain.
pub fn paint_label(label: &Label, text: &str) -> String {
    if label.text().trim().is_empty() {
        Colour::Fixed(244).paint(text).to_string()
    } else if label.is_pause() {
        Colour::Yellow.paint(text).to_string()
    } else {
        text.to_string()
    }
}
