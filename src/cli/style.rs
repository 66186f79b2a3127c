//! Terminal styling for CLI output
//!
//! Pairs owo-colors with anstream's adaptive printing: escape codes are
//! stripped automatically when the stream is not a terminal.

use owo_colors::OwoColorize;
use std::fmt::Display;

/// Styling roles used across command output
pub trait Stylize {
    /// Headline text
    fn emphasis(&self) -> String;
    /// Values the eye should land on (branches, PR numbers)
    fn accent(&self) -> String;
    /// De-emphasized detail
    fn muted(&self) -> String;
    /// Success confirmation
    fn success(&self) -> String;
    /// Warnings and failure notices
    fn warn(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn emphasis(&self) -> String {
        self.to_string().bold().to_string()
    }

    fn accent(&self) -> String {
        self.to_string().cyan().to_string()
    }

    fn muted(&self) -> String {
        self.to_string().dimmed().to_string()
    }

    fn success(&self) -> String {
        self.to_string().green().to_string()
    }

    fn warn(&self) -> String {
        self.to_string().yellow().to_string()
    }
}
