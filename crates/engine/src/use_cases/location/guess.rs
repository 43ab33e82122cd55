//! Guess location use case.
//!
//! Turns whatever a user typed into zone names, nearest to their home first.

use std::sync::Arc;

use crate::cartography::LocationResolver;

pub struct GuessLocation {
    resolver: Arc<LocationResolver>,
}

impl GuessLocation {
    pub fn new(resolver: Arc<LocationResolver>) -> Self {
        Self { resolver }
    }

    /// Every candidate, best first.
    pub fn execute(&self, query: &str, home: Option<&str>) -> Vec<String> {
        self.resolver.best_guesses(query, home)
    }

    /// The single best candidate, if any name matched.
    pub fn best(&self, query: &str, home: Option<&str>) -> Option<String> {
        self.resolver.best_guess(query, home)
    }
}
