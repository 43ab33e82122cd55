//! Location use cases.

mod guess;
mod travel_time;

pub use guess::GuessLocation;
pub use travel_time::EstimateTravelTime;

use std::sync::Arc;

/// Container for location use cases.
pub struct LocationUseCases {
    pub guess: Arc<GuessLocation>,
    pub travel_time: Arc<EstimateTravelTime>,
}

impl LocationUseCases {
    pub fn new(guess: Arc<GuessLocation>, travel_time: Arc<EstimateTravelTime>) -> Self {
        Self { guess, travel_time }
    }
}
