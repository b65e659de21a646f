pub mod matcher;
pub mod normalizer;

pub use matcher::{MatchOutcome, TrackMatcher};
pub use normalizer::normalize_title;
