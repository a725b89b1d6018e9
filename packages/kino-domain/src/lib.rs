pub mod rank;
pub mod signal;
pub mod target;

pub use rank::{ScoredCandidate, cosine};
pub use signal::{Signal, SignalScores, SignalWeights};
pub use target::{MovieVectors, TargetAccumulator, TargetVectors, rating_weight};
