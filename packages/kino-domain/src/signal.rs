use serde::{Deserialize, Serialize};

/// One of the three independently-trained relevance dimensions a movie is
/// ranked on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Signal {
	Collaborative,
	Semantic,
	Topic,
}
impl Signal {
	pub const ALL: [Self; 3] = [Self::Collaborative, Self::Semantic, Self::Topic];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Collaborative => "collaborative",
			Self::Semantic => "semantic",
			Self::Topic => "topic",
		}
	}
}

/// Per-request blend weights. Every signal must be given explicitly; there
/// is no default and unknown keys are rejected, so a request cannot silently
/// change ranking semantics by omitting a key.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SignalWeights {
	pub collaborative: f32,
	pub semantic: f32,
	pub topic: f32,
}
impl SignalWeights {
	pub fn is_finite(&self) -> bool {
		self.collaborative.is_finite() && self.semantic.is_finite() && self.topic.is_finite()
	}
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct SignalScores {
	pub collaborative: f32,
	pub semantic: f32,
	pub topic: f32,
}
impl SignalScores {
	pub const ZERO: Self = Self { collaborative: 0.0, semantic: 0.0, topic: 0.0 };
}
