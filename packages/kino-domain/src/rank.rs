use std::cmp::Ordering;

use crate::{MovieVectors, SignalScores, SignalWeights, TargetVectors};

#[derive(Clone, Debug, PartialEq)]
pub struct ScoredCandidate {
	pub movie_id: i64,
	pub scores: SignalScores,
	pub final_score: f32,
}

/// Normalized dot-product similarity, defined as 0 when either operand has
/// zero magnitude. Never divides by zero, never produces NaN for finite
/// inputs.
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
	let dot = a.iter().zip(b).map(|(x, y)| x * y).sum::<f32>();
	let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
	let norm_b = b.iter().map(|y| y * y).sum::<f32>().sqrt();

	if norm_a == 0.0 || norm_b == 0.0 {
		return 0.0;
	}

	dot / (norm_a * norm_b)
}

/// Scores every candidate against all three targets, whichever signal's
/// index surfaced it: candidate membership is a union across signals, but
/// scoring always evaluates the full signal set. Weights are applied as
/// given; normalizing them is the caller's business.
pub fn rerank<'a, I>(
	targets: &TargetVectors,
	weights: &SignalWeights,
	candidates: I,
	exclude: Option<i64>,
) -> Vec<ScoredCandidate>
where
	I: IntoIterator<Item = &'a MovieVectors>,
{
	let mut out = Vec::new();

	for candidate in candidates {
		if exclude == Some(candidate.movie_id) {
			continue;
		}

		let scores = SignalScores {
			collaborative: cosine(&targets.collaborative, &candidate.collaborative),
			semantic: cosine(&targets.semantic, &candidate.semantic),
			topic: cosine(&targets.topic, &candidate.topic),
		};
		let final_score = scores.collaborative * weights.collaborative
			+ scores.semantic * weights.semantic
			+ scores.topic * weights.topic;

		out.push(ScoredCandidate { movie_id: candidate.movie_id, scores, final_score });
	}

	out
}

/// Final score descending, exact ties broken by movie id ascending, then
/// truncated to the requested limit. The tie-break makes the ranking a
/// total order, so equal inputs always produce equal output.
pub fn sort_and_truncate(
	mut scored: Vec<ScoredCandidate>,
	limit: usize,
) -> Vec<ScoredCandidate> {
	scored.sort_by(|left, right| {
		cmp_f32_desc(left.final_score, right.final_score)
			.then_with(|| left.movie_id.cmp(&right.movie_id))
	});
	scored.truncate(limit);

	scored
}

fn cmp_f32_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}
