/// The three stored vectors for one movie, decoded once at the store
/// boundary and treated as opaque numeric payloads from there on.
#[derive(Clone, Debug, PartialEq)]
pub struct MovieVectors {
	pub movie_id: i64,
	pub collaborative: Vec<f32>,
	pub semantic: Vec<f32>,
	pub topic: Vec<f32>,
}

/// The per-signal representation a request is ranked against.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetVectors {
	pub collaborative: Vec<f32>,
	pub semantic: Vec<f32>,
	pub topic: Vec<f32>,
}
impl From<MovieVectors> for TargetVectors {
	fn from(vectors: MovieVectors) -> Self {
		Self {
			collaborative: vectors.collaborative,
			semantic: vectors.semantic,
			topic: vectors.topic,
		}
	}
}

/// Preference weight for one rated movie. Ratings at or below 2.0 floor to
/// 0.1 so weak history still contributes without ever flipping negative;
/// a 5.0 rating yields 3.0.
pub fn rating_weight(rating: f32) -> f32 {
	(rating - 2.0).max(0.1)
}

/// Accumulates the weighted centroid of a user's rated movies, per signal.
#[derive(Debug, Default)]
pub struct TargetAccumulator {
	collaborative: Vec<f32>,
	semantic: Vec<f32>,
	topic: Vec<f32>,
	total_weight: f32,
}
impl TargetAccumulator {
	pub fn add(&mut self, vectors: &MovieVectors, rating: f32) {
		let weight = rating_weight(rating);

		accumulate(&mut self.collaborative, &vectors.collaborative, weight);
		accumulate(&mut self.semantic, &vectors.semantic, weight);
		accumulate(&mut self.topic, &vectors.topic, weight);

		self.total_weight += weight;
	}

	pub fn finish(mut self) -> TargetVectors {
		// The weight floor keeps the total positive for any non-empty
		// history; the guard covers the degenerate empty case.
		if self.total_weight > 0.0 {
			let scale = 1.0 / self.total_weight;

			scale_in_place(&mut self.collaborative, scale);
			scale_in_place(&mut self.semantic, scale);
			scale_in_place(&mut self.topic, scale);
		}

		TargetVectors {
			collaborative: self.collaborative,
			semantic: self.semantic,
			topic: self.topic,
		}
	}
}

fn accumulate(acc: &mut Vec<f32>, vector: &[f32], weight: f32) {
	if acc.len() < vector.len() {
		acc.resize(vector.len(), 0.0);
	}

	for (slot, value) in acc.iter_mut().zip(vector) {
		*slot += value * weight;
	}
}

fn scale_in_place(vector: &mut [f32], scale: f32) {
	for value in vector {
		*value *= scale;
	}
}
