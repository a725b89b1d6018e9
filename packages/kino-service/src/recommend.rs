use std::collections::{BTreeSet, HashMap};

use kino_domain::{
	Signal, SignalScores, SignalWeights, TargetAccumulator, TargetVectors, rank,
};
use kino_storage::models::{Candidate, Movie};
use tokio::time::Instant;

use crate::{Error, KinoService, Result};

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct RecommendRequest {
	pub user_id: String,
	pub weights: SignalWeights,
	pub limit: u32,
	#[serde(default)]
	pub focus_movie_id: Option<i64>,
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct ScoredMovie {
	pub movie_id: i64,
	pub title: String,
	pub genres: Vec<String>,
	pub year: Option<i32>,
	pub imdb_id: Option<String>,
	pub poster_color: String,
	pub popularity: i64,
	pub scores: SignalScores,
	pub final_score: f32,
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct RecommendResponse {
	pub items: Vec<ScoredMovie>,
}

enum Target {
	/// The user has no rating history; no meaningful target exists and the
	/// request short-circuits to catalog popularity.
	ColdStart,
	Built(TargetVectors),
}

impl KinoService {
	pub async fn recommend(&self, request: RecommendRequest) -> Result<RecommendResponse> {
		validate(&request)?;

		let deadline = self.request_deadline();
		let targets = match self.build_targets(&request, deadline).await? {
			Target::ColdStart => {
				let movies = self
					.bounded(deadline, self.store.popular_movies(i64::from(request.limit)))
					.await?;
				let items = movies
					.into_iter()
					.map(|movie| scored_movie(movie, SignalScores::ZERO, 0.0))
					.collect();

				return Ok(RecommendResponse { items });
			},
			Target::Built(targets) => targets,
		};
		let candidates = self.retrieve_candidates(&targets, deadline).await?;
		let scored = rank::rerank(
			&targets,
			&request.weights,
			candidates.iter().map(|candidate| &candidate.vectors),
			request.focus_movie_id,
		);
		let ranked = rank::sort_and_truncate(scored, request.limit as usize);
		let mut movies: HashMap<i64, Movie> = candidates
			.into_iter()
			.map(|candidate| (candidate.movie.movie_id, candidate.movie))
			.collect();
		let items = ranked
			.into_iter()
			.filter_map(|scored| {
				movies
					.remove(&scored.movie_id)
					.map(|movie| scored_movie(movie, scored.scores, scored.final_score))
			})
			.collect();

		Ok(RecommendResponse { items })
	}

	async fn build_targets(
		&self,
		request: &RecommendRequest,
		deadline: Instant,
	) -> Result<Target> {
		if let Some(focus_movie_id) = request.focus_movie_id {
			let vectors = self
				.bounded(deadline, self.store.movie_vectors(focus_movie_id))
				.await?
				.ok_or_else(|| Error::NotFound {
					message: format!("Movie {focus_movie_id} does not exist."),
				})?;

			return Ok(Target::Built(TargetVectors::from(vectors)));
		}

		let history = self.bounded(deadline, self.store.rating_history(&request.user_id)).await?;

		if history.is_empty() {
			return Ok(Target::ColdStart);
		}

		let mut accumulator = TargetAccumulator::default();

		for rated in &history {
			accumulator.add(&rated.vectors, rated.rating);
		}

		Ok(Target::Built(accumulator.finish()))
	}

	async fn retrieve_candidates(
		&self,
		targets: &TargetVectors,
		deadline: Instant,
	) -> Result<Vec<Candidate>> {
		let k = self.cfg.recommend.candidate_k_per_signal;
		let (collaborative, semantic, topic) = tokio::try_join!(
			self.bounded(
				deadline,
				self.store.nearest_by_signal(Signal::Collaborative, &targets.collaborative, k),
			),
			self.bounded(
				deadline,
				self.store.nearest_by_signal(Signal::Semantic, &targets.semantic, k),
			),
			self.bounded(deadline, self.store.nearest_by_signal(Signal::Topic, &targets.topic, k)),
		)?;
		// Union with set semantics: an id surfaced by several signals is
		// scored once.
		let ids: BTreeSet<i64> =
			collaborative.into_iter().chain(semantic).chain(topic).collect();
		let ids: Vec<i64> = ids.into_iter().collect();

		self.bounded(deadline, self.store.hydrate_candidates(&ids)).await
	}
}

fn validate(request: &RecommendRequest) -> Result<()> {
	if request.user_id.trim().is_empty() {
		return Err(Error::InvalidArgument { message: "user_id must be non-empty.".to_string() });
	}
	if request.limit == 0 {
		return Err(Error::InvalidArgument {
			message: "limit must be greater than zero.".to_string(),
		});
	}
	if !request.weights.is_finite() {
		return Err(Error::InvalidArgument {
			message: "weights must be finite numbers.".to_string(),
		});
	}

	Ok(())
}

fn scored_movie(movie: Movie, scores: SignalScores, final_score: f32) -> ScoredMovie {
	ScoredMovie {
		movie_id: movie.movie_id,
		title: movie.title,
		genres: movie.genres,
		year: movie.year,
		imdb_id: movie.imdb_id,
		poster_color: movie.poster_color,
		popularity: movie.popularity,
		scores,
		final_score,
	}
}
