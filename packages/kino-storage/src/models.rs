use kino_domain::MovieVectors;

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Movie {
	pub movie_id: i64,
	pub title: String,
	pub genres: Vec<String>,
	pub year: Option<i32>,
	pub imdb_id: Option<String>,
	pub poster_color: String,
	pub popularity: i64,
}

/// One entry of a user's rating history, already joined with the rated
/// movie's vectors.
#[derive(Clone, Debug)]
pub struct RatedMovie {
	pub vectors: MovieVectors,
	pub rating: f32,
}

/// A fully hydrated retrieval candidate: vectors for scoring plus metadata
/// for the response.
#[derive(Clone, Debug)]
pub struct Candidate {
	pub vectors: MovieVectors,
	pub movie: Movie,
}
