use kino_config::Vectors;
use kino_domain::{MovieVectors, Signal};

use crate::{
	Result,
	db::Db,
	models::{Candidate, Movie, RatedMovie},
	pgvector,
};

type VectorRow = (i64, String, String, String);

pub async fn movie_vectors(db: &Db, dims: &Vectors, movie_id: i64) -> Result<Option<MovieVectors>> {
	let row: Option<VectorRow> = sqlx::query_as(
		"\
SELECT
	movie_id,
	collaborative_vector::text,
	semantic_vector::text,
	topic_vector::text
FROM movie_vectors
WHERE movie_id = $1",
	)
	.bind(movie_id)
	.fetch_optional(&db.pool)
	.await?;

	row.map(|row| decode_vectors(dims, row)).transpose()
}

pub async fn nearest_by_signal(
	db: &Db,
	signal: Signal,
	target: &[f32],
	k: u32,
) -> Result<Vec<i64>> {
	// Ascending cosine distance in the signal's vector space, ties broken by
	// movie id so the candidate stream is deterministic.
	let sql = format!(
		"\
SELECT movie_id
FROM movie_vectors
ORDER BY {} <=> $1::text::vector, movie_id
LIMIT $2",
		vector_column(signal),
	);
	let ids = sqlx::query_scalar::<_, i64>(&sql)
		.bind(pgvector::vector_to_pg(target))
		.bind(i64::from(k))
		.fetch_all(&db.pool)
		.await?;

	Ok(ids)
}

pub async fn rating_history(db: &Db, dims: &Vectors, user_id: &str) -> Result<Vec<RatedMovie>> {
	let rows: Vec<(i64, String, String, String, f32)> = sqlx::query_as(
		"\
SELECT
	v.movie_id,
	v.collaborative_vector::text,
	v.semantic_vector::text,
	v.topic_vector::text,
	r.rating
FROM user_ratings r
JOIN movie_vectors v ON r.movie_id = v.movie_id
WHERE r.user_id = $1",
	)
	.bind(user_id)
	.fetch_all(&db.pool)
	.await?;
	let mut out = Vec::with_capacity(rows.len());

	for (movie_id, collaborative, semantic, topic, rating) in rows {
		match decode_vectors(dims, (movie_id, collaborative, semantic, topic)) {
			Ok(vectors) => out.push(RatedMovie { vectors, rating }),
			Err(err) => {
				tracing::warn!(movie_id, %err, "Dropping rated movie with a malformed vector.");
			},
		}
	}

	Ok(out)
}

pub async fn popular_movies(db: &Db, limit: i64) -> Result<Vec<Movie>> {
	let movies = sqlx::query_as::<_, Movie>(
		"\
SELECT movie_id, title, genres, year, imdb_id, poster_color, popularity
FROM movies
ORDER BY popularity DESC, movie_id
LIMIT $1",
	)
	.bind(limit)
	.fetch_all(&db.pool)
	.await?;

	Ok(movies)
}

#[derive(sqlx::FromRow)]
struct CandidateRow {
	movie_id: i64,
	collaborative: String,
	semantic: String,
	topic: String,
	title: Option<String>,
	genres: Option<Vec<String>>,
	year: Option<i32>,
	imdb_id: Option<String>,
	poster_color: Option<String>,
	popularity: Option<i64>,
}

/// Hydrates candidate ids with vectors and metadata in one batch fetch.
/// Index hits with no metadata row and rows with malformed vectors are
/// dropped with a warning; they fail the record, not the request.
pub async fn hydrate_candidates(db: &Db, dims: &Vectors, ids: &[i64]) -> Result<Vec<Candidate>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	let rows: Vec<CandidateRow> = sqlx::query_as(
		"\
SELECT
	v.movie_id,
	v.collaborative_vector::text AS collaborative,
	v.semantic_vector::text AS semantic,
	v.topic_vector::text AS topic,
	m.title,
	m.genres,
	m.year,
	m.imdb_id,
	m.poster_color,
	m.popularity
FROM movie_vectors v
LEFT JOIN movies m ON v.movie_id = m.movie_id
WHERE v.movie_id = ANY($1)",
	)
	.bind(ids)
	.fetch_all(&db.pool)
	.await?;
	let mut out = Vec::with_capacity(rows.len());

	for row in rows {
		let movie_id = row.movie_id;
		let (Some(title), Some(genres), Some(poster_color), Some(popularity)) =
			(row.title, row.genres, row.poster_color, row.popularity)
		else {
			tracing::warn!(movie_id, "Dropping candidate with no metadata row.");

			continue;
		};
		let vectors =
			match decode_vectors(dims, (movie_id, row.collaborative, row.semantic, row.topic)) {
				Ok(vectors) => vectors,
				Err(err) => {
					tracing::warn!(movie_id, %err, "Dropping candidate with a malformed vector.");

					continue;
				},
			};

		out.push(Candidate {
			vectors,
			movie: Movie {
				movie_id,
				title,
				genres,
				year: row.year,
				imdb_id: row.imdb_id,
				poster_color,
				popularity,
			},
		});
	}

	Ok(out)
}

pub async fn upsert_rating(db: &Db, user_id: &str, movie_id: i64, rating: f32) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO user_ratings (user_id, movie_id, rating)
VALUES ($1, $2, $3)
ON CONFLICT (user_id, movie_id) DO UPDATE
SET
	rating = EXCLUDED.rating,
	rated_at = now()",
	)
	.bind(user_id)
	.bind(movie_id)
	.bind(rating)
	.execute(&db.pool)
	.await?;

	Ok(())
}

fn vector_column(signal: Signal) -> &'static str {
	match signal {
		Signal::Collaborative => "collaborative_vector",
		Signal::Semantic => "semantic_vector",
		Signal::Topic => "topic_vector",
	}
}

fn decode_vectors(
	dims: &Vectors,
	(movie_id, collaborative, semantic, topic): VectorRow,
) -> Result<MovieVectors> {
	Ok(MovieVectors {
		movie_id,
		collaborative: pgvector::parse_pg_vector(&collaborative, dims.collaborative_dim)?,
		semantic: pgvector::parse_pg_vector(&semantic, dims.semantic_dim)?,
		topic: pgvector::parse_pg_vector(&topic, dims.topic_dim)?,
	})
}
