pub mod rate;
pub mod recommend;

mod error;

pub use error::{Error, Result};
pub use rate::{RateRequest, RateResponse};
pub use recommend::{RecommendRequest, RecommendResponse, ScoredMovie};

use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

use kino_config::{Config, Vectors};
use kino_domain::{MovieVectors, Signal};
use kino_storage::{
	db::Db,
	models::{Candidate, Movie, RatedMovie},
	queries,
};
use tokio::time::Instant;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The nearest-neighbor store the recommendation pipeline runs against.
/// The production implementation speaks Postgres + pgvector; tests swap in
/// an in-memory double.
pub trait VectorStore
where
	Self: Send + Sync,
{
	fn movie_vectors(
		&self,
		movie_id: i64,
	) -> BoxFuture<'_, kino_storage::Result<Option<MovieVectors>>>;

	/// Top-k ids by ascending distance in one signal's vector space, ties
	/// broken by movie id ascending.
	fn nearest_by_signal<'a>(
		&'a self,
		signal: Signal,
		target: &'a [f32],
		k: u32,
	) -> BoxFuture<'a, kino_storage::Result<Vec<i64>>>;

	fn rating_history<'a>(
		&'a self,
		user_id: &'a str,
	) -> BoxFuture<'a, kino_storage::Result<Vec<RatedMovie>>>;

	fn popular_movies(&self, limit: i64) -> BoxFuture<'_, kino_storage::Result<Vec<Movie>>>;

	/// One batch fetch of vectors plus metadata for every surviving
	/// candidate id. Ids the store cannot fully hydrate are dropped, not
	/// errored.
	fn hydrate_candidates<'a>(
		&'a self,
		ids: &'a [i64],
	) -> BoxFuture<'a, kino_storage::Result<Vec<Candidate>>>;

	fn upsert_rating<'a>(
		&'a self,
		user_id: &'a str,
		movie_id: i64,
		rating: f32,
	) -> BoxFuture<'a, kino_storage::Result<()>>;
}

pub struct PgVectorStore {
	db: Db,
	dims: Vectors,
}
impl PgVectorStore {
	pub fn new(db: Db, dims: Vectors) -> Self {
		Self { db, dims }
	}
}
impl VectorStore for PgVectorStore {
	fn movie_vectors(
		&self,
		movie_id: i64,
	) -> BoxFuture<'_, kino_storage::Result<Option<MovieVectors>>> {
		Box::pin(queries::movie_vectors(&self.db, &self.dims, movie_id))
	}

	fn nearest_by_signal<'a>(
		&'a self,
		signal: Signal,
		target: &'a [f32],
		k: u32,
	) -> BoxFuture<'a, kino_storage::Result<Vec<i64>>> {
		Box::pin(queries::nearest_by_signal(&self.db, signal, target, k))
	}

	fn rating_history<'a>(
		&'a self,
		user_id: &'a str,
	) -> BoxFuture<'a, kino_storage::Result<Vec<RatedMovie>>> {
		Box::pin(queries::rating_history(&self.db, &self.dims, user_id))
	}

	fn popular_movies(&self, limit: i64) -> BoxFuture<'_, kino_storage::Result<Vec<Movie>>> {
		Box::pin(queries::popular_movies(&self.db, limit))
	}

	fn hydrate_candidates<'a>(
		&'a self,
		ids: &'a [i64],
	) -> BoxFuture<'a, kino_storage::Result<Vec<Candidate>>> {
		Box::pin(queries::hydrate_candidates(&self.db, &self.dims, ids))
	}

	fn upsert_rating<'a>(
		&'a self,
		user_id: &'a str,
		movie_id: i64,
		rating: f32,
	) -> BoxFuture<'a, kino_storage::Result<()>> {
		Box::pin(queries::upsert_rating(&self.db, user_id, movie_id, rating))
	}
}

pub struct KinoService {
	pub cfg: Config,
	pub store: Arc<dyn VectorStore>,
}
impl KinoService {
	pub fn new(cfg: Config, store: Arc<dyn VectorStore>) -> Self {
		Self { cfg, store }
	}

	/// One deadline per request; every store call races against what is
	/// left of it.
	pub(crate) fn request_deadline(&self) -> Instant {
		Instant::now() + Duration::from_millis(self.cfg.recommend.store_timeout_ms)
	}

	pub(crate) async fn bounded<T>(
		&self,
		deadline: Instant,
		fut: impl Future<Output = kino_storage::Result<T>> + Send,
	) -> Result<T> {
		match tokio::time::timeout_at(deadline, fut).await {
			Ok(result) => result.map_err(Error::from),
			Err(_) => Err(Error::Unavailable {
				message: "Store call exceeded the request deadline.".to_string(),
			}),
		}
	}
}
