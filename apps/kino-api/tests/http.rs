use axum::{
	body::{self, Body},
	http::{Request, StatusCode},
};
use tower::util::ServiceExt;

use kino_api::{routes, state::AppState};
use kino_config::{Config, Postgres, Recommend, Service, Storage, Vectors};
use kino_testkit::TestDatabase;

const TEST_DIMS: Vectors = Vectors { collaborative_dim: 3, semantic_dim: 3, topic_dim: 2 };

fn test_config(dsn: String) -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		storage: Storage {
			postgres: Postgres { dsn, pool_max_conns: 2, acquire_timeout_ms: 5_000 },
			vectors: TEST_DIMS,
		},
		recommend: Recommend { candidate_k_per_signal: 600, store_timeout_ms: 5_000 },
	}
}

async fn test_state() -> Option<(TestDatabase, AppState)> {
	let base_dsn = match kino_testkit::env_dsn() {
		Some(value) => value,
		None => {
			eprintln!("Skipping HTTP tests; set KINO_PG_DSN to run this test.");

			return None;
		},
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let state = AppState::new(test_config(test_db.dsn().to_string()))
		.await
		.expect("Failed to initialize app state.");

	Some((test_db, state))
}

async fn seed_catalog(dsn: &str) {
	let pool = sqlx::PgPool::connect(dsn).await.expect("Failed to connect for seeding.");

	for (movie_id, popularity, collaborative, semantic, topic) in [
		(1_i64, 30_i64, "[1,0,0]", "[0,1,0]", "[1,0]"),
		(2, 20, "[0.9,0.1,0]", "[0,1,0]", "[1,0]"),
		(3, 10, "[0,0,1]", "[1,0,0]", "[0,1]"),
	] {
		sqlx::query(
			"\
INSERT INTO movies (movie_id, title, genres, year, poster_color, popularity)
VALUES ($1, $2, $3, $4, $5, $6)",
		)
		.bind(movie_id)
		.bind(format!("Movie {movie_id}"))
		.bind(vec!["Drama".to_string()])
		.bind(1999_i32)
		.bind("blue")
		.bind(popularity)
		.execute(&pool)
		.await
		.expect("Failed to seed movie.");

		sqlx::query(
			"\
INSERT INTO movie_vectors (movie_id, collaborative_vector, semantic_vector, topic_vector)
VALUES ($1, $2::text::vector, $3::text::vector, $4::text::vector)",
		)
		.bind(movie_id)
		.bind(collaborative)
		.bind(semantic)
		.bind(topic)
		.execute(&pool)
		.await
		.expect("Failed to seed movie vectors.");
	}

	pool.close().await;
}

async fn post_json(
	app: axum::Router,
	uri: &str,
	payload: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
	let response = app
		.oneshot(
			Request::builder()
				.method("POST")
				.uri(uri)
				.header("content-type", "application/json")
				.body(Body::from(payload.to_string()))
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call endpoint.");
	let status = response.status();
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let json = if bytes.is_empty() {
		serde_json::Value::Null
	} else {
		serde_json::from_slice(&bytes).expect("Failed to parse response body.")
	};

	(status, json)
}

#[tokio::test]
#[ignore = "Requires external Postgres with pgvector. Set KINO_PG_DSN to run."]
async fn health_ok() {
	let Some((test_db, state)) = test_state().await else {
		return;
	};
	let app = routes::router(state);
	let response = app
		.oneshot(
			Request::builder()
				.uri("/health")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /health.");

	assert_eq!(response.status(), StatusCode::OK);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres with pgvector. Set KINO_PG_DSN to run."]
async fn rate_then_recommend_end_to_end() {
	let Some((test_db, state)) = test_state().await else {
		return;
	};

	seed_catalog(test_db.dsn()).await;

	let app = routes::router(state);
	let (status, json) = post_json(
		app.clone(),
		"/v1/rate",
		serde_json::json!({ "user_id": "user-1", "movie_id": 1, "rating": 5.0 }),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["status"], "success");

	let (status, json) = post_json(
		app,
		"/v1/recommend",
		serde_json::json!({
			"user_id": "user-1",
			"weights": { "collaborative": 1.0, "semantic": 0.0, "topic": 0.0 },
			"limit": 2,
		}),
	)
	.await;

	assert_eq!(status, StatusCode::OK);

	let items = json["items"].as_array().expect("Response must carry items.");

	assert_eq!(items.len(), 2);
	assert_eq!(items[0]["movie_id"], 1);
	assert_eq!(items[1]["movie_id"], 2);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres with pgvector. Set KINO_PG_DSN to run."]
async fn missing_weight_key_is_rejected_at_the_boundary() {
	let Some((test_db, state)) = test_state().await else {
		return;
	};
	let app = routes::router(state);
	let (status, _) = post_json(
		app,
		"/v1/recommend",
		serde_json::json!({
			"user_id": "user-1",
			"weights": { "collaborative": 1.0, "semantic": 0.0 },
			"limit": 10,
		}),
	)
	.await;

	assert!(status.is_client_error(), "Expected a client error, got {status}.");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres with pgvector. Set KINO_PG_DSN to run."]
async fn unknown_focus_movie_returns_not_found() {
	let Some((test_db, state)) = test_state().await else {
		return;
	};
	let app = routes::router(state);
	let (status, json) = post_json(
		app,
		"/v1/recommend",
		serde_json::json!({
			"user_id": "user-1",
			"weights": { "collaborative": 0.5, "semantic": 0.3, "topic": 0.2 },
			"limit": 10,
			"focus_movie_id": 424242,
		}),
	)
	.await;

	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(json["error_code"], "not_found");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres with pgvector. Set KINO_PG_DSN to run."]
async fn out_of_range_rating_is_invalid_argument() {
	let Some((test_db, state)) = test_state().await else {
		return;
	};
	let app = routes::router(state);
	let (status, json) = post_json(
		app,
		"/v1/rate",
		serde_json::json!({ "user_id": "user-1", "movie_id": 1, "rating": 6.0 }),
	)
	.await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error_code"], "invalid_argument");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
