use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub recommend: Recommend,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
	pub vectors: Vectors,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
	pub acquire_timeout_ms: u64,
}

/// Per-signal vector dimensionality. Fixed across the whole corpus; the
/// offline trainer and this service must agree on these values.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Vectors {
	pub collaborative_dim: u32,
	pub semantic_dim: u32,
	pub topic_dim: u32,
}

#[derive(Debug, Deserialize)]
pub struct Recommend {
	pub candidate_k_per_signal: u32,
	pub store_timeout_ms: u64,
}
