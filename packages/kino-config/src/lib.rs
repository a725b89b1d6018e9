mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Postgres, Recommend, Service, Storage, Vectors};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.postgres.acquire_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.acquire_timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (label, dim) in [
		("collaborative_dim", cfg.storage.vectors.collaborative_dim),
		("semantic_dim", cfg.storage.vectors.semantic_dim),
		("topic_dim", cfg.storage.vectors.topic_dim),
	] {
		if dim == 0 {
			return Err(Error::Validation {
				message: format!("storage.vectors.{label} must be greater than zero."),
			});
		}
	}

	if cfg.recommend.candidate_k_per_signal == 0 {
		return Err(Error::Validation {
			message: "recommend.candidate_k_per_signal must be greater than zero.".to_string(),
		});
	}
	if cfg.recommend.store_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "recommend.store_timeout_ms must be greater than zero.".to_string(),
		});
	}

	Ok(())
}
