use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{Result, schema};

pub struct Db {
	pub pool: PgPool,
}
impl Db {
	pub async fn connect(cfg: &kino_config::Postgres) -> Result<Self> {
		let pool = PgPoolOptions::new()
			.max_connections(cfg.pool_max_conns)
			.acquire_timeout(Duration::from_millis(cfg.acquire_timeout_ms))
			.connect(&cfg.dsn)
			.await?;

		Ok(Self { pool })
	}

	pub async fn ensure_schema(&self, dims: &kino_config::Vectors) -> Result<()> {
		let sql = schema::render_schema(dims);
		let lock_id: i64 = 5_310_927;
		// Advisory locks are held per connection. Use a single transaction so the lock is scoped to
		// one connection and automatically released when the transaction ends.
		let mut tx = self.pool.begin().await?;

		sqlx::query("SELECT pg_advisory_xact_lock($1)").bind(lock_id).execute(&mut *tx).await?;

		for statement in sql.split(';') {
			let trimmed = statement.trim();

			if trimmed.is_empty() {
				continue;
			}

			sqlx::query(trimmed).execute(&mut *tx).await?;
		}

		tx.commit().await?;

		Ok(())
	}
}
