use std::sync::Arc;

use kino_service::{KinoService, PgVectorStore};
use kino_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<KinoService>,
}
impl AppState {
	pub async fn new(config: kino_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema(&config.storage.vectors).await?;

		let store = Arc::new(PgVectorStore::new(db, config.storage.vectors));
		let service = KinoService::new(config, store);

		Ok(Self { service: Arc::new(service) })
	}
}
