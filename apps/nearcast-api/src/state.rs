use std::sync::Arc;

use nearcast_geo::S2SpatialIndex;
use nearcast_service::{NearcastService, Stores};
use nearcast_storage::{
	db::Db,
	pg::{PgCastStore, PgCreatorStore},
};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<NearcastService>,
}
impl AppState {
	pub async fn new(config: nearcast_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let stores = Stores {
			casts: Arc::new(PgCastStore::new(db.pool.clone())),
			creators: Arc::new(PgCreatorStore::new(db.pool.clone())),
		};
		let service = NearcastService::new(config, stores, Arc::new(S2SpatialIndex));

		Ok(Self { service: Arc::new(service) })
	}

	/// Wraps an already-built service; tests use this to run the routers
	/// against in-memory stores.
	pub fn from_service(service: NearcastService) -> Self {
		Self { service: Arc::new(service) }
	}
}
