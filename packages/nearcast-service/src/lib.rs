pub mod delete_cast;
pub mod flag_cast;
pub mod lifetime;
pub mod moderation;
pub mod nearby;
pub mod put_cast;
pub mod time_serde;

mod error;
mod tiered;

pub use delete_cast::{DeleteCastRequest, DeleteCastResponse};
pub use error::{Error, Result};
pub use flag_cast::{FlagCastRequest, FlagCastResponse};
pub use lifetime::CastLifetimeResponse;
pub use moderation::{
	ModerateCastRequest, ModerateCastResponse, ModerateCreatorRequest, ModerateCreatorResponse,
};
pub use nearby::{CastSummary, NearbyCastsRequest, NearbyCastsResponse};
pub use put_cast::{PutCastRequest, PutCastResponse};

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use nearcast_config::Config;
use nearcast_geo::SpatialIndex;
use nearcast_storage::store::{CastStore, CreatorStore};

#[derive(Clone)]
pub struct Stores {
	pub casts: Arc<dyn CastStore>,
	pub creators: Arc<dyn CreatorStore>,
}

pub struct NearcastService {
	pub cfg: Config,
	pub stores: Stores,
	pub spatial: Arc<dyn SpatialIndex>,
}
impl NearcastService {
	pub fn new(cfg: Config, stores: Stores, spatial: Arc<dyn SpatialIndex>) -> Self {
		Self { cfg, stores, spatial }
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct Location {
	pub latitude: f64,
	pub longitude: f64,
	pub accuracy_m: Option<f64>,
}

pub(crate) fn validate_location(location: &Location) -> Result<()> {
	if !location.latitude.is_finite() || location.latitude.abs() > 90.0 {
		return Err(Error::InvalidRequest {
			message: "latitude must be within [-90, 90].".to_string(),
		});
	}
	if !location.longitude.is_finite() || location.longitude.abs() > 180.0 {
		return Err(Error::InvalidRequest {
			message: "longitude must be within [-180, 180].".to_string(),
		});
	}
	if let Some(accuracy) = location.accuracy_m
		&& (!accuracy.is_finite() || accuracy < 0.0)
	{
		return Err(Error::InvalidRequest {
			message: "accuracy_m must be zero or greater.".to_string(),
		});
	}

	Ok(())
}
