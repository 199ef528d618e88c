use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use nearcast_domain::recency::day_bucket;
use nearcast_storage::models::CastRecord;

use crate::{Error, Location, NearcastService, Result, validate_location};

#[derive(Clone, Debug, Deserialize)]
pub struct PutCastRequest {
	/// Client-generated, which is what makes retries idempotent.
	pub cast_id: Uuid,
	pub client_id: Uuid,
	pub device_name: Option<String>,
	pub location: Location,
	pub media_url: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct PutCastResponse {
	pub cast_id: Uuid,
	/// `false` when the id already existed and the request was a replay.
	pub created: bool,
}

impl NearcastService {
	pub async fn put_cast(&self, request: &PutCastRequest) -> Result<PutCastResponse> {
		validate_location(&request.location)?;

		if request.media_url.is_empty() {
			return Err(Error::InvalidRequest { message: "media_url must not be empty.".to_string() });
		}

		self.stores
			.creators
			.get_or_create(request.client_id, request.device_name.as_deref())
			.await?;

		let created_at = OffsetDateTime::now_utc();
		let cast = CastRecord {
			cast_id: request.cast_id,
			creator_id: request.client_id,
			created_at,
			day_bucket: day_bucket(created_at),
			cell_id: self
				.spatial
				.leaf_cell_id(request.location.latitude, request.location.longitude),
			latitude: request.location.latitude,
			longitude: request.location.longitude,
			accuracy_m: request.location.accuracy_m.unwrap_or(0.),
			media_url: request.media_url.clone(),
			deleted: false,
			moderated: false,
		};
		let created = self.stores.casts.insert(&cast).await?;

		if created {
			tracing::info!(cast_id = %cast.cast_id, cell_id = cast.cell_id, "cast created");
		}

		Ok(PutCastResponse { cast_id: cast.cast_id, created })
	}
}
