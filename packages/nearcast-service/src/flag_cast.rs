use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, NearcastService, Result};

#[derive(Clone, Debug, Deserialize)]
pub struct FlagCastRequest {
	pub cast_id: Uuid,
	pub client_id: Uuid,
}

#[derive(Clone, Debug, Serialize)]
pub struct FlagCastResponse {
	pub cast_id: Uuid,
}

impl NearcastService {
	/// Records a report for moderator review. Flagging does not hide the
	/// cast; only a moderation decision does.
	pub async fn flag_cast(&self, request: &FlagCastRequest) -> Result<FlagCastResponse> {
		if self.stores.casts.get(request.cast_id).await?.is_none() {
			return Err(Error::NotFound {
				message: format!("no cast with id {}.", request.cast_id),
			});
		}

		// Reporters who have never posted still need a creator row.
		self.stores.creators.get_or_create(request.client_id, None).await?;
		self.stores.casts.insert_flag(request.cast_id, request.client_id).await?;

		tracing::info!(cast_id = %request.cast_id, "cast flagged");

		Ok(FlagCastResponse { cast_id: request.cast_id })
	}
}
