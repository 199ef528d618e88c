//! Moderator decisions. Both flags are one-way and applied at read time, so
//! a decision takes effect on the next search without touching the index.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, NearcastService, Result};

#[derive(Clone, Debug, Deserialize)]
pub struct ModerateCastRequest {
	pub cast_id: Uuid,
}

#[derive(Clone, Debug, Serialize)]
pub struct ModerateCastResponse {
	pub cast_id: Uuid,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ModerateCreatorRequest {
	pub creator_id: Uuid,
}

#[derive(Clone, Debug, Serialize)]
pub struct ModerateCreatorResponse {
	pub creator_id: Uuid,
}

impl NearcastService {
	pub async fn moderate_cast(&self, request: &ModerateCastRequest) -> Result<ModerateCastResponse> {
		if self.stores.casts.get(request.cast_id).await?.is_none() {
			return Err(Error::NotFound {
				message: format!("no cast with id {}.", request.cast_id),
			});
		}

		self.stores.casts.mark_moderated(request.cast_id).await?;

		tracing::info!(cast_id = %request.cast_id, "cast moderated");

		Ok(ModerateCastResponse { cast_id: request.cast_id })
	}

	/// Moderates a creator, hiding every cast they have made or will make.
	pub async fn moderate_creator(
		&self,
		request: &ModerateCreatorRequest,
	) -> Result<ModerateCreatorResponse> {
		if self.stores.creators.get(request.creator_id).await?.is_none() {
			return Err(Error::NotFound {
				message: format!("no creator with id {}.", request.creator_id),
			});
		}

		self.stores.creators.mark_moderated(request.creator_id).await?;

		tracing::info!(creator_id = %request.creator_id, "creator moderated");

		Ok(ModerateCreatorResponse { creator_id: request.creator_id })
	}
}
