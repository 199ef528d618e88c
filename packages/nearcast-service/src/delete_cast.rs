use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, NearcastService, Result};

#[derive(Clone, Debug, Deserialize)]
pub struct DeleteCastRequest {
	pub cast_id: Uuid,
	pub client_id: Uuid,
}

#[derive(Clone, Debug, Serialize)]
pub struct DeleteCastResponse {
	pub cast_id: Uuid,
}

impl NearcastService {
	/// Tombstones a cast. Only its creator may delete it; the row stays in
	/// place until the bucket ages out, so replays of the delete succeed.
	pub async fn delete_cast(&self, request: &DeleteCastRequest) -> Result<DeleteCastResponse> {
		let Some(cast) = self.stores.casts.get(request.cast_id).await? else {
			return Err(Error::NotFound {
				message: format!("no cast with id {}.", request.cast_id),
			});
		};

		if cast.creator_id != request.client_id {
			return Err(Error::Forbidden {
				message: "only the creator may delete a cast.".to_string(),
			});
		}

		self.stores.casts.mark_deleted(request.cast_id).await?;

		tracing::info!(cast_id = %request.cast_id, "cast deleted");

		Ok(DeleteCastResponse { cast_id: request.cast_id })
	}
}
