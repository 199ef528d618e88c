//! The read path: tiered key search, fresh-row load, visibility filter,
//! exact re-ranking, then projection to the client shape.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::time::{Duration, Instant};
use uuid::Uuid;

use nearcast_domain::{
	distance::{Candidate, rank_candidates},
	flags::CastFlags,
	visibility::{VisibilityInputs, is_visible},
};
use nearcast_storage::models::CastRecord;

use crate::{Location, NearcastService, Result, tiered::TieredRadiusSearch, validate_location};

#[derive(Clone, Debug, Deserialize)]
pub struct NearbyCastsRequest {
	pub client_id: Uuid,
	pub location: Location,
	pub max_results: Option<u32>,
	pub timeout_ms: Option<u64>,
}

#[derive(Clone, Debug, Serialize)]
pub struct NearbyCastsResponse {
	pub casts: Vec<CastSummary>,
	/// The radius of the tier the results came from.
	pub search_radius_m: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct CastSummary {
	pub cast_id: Uuid,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	/// Whether the requesting client created this cast.
	pub mine: bool,
	pub media_url: String,
	pub creator_public_id: Uuid,
}

impl NearcastService {
	pub async fn nearby_casts(&self, request: &NearbyCastsRequest) -> Result<NearbyCastsResponse> {
		validate_location(&request.location)?;

		if request.max_results == Some(0) {
			return Err(crate::Error::InvalidRequest {
				message: "max_results must be greater than zero.".to_string(),
			});
		}
		if request.timeout_ms == Some(0) {
			return Err(crate::Error::InvalidRequest {
				message: "timeout_ms must be greater than zero.".to_string(),
			});
		}

		let search = &self.cfg.search;
		let now = OffsetDateTime::now_utc();
		let timeout_ms = request.timeout_ms.unwrap_or(search.default_timeout_ms);
		let deadline = Instant::now() + Duration::from_millis(timeout_ms);
		let max_results =
			request.max_results.unwrap_or(search.max_results).min(search.max_results) as usize;

		let outcome = TieredRadiusSearch::new(
			self.stores.casts.clone(),
			self.spatial.clone(),
			search.clone(),
		)
		.run(request.location.latitude, request.location.longitude, now, deadline)
		.await?;

		// Flags and coordinates come from freshly loaded rows; the index holds
		// keys only. Keys whose row is gone (expired between the range scan
		// and the load) simply drop out here.
		let records = self.stores.casts.batch_get(&outcome.keys).await?;
		let creator_ids =
			records.iter().map(|r| r.creator_id).collect::<HashSet<_>>().into_iter().collect::<Vec<_>>();
		let moderated_creators = self.stores.creators.moderated_among(&creator_ids).await?;
		let visible = records
			.into_iter()
			.filter(|record| {
				is_visible(
					&VisibilityInputs {
						flags: CastFlags::new(record.deleted, record.moderated),
						creator_moderated: moderated_creators.contains(&record.creator_id),
						created_at: record.created_at,
					},
					now,
				)
			})
			.map(|record| (record.cast_id, record))
			.collect::<HashMap<_, _>>();
		let candidates = visible
			.values()
			.map(|record| Candidate {
				cast_id: record.cast_id,
				latitude: record.latitude,
				longitude: record.longitude,
			})
			.collect::<Vec<_>>();
		let ranked = rank_candidates(
			request.location.latitude,
			request.location.longitude,
			&candidates,
			max_results,
		);
		let top_creator_ids = ranked
			.iter()
			.filter_map(|r| visible.get(&r.cast_id).map(|record| record.creator_id))
			.collect::<HashSet<_>>()
			.into_iter()
			.collect::<Vec<_>>();
		let public_ids = self
			.stores
			.creators
			.get_many(&top_creator_ids)
			.await?
			.into_iter()
			.map(|creator| (creator.creator_id, creator.public_id))
			.collect::<HashMap<_, _>>();
		let casts = ranked
			.iter()
			.filter_map(|r| {
				let record = visible.get(&r.cast_id)?;

				Some(summarize(record, request.client_id, &public_ids))
			})
			.collect::<Vec<_>>();

		tracing::info!(
			search_radius_m = outcome.radius_m,
			candidates = candidates.len(),
			returned = casts.len(),
			"nearby search completed"
		);

		Ok(NearbyCastsResponse { casts, search_radius_m: outcome.radius_m })
	}
}

fn summarize(
	record: &CastRecord,
	client_id: Uuid,
	public_ids: &HashMap<Uuid, Uuid>,
) -> CastSummary {
	CastSummary {
		cast_id: record.cast_id,
		created_at: record.created_at,
		mine: record.creator_id == client_id,
		media_url: record.media_url.clone(),
		// A missing creator row projects to the nil public id rather than
		// dropping an otherwise visible cast.
		creator_public_id: public_ids.get(&record.creator_id).copied().unwrap_or(Uuid::nil()),
	}
}
