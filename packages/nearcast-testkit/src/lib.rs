//! Test plumbing shared across crates: an in-memory store with the same
//! ordered-range semantics as the Postgres store, fault injection for
//! exercising tier-discard paths, a planar spatial index with exact
//! coverings, and fixture builders.

mod memory;
mod planar;

pub use memory::MemoryStore;
pub use planar::PlanarIndex;

use std::env;

use time::OffsetDateTime;
use uuid::Uuid;

use nearcast_domain::recency::day_bucket;
use nearcast_geo::SpatialIndex;
use nearcast_storage::models::CastRecord;

/// DSN for Postgres-backed tests, when present.
pub fn env_dsn() -> Option<String> {
	env::var("NEARCAST_PG_DSN").ok().filter(|dsn| !dsn.trim().is_empty())
}

/// Builds a cast record the way the write path does: bucket and leaf cell
/// derived from the creation instant and point.
pub fn cast_record(
	index: &dyn SpatialIndex,
	cast_id: Uuid,
	creator_id: Uuid,
	latitude: f64,
	longitude: f64,
	created_at: OffsetDateTime,
) -> CastRecord {
	CastRecord {
		cast_id,
		creator_id,
		created_at,
		day_bucket: day_bucket(created_at),
		cell_id: index.leaf_cell_id(latitude, longitude),
		latitude,
		longitude,
		accuracy_m: 10.0,
		media_url: format!("https://media.test/{cast_id}.jpg"),
		deleted: false,
		moderated: false,
	}
}

/// Destination point at `distance_m` from `(lat, lng)` along the given
/// bearing, on a sphere. Good enough for placing fixtures at known
/// great-circle distances.
pub fn point_at(lat: f64, lng: f64, bearing_deg: f64, distance_m: f64) -> (f64, f64) {
	let d = distance_m / nearcast_domain::distance::EARTH_RADIUS_M;
	let theta = bearing_deg.to_radians();
	let phi1 = lat.to_radians();
	let lambda1 = lng.to_radians();
	let phi2 = (phi1.sin() * d.cos() + phi1.cos() * d.sin() * theta.cos()).asin();
	let lambda2 = lambda1
		+ (theta.sin() * d.sin() * phi1.cos()).atan2(d.cos() - phi1.sin() * phi2.sin());

	(phi2.to_degrees(), lambda2.to_degrees())
}
