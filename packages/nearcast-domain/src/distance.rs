use uuid::Uuid;

/// Mean earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_010.0;

/// A candidate for ranking: the true coordinates as stored at creation.
#[derive(Clone, Copy, Debug)]
pub struct Candidate {
	pub cast_id: Uuid,
	pub latitude: f64,
	pub longitude: f64,
}

/// A ranked candidate with its great-circle distance from the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ranked {
	pub cast_id: Uuid,
	pub distance_m: f64,
}

/// Haversine great-circle distance in meters.
pub fn haversine_m(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
	let phi1 = lat1.to_radians();
	let phi2 = lat2.to_radians();
	let d_phi = (lat2 - lat1).to_radians();
	let d_lambda = (lng2 - lng1).to_radians();
	let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);

	2.0 * EARTH_RADIUS_M * a.sqrt().min(1.0).asin()
}

/// Orders candidates by true distance from the origin, ascending, breaking
/// ties by `cast_id`, and truncates to `max_results`. This is the exact
/// re-ranking stage: cell coverings over-approximate, so index proximity is
/// never trusted for ordering.
pub fn rank_candidates(
	origin_lat: f64,
	origin_lng: f64,
	candidates: &[Candidate],
	max_results: usize,
) -> Vec<Ranked> {
	let mut ranked = candidates
		.iter()
		.map(|c| Ranked {
			cast_id: c.cast_id,
			distance_m: haversine_m(origin_lat, origin_lng, c.latitude, c.longitude),
		})
		.collect::<Vec<_>>();

	ranked.sort_by(|a, b| {
		a.distance_m.total_cmp(&b.distance_m).then_with(|| a.cast_id.cmp(&b.cast_id))
	});
	ranked.truncate(max_results);

	ranked
}
