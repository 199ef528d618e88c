use serde::Serialize;

use nearcast_domain::visibility::VISIBILITY_WINDOW;

use crate::NearcastService;

#[derive(Clone, Debug, Serialize)]
pub struct CastLifetimeResponse {
	pub lifetime_ms: u64,
	pub description: String,
}

impl NearcastService {
	/// How long casts stay discoverable, for clients that render a countdown.
	pub fn cast_lifetime(&self) -> CastLifetimeResponse {
		CastLifetimeResponse {
			lifetime_ms: VISIBILITY_WINDOW.whole_milliseconds() as u64,
			description: "24 hours".to_string(),
		}
	}
}
