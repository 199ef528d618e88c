//! Adaptive multi-radius search over the (day bucket, cell id) index.
//!
//! The radius ladder runs from the base radius upward, doubling each step.
//! Every tier issues one range query per (covering cell, recency bucket)
//! pair; a tier overflows when any of its sub-queries returns a full page,
//! meaning the index may hold more keys in that region than the tier was
//! allowed to read. The result is the largest tier that completed without
//! overflowing, so the radius adapts to local density: wide in sparse areas,
//! tight in dense ones.

use std::{collections::HashSet, sync::Arc};

use time::OffsetDateTime;
use tokio::time::Instant;
use uuid::Uuid;

use nearcast_config::Search;
use nearcast_domain::{
	recency::buckets_covering_window,
	visibility::VISIBILITY_WINDOW,
};
use nearcast_geo::{CellRange, SpatialIndex};
use nearcast_storage::store::CastStore;

use crate::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct RadiusTier {
	pub radius_m: f64,
	pub cap: u32,
}

/// The radius ladder, smallest tier first. The base tier carries a larger cap
/// so a dense neighborhood still yields a full result page before the search
/// gives up on it.
pub(crate) fn ladder(search: &Search) -> Vec<RadiusTier> {
	let mut tiers = vec![RadiusTier { radius_m: search.base_radius_m, cap: search.base_tier_cap }];

	for doubling in 1..=search.radius_doublings {
		tiers.push(RadiusTier {
			radius_m: search.base_radius_m * f64::from(1_u32 << doubling),
			cap: search.tier_cap,
		});
	}

	tiers
}

#[derive(Debug)]
pub(crate) struct TierOutcome {
	pub radius_m: f64,
	pub keys: Vec<Uuid>,
	pub overflowed: bool,
}

pub(crate) struct TieredRadiusSearch {
	casts: Arc<dyn CastStore>,
	spatial: Arc<dyn SpatialIndex>,
	search: Search,
}
impl TieredRadiusSearch {
	pub fn new(casts: Arc<dyn CastStore>, spatial: Arc<dyn SpatialIndex>, search: Search) -> Self {
		Self { casts, spatial, search }
	}

	/// Evaluates the ladder and picks the best completed tier.
	///
	/// Tiers are evaluated in order; a tier that errors or misses the
	/// deadline stops the scan, and whatever completed before it is still
	/// eligible. If nothing completed, the search is unavailable.
	pub async fn run(
		&self,
		latitude: f64,
		longitude: f64,
		now: OffsetDateTime,
		deadline: Instant,
	) -> Result<TierOutcome> {
		let buckets = buckets_covering_window(now, VISIBILITY_WINDOW);
		let mut outcomes = Vec::new();

		for tier in ladder(&self.search) {
			match tokio::time::timeout_at(deadline, self.run_tier(latitude, longitude, &buckets, tier))
				.await
			{
				Ok(Ok(outcome)) => outcomes.push(outcome),
				Ok(Err(err)) => {
					tracing::warn!(radius_m = tier.radius_m, error = %err, "radius tier failed, stopping the ladder scan");

					break;
				},
				Err(_) => {
					tracing::warn!(radius_m = tier.radius_m, "radius tier missed the deadline, stopping the ladder scan");

					break;
				},
			}
		}

		select_best(outcomes)
	}

	async fn run_tier(
		&self,
		latitude: f64,
		longitude: f64,
		buckets: &[i64],
		tier: RadiusTier,
	) -> Result<TierOutcome> {
		let coverings = self.spatial.covering_cells(
			latitude,
			longitude,
			tier.radius_m,
			self.search.max_covering_cells as usize,
		);
		let sub_queries = buckets
			.iter()
			.flat_map(|&bucket| coverings.iter().map(move |&range| (bucket, range)))
			.collect::<Vec<_>>();
		let mut seen = HashSet::new();
		let mut keys = Vec::new();
		let mut overflowed = false;

		for batch in sub_queries.chunks(self.search.max_parallel_queries.max(1) as usize) {
			let handles = batch
				.iter()
				.map(|&(bucket, range)| {
					let casts = self.casts.clone();
					let cap = tier.cap;

					tokio::spawn(async move { casts.range_query(bucket, range, cap).await })
				})
				.collect::<Vec<_>>();

			for handle in handles {
				let page = handle.await.map_err(|err| Error::Unavailable {
					message: format!("range query task failed, {err}"),
				})??;

				overflowed |= page.len() >= tier.cap as usize;
				keys.extend(page.into_iter().filter(|id| seen.insert(*id)));
			}
		}

		Ok(TierOutcome { radius_m: tier.radius_m, keys, overflowed })
	}
}

/// The best tier is the largest radius that completed without overflowing.
/// An overflow at the smallest tier means even the densest read budget was
/// exhausted; the capped page is returned as a degraded result rather than
/// nothing. An overflow further up keeps the previous tier, whose keys are
/// already a superset of everything nearer.
fn select_best(outcomes: Vec<TierOutcome>) -> Result<TierOutcome> {
	let mut outcomes = outcomes.into_iter();
	let Some(mut best) = outcomes.next() else {
		return Err(Error::Unavailable {
			message: "no radius tier completed before the deadline".to_string(),
		});
	};

	if best.overflowed {
		tracing::warn!(
			radius_m = best.radius_m,
			keys = best.keys.len(),
			"smallest radius tier overflowed, returning a degraded result"
		);

		return Ok(best);
	}

	for outcome in outcomes {
		if outcome.overflowed {
			break;
		}

		best = outcome;
	}

	Ok(best)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn search() -> Search {
		Search {
			base_radius_m: 100_000.0,
			radius_doublings: 5,
			base_tier_cap: 500,
			tier_cap: 100,
			max_covering_cells: 5,
			max_parallel_queries: 10,
			max_results: 100,
			default_timeout_ms: 5_000,
		}
	}

	fn outcome(radius_m: f64, keys: usize, overflowed: bool) -> TierOutcome {
		TierOutcome {
			radius_m,
			keys: (0..keys).map(|n| Uuid::from_u128(n as u128)).collect(),
			overflowed,
		}
	}

	#[test]
	fn ladder_doubles_from_the_base_radius() {
		let tiers = ladder(&search());

		assert_eq!(
			tiers.iter().map(|t| t.radius_m).collect::<Vec<_>>(),
			vec![100_000.0, 200_000.0, 400_000.0, 800_000.0, 1_600_000.0, 3_200_000.0],
		);
		assert_eq!(tiers[0].cap, 500);
		assert!(tiers[1..].iter().all(|t| t.cap == 100));
	}

	#[test]
	fn best_is_the_largest_tier_before_an_overflow() {
		let best = select_best(vec![
			outcome(100_000.0, 3, false),
			outcome(200_000.0, 9, false),
			outcome(400_000.0, 100, true),
		])
		.unwrap();

		assert_eq!(best.radius_m, 200_000.0);
		assert_eq!(best.keys.len(), 9);
	}

	#[test]
	fn smallest_tier_overflow_still_returns_its_page() {
		let best = select_best(vec![outcome(100_000.0, 500, true), outcome(200_000.0, 7, false)])
			.unwrap();

		assert_eq!(best.radius_m, 100_000.0);
		assert_eq!(best.keys.len(), 500);
	}

	#[test]
	fn no_completed_tier_is_unavailable() {
		assert!(matches!(select_best(Vec::new()), Err(Error::Unavailable { .. })));
	}
}
