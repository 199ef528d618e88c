use time::{Duration, OffsetDateTime};

use crate::visibility::VISIBILITY_WINDOW;

/// Width of one index bucket. Matching the visibility window keeps the number
/// of buckets a query has to span at two.
pub const BUCKET_DURATION: Duration = VISIBILITY_WINDOW;

/// Maps an instant to its bucket: floor division of the unix timestamp by
/// the bucket width.
pub fn day_bucket(at: OffsetDateTime) -> i64 {
	let bucket_nanos = BUCKET_DURATION.whole_nanoseconds();

	at.unix_timestamp_nanos().div_euclid(bucket_nanos) as i64
}

/// Every bucket intersecting `[now - window, now]`, oldest first. Derived
/// from the bucket width and the window rather than hard-coded, so changing
/// either keeps queries correct.
pub fn buckets_covering_window(now: OffsetDateTime, window: Duration) -> Vec<i64> {
	let newest = day_bucket(now);
	let oldest = day_bucket(now - window);

	(oldest..=newest).collect()
}
