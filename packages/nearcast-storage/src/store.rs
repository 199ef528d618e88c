use std::collections::HashSet;

use uuid::Uuid;

use nearcast_geo::CellRange;

use crate::{
	BoxFuture, Result,
	models::{CastRecord, CreatorRecord},
};

/// The store contract the search pipeline runs against: an ordered key-value
/// store that can answer capped, key-only range queries over
/// `(day_bucket, cell_id)` and bulk-load records by key. The store may be
/// eventually consistent; a key returned by `range_query` is allowed to be
/// missing from `batch_get`.
pub trait CastStore
where
	Self: Send + Sync,
{
	/// Key-only scan: ids of casts with the given `day_bucket` whose
	/// `cell_id` falls in `range`, in cell order, at most `limit` of them.
	/// Returning exactly `limit` keys means more may exist (overflow).
	fn range_query<'a>(
		&'a self,
		day_bucket: i64,
		range: CellRange,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<Uuid>>>;

	/// Bulk load. Missing keys are silently omitted.
	fn batch_get<'a>(&'a self, cast_ids: &'a [Uuid]) -> BoxFuture<'a, Result<Vec<CastRecord>>>;

	fn get<'a>(&'a self, cast_id: Uuid) -> BoxFuture<'a, Result<Option<CastRecord>>>;

	/// Creates the cast if it does not exist. Returns `false` when the id
	/// was already present (idempotent replay).
	fn insert<'a>(&'a self, cast: &'a CastRecord) -> BoxFuture<'a, Result<bool>>;

	/// One-way tombstone.
	fn mark_deleted<'a>(&'a self, cast_id: Uuid) -> BoxFuture<'a, Result<()>>;

	/// One-way moderation flag.
	fn mark_moderated<'a>(&'a self, cast_id: Uuid) -> BoxFuture<'a, Result<()>>;

	/// Records one flag per (reporter, cast) for moderator review.
	fn insert_flag<'a>(&'a self, cast_id: Uuid, reporter_id: Uuid) -> BoxFuture<'a, Result<()>>;
}

/// Filter-time lookup for transitive creator moderation. Kept as its own
/// seam so moderating a creator never fans out writes to their casts.
pub trait CreatorModerationLookup
where
	Self: Send + Sync,
{
	/// The subset of the given creators that are moderated.
	fn moderated_among<'a>(
		&'a self,
		creator_ids: &'a [Uuid],
	) -> BoxFuture<'a, Result<HashSet<Uuid>>>;
}

pub trait CreatorStore
where
	Self: CreatorModerationLookup,
{
	fn get<'a>(&'a self, creator_id: Uuid) -> BoxFuture<'a, Result<Option<CreatorRecord>>>;

	fn get_many<'a>(
		&'a self,
		creator_ids: &'a [Uuid],
	) -> BoxFuture<'a, Result<Vec<CreatorRecord>>>;

	/// Fetches the creator, creating it with a fresh public id on first
	/// contact, and keeps `device_name` current.
	fn get_or_create<'a>(
		&'a self,
		creator_id: Uuid,
		device_name: Option<&'a str>,
	) -> BoxFuture<'a, Result<CreatorRecord>>;

	/// One-way moderation flag; hides all of the creator's casts at read
	/// time.
	fn mark_moderated<'a>(&'a self, creator_id: Uuid) -> BoxFuture<'a, Result<()>>;
}
