use std::{
	collections::{BTreeMap, HashMap, HashSet},
	sync::Mutex,
};

use uuid::Uuid;

use nearcast_domain::flags::CastFlags;
use nearcast_geo::CellRange;
use nearcast_storage::{
	BoxFuture, Error, Result,
	models::{CastRecord, CreatorRecord},
	store::{CastStore, CreatorModerationLookup, CreatorStore},
};

#[derive(Default)]
struct Inner {
	casts: HashMap<Uuid, CastRecord>,
	// Mirrors the Postgres (day_bucket, cell_id) index; iteration order is
	// the range-scan order.
	index: BTreeMap<(i64, u64, Uuid), ()>,
	creators: HashMap<Uuid, CreatorRecord>,
	flags: HashSet<(Uuid, Uuid)>,
	fail_all_range_queries: bool,
	fail_limits: HashSet<u32>,
}

/// In-memory store implementing both store traits with the ordered-range
/// semantics of the real store, plus fault injection.
#[derive(Default)]
pub struct MemoryStore {
	inner: Mutex<Inner>,
}
impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Every subsequent range query fails; no tier can complete.
	pub fn fail_all_range_queries(&self) {
		self.lock().fail_all_range_queries = true;
	}

	/// Range queries issued with this limit fail. Tier caps differ between
	/// the base tier and the rest, so this targets a slice of the ladder.
	pub fn fail_limit(&self, limit: u32) {
		self.lock().fail_limits.insert(limit);
	}

	/// Drops the record body but keeps its index entries, simulating an
	/// index/store race where a key loads to nothing.
	pub fn drop_record_keep_index(&self, cast_id: Uuid) {
		self.lock().casts.remove(&cast_id);
	}

	pub fn flag_count(&self) -> usize {
		self.lock().flags.len()
	}

	/// Direct insert for fixtures that need full control of the record.
	pub fn insert_record(&self, cast: CastRecord) {
		let mut inner = self.lock();

		inner.index.insert((cast.day_bucket, cast.cell_id, cast.cast_id), ());
		inner.casts.insert(cast.cast_id, cast);
	}

	pub fn insert_creator(&self, creator: CreatorRecord) {
		self.lock().creators.insert(creator.creator_id, creator);
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
		self.inner.lock().unwrap_or_else(|err| err.into_inner())
	}
}

impl CastStore for MemoryStore {
	fn range_query<'a>(
		&'a self,
		day_bucket: i64,
		range: CellRange,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<Uuid>>> {
		Box::pin(async move {
			let inner = self.lock();

			if inner.fail_all_range_queries || inner.fail_limits.contains(&limit) {
				return Err(Error::Unavailable("injected range-query failure".to_string()));
			}

			let keys = inner
				.index
				.range(
					(day_bucket, range.min, Uuid::nil())..=(day_bucket, range.max, Uuid::max()),
				)
				.map(|((_, _, cast_id), ())| *cast_id)
				.take(limit as usize)
				.collect();

			Ok(keys)
		})
	}

	fn batch_get<'a>(&'a self, cast_ids: &'a [Uuid]) -> BoxFuture<'a, Result<Vec<CastRecord>>> {
		Box::pin(async move {
			let inner = self.lock();

			Ok(cast_ids.iter().filter_map(|id| inner.casts.get(id).cloned()).collect())
		})
	}

	fn get<'a>(&'a self, cast_id: Uuid) -> BoxFuture<'a, Result<Option<CastRecord>>> {
		Box::pin(async move { Ok(self.lock().casts.get(&cast_id).cloned()) })
	}

	fn insert<'a>(&'a self, cast: &'a CastRecord) -> BoxFuture<'a, Result<bool>> {
		Box::pin(async move {
			let mut inner = self.lock();

			if inner.casts.contains_key(&cast.cast_id) {
				return Ok(false);
			}

			inner.index.insert((cast.day_bucket, cast.cell_id, cast.cast_id), ());
			inner.casts.insert(cast.cast_id, cast.clone());

			Ok(true)
		})
	}

	fn mark_deleted<'a>(&'a self, cast_id: Uuid) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			if let Some(cast) = self.lock().casts.get_mut(&cast_id) {
				let flags = CastFlags::new(cast.deleted, cast.moderated).with_deleted();

				cast.deleted = flags.deleted;
				cast.moderated = flags.moderated;
			}

			Ok(())
		})
	}

	fn mark_moderated<'a>(&'a self, cast_id: Uuid) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			if let Some(cast) = self.lock().casts.get_mut(&cast_id) {
				let flags = CastFlags::new(cast.deleted, cast.moderated).with_moderated();

				cast.deleted = flags.deleted;
				cast.moderated = flags.moderated;
			}

			Ok(())
		})
	}

	fn insert_flag<'a>(&'a self, cast_id: Uuid, reporter_id: Uuid) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			self.lock().flags.insert((cast_id, reporter_id));

			Ok(())
		})
	}
}

impl CreatorModerationLookup for MemoryStore {
	fn moderated_among<'a>(
		&'a self,
		creator_ids: &'a [Uuid],
	) -> BoxFuture<'a, Result<HashSet<Uuid>>> {
		Box::pin(async move {
			let inner = self.lock();

			Ok(creator_ids
				.iter()
				.filter(|id| inner.creators.get(id).is_some_and(|c| c.moderated))
				.copied()
				.collect())
		})
	}
}

impl CreatorStore for MemoryStore {
	fn get<'a>(&'a self, creator_id: Uuid) -> BoxFuture<'a, Result<Option<CreatorRecord>>> {
		Box::pin(async move { Ok(self.lock().creators.get(&creator_id).cloned()) })
	}

	fn get_many<'a>(
		&'a self,
		creator_ids: &'a [Uuid],
	) -> BoxFuture<'a, Result<Vec<CreatorRecord>>> {
		Box::pin(async move {
			let inner = self.lock();

			Ok(creator_ids.iter().filter_map(|id| inner.creators.get(id).cloned()).collect())
		})
	}

	fn get_or_create<'a>(
		&'a self,
		creator_id: Uuid,
		device_name: Option<&'a str>,
	) -> BoxFuture<'a, Result<CreatorRecord>> {
		Box::pin(async move {
			let mut inner = self.lock();
			let creator = inner.creators.entry(creator_id).or_insert_with(|| CreatorRecord {
				creator_id,
				public_id: Uuid::new_v4(),
				device_name: None,
				moderated: false,
			});

			if let Some(name) = device_name {
				creator.device_name = Some(name.to_string());
			}

			Ok(creator.clone())
		})
	}

	fn mark_moderated<'a>(&'a self, creator_id: Uuid) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			if let Some(creator) = self.lock().creators.get_mut(&creator_id) {
				creator.moderated = true;
			}

			Ok(())
		})
	}
}
