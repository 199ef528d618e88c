use std::collections::HashSet;

use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use nearcast_geo::CellRange;

use crate::{
	BoxFuture, Result,
	models::{CastRecord, CreatorRecord},
	store::{CastStore, CreatorModerationLookup, CreatorStore},
};

/// Postgres-backed cast store. `cell_id` is stored as `BIGINT` by bit cast;
/// both endpoints of a covering cell's range share the top (face) bits, so
/// they land on the same side of the sign boundary and `BETWEEN` keeps leaf
/// order.
#[derive(Clone)]
pub struct PgCastStore {
	pool: PgPool,
}
impl PgCastStore {
	pub fn new(pool: PgPool) -> Self {
		Self { pool }
	}
}

#[derive(Clone)]
pub struct PgCreatorStore {
	pool: PgPool,
}
impl PgCreatorStore {
	pub fn new(pool: PgPool) -> Self {
		Self { pool }
	}
}

fn cast_from_row(row: &PgRow) -> Result<CastRecord> {
	Ok(CastRecord {
		cast_id: row.try_get("cast_id")?,
		creator_id: row.try_get("creator_id")?,
		created_at: row.try_get("created_at")?,
		day_bucket: row.try_get("day_bucket")?,
		cell_id: row.try_get::<i64, _>("cell_id")? as u64,
		latitude: row.try_get("latitude")?,
		longitude: row.try_get("longitude")?,
		accuracy_m: row.try_get("accuracy_m")?,
		media_url: row.try_get("media_url")?,
		deleted: row.try_get("deleted")?,
		moderated: row.try_get("moderated")?,
	})
}

fn creator_from_row(row: &PgRow) -> Result<CreatorRecord> {
	Ok(CreatorRecord {
		creator_id: row.try_get("creator_id")?,
		public_id: row.try_get("public_id")?,
		device_name: row.try_get("device_name")?,
		moderated: row.try_get("moderated")?,
	})
}

const CAST_COLUMNS: &str = "cast_id, creator_id, created_at, day_bucket, cell_id, latitude, \
	longitude, accuracy_m, media_url, deleted, moderated";

impl CastStore for PgCastStore {
	fn range_query<'a>(
		&'a self,
		day_bucket: i64,
		range: CellRange,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<Uuid>>> {
		Box::pin(async move {
			let rows = sqlx::query(
				"\
SELECT cast_id
FROM casts
WHERE day_bucket = $1
	AND cell_id BETWEEN $2 AND $3
ORDER BY cell_id
LIMIT $4",
			)
			.bind(day_bucket)
			.bind(range.min as i64)
			.bind(range.max as i64)
			.bind(i64::from(limit))
			.fetch_all(&self.pool)
			.await?;

			rows.iter().map(|row| Ok(row.try_get("cast_id")?)).collect()
		})
	}

	fn batch_get<'a>(&'a self, cast_ids: &'a [Uuid]) -> BoxFuture<'a, Result<Vec<CastRecord>>> {
		Box::pin(async move {
			if cast_ids.is_empty() {
				return Ok(Vec::new());
			}

			let rows = sqlx::query(&format!(
				"SELECT {CAST_COLUMNS} FROM casts WHERE cast_id = ANY($1)"
			))
			.bind(cast_ids)
			.fetch_all(&self.pool)
			.await?;

			rows.iter().map(cast_from_row).collect()
		})
	}

	fn get<'a>(&'a self, cast_id: Uuid) -> BoxFuture<'a, Result<Option<CastRecord>>> {
		Box::pin(async move {
			let row = sqlx::query(&format!(
				"SELECT {CAST_COLUMNS} FROM casts WHERE cast_id = $1"
			))
			.bind(cast_id)
			.fetch_optional(&self.pool)
			.await?;

			row.as_ref().map(cast_from_row).transpose()
		})
	}

	fn insert<'a>(&'a self, cast: &'a CastRecord) -> BoxFuture<'a, Result<bool>> {
		Box::pin(async move {
			let result = sqlx::query(
				"\
INSERT INTO casts (cast_id, creator_id, created_at, day_bucket, cell_id, latitude, longitude, \
	accuracy_m, media_url)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
ON CONFLICT (cast_id) DO NOTHING",
			)
			.bind(cast.cast_id)
			.bind(cast.creator_id)
			.bind(cast.created_at)
			.bind(cast.day_bucket)
			.bind(cast.cell_id as i64)
			.bind(cast.latitude)
			.bind(cast.longitude)
			.bind(cast.accuracy_m)
			.bind(&cast.media_url)
			.execute(&self.pool)
			.await?;

			Ok(result.rows_affected() == 1)
		})
	}

	fn mark_deleted<'a>(&'a self, cast_id: Uuid) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			sqlx::query("UPDATE casts SET deleted = TRUE WHERE cast_id = $1")
				.bind(cast_id)
				.execute(&self.pool)
				.await?;

			Ok(())
		})
	}

	fn mark_moderated<'a>(&'a self, cast_id: Uuid) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			sqlx::query("UPDATE casts SET moderated = TRUE WHERE cast_id = $1")
				.bind(cast_id)
				.execute(&self.pool)
				.await?;

			Ok(())
		})
	}

	fn insert_flag<'a>(&'a self, cast_id: Uuid, reporter_id: Uuid) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			sqlx::query(
				"\
INSERT INTO cast_flags (cast_id, reporter_id)
VALUES ($1, $2)
ON CONFLICT (cast_id, reporter_id) DO NOTHING",
			)
			.bind(cast_id)
			.bind(reporter_id)
			.execute(&self.pool)
			.await?;

			Ok(())
		})
	}
}

impl CreatorModerationLookup for PgCreatorStore {
	fn moderated_among<'a>(
		&'a self,
		creator_ids: &'a [Uuid],
	) -> BoxFuture<'a, Result<HashSet<Uuid>>> {
		Box::pin(async move {
			if creator_ids.is_empty() {
				return Ok(HashSet::new());
			}

			let rows = sqlx::query(
				"SELECT creator_id FROM creators WHERE moderated AND creator_id = ANY($1)",
			)
			.bind(creator_ids)
			.fetch_all(&self.pool)
			.await?;

			rows.iter().map(|row| Ok(row.try_get("creator_id")?)).collect()
		})
	}
}

impl CreatorStore for PgCreatorStore {
	fn get<'a>(&'a self, creator_id: Uuid) -> BoxFuture<'a, Result<Option<CreatorRecord>>> {
		Box::pin(async move {
			let row = sqlx::query(
				"SELECT creator_id, public_id, device_name, moderated FROM creators \
				WHERE creator_id = $1",
			)
			.bind(creator_id)
			.fetch_optional(&self.pool)
			.await?;

			row.as_ref().map(creator_from_row).transpose()
		})
	}

	fn get_many<'a>(
		&'a self,
		creator_ids: &'a [Uuid],
	) -> BoxFuture<'a, Result<Vec<CreatorRecord>>> {
		Box::pin(async move {
			if creator_ids.is_empty() {
				return Ok(Vec::new());
			}

			let rows = sqlx::query(
				"SELECT creator_id, public_id, device_name, moderated FROM creators \
				WHERE creator_id = ANY($1)",
			)
			.bind(creator_ids)
			.fetch_all(&self.pool)
			.await?;

			rows.iter().map(creator_from_row).collect()
		})
	}

	fn get_or_create<'a>(
		&'a self,
		creator_id: Uuid,
		device_name: Option<&'a str>,
	) -> BoxFuture<'a, Result<CreatorRecord>> {
		Box::pin(async move {
			let row = sqlx::query(
				"\
INSERT INTO creators (creator_id, public_id, device_name)
VALUES ($1, $2, $3)
ON CONFLICT (creator_id) DO UPDATE
SET device_name = COALESCE(EXCLUDED.device_name, creators.device_name)
RETURNING creator_id, public_id, device_name, moderated",
			)
			.bind(creator_id)
			.bind(Uuid::new_v4())
			.bind(device_name)
			.fetch_one(&self.pool)
			.await?;

			creator_from_row(&row)
		})
	}

	fn mark_moderated<'a>(&'a self, creator_id: Uuid) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			sqlx::query("UPDATE creators SET moderated = TRUE WHERE creator_id = $1")
				.bind(creator_id)
				.execute(&self.pool)
				.await?;

			Ok(())
		})
	}
}
