use time::OffsetDateTime;
use uuid::Uuid;

/// A cast row. Location and creator are immutable after creation; only the
/// two tombstone flags ever change, and only from `false` to `true`.
#[derive(Clone, Debug)]
pub struct CastRecord {
	pub cast_id: Uuid,
	pub creator_id: Uuid,
	pub created_at: OffsetDateTime,
	/// `day_bucket(created_at)`, denormalized for the range index.
	pub day_bucket: i64,
	/// Leaf cell of the creation point.
	pub cell_id: u64,
	pub latitude: f64,
	pub longitude: f64,
	pub accuracy_m: f64,
	pub media_url: String,
	pub deleted: bool,
	pub moderated: bool,
}

#[derive(Clone, Debug)]
pub struct CreatorRecord {
	pub creator_id: Uuid,
	/// The identifier exposed to other clients; `creator_id` never leaves
	/// the backend.
	pub public_id: Uuid,
	pub device_name: Option<String>,
	pub moderated: bool,
}
