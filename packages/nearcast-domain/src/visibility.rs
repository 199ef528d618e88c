use time::{Duration, OffsetDateTime};

use crate::flags::CastFlags;

/// How long a cast remains discoverable after creation.
pub const VISIBILITY_WINDOW: Duration = Duration::hours(24);

/// Everything the visibility predicate needs, taken from freshly loaded rows
/// rather than anything cached at index time.
#[derive(Clone, Copy, Debug)]
pub struct VisibilityInputs {
	pub flags: CastFlags,
	pub creator_moderated: bool,
	pub created_at: OffsetDateTime,
}

/// A cast is visible iff it is not tombstoned, not moderated (directly or
/// through its creator), and younger than [`VISIBILITY_WINDOW`].
pub fn is_visible(inputs: &VisibilityInputs, now: OffsetDateTime) -> bool {
	!inputs.flags.deleted
		&& !inputs.flags.moderated
		&& !inputs.creator_moderated
		&& now - inputs.created_at < VISIBILITY_WINDOW
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use super::*;

	fn inputs(flags: CastFlags, creator_moderated: bool, age: Duration) -> (VisibilityInputs, OffsetDateTime) {
		let now = datetime!(2024-06-15 12:00:00 UTC);

		(VisibilityInputs { flags, creator_moderated, created_at: now - age }, now)
	}

	#[test]
	fn fresh_unflagged_cast_is_visible() {
		let (v, now) = inputs(CastFlags::default(), false, Duration::minutes(5));

		assert!(is_visible(&v, now));
	}

	#[test]
	fn tombstoned_cast_is_invisible() {
		let (v, now) = inputs(CastFlags::default().with_deleted(), false, Duration::minutes(5));

		assert!(!is_visible(&v, now));
	}

	#[test]
	fn moderated_cast_is_invisible() {
		let (v, now) = inputs(CastFlags::default().with_moderated(), false, Duration::minutes(5));

		assert!(!is_visible(&v, now));
	}

	#[test]
	fn creator_moderation_is_transitive() {
		let (v, now) = inputs(CastFlags::default(), true, Duration::minutes(5));

		assert!(!is_visible(&v, now));
	}

	#[test]
	fn cast_expires_at_the_window() {
		let (v, now) = inputs(CastFlags::default(), false, VISIBILITY_WINDOW);

		assert!(!is_visible(&v, now));

		let (v, now) = inputs(CastFlags::default(), false, VISIBILITY_WINDOW - Duration::seconds(1));

		assert!(is_visible(&v, now));
	}
}
