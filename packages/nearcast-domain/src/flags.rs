/// Soft-mutation flags on a cast. Both are one-way: there is no undelete and
/// no unmoderate, so readers racing a writer see either the old or the new
/// value and both are valid.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CastFlags {
	pub deleted: bool,
	pub moderated: bool,
}
impl CastFlags {
	pub fn new(deleted: bool, moderated: bool) -> Self {
		Self { deleted, moderated }
	}

	/// Tombstones the cast. Monotonic.
	pub fn with_deleted(self) -> Self {
		Self { deleted: true, ..self }
	}

	/// Marks the cast moderated. Monotonic.
	pub fn with_moderated(self) -> Self {
		Self { moderated: true, ..self }
	}
}
