pub mod distance;
pub mod flags;
pub mod recency;
pub mod visibility;

pub use distance::{Candidate, Ranked, haversine_m, rank_candidates};
pub use flags::CastFlags;
pub use recency::{BUCKET_DURATION, buckets_covering_window, day_bucket};
pub use visibility::{VISIBILITY_WINDOW, VisibilityInputs, is_visible};
