//! The spatial-index seam.
//!
//! Casts are indexed by the 64-bit leaf cell of a hierarchical,
//! locality-preserving space-filling curve. A circular query region is
//! covered by a small set of (possibly coarser) cells, each expressible as a
//! contiguous `[min, max]` range of leaf ids, which is what lets a plain
//! ordered key-value store answer "near this point" with range scans.

use s2::{
	cap::Cap,
	cellid::CellID,
	latlng::LatLng,
	point::Point,
	region::RegionCoverer,
	s1::angle::{Angle, Rad},
};

use nearcast_domain::distance::EARTH_RADIUS_M;

/// One covering cell as a contiguous, inclusive range of leaf-cell ids.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CellRange {
	pub min: u64,
	pub max: u64,
}
impl CellRange {
	pub fn contains(&self, cell_id: u64) -> bool {
		self.min <= cell_id && cell_id <= self.max
	}
}

/// Hierarchical spatial index contract. Implementations must be pure: the
/// same inputs always produce the same cells.
pub trait SpatialIndex
where
	Self: Send + Sync,
{
	/// The finest-granularity cell containing the point.
	fn leaf_cell_id(&self, latitude: f64, longitude: f64) -> u64;

	/// A covering of the circle around the point, at most `max_cells` cells.
	/// The union of the returned ranges fully contains the circle; it may
	/// over-approximate it, which the exact re-ranking stage corrects for.
	fn covering_cells(
		&self,
		latitude: f64,
		longitude: f64,
		radius_m: f64,
		max_cells: usize,
	) -> Vec<CellRange>;
}

/// S2-backed implementation: leaf cells are level-30 S2 cell ids along the
/// Hilbert curve, coverings come from the S2 region coverer over a spherical
/// cap.
#[derive(Clone, Copy, Debug, Default)]
pub struct S2SpatialIndex;

impl SpatialIndex for S2SpatialIndex {
	fn leaf_cell_id(&self, latitude: f64, longitude: f64) -> u64 {
		CellID::from(LatLng::from_degrees(latitude, longitude)).0
	}

	fn covering_cells(
		&self,
		latitude: f64,
		longitude: f64,
		radius_m: f64,
		max_cells: usize,
	) -> Vec<CellRange> {
		let center = Point::from(LatLng::from_degrees(latitude, longitude));
		let angle = Angle::from(Rad(radius_m / EARTH_RADIUS_M));
		let cap = Cap::from_center_angle(&center, &angle);
		let coverer = RegionCoverer { min_level: 0, max_level: 30, level_mod: 1, max_cells };

		coverer
			.covering(&cap)
			.0
			.iter()
			.map(|cell| CellRange { min: cell.range_min().0, max: cell.range_max().0 })
			.collect()
	}
}
