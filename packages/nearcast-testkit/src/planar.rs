use nearcast_geo::{CellRange, SpatialIndex};

const METERS_PER_DEGREE: f64 = 111_320.0;
// Keeps cell ids positive for any longitude.
const OFFSET_M: f64 = 360.0 * METERS_PER_DEGREE;

/// A deliberately simple spatial index for tests: one-dimensional cells, one
/// meter of longitude at the equator per cell, and coverings that are exact
/// (a single range, no over-approximation). Lets tests place casts at known
/// distances and know precisely which tiers see them.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlanarIndex;

impl SpatialIndex for PlanarIndex {
	fn leaf_cell_id(&self, _latitude: f64, longitude: f64) -> u64 {
		(longitude * METERS_PER_DEGREE + OFFSET_M) as u64
	}

	fn covering_cells(
		&self,
		latitude: f64,
		longitude: f64,
		radius_m: f64,
		_max_cells: usize,
	) -> Vec<CellRange> {
		let center = self.leaf_cell_id(latitude, longitude);
		let radius = radius_m as u64;

		vec![CellRange { min: center.saturating_sub(radius), max: center + radius }]
	}
}
