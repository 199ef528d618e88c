use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub search: Search,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

/// Knobs for the tiered covering-query search.
///
/// The radius ladder starts at `base_radius_m` and doubles `radius_doublings`
/// times. The smallest tier uses `base_tier_cap` per sub-query so dense areas
/// are not missed; every larger tier uses `tier_cap`.
#[derive(Debug, Clone, Deserialize)]
pub struct Search {
	pub base_radius_m: f64,
	pub radius_doublings: u32,
	pub base_tier_cap: u32,
	pub tier_cap: u32,
	pub max_covering_cells: u32,
	pub max_parallel_queries: u32,
	pub max_results: u32,
	pub default_timeout_ms: u64,
}
