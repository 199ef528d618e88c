mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Postgres, Search, Service, Storage};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.admin_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.admin_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if !cfg.search.base_radius_m.is_finite() || cfg.search.base_radius_m <= 0.0 {
		return Err(Error::Validation {
			message: "search.base_radius_m must be a positive finite number.".to_string(),
		});
	}
	if cfg.search.radius_doublings > 16 {
		return Err(Error::Validation {
			message: "search.radius_doublings must be at most 16.".to_string(),
		});
	}
	if cfg.search.base_tier_cap == 0 {
		return Err(Error::Validation {
			message: "search.base_tier_cap must be greater than zero.".to_string(),
		});
	}
	if cfg.search.tier_cap == 0 {
		return Err(Error::Validation {
			message: "search.tier_cap must be greater than zero.".to_string(),
		});
	}
	if cfg.search.base_tier_cap < cfg.search.tier_cap {
		return Err(Error::Validation {
			message: "search.base_tier_cap must be at least search.tier_cap; the smallest \
				radius carries the larger per-query cap."
				.to_string(),
		});
	}
	if cfg.search.max_covering_cells == 0 {
		return Err(Error::Validation {
			message: "search.max_covering_cells must be greater than zero.".to_string(),
		});
	}
	if cfg.search.max_parallel_queries == 0 {
		return Err(Error::Validation {
			message: "search.max_parallel_queries must be greater than zero.".to_string(),
		});
	}
	if cfg.search.max_results == 0 {
		return Err(Error::Validation {
			message: "search.max_results must be greater than zero.".to_string(),
		});
	}
	if cfg.search.default_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "search.default_timeout_ms must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
