use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use nearcast_config::{Config, Error};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn write_temp_config(contents: &str) -> PathBuf {
	let stamp = SystemTime::now().duration_since(UNIX_EPOCH).expect("Clock before epoch.");
	let unique = COUNTER.fetch_add(1, Ordering::Relaxed);
	let path = env::temp_dir()
		.join(format!("nearcast_config_{}_{}_{unique}.toml", std::process::id(), stamp.as_nanos()));

	fs::write(&path, contents).expect("Failed to write temp config.");

	path
}

fn sample_with<F>(mutate: F) -> String
where
	F: FnOnce(&mut toml::Table),
{
	let mut value: Value =
		toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let root = value.as_table_mut().expect("Sample config must be a table.");

	mutate(root);

	toml::to_string(&value).expect("Failed to render sample config.")
}

fn search_table(root: &mut toml::Table) -> &mut toml::Table {
	root.get_mut("search")
		.and_then(Value::as_table_mut)
		.expect("Sample config must include [search].")
}

fn load(contents: &str) -> Result<Config, Error> {
	let path = write_temp_config(contents);
	let result = nearcast_config::load(&path);

	fs::remove_file(&path).ok();

	result
}

#[test]
fn sample_config_loads() {
	let cfg = load(SAMPLE_CONFIG_TOML).expect("Sample config must validate.");

	assert_eq!(cfg.search.radius_doublings, 5);
	assert_eq!(cfg.search.base_tier_cap, 500);
	assert_eq!(cfg.search.tier_cap, 100);
	assert_eq!(cfg.search.max_covering_cells, 5);
}

#[test]
fn empty_log_level_normalizes_to_info() {
	let toml = sample_with(|root| {
		let service = root
			.get_mut("service")
			.and_then(Value::as_table_mut)
			.expect("Sample config must include [service].");

		service.insert("log_level".to_string(), Value::String("  ".to_string()));
	});
	let cfg = load(&toml).expect("Config with blank log level must validate.");

	assert_eq!(cfg.service.log_level, "info");
}

#[test]
fn zero_max_results_rejected() {
	let toml = sample_with(|root| {
		search_table(root).insert("max_results".to_string(), Value::Integer(0));
	});

	match load(&toml) {
		Err(Error::Validation { message }) => assert!(message.contains("max_results")),
		other => panic!("Expected validation error, got {other:?}"),
	}
}

#[test]
fn base_cap_below_tier_cap_rejected() {
	let toml = sample_with(|root| {
		let search = search_table(root);

		search.insert("base_tier_cap".to_string(), Value::Integer(50));
		search.insert("tier_cap".to_string(), Value::Integer(100));
	});

	match load(&toml) {
		Err(Error::Validation { message }) => assert!(message.contains("base_tier_cap")),
		other => panic!("Expected validation error, got {other:?}"),
	}
}

#[test]
fn non_positive_base_radius_rejected() {
	let toml = sample_with(|root| {
		search_table(root).insert("base_radius_m".to_string(), Value::Float(0.0));
	});

	assert!(matches!(load(&toml), Err(Error::Validation { .. })));
}

#[test]
fn zero_parallel_queries_rejected() {
	let toml = sample_with(|root| {
		search_table(root).insert("max_parallel_queries".to_string(), Value::Integer(0));
	});

	assert!(matches!(load(&toml), Err(Error::Validation { .. })));
}

#[test]
fn oversized_radius_ladder_rejected() {
	let toml = sample_with(|root| {
		search_table(root).insert("radius_doublings".to_string(), Value::Integer(17));
	});

	match load(&toml) {
		Err(Error::Validation { message }) => assert!(message.contains("radius_doublings")),
		other => panic!("Expected validation error, got {other:?}"),
	}
}

#[test]
fn zero_timeout_rejected() {
	let toml = sample_with(|root| {
		search_table(root).insert("default_timeout_ms".to_string(), Value::Integer(0));
	});

	assert!(matches!(load(&toml), Err(Error::Validation { .. })));
}
