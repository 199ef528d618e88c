//! Router tests over in-memory stores: JSON shapes, status mapping, and the
//! public/admin split.

use std::sync::Arc;

use axum::{
	body::{self, Body},
	http::{Request, StatusCode},
};
use tower::util::ServiceExt;
use uuid::Uuid;

use nearcast_api::{routes, state::AppState};
use nearcast_config::{Config, Postgres, Search, Service, Storage};
use nearcast_geo::S2SpatialIndex;
use nearcast_service::{NearcastService, Stores};
use nearcast_testkit::MemoryStore;

fn test_config() -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			admin_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		storage: Storage {
			postgres: Postgres { dsn: "postgres://unused".to_string(), pool_max_conns: 1 },
		},
		search: Search {
			base_radius_m: 100_000.0,
			radius_doublings: 5,
			base_tier_cap: 500,
			tier_cap: 100,
			max_covering_cells: 5,
			max_parallel_queries: 10,
			max_results: 100,
			default_timeout_ms: 5_000,
		},
	}
}

fn test_state() -> AppState {
	let store = Arc::new(MemoryStore::new());
	let service = NearcastService::new(
		test_config(),
		Stores { casts: store.clone(), creators: store },
		Arc::new(S2SpatialIndex),
	);

	AppState::from_service(service)
}

async fn post_json(app: axum::Router, uri: &str, payload: serde_json::Value) -> (StatusCode, serde_json::Value) {
	let response = app
		.oneshot(
			Request::builder()
				.method("POST")
				.uri(uri)
				.header("content-type", "application/json")
				.body(Body::from(payload.to_string()))
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call route.");
	let status = response.status();
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	// Unrouted paths come back with an empty body.
	let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

	(status, json)
}

fn put_payload(cast_id: Uuid, client_id: Uuid) -> serde_json::Value {
	serde_json::json!({
		"cast_id": cast_id,
		"client_id": client_id,
		"device_name": "pixel-9",
		"location": { "latitude": 37.7749, "longitude": -122.4194, "accuracy_m": 10.0 },
		"media_url": "https://media.test/cast.jpg",
	})
}

fn nearby_payload(client_id: Uuid) -> serde_json::Value {
	serde_json::json!({
		"client_id": client_id,
		"location": { "latitude": 37.7749, "longitude": -122.4194, "accuracy_m": null },
		"max_results": null,
		"timeout_ms": null,
	})
}

#[tokio::test]
async fn health_ok() {
	let app = routes::router(test_state());
	let response = app
		.oneshot(
			Request::builder()
				.uri("/health")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /health.");

	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn put_then_nearby_round_trips() {
	let state = test_state();
	let cast_id = Uuid::new_v4();
	let client_id = Uuid::new_v4();
	let (status, created) =
		post_json(routes::router(state.clone()), "/v1/casts/put", put_payload(cast_id, client_id))
			.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(created["created"], true);

	let (status, found) =
		post_json(routes::router(state), "/v1/casts/nearby", nearby_payload(client_id)).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(found["casts"][0]["cast_id"], serde_json::json!(cast_id));
	assert_eq!(found["casts"][0]["mine"], true);
	assert!(found["casts"][0]["created_at"].is_string());
}

#[tokio::test]
async fn invalid_coordinates_map_to_bad_request() {
	let payload = serde_json::json!({
		"client_id": Uuid::new_v4(),
		"location": { "latitude": 91.0, "longitude": 0.0, "accuracy_m": null },
		"max_results": null,
		"timeout_ms": null,
	});
	let (status, json) = post_json(routes::router(test_state()), "/v1/casts/nearby", payload).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error_code"], "invalid_request");
}

#[tokio::test]
async fn deleting_an_unknown_cast_maps_to_not_found() {
	let payload = serde_json::json!({ "cast_id": Uuid::new_v4(), "client_id": Uuid::new_v4() });
	let (status, json) = post_json(routes::router(test_state()), "/v1/casts/delete", payload).await;

	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(json["error_code"], "not_found");
}

#[tokio::test]
async fn deleting_someone_elses_cast_maps_to_forbidden() {
	let state = test_state();
	let cast_id = Uuid::new_v4();

	post_json(routes::router(state.clone()), "/v1/casts/put", put_payload(cast_id, Uuid::new_v4()))
		.await;

	let payload = serde_json::json!({ "cast_id": cast_id, "client_id": Uuid::new_v4() });
	let (status, json) = post_json(routes::router(state), "/v1/casts/delete", payload).await;

	assert_eq!(status, StatusCode::FORBIDDEN);
	assert_eq!(json["error_code"], "forbidden");
}

#[tokio::test]
async fn lifetime_is_public() {
	let app = routes::router(test_state());
	let response = app
		.oneshot(
			Request::builder()
				.uri("/v1/casts/lifetime")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /v1/casts/lifetime.");

	assert_eq!(response.status(), StatusCode::OK);

	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let json: serde_json::Value =
		serde_json::from_slice(&bytes).expect("Failed to parse response.");

	assert_eq!(json["lifetime_ms"], 86_400_000);
}

#[tokio::test]
async fn moderation_lives_on_the_admin_router_only() {
	let state = test_state();
	let cast_id = Uuid::new_v4();
	let client_id = Uuid::new_v4();

	post_json(routes::router(state.clone()), "/v1/casts/put", put_payload(cast_id, client_id))
		.await;

	let payload = serde_json::json!({ "cast_id": cast_id });
	let (status, _) =
		post_json(routes::router(state.clone()), "/v1/admin/moderate_cast", payload.clone()).await;

	assert_eq!(status, StatusCode::NOT_FOUND);

	let (status, json) =
		post_json(routes::admin_router(state.clone()), "/v1/admin/moderate_cast", payload).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["cast_id"], serde_json::json!(cast_id));

	let (_, found) =
		post_json(routes::router(state), "/v1/casts/nearby", nearby_payload(client_id)).await;

	assert!(found["casts"].as_array().expect("casts must be an array.").is_empty());
}
