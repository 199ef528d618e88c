use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use nearcast_service::{
	CastLifetimeResponse, DeleteCastRequest, DeleteCastResponse, FlagCastRequest, FlagCastResponse,
	ModerateCastRequest, ModerateCastResponse, ModerateCreatorRequest, ModerateCreatorResponse,
	NearbyCastsRequest, NearbyCastsResponse, PutCastRequest, PutCastResponse,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/casts/nearby", post(nearby))
		.route("/v1/casts/put", post(put_cast))
		.route("/v1/casts/delete", post(delete_cast))
		.route("/v1/casts/flag", post(flag_cast))
		.route("/v1/casts/lifetime", get(lifetime))
		.with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new()
		.route("/v1/admin/moderate_cast", post(moderate_cast))
		.route("/v1/admin/moderate_creator", post(moderate_creator))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn nearby(
	State(state): State<AppState>,
	Json(payload): Json<NearbyCastsRequest>,
) -> Result<Json<NearbyCastsResponse>, ApiError> {
	let response = state.service.nearby_casts(&payload).await?;

	Ok(Json(response))
}

async fn put_cast(
	State(state): State<AppState>,
	Json(payload): Json<PutCastRequest>,
) -> Result<Json<PutCastResponse>, ApiError> {
	let response = state.service.put_cast(&payload).await?;

	Ok(Json(response))
}

async fn delete_cast(
	State(state): State<AppState>,
	Json(payload): Json<DeleteCastRequest>,
) -> Result<Json<DeleteCastResponse>, ApiError> {
	let response = state.service.delete_cast(&payload).await?;

	Ok(Json(response))
}

async fn flag_cast(
	State(state): State<AppState>,
	Json(payload): Json<FlagCastRequest>,
) -> Result<Json<FlagCastResponse>, ApiError> {
	let response = state.service.flag_cast(&payload).await?;

	Ok(Json(response))
}

async fn lifetime(State(state): State<AppState>) -> Json<CastLifetimeResponse> {
	Json(state.service.cast_lifetime())
}

async fn moderate_cast(
	State(state): State<AppState>,
	Json(payload): Json<ModerateCastRequest>,
) -> Result<Json<ModerateCastResponse>, ApiError> {
	let response = state.service.moderate_cast(&payload).await?;

	Ok(Json(response))
}

async fn moderate_creator(
	State(state): State<AppState>,
	Json(payload): Json<ModerateCreatorRequest>,
) -> Result<Json<ModerateCreatorResponse>, ApiError> {
	let response = state.service.moderate_creator(&payload).await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}

impl From<nearcast_service::Error> for ApiError {
	fn from(err: nearcast_service::Error) -> Self {
		use nearcast_service::Error;

		let (status, error_code) = match &err {
			Error::InvalidRequest { .. } => (StatusCode::BAD_REQUEST, "invalid_request"),
			Error::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
			Error::Forbidden { .. } => (StatusCode::FORBIDDEN, "forbidden"),
			Error::Unavailable { .. } => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
			Error::Storage { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
		};

		Self { status, error_code: error_code.to_string(), message: err.to_string() }
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
