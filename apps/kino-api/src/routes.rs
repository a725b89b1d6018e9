use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use kino_service::{
	Error as ServiceError, RateRequest, RateResponse, RecommendRequest, RecommendResponse,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/recommend", post(recommend))
		.route("/v1/rate", post(rate))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn recommend(
	State(state): State<AppState>,
	Json(payload): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, ApiError> {
	let response = state.service.recommend(payload).await?;

	Ok(Json(response))
}

async fn rate(
	State(state): State<AppState>,
	Json(payload): Json<RateRequest>,
) -> Result<Json<RateResponse>, ApiError> {
	let response = state.service.rate(payload).await?;

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
	error_code: &'static str,
	message: String,
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let (status, error_code) = match &err {
			ServiceError::InvalidArgument { .. } => (StatusCode::BAD_REQUEST, "invalid_argument"),
			ServiceError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
			ServiceError::Unavailable { .. } => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
			ServiceError::DataIntegrity { .. } =>
				(StatusCode::INTERNAL_SERVER_ERROR, "data_integrity"),
			ServiceError::Storage { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "storage"),
		};

		Self { status, error_code, message: err.to_string() }
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code.to_string(), message: self.message };

		(self.status, Json(body)).into_response()
	}
}
