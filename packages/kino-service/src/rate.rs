use crate::{Error, KinoService, Result};

pub const MIN_RATING: f32 = 0.5;
pub const MAX_RATING: f32 = 5.0;

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct RateRequest {
	pub user_id: String,
	pub movie_id: i64,
	pub rating: f32,
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct RateResponse {
	pub status: String,
}

impl KinoService {
	pub async fn rate(&self, request: RateRequest) -> Result<RateResponse> {
		if request.user_id.trim().is_empty() {
			return Err(Error::InvalidArgument {
				message: "user_id must be non-empty.".to_string(),
			});
		}
		if request.movie_id <= 0 {
			return Err(Error::InvalidArgument {
				message: "movie_id must be positive.".to_string(),
			});
		}
		if !request.rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&request.rating) {
			return Err(Error::InvalidArgument {
				message: format!("rating must be between {MIN_RATING} and {MAX_RATING}."),
			});
		}

		let deadline = self.request_deadline();

		self.bounded(
			deadline,
			self.store.upsert_rating(&request.user_id, request.movie_id, request.rating),
		)
		.await?;

		Ok(RateResponse { status: "success".to_string() })
	}
}
