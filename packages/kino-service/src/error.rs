pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid argument: {message}")]
	InvalidArgument { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Data integrity: {message}")]
	DataIntegrity { message: String },
	#[error("Store unavailable: {message}")]
	Unavailable { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<kino_storage::Error> for Error {
	fn from(err: kino_storage::Error) -> Self {
		match err {
			kino_storage::Error::Sqlx(inner) =>
				if matches!(inner, sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)) {
					Self::Unavailable { message: inner.to_string() }
				} else {
					Self::Storage { message: inner.to_string() }
				},
			kino_storage::Error::InvalidArgument(message) => Self::InvalidArgument { message },
			kino_storage::Error::NotFound(message) => Self::NotFound { message },
			kino_storage::Error::DataIntegrity(message) => Self::DataIntegrity { message },
		}
	}
}
