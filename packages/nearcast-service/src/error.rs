pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Forbidden: {message}")]
	Forbidden { message: String },
	/// Transient: the caller may retry. The search is a pure function of
	/// store state and parameters, so retries are always safe.
	#[error("Unavailable: {message}")]
	Unavailable { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<nearcast_storage::Error> for Error {
	fn from(err: nearcast_storage::Error) -> Self {
		match err {
			nearcast_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			nearcast_storage::Error::Unavailable(message) => Self::Unavailable { message },
			nearcast_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			nearcast_storage::Error::NotFound(message) => Self::NotFound { message },
		}
	}
}
