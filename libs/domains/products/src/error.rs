use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::error::ErrorKind;
use thiserror::Error;

/// Failure from the catalog layer.
///
/// The variant only picks the status; the message is shown to clients
/// exactly as the failing layer produced it.
#[derive(Debug, Error)]
pub enum ProductError {
    /// The store could not be reached
    #[error("{0}")]
    Connection(String),

    /// A record failed the required-field check before a write
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses.
///
/// Store failures of either kind are server errors; the create handler
/// overrides this and reports every failure as a bad request.
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Validation(_) => AppError::BadRequest(err.to_string()),
            ProductError::Connection(_) | ProductError::Database(_) => {
                AppError::InternalServerError(err.to_string())
            }
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. } | ErrorKind::DnsResolve { .. } => {
                ProductError::Connection(err.to_string())
            }
            _ => ProductError::Database(err.to_string()),
        }
    }
}
