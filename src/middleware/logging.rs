use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::services::ServiceError;

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed = start.elapsed();
    match response.extensions().get::<Result<(), ApiError>>() {
        Some(Ok(())) => info!(
            method = %method,
            uri = %uri,
            status = %status,
            elapsed = ?elapsed,
            "Processed request"
        ),
        Some(Err(value)) if status.is_server_error() => error!(
            method = %method,
            uri = %uri,
            status = %status,
            elapsed = ?elapsed,
            value = %value,
            "Failed to process request"
        ),
        Some(Err(value)) => warn!(
            method = %method,
            uri = %uri,
            status = %status,
            elapsed = ?elapsed,
            value = %value,
            "Rejected request"
        ),
        None => debug!(
            method = %method,
            uri = %uri,
            status = %status,
            elapsed = ?elapsed,
            "Processed request, but no Response extension is set"
        ),
    }

    response
}

/// Diagnostic attached to a response for the logging middleware.
/// Never rendered to the client.
#[derive(Clone, Debug, Error)]
pub enum ApiError {
    #[error("{operation}: failed to create transaction: {detail}")]
    TransactionCreationFailed { operation: &'static str, detail: String },
    #[error("{operation}: database error: {detail}")]
    DbError { operation: &'static str, detail: String },
    #[error("{operation}: failed to validate: {detail}")]
    ValidationFail { operation: &'static str, detail: String },
    #[error("{operation}: {detail}")]
    NotFound { operation: &'static str, detail: String },
}

impl ApiError {
    pub fn from_service(operation: &'static str, err: &ServiceError) -> Self {
        let detail = err.to_string();
        match err {
            ServiceError::Transaction(_) => Self::TransactionCreationFailed { operation, detail },
            ServiceError::ItemInsert(_) | ServiceError::Commit(_) | ServiceError::Storage(_) => {
                Self::DbError { operation, detail }
            }
            ServiceError::Validation(_)
            | ServiceError::InvalidId(_)
            | ServiceError::InvalidStatus(_) => Self::ValidationFail { operation, detail },
            ServiceError::ProductNotFound(_) | ServiceError::OrderNotFound(_) => {
                Self::NotFound { operation, detail }
            }
        }
    }
}

pub fn to_response<T: IntoResponse>(
    response: T,               //The response that we are sending + StatusCode
    ext: Result<(), ApiError>, //The extension, that we want to give logging middleware
) -> Response {
    let mut response = response.into_response();

    response.extensions_mut().insert(ext);

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn to_response_keeps_the_extension() {
        let response = to_response(
            StatusCode::BAD_REQUEST,
            Err(ApiError::from_service(
                "create_order",
                &ServiceError::ProductNotFound(9),
            )),
        );

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let ext = response
            .extensions()
            .get::<Result<(), ApiError>>()
            .expect("extension should be set");
        let message = ext.as_ref().unwrap_err().to_string();
        assert_eq!(message, "create_order: Product 9 not found");
    }
}
