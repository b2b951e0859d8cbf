use rocket::http::Status;
use rocket::response::{Responder, Response};
use rocket::serde::json::Json;
use serde::Serialize;
use shared::validation::ValidationError;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Too many requests. Wait a moment and try again")]
    RateLimited,
    #[error("Could not reload photos: {0}")]
    CatalogReload(String),
    #[error("Could not access the vote ledger")]
    Storage(#[from] sqlx::Error),
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let status = match &self {
            ApiError::Validation(_) | ApiError::CatalogReload(_) => Status::BadRequest,
            ApiError::RateLimited => Status::TooManyRequests,
            ApiError::Storage(_) => Status::InternalServerError,
        };

        // The wire message stays generic; the cause goes to the log.
        if let ApiError::Storage(e) = &self {
            error!("Ledger failure: {e}");
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        Response::build_from(body.respond_to(req)?).status(status).ok()
    }
}
