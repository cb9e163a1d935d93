//! Page error type with IntoResponse
//!
//! Errors render the shared error template with the mapped status code.
//! Database details are logged, never shown to the client.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::db::DbError;
use crate::models::ValidationError;
use crate::views::ErrorTemplate;

/// Error type for page handlers with automatic HTTP status mapping
#[derive(Debug)]
pub enum PageError {
    /// Form validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Unique-name or delete-restriction conflict (409)
    Conflict { detail: String },

    /// Insert referenced a missing row (422)
    UnprocessableEntity { detail: String },

    /// Database error (500, logged)
    Database(DbError),

    /// Template rendering failed (500, logged)
    Render(askama::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                format!("{} '{}' not found", resource, id),
            ),
            Self::Conflict { detail } => (StatusCode::CONFLICT, detail.clone()),
            Self::UnprocessableEntity { detail } => {
                (StatusCode::UNPROCESSABLE_ENTITY, detail.clone())
            }
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_owned(),
                )
            }
            Self::Render(e) => {
                tracing::error!("Template error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_owned(),
                )
            }
        };

        error_page(status, message)
    }
}

/// Render the error template with the given status.
pub fn error_page(status: StatusCode, message: String) -> Response {
    let template = ErrorTemplate {
        status: status.as_u16(),
        title: status
            .canonical_reason()
            .unwrap_or("Error")
            .to_owned(),
        message,
    };
    match askama::Template::render(&template) {
        Ok(html) => (status, Html(html)).into_response(),
        // Template failure on the error path: fall back to plain text
        Err(err) => {
            tracing::error!("Error template failed to render: {}", err);
            (status, "an internal error occurred").into_response()
        }
    }
}

impl From<ValidationError> for PageError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for PageError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Conflict { detail } => Self::Conflict { detail },
            DbError::ForeignKey { detail } => Self::UnprocessableEntity { detail },
            other => Self::Database(other),
        }
    }
}

impl From<askama::Error> for PageError {
    fn from(e: askama::Error) -> Self {
        Self::Render(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = PageError::Validation(ValidationError::Empty { field: "name" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let err = PageError::NotFound {
            resource: "venue",
            id: "99".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn conflict_is_409() {
        let err = PageError::Conflict {
            detail: "venue 'The Musical Hop' is already listed".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn db_not_found_maps_through() {
        let err: PageError = DbError::NotFound {
            resource: "artist",
            id: "7".into(),
        }
        .into();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn fk_violation_is_422() {
        let err: PageError = DbError::ForeignKey {
            detail: "venue 1 or artist 2 does not exist".into(),
        }
        .into();
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
