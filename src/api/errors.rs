use actix_web::{
    body::BoxBody,
    error::JsonPayloadError,
    http::{
        self,
        header::{self, HeaderValue},
    },
    HttpRequest, HttpResponse, ResponseError,
};
use derive_more::Display;
use serde_json::json;
use std::convert::From;

use crate::errors::{RepositoryError, StoreError};
use crate::models::validation::{FieldErrorKind, ValidationError};

#[derive(Debug, Display)]
pub enum TodoApiError {
    #[display(fmt = "Validation Error: {}", _0)]
    Validation(ValidationError),

    #[display(fmt = "{} was not found", _0)]
    NotFound(String),

    #[display(fmt = "Todo with title {} not found or not updated", _0)]
    NotUpdated(String),

    #[display(fmt = "The updated todo could not be retrieved.")]
    Unreadable,

    #[display(fmt = "No todos to delete")]
    NothingToDelete,

    #[display(fmt = "Database Connection Error")]
    DatabaseConnectionError,

    #[display(fmt = "Internal Server Error")]
    InternalServerError,
}

impl ResponseError for TodoApiError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            TodoApiError::Validation(_) => http::StatusCode::UNPROCESSABLE_ENTITY,
            TodoApiError::NotFound(_)
            | TodoApiError::NotUpdated(_)
            | TodoApiError::Unreadable
            | TodoApiError::NothingToDelete => http::StatusCode::NOT_FOUND,
            TodoApiError::DatabaseConnectionError => http::StatusCode::SERVICE_UNAVAILABLE,
            TodoApiError::InternalServerError => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        let mut res = HttpResponse::new(self.status_code());

        res.headers_mut().append(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let detail = match self {
            TodoApiError::Validation(e) => json!({ "detail": e.errors() }),
            _ => json!({ "detail": self.to_string() }),
        };

        res.set_body(BoxBody::new(detail.to_string()))
    }
}

impl From<ValidationError> for TodoApiError {
    fn from(e: ValidationError) -> Self {
        TodoApiError::Validation(e)
    }
}

impl From<RepositoryError> for TodoApiError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound { title } => TodoApiError::NotUpdated(title),
            RepositoryError::Unreadable { .. } => TodoApiError::Unreadable,
            RepositoryError::Store(e) => {
                log::error!("{}", e);

                match e {
                    StoreError::Unavailable(_) => TodoApiError::DatabaseConnectionError,
                    StoreError::Query(_) => TodoApiError::InternalServerError,
                }
            }
        }
    }
}

/// Reports undecodable JSON bodies as validation failures
pub fn json_error_handler(err: JsonPayloadError, _: &HttpRequest) -> actix_web::Error {
    let kind = match err {
        JsonPayloadError::ContentType => FieldErrorKind::DictType,
        _ => FieldErrorKind::JsonInvalid,
    };

    TodoApiError::Validation(ValidationError::body(kind, err.to_string())).into()
}
