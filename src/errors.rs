use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::{self, ContentType}, StatusCode},
    HttpResponse
};
use derive_more::Display;

use crate::constants::{
    INVALID_EMAIL_MESSAGE, MISSING_FIELDS_MESSAGE, RATE_LIMITED_MESSAGE, SERVER_ERROR_MESSAGE,
};

/// The contact form fields subject to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContactField::Name => "Name",
            ContactField::Email => "Email",
            ContactField::Message => "Message",
        };
        write!(f, "{s}")
    }
}

/// Outcome of a failed validation rule.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[display("{}", MISSING_FIELDS_MESSAGE)]
    MissingField,

    #[display("{}", INVALID_EMAIL_MESSAGE)]
    InvalidEmail,

    #[display("{field} must be at most {max} characters.")]
    TooLong { field: ContactField, max: usize },
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Display)]
pub enum AppError {
    #[display("{_0}")]
    Validation(ValidationError),

    #[display("{_0}")]
    BadRequest(String),

    #[display("Payload too large.")]
    PayloadTooLarge,

    #[display("{}", RATE_LIMITED_MESSAGE)]
    RateLimited { retry_after_secs: u64 },

    #[display("Store write failed: {_0}")]
    StoreWriteFailed(String),

    #[display("Store unavailable: {_0}")]
    StoreUnavailable(String),

    #[display("Not allowed by CORS")]
    CorsRejected,
}

impl std::error::Error for AppError {}

impl AppError {
    /// The message exposed to clients. Store failures never leak their detail.
    pub fn public_message(&self) -> String {
        match self {
            AppError::StoreWriteFailed(_) | AppError::StoreUnavailable(_) => {
                SERVER_ERROR_MESSAGE.to_string()
            }
            _ => self.to_string(),
        }
    }

    pub fn to_http_response(&self) -> HttpResponse {
        self.error_response()
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        builder.insert_header(ContentType::json());

        if let AppError::RateLimited { retry_after_secs } = self {
            builder.insert_header((header::RETRY_AFTER, retry_after_secs.to_string()));
        }

        builder.json(serde_json::json!({ "error": self.public_message() }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::StoreWriteFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::CorsRejected => StatusCode::FORBIDDEN,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                AppError::StoreUnavailable(err.to_string())
            }
            _ => AppError::StoreWriteFailed(err.to_string()),
        }
    }
}
