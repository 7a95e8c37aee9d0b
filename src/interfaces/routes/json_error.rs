use actix_web::{error::JsonPayloadError, web};

use crate::{constants::CONTACT_BODY_LIMIT, errors::AppError};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(CONTACT_BODY_LIMIT)
            .error_handler(|err, _req| {
                tracing::debug!("Rejected JSON payload: {}", err);
                AppError::from(err).into()
            }),
    );
}

impl From<JsonPayloadError> for AppError {
    fn from(err: JsonPayloadError) -> Self {
        match err {
            JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
                AppError::PayloadTooLarge
            }
            _ => AppError::BadRequest("Invalid JSON payload.".to_string()),
        }
    }
}
