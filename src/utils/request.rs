use actix_web::web;
use serde_json::Value;
use tracing::warn;

use crate::error::ApiError;
use crate::model::attendance::Document;

/// Request bodies must be JSON objects.
pub fn into_document(payload: Value) -> Result<Document, ApiError> {
    match payload {
        Value::Object(obj) => Ok(obj),
        _ => Err(ApiError::Validation("Payload must be a JSON object".to_string())),
    }
}

/// Malformed bodies answer with the usual error envelope. The content type is
/// not checked.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, req| {
            warn!(error = %err, path = %req.path(), "Rejected request body");
            ApiError::Validation(err.to_string()).into()
        })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| {
        warn!(error = %err, path = %req.path(), "Rejected query string");
        ApiError::Validation(err.to_string()).into()
    })
}
