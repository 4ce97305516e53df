//! Form extractor that accepts either `multipart/form-data` or a JSON object.
//!
//! Browser forms post multipart bodies with an optional file part, API
//! clients post JSON. Both end up as the same flat set of text fields plus
//! at most one uploaded file, leaving typed parsing to the domain.

use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Json, Multipart, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;

/// Largest accepted file part.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// A file part taken from a multipart body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Form field the file was posted under
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Flat text fields and an optional file from a form or JSON body.
#[derive(Debug, Clone, Default)]
pub struct FormPayload {
    fields: HashMap<String, String>,
    file: Option<UploadedFile>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn with_file(mut self, file: UploadedFile) -> Self {
        self.file = Some(file);
        self
    }

    /// Text value of a field, if the client sent it.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn file(&self) -> Option<&UploadedFile> {
        self.file.as_ref()
    }

    pub fn take_file(&mut self) -> Option<UploadedFile> {
        self.file.take()
    }

    /// Build from a JSON object. Scalars become their text form, `null` counts as absent.
    pub fn from_json(value: serde_json::Value) -> Result<Self, AppError> {
        let serde_json::Value::Object(map) = value else {
            return Err(AppError::BadRequest(
                "Request body must be a JSON object".to_string(),
            ));
        };

        let mut payload = Self::default();
        for (name, value) in map {
            let text = match value {
                serde_json::Value::Null => continue,
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                    return Err(AppError::BadRequest(format!(
                        "Field '{name}' must be a string or a number"
                    )));
                }
            };
            payload.fields.insert(name, text);
        }
        Ok(payload)
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut payload = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field.bytes().await?;

                    // Browsers send an empty part when no file was picked
                    if bytes.is_empty() {
                        continue;
                    }
                    if bytes.len() > MAX_UPLOAD_BYTES {
                        return Err(AppError::BadRequest(format!(
                            "Image must be {} MB or smaller",
                            MAX_UPLOAD_BYTES / (1024 * 1024)
                        )));
                    }

                    if payload.file.is_some() {
                        return Err(AppError::BadRequest(
                            "Only one file can be uploaded per request".to_string(),
                        ));
                    }

                    payload.file = Some(UploadedFile {
                        field: name,
                        file_name,
                        content_type,
                        bytes,
                    });
                }
                None => {
                    let value = field.text().await?;
                    payload.fields.insert(name, value);
                }
            }
        }

        Ok(payload)
    }
}

impl<S> FromRequest<S> for FormPayload
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Self::from_multipart(multipart)
                .await
                .map_err(IntoResponse::into_response)
        } else {
            let Json(value) = Json::<serde_json::Value>::from_request(req, state)
                .await
                .map_err(|e| AppError::from(e).into_response())?;
            Self::from_json(value).map_err(IntoResponse::into_response)
        }
    }
}
