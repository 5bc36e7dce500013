use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::validation::UploadedFile;

/// Form field carrying the employee photo
pub const IMAGE_FIELD: &str = "image";

/// Employee request body from either a multipart form (text parts plus an
/// optional `image` file) or a plain JSON object.
#[derive(Debug)]
pub struct EmployeePayload {
    pub body: Value,
    pub image: Option<UploadedFile>,
}

#[async_trait]
impl<S> FromRequest<S> for EmployeePayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("multipart/form-data"))
            .unwrap_or(false);

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            return read_multipart(multipart).await;
        }

        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_json(e.body_text()))?;
        Ok(Self { body, image: None })
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<EmployeePayload, ApiError> {
    let mut fields = Map::new();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if let Some(file_name) = field.file_name() {
            // Browsers send an unnamed empty part for an untouched file input
            if file_name.is_empty() {
                continue;
            }
            if name != IMAGE_FIELD || image.is_some() {
                return Err(ApiError::bad_request(format!("Unexpected file field '{}'", name)));
            }
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            image = Some(UploadedFile::new(bytes.to_vec(), content_type));
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            fields.insert(name, Value::String(text));
        }
    }

    Ok(EmployeePayload {
        body: Value::Object(fields),
        image,
    })
}
