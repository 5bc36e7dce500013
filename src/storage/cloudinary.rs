use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::{ImageStore, ImageStoreError};
use crate::config::ImageStoreConfig;
use crate::database::models::EmployeeImage;

const API_BASE: &str = "https://api.cloudinary.com/v1_1";
const ALLOWED_FORMATS: &str = "jpg,png";

/// Cloudinary upload API client. Requests are signed with SHA-256 over the
/// sorted parameters followed by the API secret.
pub struct CloudinaryImageStore {
    client: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    folder: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ErrorMessage {
    message: String,
}

impl CloudinaryImageStore {
    pub fn from_config(config: &ImageStoreConfig) -> Result<Self, ImageStoreError> {
        let cloud_name = config
            .cloud_name
            .clone()
            .ok_or(ImageStoreError::NotConfigured("CLOUDINARY_CLOUD_NAME"))?;
        let api_key = config
            .api_key
            .clone()
            .ok_or(ImageStoreError::NotConfigured("CLOUDINARY_API_KEY"))?;
        let api_secret = config
            .api_secret
            .clone()
            .ok_or(ImageStoreError::NotConfigured("CLOUDINARY_API_SECRET"))?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            cloud_name,
            api_key,
            api_secret,
            folder: config.folder.clone(),
        })
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/{}/image/{}", API_BASE, self.cloud_name, action)
    }

    fn timestamp() -> String {
        chrono::Utc::now().timestamp().to_string()
    }

    async fn read_error(response: reqwest::Response) -> ImageStoreError {
        let status = response.status();
        match response.json::<ErrorResponse>().await {
            Ok(body) => ImageStoreError::Rejected(body.error.message),
            Err(_) => ImageStoreError::Rejected(format!("HTTP {}", status)),
        }
    }
}

/// `key=value` pairs sorted by key, joined with `&`, then the secret appended
pub(crate) fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

fn file_name_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "upload.png",
        _ => "upload.jpg",
    }
}

#[async_trait]
impl ImageStore for CloudinaryImageStore {
    async fn upload(&self, bytes: Vec<u8>, content_type: &str) -> Result<EmployeeImage, ImageStoreError> {
        let timestamp = Self::timestamp();
        let signature = sign(
            &[
                ("allowed_formats", ALLOWED_FORMATS),
                ("folder", &self.folder),
                ("timestamp", &timestamp),
            ],
            &self.api_secret,
        );

        let file = Part::bytes(bytes)
            .file_name(file_name_for(content_type))
            .mime_str(content_type)?;

        let form = Form::new()
            .part("file", file)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", self.folder.clone())
            .text("allowed_formats", ALLOWED_FORMATS)
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::read_error(response).await);
        }

        let body: UploadResponse = response.json().await?;
        tracing::info!("Uploaded image asset {}", body.public_id);

        Ok(EmployeeImage {
            url: body.secure_url,
            public_id: body.public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), ImageStoreError> {
        let timestamp = Self::timestamp();
        let signature = sign(
            &[("public_id", public_id), ("timestamp", &timestamp)],
            &self.api_secret,
        );

        let params = [
            ("public_id", public_id),
            ("timestamp", timestamp.as_str()),
            ("api_key", self.api_key.as_str()),
            ("signature", signature.as_str()),
            ("signature_algorithm", "sha256"),
        ];

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::read_error(response).await);
        }

        let body: DestroyResponse = response.json().await?;
        match body.result.as_str() {
            "ok" => {
                tracing::info!("Deleted image asset {}", public_id);
                Ok(())
            }
            // Already gone; the caller's intent is satisfied
            "not found" => {
                tracing::warn!("Image asset {} was already absent", public_id);
                Ok(())
            }
            other => Err(ImageStoreError::Rejected(format!(
                "destroy {} returned '{}'",
                public_id, other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_sorts_params_and_skips_empty() {
        let a = sign(&[("timestamp", "1315060510"), ("folder", "assignment")], "secret");
        let b = sign(
            &[("folder", "assignment"), ("eager", ""), ("timestamp", "1315060510")],
            "secret",
        );
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);

        let mut hasher = Sha256::new();
        hasher.update(b"folder=assignment&timestamp=1315060510secret");
        assert_eq!(a, hex::encode(hasher.finalize()));
    }

    #[test]
    fn requires_credentials() {
        let config = ImageStoreConfig::default();
        let err = CloudinaryImageStore::from_config(&config).err().unwrap();
        assert!(matches!(err, ImageStoreError::NotConfigured("CLOUDINARY_CLOUD_NAME")));
    }

    #[test]
    fn builds_endpoint_from_cloud_name() {
        let config = ImageStoreConfig {
            cloud_name: Some("demo".to_string()),
            api_key: Some("key".to_string()),
            api_secret: Some("secret".to_string()),
            ..ImageStoreConfig::default()
        };
        let store = CloudinaryImageStore::from_config(&config).unwrap();
        assert_eq!(
            store.endpoint("upload"),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
    }
}
