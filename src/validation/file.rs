use super::ValidationError;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
const ALLOWED_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// File part pulled out of a multipart form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl UploadedFile {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Create path: an image must be attached
pub fn validate_required_image(file: Option<UploadedFile>) -> Result<UploadedFile, ValidationError> {
    let file = file.ok_or_else(|| ValidationError::new("image", "Image file is required!"))?;
    check_image(&file)?;
    Ok(file)
}

/// Update path: only an attached image is checked
pub fn validate_optional_image(file: Option<&UploadedFile>) -> Result<(), ValidationError> {
    match file {
        Some(file) => check_image(file),
        None => Ok(()),
    }
}

fn check_image(file: &UploadedFile) -> Result<(), ValidationError> {
    if !ALLOWED_TYPES.contains(&file.content_type.as_str()) {
        return Err(ValidationError::new("image", "Only JPEG or PNG formats are allowed."));
    }
    if file.size() > MAX_IMAGE_BYTES {
        return Err(ValidationError::new("image", "Image size must not exceed 5MB."));
    }
    Ok(())
}
