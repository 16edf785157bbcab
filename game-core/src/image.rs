use base64::{Engine, engine::general_purpose::STANDARD};
use game_types::ImageRef;

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Raw bytes of a user-selected image file. Contents are not inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub bytes: Vec<u8>,
    pub mime_type: Option<String>,
}

impl ImageFile {
    pub fn new(bytes: Vec<u8>, mime_type: Option<String>) -> Self {
        Self { bytes, mime_type }
    }

    /// Encode as a `data:` URL the presentation layer can display directly
    pub fn to_data_url(&self) -> ImageRef {
        let mime = self
            .mime_type
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(FALLBACK_MIME_TYPE);

        ImageRef(format!("data:{};base64,{}", mime, STANDARD.encode(&self.bytes)))
    }
}

/// Best-effort MIME type from a file extension
pub fn mime_type_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}
