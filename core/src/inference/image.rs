use std::path::Path;

/// Image payload handed to the inference service as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl RawImage {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// MIME type guessed from the filename extension, `None` for non-images.
    pub fn content_type(&self) -> Option<&'static str> {
        image_content_type(Path::new(&self.filename))
    }
}

pub fn image_content_type(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        _ => return None,
    };
    Some(mime)
}
