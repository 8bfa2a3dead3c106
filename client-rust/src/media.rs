use base64::{engine::general_purpose::STANDARD, Engine as _};

/// An image picked from disk, ready to be embedded in a create/update
/// payload as a data URL.
///
/// No size or type enforcement happens here beyond the MIME guess; the file
/// picker is the only filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = guess_mime_type(&file_name).to_string();
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }

    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    #[must_use]
    pub fn to_data_url(&self) -> String {
        data_url(&self.mime_type, &self.bytes)
    }
}

#[must_use]
pub fn data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

fn guess_mime_type(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_bytes_as_data_url() {
        let upload = ImageUpload::new("avatar.PNG", b"hello".to_vec());
        assert_eq!(upload.mime_type, "image/png");
        assert_eq!(upload.to_data_url(), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn unknown_extension_falls_back_to_octet_stream() {
        let upload = ImageUpload::new("thumbnail", vec![1, 2, 3]);
        assert_eq!(upload.mime_type, "application/octet-stream");
        assert_eq!(
            upload.with_mime_type("image/heic").to_data_url(),
            "data:image/heic;base64,AQID"
        );
    }
}
