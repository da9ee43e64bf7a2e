use serde::{Deserialize, Serialize};

/// Multipart field carrying the uploaded series file.
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Characters of the uploaded file shown as a text preview.
pub const UPLOAD_PREVIEW_CHARS: usize = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadFormat {
    Csv,
    Json,
}

impl UploadFormat {
    /// Detects the upload format from the file name or its MIME type.
    #[must_use]
    pub fn detect(file_name: &str, mime_type: &str) -> Option<Self> {
        let name = file_name.to_ascii_lowercase();
        let mime = mime_type.to_ascii_lowercase();
        if name.ends_with(".csv") || mime.contains("csv") {
            Some(Self::Csv)
        } else if name.ends_with(".json") || mime.contains("json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

/// Leading slice of the file contents, cut on a character boundary.
#[must_use]
pub fn upload_preview(contents: &str) -> &str {
    match contents.char_indices().nth(UPLOAD_PREVIEW_CHARS) {
        Some((end, _)) => &contents[..end],
        None => contents,
    }
}

/// Rounded upload percentage, `None` while the total size is unknown.
#[must_use]
pub fn upload_progress_percent(loaded: u64, total: u64) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let ratio = loaded.min(total) as f64 / total as f64;
    Some((ratio * 100.0).round() as u8)
}
