//! Shared helpers and error types for ServiceDesk.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// Result type for shared helpers.
pub type UtilsResult<T> = Result<T, UtilsError>;

/// Shared error variants for cross-crate helpers.
#[derive(Debug, Error)]
pub enum UtilsError {
    /// An IO error occurred.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A parsing error occurred.
    #[error("parse error: {0}")]
    Parse(String),
}

/// MIME type of an image file, judged by its extension.
pub fn image_mime_type(path: &Path) -> UtilsResult<&'static str> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "gif" => Ok("image/gif"),
        "webp" => Ok("image/webp"),
        "svg" => Ok("image/svg+xml"),
        _ => Err(UtilsError::Parse(format!(
            "{} is not a supported image type",
            path.display()
        ))),
    }
}

/// Encode bytes as a `data:` URI.
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Read an image file into a `data:` URI.
pub fn read_image_data_uri(path: &Path) -> UtilsResult<String> {
    let mime = image_mime_type(path)?;
    let bytes = std::fs::read(path)?;
    Ok(encode_data_uri(mime, &bytes))
}

/// Initials shown in place of a profile picture, e.g. "Jo Park" -> "JP".
pub fn profile_initials(name: &str) -> String {
    let mut initials = String::new();
    for word in name.split_whitespace().take(2) {
        if let Some(first) = word.chars().next() {
            initials.extend(first.to_uppercase());
        }
    }
    if initials.is_empty() {
        initials.push('?');
    }
    initials
}

/// Shorten `text` to `width` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut short: String = text.chars().take(width - 1).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn encodes_png_as_data_uri() {
        assert_eq!(encode_data_uri("image/png", b"hi"), "data:image/png;base64,aGk=");
    }

    #[test]
    fn reads_image_file() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("avatar.JPG");
        std::fs::write(&path, [0xff, 0xd8, 0xff]).unwrap();
        assert_eq!(read_image_data_uri(&path).unwrap(), "data:image/jpeg;base64,/9j/");
    }

    #[test]
    fn rejects_unknown_extension() {
        let result = image_mime_type(Path::new("notes.txt"));
        assert!(matches!(result, Err(UtilsError::Parse(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let temp = TempDir::new().expect("temp dir");
        let result = read_image_data_uri(&temp.path().join("gone.png"));
        assert!(matches!(result, Err(UtilsError::Io(_))));
    }

    #[test]
    fn initials_use_first_two_words() {
        assert_eq!(profile_initials("jo park"), "JP");
        assert_eq!(profile_initials("User"), "U");
        assert_eq!(profile_initials("  "), "?");
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("Construction Management", 8), "Constru…");
        assert_eq!(truncate("Acme", 8), "Acme");
    }
}
