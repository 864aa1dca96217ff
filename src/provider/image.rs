use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

const DEFAULT_MIME: &str = "image/jpeg";

/// Largest photo accepted for inline upload.
pub const MAX_IMAGE_BYTES: u64 = 8 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("could not read image: {0}")]
    Io(#[from] io::Error),
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("image data is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("image is {size} bytes, the limit is {limit}")]
    TooLarge { size: u64, limit: u64 },
}

/// Replace a leading `~` or `~/` with `home`. Anything else, including
/// `~user` forms, is returned unchanged.
pub fn expand_home(input: &str, home: Option<&Path>) -> PathBuf {
    match (input.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with(['/', '\\']) => {
            home.join(rest.trim_start_matches(['/', '\\']))
        }
        _ => PathBuf::from(input),
    }
}


/// Photo of a handwritten essay, ready to inline into a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EssayImage {
    pub mime_type: String,
    /// Base64 payload without any `data:` header.
    pub data: String,
}

impl EssayImage {
    pub fn from_path(path: &Path) -> Result<Self, ImageError> {
        Self::from_path_capped(path, MAX_IMAGE_BYTES)
    }

    fn from_path_capped(path: &Path, limit: u64) -> Result<Self, ImageError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let mime_type = mime_for_extension(&ext)
            .ok_or_else(|| ImageError::UnsupportedFormat(ext.clone()))?;
        let size = fs::metadata(path)?.len();
        if size > limit {
            return Err(ImageError::TooLarge { size, limit });
        }
        let bytes = fs::read(path)?;
        Ok(Self {
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(bytes),
        })
    }

    /// Accepts either `data:image/png;base64,AAAA` or bare base64.
    pub fn from_data_url(input: &str) -> Result<Self, ImageError> {
        let input = input.trim();
        let (mime_type, data) = match input.split_once(',') {
            Some((header, data)) => (mime_from_header(header), data),
            None => (DEFAULT_MIME.to_string(), input),
        };
        STANDARD.decode(data)?;
        Ok(Self {
            mime_type,
            data: data.to_string(),
        })
    }

    /// Interpret user input from the essay screen as a data URL or a file
    /// path, which may start with `~`.
    pub fn load(input: &str) -> Result<Self, ImageError> {
        Self::load_with_home(input, dirs::home_dir().as_deref())
    }

    fn load_with_home(input: &str, home: Option<&Path>) -> Result<Self, ImageError> {
        let input = input.trim();
        if input.starts_with("data:") {
            Self::from_data_url(input)
        } else {
            Self::from_path(&expand_home(input, home))
        }
    }
}

fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

fn mime_from_header(header: &str) -> String {
    header
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .filter(|mime| mime.starts_with("image/"))
        .unwrap_or(DEFAULT_MIME)
        .to_string()
}
