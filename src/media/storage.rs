use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, ImageReader};
use thiserror::Error;
use tokio::fs;
use tracing::info;
use uuid::Uuid;

/// Formats an upload may be stored as
const ACCEPTED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Gif,
    ImageFormat::WebP,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
];

/// Longest stored path, matching the `image` column width
const MAX_NAME_CHARS: usize = 100;

/// Longest extension kept from the client's file name
const MAX_EXT_CHARS: usize = 10;

/// `_` plus seven random characters, appended on a name collision
const SUFFIX_CHARS: usize = 8;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("The submitted file is empty.")]
    EmptyFile,

    #[error("Upload a valid image. The file you uploaded was either not an image or a corrupted image.")]
    InvalidImage,

    #[error("Failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes uploads below the configured media root.
#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
}

impl MediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sniffs the format from the content and decodes the header, so a
    /// renamed text file or a truncated image is rejected.
    pub fn verify_image(bytes: &[u8]) -> Result<ImageFormat, MediaError> {
        if bytes.is_empty() {
            return Err(MediaError::EmptyFile);
        }

        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|_| MediaError::InvalidImage)?;

        let format = reader
            .format()
            .filter(|f| ACCEPTED_FORMATS.contains(f))
            .ok_or(MediaError::InvalidImage)?;

        reader.into_dimensions().map_err(|_| MediaError::InvalidImage)?;
        Ok(format)
    }

    /// Stores `bytes` under a sanitized version of `original_name` and returns
    /// the path relative to the media root. An existing file is never
    /// overwritten; a random suffix is appended instead. The returned name,
    /// suffix included, is at most `MAX_NAME_CHARS` long.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, MediaError> {
        fs::create_dir_all(&self.root).await?;

        let (stem, ext) = split_name(&sanitize_file_name(original_name));
        let mut name = join_name(&stem, &ext);

        while fs::try_exists(self.root.join(&name)).await? {
            let suffix = Uuid::new_v4().simple().to_string();
            name = join_name(&format!("{}_{}", stem, &suffix[..7]), &ext);
        }

        fs::write(self.root.join(&name), bytes).await?;
        info!("Stored upload {} ({} bytes)", name, bytes.len());
        Ok(name)
    }

    /// Deletes a previously stored upload. A file that is already gone is
    /// not an error.
    pub async fn remove(&self, name: &str) -> Result<(), MediaError> {
        match fs::remove_file(self.root.join(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keeps only the final path component and replaces anything outside
/// `[A-Za-z0-9._-]` with `_`.
fn sanitize_file_name(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

fn split_name(name: &str) -> (String, String) {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext: String = ext.chars().take(MAX_EXT_CHARS).collect();
            (truncate(stem), ext.to_ascii_lowercase())
        }
        _ => (truncate(name), String::new()),
    }
}

fn truncate(stem: &str) -> String {
    // Room for the dot, the longest extension and a collision suffix
    stem.chars()
        .take(MAX_NAME_CHARS - MAX_EXT_CHARS - 1 - SUFFIX_CHARS)
        .collect()
}

fn join_name(stem: &str, ext: &str) -> String {
    if ext.is_empty() {
        stem.to_string()
    } else {
        format!("{}.{}", stem, ext)
    }
}
