use anyhow::{Context, Result};
use game_core::{ImageFile, mime_type_for_extension};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Result of one background file read, delivered back to the game loop
#[derive(Debug)]
pub struct UploadOutcome {
    pub path: PathBuf,
    pub result: Result<ImageFile>,
}

/// Read an image file from disk. The bytes are not inspected; the MIME type
/// is guessed from the extension.
pub async fn load_image(path: &Path) -> Result<ImageFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image {}", path.display()))?;

    let mime_type = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(mime_type_for_extension)
        .map(str::to_string);

    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(ImageFile::new(bytes, mime_type))
}

/// Start reading `path` in the background. The outcome is sent on `tx`
/// exactly once; whichever upload finishes last wins.
pub fn spawn_upload(path: PathBuf, tx: UnboundedSender<UploadOutcome>) {
    tokio::spawn(async move {
        let result = load_image(&path).await;
        // Receiver gone means the session ended
        let _ = tx.send(UploadOutcome { path, result });
    });
}
