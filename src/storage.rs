use crate::errors::AppError;
use crate::models::VisitorData;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, warn};

pub async fn load_data(path: &Path) -> VisitorData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file {}: {err}", path.display());
                set_aside(path).await;
                VisitorData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => VisitorData::default(),
        Err(err) => {
            error!("failed to read data file {}: {err}", path.display());
            VisitorData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &VisitorData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data)?;
    fs::write(path, payload).await?;
    Ok(())
}

// Moves an unreadable file out of the way so the next write starts fresh
// without destroying it.
async fn set_aside(path: &Path) {
    let backup = unreadable_path(path);
    match fs::rename(path, &backup).await {
        Ok(()) => warn!("moved unreadable data file to {}", backup.display()),
        Err(err) => error!("failed to move unreadable data file aside: {err}"),
    }
}

fn unreadable_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".unreadable");
    path.with_file_name(name)
}
