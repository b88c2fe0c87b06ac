use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use uuid::Uuid;

use super::error::AppError;

/// Flat key/value file store. Keys are plain file names.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn upload(&self, key: &str, data: Vec<u8>) -> Result<(), AppError>;
    async fn download(&self, key: &str) -> Result<Vec<u8>, AppError>;
}

pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub async fn new(base_path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let base_path = base_path.into();
        if !base_path.exists() {
            fs::create_dir_all(&base_path).await?;
        }
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolve `key` inside the base directory; rejects anything that is not
    /// a single plain path component.
    fn resolve(&self, key: &str) -> Result<PathBuf, AppError> {
        let is_plain = !key.is_empty()
            && !key.starts_with('.')
            && Path::new(key).file_name().and_then(|n| n.to_str()) == Some(key);
        if !is_plain {
            return Err(AppError::BadRequest(format!(
                "'{key}' is not a valid file reference"
            )));
        }
        Ok(self.base_path.join(key))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload(&self, key: &str, data: Vec<u8>) -> Result<(), AppError> {
        let path = self.resolve(key)?;
        fs::write(path, data).await?;
        Ok(())
    }

    async fn download(&self, key: &str) -> Result<Vec<u8>, AppError> {
        let path = self.resolve(key)?;
        match fs::read(path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(AppError::NotFound(format!("'{key}' does not exist")))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Timestamp-based file name, unique across concurrent requests:
/// `<prefix>-<unix millis>-<8 hex chars>.<extension>`.
pub fn unique_file_name(prefix: &str, extension: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{prefix}-{}-{}.{extension}",
        Utc::now().timestamp_millis(),
        &suffix[..8]
    )
}
