use crate::error::StoreError;
use crate::model::Links;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Handle to the flat JSON file holding the whole link table.
///
/// Every load reads the full snapshot and every save overwrites it in place.
/// There is no locking: concurrent writers race and the last save wins. A crash
/// in the middle of a save can leave a truncated file behind.
#[derive(Debug, Clone)]
pub struct LinkStore {
    path: PathBuf,
}

impl LinkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Links, StoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!("Data file {} not found, starting empty", self.path.display());
                return Ok(Links::new());
            }
            Err(err) => return Err(err.into()),
        };
        if content.trim().is_empty() {
            return Ok(Links::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub async fn save(&self, links: &Links) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(links).map_err(StoreError::Encode)?;
        fs::write(&self.path, json).await?;
        Ok(())
    }
}
