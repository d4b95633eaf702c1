use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Backing store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Backing store is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Encoding links for the backing store failed: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Slug '{0}' already exists.")]
    AlreadyExists(String),

    #[error("Slug '{0}' does not exist.")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
