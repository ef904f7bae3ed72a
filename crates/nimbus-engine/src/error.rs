use thiserror::Error;

/// Failures loading or looking up assets.
///
/// Asset loading happens before a scene starts ticking; these errors go back
/// to whoever awaited the load and never reach the tick loop.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("invalid asset manifest: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("unknown asset `{0}`")]
    Unknown(String),
    #[error("failed to load `{path}`: {reason}")]
    Load { path: String, reason: String },
}

impl AssetError {
    pub fn load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        AssetError::Load {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
