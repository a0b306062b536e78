use std::path::PathBuf;

/// Fatal startup failures. Per-frame conditions (missing landmarks, low
/// confidence) flow through `Option` instead and never surface here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read gesture table {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse gesture table: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("gesture table contains no usable gestures")]
    NoUsableGestures,

    #[error("classifier artifact error: {0}")]
    Model(#[from] ort::OrtError),
}
