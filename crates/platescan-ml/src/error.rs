use std::path::PathBuf;

/// Errors raised while loading or validating a model.
#[derive(thiserror::Error, Debug)]
pub enum ModelLoadError {
    #[error("cannot read model file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed model file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid model: {0}")]
    Invalid(String),
}

/// Errors raised by a prediction call.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    #[error("feature vector has {got} values, model expects {expected}")]
    FeatureLength { expected: usize, got: usize },
}
