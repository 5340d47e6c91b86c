use std::path::PathBuf;

use platescan_ml::ModelLoadError;

/// Errors produced by the [`Recognizer`](crate::Recognizer) entry points.
///
/// Finding no plate is not an error; it yields an empty result list.
#[derive(thiserror::Error, Debug)]
pub enum RecognizeError {
    #[error("not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    ModelLoad(#[from] ModelLoadError),

    #[error("invalid config {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}
