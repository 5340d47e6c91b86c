//! JSON model files.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::ModelLoadError;

/// A model stored as a JSON document.
///
/// `from_document` validates shapes and builds whatever the model needs for
/// inference; a model value only exists once that succeeded.
pub trait JsonModel: Sized {
    type Document: Serialize + DeserializeOwned;

    fn from_document(doc: Self::Document) -> Result<Self, ModelLoadError>;

    fn to_document(&self) -> Self::Document;

    fn from_json_str(raw: &str) -> Result<Self, ModelLoadError> {
        Self::from_document(serde_json::from_str(raw)?)
    }

    fn load_json(path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ModelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let doc = serde_json::from_str(&raw).map_err(|source| ModelLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::from_document(doc)?;
        log::debug!("loaded model from {}", path.display());
        Ok(model)
    }

    fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ModelLoadError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.to_document())?;
        fs::write(path, json).map_err(|source| ModelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
