//! JSON configuration of a [`Recognizer`](crate::Recognizer).

use std::fs;
use std::path::{Path, PathBuf};

use platescan_chars::SegmentParams;
use platescan_locate::{AcceptParams, ColorParams, LocateParams};
use serde::{Deserialize, Serialize};

use crate::RecognizeError;

/// Model files, produced by the offline trainer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelPaths {
    /// Plate acceptance SVM.
    pub plate_svm: PathBuf,
    /// Administrative-character MLP.
    pub province_mlp: PathBuf,
    /// Default alphanumeric MLP.
    pub alnum_mlp: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alnum_green_mlp: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alnum_yellow_mlp: Option<PathBuf>,
}

impl ModelPaths {
    fn resolve_against(&mut self, base: &Path) {
        let required = [
            &mut self.plate_svm,
            &mut self.province_mlp,
            &mut self.alnum_mlp,
        ];
        let optional = self
            .alnum_green_mlp
            .as_mut()
            .into_iter()
            .chain(self.alnum_yellow_mlp.as_mut());
        for p in required.into_iter().chain(optional) {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        }
    }
}

/// Stage parameters of the pipeline. Every field has a default.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    pub locate: LocateParams,
    pub accept: AcceptParams,
    pub color: ColorParams,
    pub segment: SegmentParams,
    /// Merge results whose source boxes overlap with at least this IoU,
    /// keeping the most confident one. Off when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dedup_iou: Option<f32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecognizerConfig {
    pub models: ModelPaths,
    #[serde(default)]
    pub pipeline: PipelineParams,
    /// Directory for intermediate images; nothing is written when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_dir: Option<PathBuf>,
}

impl RecognizerConfig {
    pub fn new(models: ModelPaths) -> Self {
        Self {
            models,
            pipeline: PipelineParams::default(),
            debug_dir: None,
        }
    }

    /// Load a JSON config from disk.
    ///
    /// Relative model paths are resolved against the config file's directory.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, RecognizeError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| RecognizeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self =
            serde_json::from_str(&raw).map_err(|e| RecognizeError::Config {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        if let Some(base) = path.parent() {
            config.models.resolve_against(base);
        }
        config.validate().map_err(|reason| RecognizeError::Config {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(config)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), RecognizeError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|e| RecognizeError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        fs::write(path, json).map_err(|source| RecognizeError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks the values serde cannot.
    pub fn validate(&self) -> Result<(), String> {
        let p = &self.pipeline;
        if p.locate.working_width == 0 {
            return Err("locate.working_width must be positive".into());
        }
        if p.segment.max_chars == 0 {
            return Err("segment.max_chars must be positive".into());
        }
        if p.segment.char_size == 0 {
            return Err("segment.char_size must be positive".into());
        }
        if let Some(t) = p.dedup_iou {
            if !(t > 0.0 && t <= 1.0) {
                return Err(format!("dedup_iou must be in (0, 1], got {t}"));
            }
        }
        Ok(())
    }
}
