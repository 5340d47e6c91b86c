//! End-to-end pipeline: photograph in, plate readings out.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::ImageReader;
use platescan_chars::{
    char_features, Alphabet, AlnumVariants, CharClassifier, CharModelSet, CharSegmenter,
    Segmentation,
};
use platescan_core::{DebugDump, PlateColor, RgbImage};
use platescan_locate::{accept_plate, classify_color, CandidateCrop};
use platescan_ml::{JsonModel, ModelLoadError, ModelSlot, SvmModel};
use rayon::prelude::*;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    CharacterResult, ModelPaths, PipelineParams, PlateRecognitionResult, RecognizeError,
    RecognizerConfig,
};

/// Every model the pipeline needs, fully loaded.
#[derive(Clone, Debug)]
pub struct RecognizerModels {
    pub plate: SvmModel,
    pub province: CharClassifier,
    pub alnum: CharClassifier,
    pub variants: AlnumVariants,
}

impl RecognizerModels {
    pub fn load(paths: &ModelPaths) -> Result<Self, ModelLoadError> {
        let optional = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| CharClassifier::load_json(p, Alphabet::alnum()))
                .transpose()
        };
        Ok(Self {
            plate: SvmModel::load_json(&paths.plate_svm)?,
            province: CharClassifier::load_json(&paths.province_mlp, Alphabet::provinces())?,
            alnum: CharClassifier::load_json(&paths.alnum_mlp, Alphabet::alnum())?,
            variants: AlnumVariants {
                green: optional(&paths.alnum_green_mlp)?,
                yellow: optional(&paths.alnum_yellow_mlp)?,
            },
        })
    }
}

/// Models captured for one `recognize` call.
struct Snapshot {
    plate: Arc<SvmModel>,
    chars: CharModelSet,
}

/// License plate recognizer.
///
/// Shareable across threads. Each model sits in its own [`ModelSlot`] and can
/// be reloaded while recognitions run; a call in flight keeps the models it
/// started with.
pub struct Recognizer {
    plate: ModelSlot<SvmModel>,
    province: ModelSlot<CharClassifier>,
    alnum: ModelSlot<CharClassifier>,
    variants: ModelSlot<AlnumVariants>,
    params: PipelineParams,
    segmenter: CharSegmenter,
    dump: DebugDump,
}

impl Recognizer {
    pub fn new(models: RecognizerModels, params: PipelineParams) -> Self {
        Self {
            plate: ModelSlot::new(models.plate),
            province: ModelSlot::new(models.province),
            alnum: ModelSlot::new(models.alnum),
            variants: ModelSlot::new(models.variants),
            segmenter: CharSegmenter::new(params.segment.clone()),
            params,
            dump: DebugDump::disabled(),
        }
    }

    /// Load every model named in `config` and build a recognizer.
    pub fn from_config(config: &RecognizerConfig) -> Result<Self, RecognizeError> {
        let models = RecognizerModels::load(&config.models)?;
        let mut rec = Self::new(models, config.pipeline.clone());
        if let Some(dir) = &config.debug_dir {
            rec = rec.with_debug_dir(dir);
        }
        Ok(rec)
    }

    /// Write intermediate images of every call into `dir`.
    pub fn with_debug_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dump = DebugDump::to_dir(dir);
        self
    }

    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            plate: self.plate.snapshot(),
            chars: self.char_models(),
        }
    }

    /// The character models a recognition started now would use.
    pub fn char_models(&self) -> CharModelSet {
        CharModelSet {
            province: self.province.snapshot(),
            alnum: self.alnum.snapshot(),
            variants: self.variants.snapshot(),
        }
    }

    /// Candidate crops of `img`, before plate acceptance.
    pub fn extract_candidates(&self, img: &RgbImage) -> Vec<CandidateCrop> {
        platescan_locate::extract_candidates(img, &self.params.locate, &self.dump)
    }

    /// Read every plate in `img`.
    ///
    /// Results follow candidate order: contour candidates first, then HSV
    /// candidates per configured color. No plate gives an empty list.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, img), fields(width = img.width(), height = img.height()))
    )]
    pub fn recognize(&self, img: &RgbImage) -> Vec<PlateRecognitionResult> {
        let snap = self.snapshot();
        let crops = self.extract_candidates(img);
        let results: Vec<PlateRecognitionResult> = crops
            .par_iter()
            .filter_map(|crop| self.read_crop(crop, &snap))
            .collect();
        log::info!(
            "{} plate(s) from {} candidate(s)",
            results.len(),
            crops.len()
        );
        match self.params.dedup_iou {
            Some(t) => dedup_by_iou(results, t),
            None => results,
        }
    }

    fn read_crop(&self, crop: &CandidateCrop, snap: &Snapshot) -> Option<PlateRecognitionResult> {
        if !accept_plate(&snap.plate, &crop.image, &self.params.accept) {
            return None;
        }
        self.dump.rgb("plate_accepted", &crop.image);
        let color = classify_color(&crop.image, &self.params.color);
        let seg = match self.segmenter.segment(&crop.image, color, &self.dump) {
            Ok(seg) => seg,
            Err(e) => {
                log::debug!("{} candidate at {:?} skipped: {e}", crop.strategy, crop.source);
                return None;
            }
        };
        let characters = read_characters(&seg, color, &snap.chars)?;
        let result =
            PlateRecognitionResult::assemble(characters, color, crop.source, crop.strategy);
        log::debug!(
            "{}: {} ({color}, mean confidence {:.3})",
            crop.strategy,
            result.plate,
            result.mean_confidence
        );
        Some(result)
    }

    /// Decode the image at `path` and read its plates.
    pub fn recognize_path(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Vec<PlateRecognitionResult>, RecognizeError> {
        let img = load_rgb(path.as_ref())?;
        Ok(self.recognize(&img))
    }

    /// [`recognize_path`](Self::recognize_path) over many files in parallel.
    /// Output order matches `paths`.
    pub fn recognize_paths<P>(
        &self,
        paths: &[P],
    ) -> Vec<Result<Vec<PlateRecognitionResult>, RecognizeError>>
    where
        P: AsRef<Path> + Sync,
    {
        paths.par_iter().map(|p| self.recognize_path(p)).collect()
    }

    pub fn reload_plate_model(&self, path: impl AsRef<Path>) -> Result<(), ModelLoadError> {
        self.plate.reload_with(|| SvmModel::load_json(path))?;
        log::info!("plate model reloaded");
        Ok(())
    }

    pub fn reload_province_model(&self, path: impl AsRef<Path>) -> Result<(), ModelLoadError> {
        self.province
            .reload_with(|| CharClassifier::load_json(path, Alphabet::provinces()))?;
        log::info!("province model reloaded");
        Ok(())
    }

    pub fn reload_alnum_model(&self, path: impl AsRef<Path>) -> Result<(), ModelLoadError> {
        self.alnum
            .reload_with(|| CharClassifier::load_json(path, Alphabet::alnum()))?;
        log::info!("alphanumeric model reloaded");
        Ok(())
    }

    /// Replace the alphanumeric model used for `color` plates.
    ///
    /// Blue plates read the default model, so `Blue` reloads that one.
    /// Reloads for different colors may run concurrently; each one keeps the
    /// other colors' models.
    pub fn reload_alnum_variant(
        &self,
        color: PlateColor,
        path: impl AsRef<Path>,
    ) -> Result<(), ModelLoadError> {
        if color == PlateColor::Blue {
            return self.reload_alnum_model(path);
        }
        let model = CharClassifier::load_json(path, Alphabet::alnum())?;
        self.variants.update(|prev| {
            let mut next = prev.clone();
            match color {
                PlateColor::Green => next.green = Some(model),
                PlateColor::Yellow => next.yellow = Some(model),
                PlateColor::Blue => {}
            }
            Ok::<_, ModelLoadError>(next)
        })?;
        log::info!("{color} alphanumeric model reloaded");
        Ok(())
    }

    /// Successful model replacements since construction, all slots summed.
    pub fn model_generation(&self) -> u64 {
        self.plate.generation()
            + self.province.generation()
            + self.alnum.generation()
            + self.variants.generation()
    }
}

fn read_characters(
    seg: &Segmentation,
    color: PlateColor,
    models: &CharModelSet,
) -> Option<Vec<CharacterResult>> {
    seg.chars
        .iter()
        .map(|c| {
            let features = char_features(&c.image);
            match models.select(c.ordinal, color).classify(&features) {
                Ok(p) => Some(CharacterResult {
                    ordinal: c.ordinal,
                    text: p.label,
                    confidence: p.confidence,
                    region: c.region,
                }),
                Err(e) => {
                    log::warn!("character model cannot score character {}: {e}", c.ordinal);
                    None
                }
            }
        })
        .collect()
}

fn load_rgb(path: &Path) -> Result<RgbImage, RecognizeError> {
    if !path.is_file() {
        return Err(RecognizeError::NotAFile(path.to_path_buf()));
    }
    let io_err = |source| RecognizeError::Io {
        path: path.to_path_buf(),
        source,
    };
    let img = ImageReader::open(path)
        .map_err(io_err)?
        .with_guessed_format()
        .map_err(io_err)?
        .decode()
        .map_err(|source| RecognizeError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(img.to_rgb8())
}

/// Keep the most confident result of every group overlapping by `iou` or more.
/// The survivor takes the position of the first member of its group.
fn dedup_by_iou(results: Vec<PlateRecognitionResult>, iou: f32) -> Vec<PlateRecognitionResult> {
    let mut kept: Vec<PlateRecognitionResult> = Vec::with_capacity(results.len());
    for r in results {
        match kept.iter_mut().find(|k| k.source.iou(&r.source) >= iou) {
            Some(k) if r.confidence > k.confidence => *k = r,
            Some(_) => {}
            None => kept.push(r),
        }
    }
    kept
}
