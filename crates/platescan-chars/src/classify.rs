use std::path::Path;
use std::sync::Arc;

use platescan_core::PlateColor;
use platescan_ml::{InferenceError, JsonModel, MlpModel, ModelLoadError};

use crate::Alphabet;

/// An MLP paired with the labels of its outputs.
#[derive(Clone, Debug)]
pub struct CharClassifier {
    model: MlpModel,
    alphabet: Alphabet,
}

/// Arg-max label and its score.
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub index: usize,
    /// Winning score clamped to `[0, 1]`.
    pub confidence: f32,
}

impl CharClassifier {
    pub fn new(model: MlpModel, alphabet: Alphabet) -> Result<Self, ModelLoadError> {
        if model.outputs() != alphabet.len() {
            return Err(ModelLoadError::Invalid(format!(
                "model has {} outputs, alphabet has {} labels",
                model.outputs(),
                alphabet.len()
            )));
        }
        Ok(Self { model, alphabet })
    }

    pub fn load_json(path: impl AsRef<Path>, alphabet: Alphabet) -> Result<Self, ModelLoadError> {
        Self::new(MlpModel::load_json(path)?, alphabet)
    }

    pub fn model(&self) -> &MlpModel {
        &self.model
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Highest-scoring label; ties resolve to the lowest index.
    pub fn classify(&self, features: &[f32]) -> Result<Prediction, InferenceError> {
        let scores = self.model.predict(features)?;
        let (index, best) = scores
            .iter()
            .copied()
            .enumerate()
            .fold((0, f32::NEG_INFINITY), |(bi, bv), (i, v)| {
                if v > bv {
                    (i, v)
                } else {
                    (bi, bv)
                }
            });
        let label = self.alphabet.label(index).unwrap_or_default().to_owned();
        let confidence = if best.is_finite() {
            best.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Ok(Prediction {
            label,
            index,
            confidence,
        })
    }
}

/// Alphanumeric models specific to a plate color.
#[derive(Clone, Debug, Default)]
pub struct AlnumVariants {
    pub green: Option<CharClassifier>,
    pub yellow: Option<CharClassifier>,
}

impl AlnumVariants {
    pub fn get(&self, color: PlateColor) -> Option<&CharClassifier> {
        match color {
            PlateColor::Green => self.green.as_ref(),
            PlateColor::Yellow => self.yellow.as_ref(),
            PlateColor::Blue => None,
        }
    }
}

/// Models used for one plate, captured together so a concurrent reload
/// cannot mix old and new models within a plate.
#[derive(Clone, Debug)]
pub struct CharModelSet {
    pub province: Arc<CharClassifier>,
    pub alnum: Arc<CharClassifier>,
    pub variants: Arc<AlnumVariants>,
}

impl CharModelSet {
    /// Ordinal 0 reads the province model. Other ordinals read the color's
    /// alphanumeric variant when one is loaded, else the default model.
    pub fn select(&self, ordinal: usize, color: PlateColor) -> &CharClassifier {
        if ordinal == 0 {
            return self.province.as_ref();
        }
        self.variants.get(color).unwrap_or(self.alnum.as_ref())
    }
}
