//! Feed-forward multi-layer perceptron, inference only.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{InferenceError, JsonModel, ModelLoadError};

/// Neuron activation, applied after every layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Activation {
    Identity,
    /// `beta * (1 - exp(-alpha x)) / (1 + exp(-alpha x))`
    SigmoidSym { alpha: f32, beta: f32 },
}

impl Default for Activation {
    fn default() -> Self {
        Activation::SigmoidSym {
            alpha: 1.0,
            beta: 1.0,
        }
    }
}

impl Activation {
    #[inline]
    fn apply(self, x: f32) -> f32 {
        match self {
            Activation::Identity => x,
            Activation::SigmoidSym { alpha, beta } => {
                let e = (-alpha * x).exp();
                beta * (1.0 - e) / (1.0 + e)
            }
        }
    }
}

/// One dense layer: `weights` is `outputs × inputs`, row-major.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerDocument {
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
}

/// Serialized form of [`MlpModel`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MlpDocument {
    pub layers: Vec<LayerDocument>,
    #[serde(default)]
    pub activation: Activation,
    /// Optional per-input `(scale, shift)`, applied as `x * scale + shift`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_scale: Option<Vec<(f32, f32)>>,
}

#[derive(Clone, Debug)]
struct Layer {
    weights: DMatrix<f32>,
    bias: DVector<f32>,
}

#[derive(Clone, Debug)]
pub struct MlpModel {
    layers: Vec<Layer>,
    activation: Activation,
    input_scale: Option<Vec<(f32, f32)>>,
}

impl MlpModel {
    pub fn inputs(&self) -> usize {
        self.layers.first().map_or(0, |l| l.weights.ncols())
    }

    pub fn outputs(&self) -> usize {
        self.layers.last().map_or(0, |l| l.weights.nrows())
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Raw output scores, one per class.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            name = "mlp_predict",
            level = "trace",
            skip_all,
            fields(inputs = self.inputs(), outputs = self.outputs())
        )
    )]
    pub fn predict(&self, features: &[f32]) -> Result<Vec<f32>, InferenceError> {
        if features.len() != self.inputs() {
            return Err(InferenceError::FeatureLength {
                expected: self.inputs(),
                got: features.len(),
            });
        }
        let mut x = match &self.input_scale {
            Some(scale) => DVector::from_iterator(
                features.len(),
                features.iter().zip(scale).map(|(v, (s, b))| v * s + b),
            ),
            None => DVector::from_column_slice(features),
        };
        for layer in &self.layers {
            let mut y = &layer.weights * &x + &layer.bias;
            y.apply(|v| *v = self.activation.apply(*v));
            x = y;
        }
        Ok(x.iter().copied().collect())
    }
}

impl JsonModel for MlpModel {
    type Document = MlpDocument;

    fn from_document(doc: MlpDocument) -> Result<Self, ModelLoadError> {
        if doc.layers.is_empty() {
            return Err(ModelLoadError::Invalid("mlp has no layers".into()));
        }
        let mut layers = Vec::with_capacity(doc.layers.len());
        let mut expected_in: Option<usize> = None;
        for (i, l) in doc.layers.into_iter().enumerate() {
            let rows = l.weights.len();
            let cols = l.weights.first().map_or(0, Vec::len);
            if rows == 0 || cols == 0 {
                return Err(ModelLoadError::Invalid(format!("layer {i} is empty")));
            }
            if l.weights.iter().any(|r| r.len() != cols) {
                return Err(ModelLoadError::Invalid(format!("layer {i} has ragged rows")));
            }
            if l.bias.len() != rows {
                return Err(ModelLoadError::Invalid(format!(
                    "layer {i}: {rows} outputs but {} biases",
                    l.bias.len()
                )));
            }
            if let Some(n) = expected_in {
                if n != cols {
                    return Err(ModelLoadError::Invalid(format!(
                        "layer {i} takes {cols} inputs, previous layer gives {n}"
                    )));
                }
            }
            expected_in = Some(rows);
            layers.push(Layer {
                weights: DMatrix::from_row_iterator(
                    rows,
                    cols,
                    l.weights.iter().flat_map(|r| r.iter().copied()),
                ),
                bias: DVector::from_vec(l.bias),
            });
        }
        let inputs = layers[0].weights.ncols();
        if let Some(scale) = &doc.input_scale {
            if scale.len() != inputs {
                return Err(ModelLoadError::Invalid(format!(
                    "input scale has {} entries, model takes {inputs} inputs",
                    scale.len()
                )));
            }
        }
        Ok(Self {
            layers,
            activation: doc.activation,
            input_scale: doc.input_scale,
        })
    }

    fn to_document(&self) -> MlpDocument {
        MlpDocument {
            layers: self
                .layers
                .iter()
                .map(|l| LayerDocument {
                    weights: l
                        .weights
                        .row_iter()
                        .map(|r| r.iter().copied().collect())
                        .collect(),
                    bias: l.bias.iter().copied().collect(),
                })
                .collect(),
            activation: self.activation,
            input_scale: self.input_scale.clone(),
        }
    }
}
