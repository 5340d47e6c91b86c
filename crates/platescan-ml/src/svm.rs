//! Binary support vector machine, inference only.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{InferenceError, JsonModel, ModelLoadError};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SvmKernel {
    Linear,
    Rbf { gamma: f32 },
}

/// Serialized form of [`SvmModel`].
///
/// `decision(x) = sum_i coefficients[i] * K(support_vectors[i], x) - rho`.
/// A positive decision predicts `labels[0]`, anything else `labels[1]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SvmDocument {
    pub kernel: SvmKernel,
    pub support_vectors: Vec<Vec<f32>>,
    pub coefficients: Vec<f32>,
    pub rho: f32,
    pub labels: [i32; 2],
}

#[derive(Clone, Debug)]
pub struct SvmModel {
    kernel: SvmKernel,
    /// One support vector per row.
    support: DMatrix<f32>,
    coefficients: DVector<f32>,
    rho: f32,
    labels: [i32; 2],
}

impl SvmModel {
    /// Linear model `w·x - rho`, stored as a single support vector.
    pub fn linear(weights: Vec<f32>, rho: f32, labels: [i32; 2]) -> Result<Self, ModelLoadError> {
        Self::from_document(SvmDocument {
            kernel: SvmKernel::Linear,
            support_vectors: vec![weights],
            coefficients: vec![1.0],
            rho,
            labels,
        })
    }

    /// Feature dimension.
    pub fn dim(&self) -> usize {
        self.support.ncols()
    }

    pub fn kernel(&self) -> SvmKernel {
        self.kernel
    }

    pub fn labels(&self) -> [i32; 2] {
        self.labels
    }

    #[cfg_attr(
        feature = "tracing",
        instrument(name = "svm_decision", level = "trace", skip_all, fields(dim = self.dim()))
    )]
    pub fn decision(&self, features: &[f32]) -> Result<f32, InferenceError> {
        if features.len() != self.dim() {
            return Err(InferenceError::FeatureLength {
                expected: self.dim(),
                got: features.len(),
            });
        }
        let x = DVector::from_column_slice(features);
        let k: DVector<f32> = match self.kernel {
            SvmKernel::Linear => &self.support * &x,
            SvmKernel::Rbf { gamma } => DVector::from_iterator(
                self.support.nrows(),
                self.support.row_iter().map(|sv| {
                    let d2: f32 = sv
                        .iter()
                        .zip(features)
                        .map(|(a, b)| (a - b) * (a - b))
                        .sum();
                    (-gamma * d2).exp()
                }),
            ),
        };
        Ok(self.coefficients.dot(&k) - self.rho)
    }

    pub fn predict(&self, features: &[f32]) -> Result<i32, InferenceError> {
        let d = self.decision(features)?;
        Ok(if d > 0.0 {
            self.labels[0]
        } else {
            self.labels[1]
        })
    }
}

impl JsonModel for SvmModel {
    type Document = SvmDocument;

    fn from_document(doc: SvmDocument) -> Result<Self, ModelLoadError> {
        let n = doc.support_vectors.len();
        if n == 0 {
            return Err(ModelLoadError::Invalid("svm has no support vectors".into()));
        }
        if doc.coefficients.len() != n {
            return Err(ModelLoadError::Invalid(format!(
                "svm has {n} support vectors but {} coefficients",
                doc.coefficients.len()
            )));
        }
        let dim = doc.support_vectors[0].len();
        if dim == 0 {
            return Err(ModelLoadError::Invalid("svm support vectors are empty".into()));
        }
        if let Some(bad) = doc.support_vectors.iter().position(|sv| sv.len() != dim) {
            return Err(ModelLoadError::Invalid(format!(
                "support vector {bad} has {} values, expected {dim}",
                doc.support_vectors[bad].len()
            )));
        }
        if let SvmKernel::Rbf { gamma } = doc.kernel {
            if !(gamma.is_finite() && gamma > 0.0) {
                return Err(ModelLoadError::Invalid(format!("rbf gamma {gamma}")));
            }
        }
        let support = DMatrix::from_row_iterator(
            n,
            dim,
            doc.support_vectors.iter().flat_map(|sv| sv.iter().copied()),
        );
        Ok(Self {
            kernel: doc.kernel,
            support,
            coefficients: DVector::from_vec(doc.coefficients),
            rho: doc.rho,
            labels: doc.labels,
        })
    }

    fn to_document(&self) -> SvmDocument {
        SvmDocument {
            kernel: self.kernel,
            support_vectors: self
                .support
                .row_iter()
                .map(|r| r.iter().copied().collect())
                .collect(),
            coefficients: self.coefficients.iter().copied().collect(),
            rho: self.rho,
            labels: self.labels,
        }
    }
}
