//! Classifier runtime for platescan.
//!
//! Two model families are supported, both loaded from JSON documents written
//! by an offline trainer:
//!
//! - [`SvmModel`]: binary SVM with linear or RBF kernel, used for plate
//!   acceptance;
//! - [`MlpModel`]: dense feed-forward network with symmetric sigmoid
//!   activation, used for character classification.
//!
//! Models are immutable once built. Sharing and hot reload go through
//! [`ModelSlot`].

mod error;
mod io;
mod mlp;
mod slot;
mod svm;

pub use error::{InferenceError, ModelLoadError};
pub use io::JsonModel;
pub use mlp::{Activation, LayerDocument, MlpDocument, MlpModel};
pub use slot::ModelSlot;
pub use svm::{SvmDocument, SvmKernel, SvmModel};
