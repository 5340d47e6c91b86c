//! High-level facade of the `platescan-*` workspace.
//!
//! [`Recognizer`] runs the whole pipeline on a photograph:
//!
//! 1. candidate extraction, by vertical-edge density and by plate color;
//! 2. plate acceptance with an SVM;
//! 3. plate color classification;
//! 4. character segmentation, with shear correction and administrative
//!    character localization;
//! 5. character classification with MLPs.
//!
//! ## Quickstart
//!
//! ```no_run
//! use platescan::{Recognizer, RecognizerConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RecognizerConfig::load_json("platescan.json")?;
//! let recognizer = Recognizer::from_config(&config)?;
//! for plate in recognizer.recognize_path("car.jpg")? {
//!     println!("{} {} {:.2}", plate.plate, plate.color, plate.mean_confidence);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `platescan::core`: images, regions, plate colors, filters, logging.
//! - `platescan::ml`: SVM/MLP inference and hot-swappable model slots.
//! - `platescan::locate`: candidate extraction, acceptance, color.
//! - `platescan::chars`: segmentation, character features and classifiers.

pub use platescan_chars as chars;
pub use platescan_core as core;
pub use platescan_locate as locate;
pub use platescan_ml as ml;

pub use platescan_core::{PlateColor, Region};
pub use platescan_locate::{CandidateCrop, Strategy};

mod config;
mod error;
mod plate_format;
mod recognizer;
mod result;

pub use config::{ModelPaths, PipelineParams, RecognizerConfig};
pub use error::RecognizeError;
pub use plate_format::is_valid_plate;
pub use recognizer::{Recognizer, RecognizerModels};
pub use result::{CharacterResult, PlateRecognitionResult};
