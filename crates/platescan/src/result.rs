use platescan_core::{PlateColor, Region};
use platescan_locate::Strategy;
use serde::{Deserialize, Serialize};

/// One recognized character.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacterResult {
    /// 0 for the administrative character, then 1, 2, … left to right.
    pub ordinal: usize,
    pub text: String,
    /// Classifier score in `[0, 1]`.
    pub confidence: f32,
    /// Character box in the coordinates of the canonical plate crop.
    pub region: Region,
}

/// A plate read from a photograph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlateRecognitionResult {
    /// Character texts concatenated in ordinal order.
    pub plate: String,
    pub characters: Vec<CharacterResult>,
    /// Sum of the per-character confidences.
    pub confidence: f32,
    pub mean_confidence: f32,
    pub color: PlateColor,
    /// Plate box in source image coordinates.
    pub source: Region,
    pub strategy: Strategy,
    /// Whether `plate` matches the national plate pattern. Informational only.
    pub valid_format: bool,
}

impl PlateRecognitionResult {
    pub(crate) fn assemble(
        characters: Vec<CharacterResult>,
        color: PlateColor,
        source: Region,
        strategy: Strategy,
    ) -> Self {
        let plate: String = characters.iter().map(|c| c.text.as_str()).collect();
        let confidence: f32 = characters.iter().map(|c| c.confidence).sum();
        let mean_confidence = if characters.is_empty() {
            0.0
        } else {
            confidence / characters.len() as f32
        };
        let valid_format = crate::is_valid_plate(&plate);
        Self {
            plate,
            characters,
            confidence,
            mean_confidence,
            color,
            source,
            strategy,
            valid_format,
        }
    }
}
