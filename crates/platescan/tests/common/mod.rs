#![allow(dead_code)]

use std::path::Path;

use image::{Rgb, RgbImage};
use platescan::chars::{feature_len, Alphabet, SegmentParams};
use platescan::locate::PLATE_FEATURE_LEN;
use platescan::ml::{Activation, JsonModel, LayerDocument, MlpDocument, MlpModel, SvmModel};
use platescan::{ModelPaths, Region};

pub const BLUE: Rgb<u8> = Rgb([20, 60, 200]);
pub const GREEN: Rgb<u8> = Rgb([30, 170, 60]);
pub const STREET: Rgb<u8> = Rgb([110, 112, 108]);

/// Street-gray photo with one plate; characters are light vertical bars.
pub fn scene(width: u32, height: u32, plate: Region, bg: Rgb<u8>) -> RgbImage {
    let char_w = plate.width / 14;
    RgbImage::from_fn(width, height, |x, y| {
        let (x, y) = (x as i32, y as i32);
        let inside = x >= plate.x && x < plate.right() && y >= plate.y && y < plate.bottom();
        if !inside {
            return STREET;
        }
        let lx = x - plate.x;
        let ly = y - plate.y;
        let in_char_band = ly >= plate.height / 5 && ly < plate.height * 4 / 5;
        let slot = lx % (2 * char_w);
        if in_char_band && slot >= char_w / 2 && slot < char_w / 2 + char_w && lx > char_w / 2 {
            Rgb([240, 240, 240])
        } else {
            bg
        }
    })
}

/// Linear SVM with a constant decision: `accept` picks the plate label.
pub fn plate_svm(accept: bool) -> SvmModel {
    let rho = if accept { -1.0 } else { 1.0 };
    SvmModel::linear(vec![0.0; PLATE_FEATURE_LEN], rho, [0, 1]).unwrap()
}

/// MLP that always answers output `favored` with score `score`.
pub fn constant_mlp(outputs: usize, favored: usize, score: f32) -> MlpModel {
    let inputs = feature_len(SegmentParams::default().char_size);
    MlpModel::from_document(MlpDocument {
        layers: vec![LayerDocument {
            weights: vec![vec![0.0; inputs]; outputs],
            bias: (0..outputs)
                .map(|i| if i == favored { score } else { 0.0 })
                .collect(),
        }],
        activation: Activation::Identity,
        input_scale: None,
    })
    .unwrap()
}

/// Writes plate/province/alnum models (and a green variant) into `dir`.
/// The province model reads "苏", the default alnum model "A", the green one "1".
pub fn write_models(dir: &Path) -> ModelPaths {
    let paths = ModelPaths {
        plate_svm: dir.join("plate_svm.json"),
        province_mlp: dir.join("province.json"),
        alnum_mlp: dir.join("alnum.json"),
        alnum_green_mlp: Some(dir.join("alnum_green.json")),
        alnum_yellow_mlp: None,
    };
    plate_svm(true).write_json(&paths.plate_svm).unwrap();
    constant_mlp(Alphabet::provinces().len(), 20, 0.9)
        .write_json(&paths.province_mlp)
        .unwrap();
    constant_mlp(Alphabet::alnum().len(), 10, 0.8)
        .write_json(&paths.alnum_mlp)
        .unwrap();
    constant_mlp(Alphabet::alnum().len(), 1, 0.7)
        .write_json(paths.alnum_green_mlp.as_ref().unwrap())
        .unwrap();
    paths
}
