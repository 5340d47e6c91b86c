//! Hot reload while predictions are running.

use std::sync::atomic::{AtomicBool, Ordering};

use platescan_ml::{
    Activation, JsonModel, LayerDocument, MlpDocument, MlpModel, ModelSlot, SvmModel,
};

/// Every output of model `k` equals `k`, so a torn model would show mixed values.
fn constant_model(k: f32, inputs: usize, outputs: usize) -> MlpModel {
    MlpModel::from_document(MlpDocument {
        layers: vec![LayerDocument {
            weights: vec![vec![0.0; inputs]; outputs],
            bias: vec![k; outputs],
        }],
        activation: Activation::Identity,
        input_scale: None,
    })
    .expect("valid model")
}

#[test]
fn readers_never_observe_a_partial_model() {
    let slot = ModelSlot::new(constant_model(0.0, 140, 34));
    let stop = AtomicBool::new(false);

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let features = vec![1.0f32; 140];
                while !stop.load(Ordering::Relaxed) {
                    let model = slot.snapshot();
                    let first = model.predict(&features).expect("predict");
                    // a snapshot is stable for as long as it is held
                    let second = model.predict(&features).expect("predict");
                    assert_eq!(first, second);
                    assert!(first.iter().all(|&v| v == first[0]), "{first:?}");
                }
            });
        }
        for k in 1..200 {
            slot.replace(constant_model(k as f32, 140, 34));
        }
        stop.store(true, Ordering::Relaxed);
    });

    assert_eq!(slot.generation(), 199);
    let last = slot.snapshot().predict(&vec![0.0; 140]).unwrap();
    assert!(last.iter().all(|&v| v == 199.0));
}

#[test]
fn reload_from_disk_swaps_the_model() {
    let dir = tempfile::tempdir().unwrap();
    let accept = dir.path().join("accept.json");
    let reject = dir.path().join("reject.json");
    SvmModel::linear(vec![0.0; 8], -1.0, [0, 1])
        .unwrap()
        .write_json(&accept)
        .unwrap();
    SvmModel::linear(vec![0.0; 8], 1.0, [0, 1])
        .unwrap()
        .write_json(&reject)
        .unwrap();

    let slot = ModelSlot::new(SvmModel::load_json(&accept).unwrap());
    let in_flight = slot.snapshot();
    slot.reload_with(|| SvmModel::load_json(&reject)).unwrap();

    let x = [0.5f32; 8];
    assert_eq!(in_flight.predict(&x).unwrap(), 0);
    assert_eq!(slot.snapshot().predict(&x).unwrap(), 1);
}

#[test]
fn broken_file_leaves_slot_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{ not json").unwrap();

    let slot = ModelSlot::new(SvmModel::linear(vec![1.0], 0.0, [0, 1]).unwrap());
    let err = slot.reload_with(|| SvmModel::load_json(&bad)).unwrap_err();
    assert!(err.to_string().contains("bad.json"));
    assert_eq!(slot.generation(), 0);

    let missing = slot.reload_with(|| SvmModel::load_json(dir.path().join("nope.json")));
    assert!(missing.is_err());
}

#[test]
fn concurrent_updates_are_all_applied() {
    let slot = ModelSlot::new(Vec::<usize>::new());
    std::thread::scope(|s| {
        for t in 0..4 {
            let slot = &slot;
            s.spawn(move || {
                for i in 0..50 {
                    slot.update(|prev| {
                        let mut next = prev.clone();
                        next.push(t * 50 + i);
                        Ok::<_, ()>(next)
                    })
                    .unwrap();
                }
            });
        }
    });

    let mut seen = slot.snapshot().to_vec();
    seen.sort_unstable();
    assert_eq!(seen, (0..200).collect::<Vec<_>>());
    assert_eq!(slot.generation(), 200);
}
