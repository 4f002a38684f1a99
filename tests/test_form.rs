//! Integration test: prediction form against the reference artifact set

use iris_predict::error::ArtifactKind;
use iris_predict::form::{self, FormInputs, FormState, PredictionDisplay};
use iris_predict::inference::{
    ArtifactContext, ArtifactPaths, LabelCodec, ENCODER_FILE, MODEL_FILE, SCALER_FILE,
};
use iris_predict::StartupError;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn ready_context() -> Arc<ArtifactContext> {
    FormState::new(ArtifactPaths::in_dir(fixtures_dir()))
        .load()
        .unwrap()
        .into_context()
        .unwrap()
}

fn predict(values: [f64; 4]) -> String {
    let ctx = ready_context();
    form::predict_on_current_inputs(&FormInputs::new(values).unwrap(), &ctx).unwrap()
}

/// Copy the fixtures into a temp dir, leaving out `skip`
fn artifact_dir_without(skip: Option<&str>) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in [MODEL_FILE, SCALER_FILE, ENCODER_FILE] {
        if Some(name) != skip {
            std::fs::copy(fixtures_dir().join(name), dir.path().join(name)).unwrap();
        }
    }
    dir
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_loading_to_ready() {
    let state = FormState::new(ArtifactPaths::in_dir(fixtures_dir()));
    assert!(!state.is_ready());

    let state = state.load().unwrap();
    assert!(state.is_ready());
    assert!(state.context().is_some());

    // a second load is a no-op
    let state = state.load().unwrap();
    assert!(state.is_ready());
}

#[test]
fn test_any_missing_artifact_blocks_ready() {
    let cases = [
        (MODEL_FILE, ArtifactKind::Classifier),
        (SCALER_FILE, ArtifactKind::Scaler),
        (ENCODER_FILE, ArtifactKind::Encoder),
    ];

    for (missing, expected_kind) in cases {
        let dir = artifact_dir_without(Some(missing));
        let result = FormState::new(ArtifactPaths::in_dir(dir.path())).load();
        match result {
            Err(StartupError::Artifact { kind, path, .. }) => {
                assert_eq!(kind, expected_kind, "wrong artifact blamed for missing {}", missing);
                assert!(path.ends_with(missing));
            }
            Err(other) => panic!("unexpected error for missing {}: {}", missing, other),
            Ok(_) => panic!("form became ready without {}", missing),
        }
    }
}

#[test]
fn test_complete_copy_loads() {
    let dir = artifact_dir_without(None);
    let state = FormState::new(ArtifactPaths::in_dir(dir.path())).load().unwrap();
    assert!(state.is_ready());
}

#[test]
fn test_corrupt_artifact_is_startup_error() {
    let dir = artifact_dir_without(None);
    std::fs::write(dir.path().join(SCALER_FILE), "{ not json").unwrap();
    let err = ArtifactContext::load(&ArtifactPaths::in_dir(dir.path())).unwrap_err();
    assert!(matches!(err, StartupError::Artifact { kind: ArtifactKind::Scaler, .. }));
}

#[test]
fn test_encoder_too_small_is_inconsistent() {
    let dir = artifact_dir_without(None);
    std::fs::write(
        dir.path().join(ENCODER_FILE),
        r#"{"classes": ["Iris-setosa", "Iris-versicolor"]}"#,
    )
    .unwrap();
    let err = ArtifactContext::load(&ArtifactPaths::in_dir(dir.path())).unwrap_err();
    assert!(matches!(err, StartupError::Inconsistent(_)), "got {}", err);
}

#[test]
fn test_scaler_feature_count_mismatch_is_inconsistent() {
    let dir = artifact_dir_without(None);
    std::fs::write(
        dir.path().join(SCALER_FILE),
        r#"{"scaler_type": "Standard", "params": [
            {"center": 0.0, "scale": 1.0},
            {"center": 0.0, "scale": 1.0},
            {"center": 0.0, "scale": 1.0}
        ]}"#,
    )
    .unwrap();
    let err = ArtifactContext::load(&ArtifactPaths::in_dir(dir.path())).unwrap_err();
    assert!(matches!(err, StartupError::Inconsistent(_)), "got {}", err);
}

// ============================================================================
// Predictions
// ============================================================================

#[test]
fn test_default_inputs_pinned_label() {
    assert_eq!(predict([5.0, 5.0, 5.0, 5.0]), "Iris-virginica");
}

#[test]
fn test_boundaries_produce_labels() {
    assert_eq!(predict([0.0, 0.0, 0.0, 0.0]), "Iris-setosa");
    assert_eq!(predict([10.0, 10.0, 10.0, 10.0]), "Iris-virginica");
}

#[test]
fn test_typical_flowers() {
    assert_eq!(predict([5.1, 3.5, 1.4, 0.2]), "Iris-setosa");
    assert_eq!(predict([6.0, 2.8, 4.5, 1.3]), "Iris-versicolor");
    assert_eq!(predict([6.7, 3.0, 5.8, 2.2]), "Iris-virginica");
}

#[test]
fn test_every_grid_point_yields_a_known_label() {
    let ctx = ready_context();
    let labels = ctx.labels().to_vec();
    let steps: Vec<f64> = (0..=10).map(|i| i as f64).collect();

    for &sl in &steps {
        for &sw in &steps {
            for &pl in &steps {
                for &pw in &steps {
                    let inputs = FormInputs::new([sl, sw, pl, pw]).unwrap();
                    let label = form::predict_on_current_inputs(&inputs, &ctx).unwrap();
                    assert!(labels.contains(&label), "unexpected label {} for {:?}", label, inputs);
                }
            }
        }
    }
}

#[test]
fn test_predictions_are_deterministic() {
    let ctx = ready_context();
    let inputs = FormInputs::new([6.3, 2.9, 4.9, 1.6]).unwrap();
    let first = form::predict_on_current_inputs(&inputs, &ctx).unwrap();
    for _ in 0..50 {
        assert_eq!(form::predict_on_current_inputs(&inputs, &ctx).unwrap(), first);
    }

    // a freshly loaded context agrees
    let other = ready_context();
    assert_eq!(form::predict_on_current_inputs(&inputs, &other).unwrap(), first);
}

fn assert_codec_round_trip(ctx: &ArtifactContext) {
    let codec = ctx.codec();
    assert_eq!(ctx.class_indices().len(), ctx.labels().len());
    for (&index, label) in ctx.class_indices().iter().zip(ctx.labels()) {
        assert!(!label.is_empty());
        assert_eq!(codec.decode(index).unwrap(), label);
        assert_eq!(codec.encode(label).unwrap(), index);
    }
}

#[test]
fn test_codec_round_trip_for_every_emitted_class() {
    let ctx = ready_context();
    assert_codec_round_trip(&ctx);
    assert_eq!(ctx.class_indices(), &[0, 1, 2]);
}

#[test]
fn test_codec_round_trip_with_reordered_classes() {
    let dir = artifact_dir_without(Some(MODEL_FILE));
    let model = std::fs::read_to_string(fixtures_dir().join(MODEL_FILE)).unwrap();
    let reordered = model.replace(r#""classes": [0.0, 1.0, 2.0]"#, r#""classes": [2.0, 0.0, 1.0]"#);
    assert_ne!(model, reordered);
    std::fs::write(dir.path().join(MODEL_FILE), reordered).unwrap();

    let ctx = ArtifactContext::load(&ArtifactPaths::in_dir(dir.path())).unwrap();
    assert_eq!(ctx.class_indices(), &[2, 0, 1]);
    assert_eq!(
        ctx.labels(),
        &["Iris-virginica".to_string(), "Iris-setosa".to_string(), "Iris-versicolor".to_string()]
    );
    assert_codec_round_trip(&ctx);
}

#[test]
fn test_render_output() {
    let ctx = ready_context();
    let output = form::render(&FormInputs::default(), &ctx);
    assert_eq!(output.title, "Iris Flower Prediction App");
    assert_eq!(output.sliders.len(), 4);
    assert!(output.sliders.iter().all(|s| s.value == 5.0 && s.min == 0.0 && s.max == 10.0));
    assert_eq!(
        output.prediction,
        PredictionDisplay::Label { label: "Iris-virginica".to_string() }
    );

    let summary = ctx.summary();
    assert_eq!(summary.n_trees, Some(3));
    assert_eq!(summary.n_features, 4);
}
