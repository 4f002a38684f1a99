use criterion::{black_box, criterion_group, criterion_main, Criterion};
use iris_predict::form::{self, FormInputs};
use iris_predict::inference::{ArtifactContext, ArtifactPaths};
use std::path::Path;

fn load_context() -> ArtifactContext {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures");
    ArtifactContext::load(&ArtifactPaths::in_dir(dir)).unwrap()
}

fn bench_prediction(c: &mut Criterion) {
    let context = load_context();
    let inputs = FormInputs::new([6.0, 2.8, 4.5, 1.3]).unwrap();

    let mut group = c.benchmark_group("prediction");

    group.bench_function("predict_on_current_inputs", |b| {
        b.iter(|| form::predict_on_current_inputs(black_box(&inputs), &context).unwrap())
    });

    group.bench_function("render_page", |b| {
        b.iter(|| form::render_page(&form::render(black_box(&inputs), &context)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_prediction);
criterion_main!(benches);
