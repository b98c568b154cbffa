use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use vector_editor_model::{Dataset, EditorModel, GeometryKind, Layer};

/// Baut ein Model mit `dataset_count` Datasets à `layers_per_dataset` Ebenen.
fn build_synthetic_model(dataset_count: usize, layers_per_dataset: usize) -> EditorModel {
    let mut model = EditorModel::new();
    for d in 0..dataset_count {
        let layers = (0..layers_per_dataset)
            .map(|l| Layer::new(&format!("layer_{d}_{l}"), GeometryKind::Polygon, 100))
            .collect();
        model
            .add_dataset(Dataset::with_layers(Some(&format!("dataset_{d}")), layers))
            .expect("Import fehlgeschlagen");
    }
    model
}

fn bench_flattened_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("flattened_traversal");

    for &(datasets, layers) in &[(10usize, 10usize), (100, 100)] {
        let model = build_synthetic_model(datasets, layers);

        group.bench_with_input(
            BenchmarkId::new("layers", datasets * layers),
            &model,
            |b, model| {
                b.iter(|| {
                    let handles = black_box(model).layers();
                    black_box(handles.len())
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("find_layer_last", datasets * layers),
            &model,
            |b, model| {
                let last_id = model
                    .layers()
                    .last()
                    .map(|h| h.layer.id)
                    .expect("Model ist nicht leer");
                b.iter(|| black_box(model.find_layer(black_box(last_id)).is_some()))
            },
        );
    }

    group.finish();
}

fn bench_cyclic_navigation(c: &mut Criterion) {
    c.bench_function("select_next_layer_1k", |b| {
        let mut model = build_synthetic_model(10, 100);
        b.iter(|| {
            model.select_next_layer().expect("Navigation fehlgeschlagen");
            black_box(model.editing_target())
        })
    });
}

criterion_group!(benches, bench_flattened_traversal, bench_cyclic_navigation);
criterion_main!(benches);
