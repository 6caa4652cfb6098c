//! Benchmark streamline tracing and per-slice batches.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use laminar_depth::{
    Boundary, ColumnCorrection, DepthCalculator, FnField, GridField, Heading, Layer, LayerGeometry,
    Point2D, Polygon, Polyline, StreamlineConfig, StreamlineIntegrator, UniformField,
    compute_depths,
};

fn hline(y: f64) -> Polyline {
    Polyline::new(vec![Point2D::new(0.0, y), Point2D::new(1000.0, y)]).unwrap()
}

/// Six stacked 150-unit layers, pia at y = 0.
fn column() -> (LayerGeometry, ColumnCorrection) {
    let layers = (0..6).map(|i| {
        let (y0, y1) = (i as f64 * 150.0, (i + 1) as f64 * 150.0);
        let name = format!("Layer{}", i + 1);
        let bounds = Polygon::new(
            &name,
            vec![
                Point2D::new(0.0, y0),
                Point2D::new(1000.0, y0),
                Point2D::new(1000.0, y1),
                Point2D::new(0.0, y1),
            ],
        )
        .unwrap();
        Layer::new(name, bounds)
            .with_pia_surface(hline(y0))
            .with_wm_surface(hline(y1))
    });
    let correction = ColumnCorrection {
        top_path: hline(0.0),
        bottom_path: hline(900.0),
        pia_extra_distance: 0.0,
        wm_extra_distance: 0.0,
        top_layer: "Layer1".into(),
        bottom_layer: "Layer6".into(),
    };
    (LayerGeometry::from_layers(layers), correction)
}

fn bench_trace_step_sizes(c: &mut Criterion) {
    let pia = hline(0.0);
    let field = UniformField::new(Point2D::new(0.0, -1.0));
    let mut group = c.benchmark_group("trace_step_size");

    for step_size in [0.25, 1.0, 4.0] {
        let integrator = StreamlineIntegrator::new(StreamlineConfig::new(step_size, 10_000));
        group.bench_with_input(
            BenchmarkId::from_parameter(step_size),
            &integrator,
            |b, integrator| {
                b.iter(|| {
                    integrator.trace(
                        black_box(Point2D::new(500.0, 600.0)),
                        &field,
                        Boundary::new("pia", &pia),
                        Heading::Pia,
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_trace_grid_field(c: &mut Criterion) {
    let pia = hline(0.0);
    let grid = GridField::from_fn(Point2D::ZERO, 10.0, 101, 91, |p| {
        Some((Point2D::new(0.05 * (p.y * 0.01).sin(), -1.0), -p.y))
    })
    .unwrap();
    let integrator = StreamlineIntegrator::default();

    c.bench_function("trace_grid_field", |b| {
        b.iter(|| {
            integrator.trace(
                black_box(Point2D::new(500.0, 600.0)),
                &grid,
                Boundary::new("pia", &pia),
                Heading::Pia,
            )
        });
    });
}

fn bench_batch(c: &mut Criterion) {
    let (geometry, correction) = column();
    let field = FnField(|_p: Point2D| Point2D::new(0.0, -1.0));
    let calculator = DepthCalculator::new(&geometry, &correction, &field, StreamlineConfig::default());
    let cells: Vec<(String, Point2D)> = (0..200)
        .map(|i| {
            let p = Point2D::new(5.0 + (i % 20) as f64 * 49.0, 3.0 + (i / 20) as f64 * 89.0);
            (format!("cell_{:03}", i), p)
        })
        .collect();

    c.bench_function("batch_200_cells", |b| {
        b.iter(|| compute_depths(&calculator, black_box(cells.clone())))
    });
}

criterion_group!(
    benches,
    bench_trace_step_sizes,
    bench_trace_grid_field,
    bench_batch
);
criterion_main!(benches);
