//! Benchmarks for the sample and redraw hot paths.
//!
//! A full redraw evaluates 12 grid strips plus the rhythm strip, about 4000
//! samples, and runs on every parameter change.
//!
//! Run with: `cargo bench --bench redraw`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ekgsim::prelude::*;

// =============================================================================
// SINGLE SAMPLE
// =============================================================================

/// One sample per pathology, artifact disabled so only morphology is timed.
fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample");
    group.sample_size(200);

    let params = GlobalParameters {
        artifact_level: 0.0,
        ..GlobalParameters::default()
    };
    let mut synth = WaveformSynthesizer::new(NullNoise);

    for pathology in [
        Pathology::Normal,
        Pathology::Afib,
        Pathology::Vfib,
        Pathology::Mobitz1,
        Pathology::AnteriorStemi,
        Pathology::Wpw,
    ] {
        group.throughput(Throughput::Elements(100));
        group.bench_with_input(
            BenchmarkId::from_parameter(pathology.key()),
            &pathology,
            |b, &pathology| {
                b.iter(|| {
                    for i in 0..100 {
                        let t = i as f64 * 0.01;
                        black_box(synth.sample(LeadId::V2, t, pathology, 75.0, &params));
                    }
                });
            },
        );
    }

    group.finish();
}

/// The artifact layer alone at increasing levels.
fn bench_artifact(c: &mut Criterion) {
    let mut group = c.benchmark_group("artifact");

    let compositor = ArtifactCompositor::new();
    for level in [0.0, 15.0, 100.0] {
        let mut noise = SeededNoise::new(42);
        group.bench_with_input(BenchmarkId::from_parameter(level), &level, |b, &level| {
            b.iter(|| {
                for i in 0..100 {
                    let t = i as f64 * 0.01;
                    black_box(compositor.apply(0.5, t, level, &mut noise));
                }
            });
        });
    }

    group.finish();
}

// =============================================================================
// FULL REDRAW
// =============================================================================

fn bench_redraw(c: &mut Criterion) {
    let mut group = c.benchmark_group("redraw");
    group.sample_size(50);

    let layout = DisplayLayout::default();
    let total = 12 * layout.strip_samples + layout.rhythm_samples;
    group.throughput(Throughput::Elements(total as u64));

    for pathology in [Pathology::Normal, Pathology::Hyperkalemia, Pathology::Vfib] {
        let mut sim = Simulator::new(SeededNoise::new(7));
        sim.select_pathology(pathology);
        group.bench_function(BenchmarkId::from_parameter(pathology.key()), |b| {
            b.iter(|| black_box(sim.redraw(&layout)));
        });
    }

    group.finish();
}

criterion_group!(sample_benches, bench_sample, bench_artifact);
criterion_group!(redraw_benches, bench_redraw);

criterion_main!(sample_benches, redraw_benches);
