use arcfit_core::{Curve, Point, SearchCfg, TimeWindow, estimate_circle, gauss_smooth};
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

// Upper half of a circle with a small deterministic wobble
fn synth_arc(n: usize, r: f64, seed: u32) -> Curve {
    // tiny PRNG
    let mut state = seed.max(1);
    let mut next_f64 = || {
        let mut x = state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        state = x;
        f64::from(x) / (f64::from(u32::MAX) + 1.0)
    };
    (0..n)
        .map(|i| {
            let t = std::f64::consts::PI * (1.0 - i as f64 / (n - 1) as f64);
            let noise = (next_f64() * 2.0 - 1.0) * 0.01 * r;
            Point::new(r * t.cos(), r * t.sin() + noise)
        })
        .collect()
}

fn configure(g: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>) {
    // Allow quick tweaking without CLI flags (Criterion 0.5):
    //   BENCH_SAMPLE_SIZE=10 BENCH_MEAS_MS=50 cargo bench -p arcfit_core --bench search
    if let Ok(ss) = std::env::var("BENCH_SAMPLE_SIZE") {
        if let Ok(n) = ss.parse::<usize>() {
            g.sample_size(n.max(10));
        }
    } else {
        g.sample_size(10);
    }
    if let Ok(ms) = std::env::var("BENCH_MEAS_MS")
        && let Ok(ms_u64) = ms.parse::<u64>()
    {
        g.measurement_time(std::time::Duration::from_millis(ms_u64));
    }
}

pub fn bench_grid_search(c: &mut Criterion) {
    let mut g = c.benchmark_group("grid_search");
    configure(&mut g);

    let curve = synth_arc(400, 5.0, 0xC0FFEE);
    let window = TimeWindow::new(-5.0, 5.0);

    for (name, pruning, threads) in [
        ("full", false, 1),
        ("pruned", true, 1),
        ("pruned_4_threads", true, 4),
    ] {
        let cfg = SearchCfg {
            radius_steps: 40,
            coordinate_steps: 40,
            pruning,
            threads,
            ..SearchCfg::default()
        };
        g.bench_function(name, |b| {
            b.iter(|| {
                let out = estimate_circle(black_box(&curve), window, &cfg);
                black_box(out.ok());
            })
        });
    }
    g.finish();
}

pub fn bench_smoothing(c: &mut Criterion) {
    let mut g = c.benchmark_group("smoothing");
    configure(&mut g);

    let curve = synth_arc(50_000, 5.0, 0xBEEF);
    for &radius in &[10usize, 40] {
        g.bench_function(format!("gauss_radius_{radius}"), |b| {
            b.iter_batched(
                || curve.clone(),
                |c| {
                    black_box(gauss_smooth(black_box(&c), radius).ok());
                },
                BatchSize::LargeInput,
            )
        });
    }
    g.finish();
}

criterion_group!(search, bench_grid_search, bench_smoothing);
criterion_main!(search);
