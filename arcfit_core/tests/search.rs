use arcfit_core::{Curve, Point, SearchCfg, TimeWindow, estimate_circle};
use rstest::rstest;

fn wobbly_arc(n: usize) -> Curve {
    (0..n)
        .map(|i| {
            let t = std::f64::consts::PI * (0.9 - 0.8 * i as f64 / (n - 1) as f64);
            let r = 0.05f64.mul_add((11.0 * t).sin(), 3.0);
            Point::new(r * t.cos() + 1.0, r * t.sin() - 2.0)
        })
        .collect()
}

fn cfg(threads: usize, pruning: bool) -> SearchCfg {
    SearchCfg {
        radius_steps: 24,
        coordinate_steps: 18,
        threads,
        pruning,
        ..SearchCfg::default()
    }
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(5)]
fn pruning_and_threads_do_not_change_the_winner(#[case] threads: usize) {
    let curve = wobbly_arc(120);
    let window = TimeWindow::new(curve.points()[0].x, curve.points()[119].x);
    let full = estimate_circle(&curve, window, &cfg(1, false)).unwrap();
    let pruned = estimate_circle(&curve, window, &cfg(threads, true)).unwrap();

    assert_eq!(full.best, pruned.best);
    assert_eq!(full.best_error.to_bits(), pruned.best_error.to_bits());
    assert_eq!(full.pruned, 0);
    assert_eq!(full.evaluated, 24 * 18 * 18);
    assert_eq!(pruned.evaluated + pruned.pruned, 24 * 18 * 18);
    assert!(pruned.pruned > 0);
}

#[test]
fn unpruned_parallel_matches_sequential() {
    let curve = wobbly_arc(80);
    let window = TimeWindow::new(curve.points()[0].x, curve.points()[79].x);
    let a = estimate_circle(&curve, window, &cfg(1, false)).unwrap();
    let b = estimate_circle(&curve, window, &cfg(4, false)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn winner_lies_inside_sampled_grid() {
    let curve = wobbly_arc(60);
    let window = TimeWindow::new(curve.points()[0].x, curve.points()[59].x);
    let out = estimate_circle(&curve, window, &cfg(1, true)).unwrap();
    let b = out.bounds;

    let last_r = b.radius.value(b.radius.steps - 1);
    assert!(last_r < b.radius.max);
    for axis in [b.radius, b.x, b.y] {
        assert!(axis.values().all(|v| v >= axis.min && v < axis.max));
        assert_eq!(axis.values().count(), axis.steps);
    }
    if out.best != out.seed {
        assert!(b.radius.values().any(|r| r == out.best.radius));
        assert!(b.x.values().any(|x| x == out.best.center.x));
        assert!(b.y.values().any(|y| y == out.best.center.y));
    }
}

#[test]
fn equal_error_never_replaces_seed() {
    // Points exactly on a circle: the seed already has the minimum error.
    let curve: Curve = (0..30)
        .map(|i| {
            let t = f64::from(i) * 0.1;
            Point::new(2.0 * t.cos(), 2.0 * t.sin())
        })
        .collect();
    let window = TimeWindow::new(curve.points()[29].x, curve.points()[0].x);
    // Neither 2.0 nor the seed centre is on this grid.
    let cfg = SearchCfg {
        radius_steps: 23,
        coordinate_steps: 17,
        ..cfg(3, true)
    };
    let out = estimate_circle(&curve, window, &cfg).unwrap();
    assert_eq!(out.best, out.seed);
    assert_eq!(out.best_error, out.seed_error);
}
