use arcfit_core::mocks::{FailingSource, MemorySource, PlotCall, RecordingSink};
use arcfit_core::plot::{PANELS, render};
use arcfit_core::runner::{self, RunParams, WindowSource};
use arcfit_core::{ArcfitError, PreprocessCfg, SearchCfg};
use arcfit_traits::Rgb;

// Samples whose exact 2nd difference is a Gaussian bump centred at `at`.
fn integrated_bump(n: usize, t0: f64, dt: f64, at: f64) -> MemorySource {
    let mut y = 0.0;
    let mut d1 = 0.0;
    let mut samples = Vec::with_capacity(n);
    for i in 0..n {
        let t = (i as f64).mul_add(dt, t0);
        samples.push((t, y));
        y += d1;
        d1 += (-(t - at) * (t - at) / 0.1).exp();
    }
    MemorySource::new(samples)
}

fn raw_params() -> RunParams {
    RunParams {
        // Radius-0 kernels leave every curve unsmoothed.
        preprocess: PreprocessCfg {
            smooth_samples: 1,
            derivative_smooth_samples: 1,
        },
        search: SearchCfg {
            radius_steps: 12,
            coordinate_steps: 12,
            ..SearchCfg::default()
        },
        ..RunParams::default()
    }
}

#[test]
fn detected_window_is_mapped_to_source_time() {
    let mut src = integrated_bump(600, 100.0, 0.01, 103.0);
    let det = runner::detect(&mut src, &raw_params()).unwrap();

    // d2 lives on its own axis starting at zero.
    assert!(det.raw.end < 10.0);
    assert_eq!(det.window, det.raw.shifted(det.preprocessed.d2_offset));
    assert!(det.window.start < 103.0 && 103.0 < det.window.end, "{:?}", det.window);
}

#[test]
fn run_fits_inside_detected_window() {
    let mut src = integrated_bump(600, 100.0, 0.01, 103.0);
    let a = runner::run(&mut src, &raw_params()).unwrap();
    assert!(matches!(a.window_source, WindowSource::Detected { .. }));
    assert!(!a.windowed.is_empty());
    assert!(a.windowed.points().iter().all(|p| a.window.contains(p.x)));
    assert!(a.estimation().radius.is_finite());
}

#[test]
fn flat_trace_reports_phase_not_found() {
    let mut src = MemorySource::from_fn(200, 5.0, 0.05, |_| 1.5);
    let params = RunParams {
        preprocess: PreprocessCfg {
            smooth_samples: 10,
            derivative_smooth_samples: 4,
        },
        ..RunParams::default()
    };
    assert_eq!(
        runner::run(&mut src, &params),
        Err(ArcfitError::PhaseNotFound { threshold: 0.0 })
    );
}

#[test]
fn source_failures_become_read_errors() {
    let mut src = FailingSource("disk on fire".into());
    assert_eq!(
        runner::run(&mut src, &RunParams::default()),
        Err(ArcfitError::Read("disk on fire".into()))
    );
}

#[test]
fn empty_source_is_an_empty_curve() {
    let mut src = MemorySource::default();
    assert_eq!(
        runner::run(&mut src, &RunParams::default()),
        Err(ArcfitError::EmptyCurve("input curve"))
    );
}

#[test]
fn short_source_fails_in_smoothing() {
    let mut src = MemorySource::from_fn(10, 0.0, 1.0, |x| x * x);
    assert!(matches!(
        runner::run(&mut src, &RunParams::default()),
        Err(ArcfitError::CurveTooShort {
            stage: "smoothing",
            ..
        })
    ));
}

#[test]
fn render_issues_the_full_plan() {
    let mut src = integrated_bump(600, 100.0, 0.01, 103.0);
    let a = runner::run(&mut src, &raw_params()).unwrap();
    let mut sink = RecordingSink::new(PANELS);
    render(&a, &mut sink).unwrap();

    let extents = a.preprocessed.curve.extents().unwrap();
    assert_eq!(
        sink.calls[0],
        PlotCall::UniformScale {
            panel: 0,
            min: (extents.min_x, extents.min_y),
            max: (extents.max_x, extents.max_y),
        }
    );
    assert!(matches!(sink.calls[1], PlotCall::ShareXFitY { panel: 1, from: 0, .. }));
    assert!(matches!(sink.calls[2], PlotCall::ShareXFitY { panel: 2, from: 0, .. }));
    assert_eq!(sink.calls[3], PlotCall::HorizontalLine(0.0, Rgb::GRAY));
    assert_eq!(sink.calls[4], PlotCall::VerticalLine(a.window.start, Rgb::DARK_GRAY));
    assert_eq!(sink.calls[5], PlotCall::VerticalLine(a.window.end, Rgb::DARK_GRAY));

    let lines: Vec<(usize, usize, Rgb)> = sink
        .calls
        .iter()
        .filter_map(|c| match c {
            PlotCall::Polyline { panel, len, color } => Some((*panel, *len, *color)),
            _ => None,
        })
        .collect();
    assert_eq!(
        lines,
        vec![
            (0, 600, Rgb::YELLOW),
            (0, 600, Rgb::GREEN),
            (0, a.windowed.len(), Rgb::RED),
            (1, 599, Rgb::BLUE),
            (2, 598, Rgb::MAGENTA),
        ]
    );
    let fit = a.estimation();
    assert!(sink.calls.contains(&PlotCall::Circle {
        panel: 0,
        center: (fit.center.x, fit.center.y),
        radius: fit.radius,
    }));
    assert!(sink.saved.is_none());
}

#[test]
fn render_needs_three_panels() {
    let mut src = integrated_bump(600, 100.0, 0.01, 103.0);
    let a = runner::run(&mut src, &raw_params()).unwrap();
    let mut sink = RecordingSink::new(2);
    assert!(matches!(
        render(&a, &mut sink),
        Err(ArcfitError::InvalidParameter(_))
    ));
    assert!(sink.calls.is_empty());
}
