//! Command execution: config merging, curve sources, running and reporting.

use std::path::{Path, PathBuf};

use arcfit_config::{Config, CsvFileSource, TextFileSource};
use arcfit_core::plot::{PANELS, render};
use arcfit_core::runner::{self, Analysis, RunParams, WindowSource};
use arcfit_plot::PlotCanvas;
use arcfit_traits::{CurveSource, PlotSink};
use eyre::{Result, WrapErr};
use serde_json::json;

use crate::cli::{ImageArgs, InputArgs, InputFormat, PipelineArgs, SearchArgs};

pub fn apply_pipeline(cfg: &mut Config, p: &PipelineArgs) {
    if let Some(s) = p.start {
        cfg.window.start = Some(s);
    }
    if let Some(e) = p.end {
        cfg.window.end = Some(e);
    }
    if let Some(n) = p.smooth_samples {
        cfg.preprocess.smooth_samples = n;
    }
    if let Some(n) = p.derivative_smooth_samples {
        cfg.preprocess.derivative_smooth_samples = n;
    }
    if let Some(m) = p.peak_multiplier {
        cfg.phase.peak_detection_multiplier = m;
    }
    if let Some(f) = p.enlarge_factor {
        cfg.phase.enlarge_factor = f;
    }
}

pub fn apply_search(cfg: &mut Config, s: &SearchArgs) {
    if let Some(f) = s.radius_factor {
        cfg.search.radius_move_factor = f;
    }
    if let Some(f) = s.coordinate_factor {
        cfg.search.coordinate_move_factor = f;
    }
    if let Some(n) = s.radius_steps {
        cfg.search.radius_steps = n;
    }
    if let Some(n) = s.coordinate_steps {
        cfg.search.coordinate_steps = n;
    }
    if let Some(n) = s.threads {
        cfg.search.threads = n;
    }
    if s.no_pruning {
        cfg.search.pruning = false;
    }
}

pub fn apply_image(cfg: &mut Config, i: &ImageArgs) {
    if let Some(path) = &i.image {
        cfg.plot.file = path.display().to_string();
        cfg.plot.enabled = true;
    }
    if let Some(w) = i.image_width {
        cfg.plot.width = w;
    }
    if i.no_image {
        cfg.plot.enabled = false;
    }
}

fn open_source(input: &InputArgs) -> Box<dyn CurveSource> {
    match input.format {
        InputFormat::Text => Box::new(TextFileSource::new(&input.data)),
        InputFormat::Csv => Box::new(CsvFileSource::new(&input.data)),
    }
}

fn window_source_name(s: WindowSource) -> &'static str {
    match s {
        WindowSource::Manual => "manual",
        WindowSource::Detected { .. } => "detected",
    }
}

fn write_plot(analysis: &Analysis, width: u32, path: &Path) -> Result<()> {
    let mut canvas = PlotCanvas::new(width, PANELS)?;
    render(analysis, &mut canvas)?;
    canvas
        .save(path)
        .map_err(|e| eyre::eyre!("failed to save plot {}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), width, "plot written");
    Ok(())
}

pub fn run_estimate(cfg: &Config, input: &InputArgs, json_out: bool) -> Result<()> {
    let params = RunParams::from(cfg);
    let mut source = open_source(input);
    let analysis = runner::run(source.as_mut(), &params)?;

    let image = if cfg.plot.enabled {
        let path = PathBuf::from(&cfg.plot.file);
        write_plot(&analysis, cfg.plot.width, &path)?;
        Some(path)
    } else {
        None
    };

    let fit = analysis.estimation();
    let out = &analysis.outcome;
    if json_out {
        let v = json!({
            "window": {
                "start": analysis.window.start,
                "end": analysis.window.end,
                "source": window_source_name(analysis.window_source),
            },
            "points": analysis.windowed.len(),
            "radius": fit.radius,
            "center": { "x": fit.center.x, "y": fit.center.y },
            "error": out.best_error,
            "seed": {
                "radius": out.seed.radius,
                "center": { "x": out.seed.center.x, "y": out.seed.center.y },
                "error": out.seed_error,
            },
            "evaluated": out.evaluated,
            "pruned": out.pruned,
            "image": image.as_ref().map(|p| p.display().to_string()),
        });
        println!("{v}");
    } else {
        println!(
            "window: [{}..{}] ({})",
            analysis.window.start,
            analysis.window.end,
            window_source_name(analysis.window_source)
        );
        println!("radius: {}", fit.radius);
        println!("center: ({}, {})", fit.center.x, fit.center.y);
        if let Some(p) = &image {
            println!("image: {}", p.display());
        }
    }
    Ok(())
}

pub fn run_detect(cfg: &Config, input: &InputArgs, json_out: bool) -> Result<()> {
    let params = RunParams::from(cfg);
    let mut source = open_source(input);
    let det = runner::detect(source.as_mut(), &params)?;
    if json_out {
        let v = json!({
            "window": { "start": det.window.start, "end": det.window.end },
            "raw": { "start": det.raw.start, "end": det.raw.end },
            "d2_offset": det.preprocessed.d2_offset,
            "inverted": det.window.is_inverted(),
        });
        println!("{v}");
    } else {
        println!("window: [{}..{}]", det.window.start, det.window.end);
    }
    Ok(())
}

pub fn run_inspect(input: &InputArgs, json_out: bool) -> Result<()> {
    let mut source = open_source(input);
    let curve = runner::read_curve(source.as_mut())?;
    let ext = curve
        .extents()
        .wrap_err_with(|| format!("cannot inspect {}", input.data.display()))?;
    if json_out {
        let v = json!({
            "samples": curve.len(),
            "x": { "min": ext.min_x, "max": ext.max_x },
            "y": { "min": ext.min_y, "max": ext.max_y },
        });
        println!("{v}");
    } else {
        println!("samples: {}", curve.len());
        println!("x: [{}..{}]", ext.min_x, ext.max_x);
        println!("y: [{}..{}]", ext.min_y, ext.max_y);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config_values() {
        let mut cfg = Config::default();
        cfg.search.radius_steps = 10;
        apply_search(
            &mut cfg,
            &SearchArgs {
                radius_steps: Some(33),
                no_pruning: true,
                ..SearchArgs::default()
            },
        );
        apply_pipeline(
            &mut cfg,
            &PipelineArgs {
                start: Some(1.0),
                ..PipelineArgs::default()
            },
        );
        apply_image(
            &mut cfg,
            &ImageArgs {
                image: Some(PathBuf::from("plots/a.png")),
                ..ImageArgs::default()
            },
        );
        assert_eq!(cfg.search.radius_steps, 33);
        assert!(!cfg.search.pruning);
        assert_eq!(cfg.window.start, Some(1.0));
        assert_eq!(cfg.window.bounds(), None);
        assert_eq!(cfg.plot.file, "plots/a.png");
        assert!(cfg.plot.enabled);

        let mut off = Config::default();
        off.plot.enabled = false;
        apply_image(
            &mut off,
            &ImageArgs {
                image: Some(PathBuf::from("b.png")),
                ..ImageArgs::default()
            },
        );
        assert!(off.plot.enabled);
    }

    #[test]
    fn absent_flags_keep_config() {
        let mut cfg = Config::default();
        cfg.phase.enlarge_factor = 0.7;
        apply_pipeline(&mut cfg, &PipelineArgs::default());
        apply_search(&mut cfg, &SearchArgs::default());
        assert_eq!(cfg.phase.enlarge_factor, 0.7);
        assert!(cfg.search.pruning);
    }
}
