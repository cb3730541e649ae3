//! Human-readable error descriptions and structured JSON error formatting.

use arcfit_core::ArcfitError;
use arcfit_plot::PlotError;

pub fn error_reason_name(e: &ArcfitError) -> &'static str {
    match e {
        ArcfitError::Read(_) => "Read",
        ArcfitError::EmptyCurve(_) => "EmptyCurve",
        ArcfitError::CurveTooShort { .. } => "CurveTooShort",
        ArcfitError::DegenerateGeometry => "DegenerateGeometry",
        ArcfitError::PhaseNotFound { .. } => "PhaseNotFound",
        ArcfitError::InvalidParameter(_) => "InvalidParameter",
    }
}

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(ae) = err.downcast_ref::<ArcfitError>() {
        return match ae {
            ArcfitError::Read(msg) => format!(
                "What happened: The samples file could not be read ({msg}).\nLikely causes: Wrong path, a line without exactly two numeric columns, or a CSV without a 'time,value' header.\nHow to fix: Check --data and --format; each line must hold a time and a value."
            ),
            ArcfitError::EmptyCurve(stage) => format!(
                "What happened: No samples were left for {stage}.\nLikely causes: An empty input file, or a window that selects no samples (for example start > end).\nHow to fix: Check the input file and the --start/--end values, or let the window be detected."
            ),
            ArcfitError::CurveTooShort { stage, needed, len } => format!(
                "What happened: {stage} needs at least {needed} samples but got {len}.\nLikely causes: A short trace or smoothing sample counts that are too large for it.\nHow to fix: Lower --smooth-samples / --derivative-smooth-samples or record a longer trace."
            ),
            ArcfitError::DegenerateGeometry => "What happened: The first, middle and last samples of the window are collinear, so no seed circle exists.\nLikely causes: The window covers a straight segment instead of an arc.\nHow to fix: Adjust --start/--end or the phase detection settings so the window spans the bend.".to_string(),
            ArcfitError::PhaseNotFound { threshold } => format!(
                "What happened: No 2nd derivative sample exceeds the detection threshold ({threshold}).\nLikely causes: The trace has no curvature transition, or --peak-multiplier is too high.\nHow to fix: Lower --peak-multiplier or pass the window explicitly with --start and --end."
            ),
            ArcfitError::InvalidParameter(msg) => format!(
                "What happened: Invalid parameter ({msg}).\nLikely causes: An out-of-range command-line flag or config value.\nHow to fix: Correct the value and rerun."
            ),
        };
    }

    if let Some(pe) = err.downcast_ref::<PlotError>() {
        return format!(
            "What happened: The plot could not be produced ({pe}).\nLikely causes: An unwritable output directory or an unusable image width.\nHow to fix: Check --image and --image-width, or pass --no-image."
        );
    }

    // String-based heuristics for errors coming from config loading and validation
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("failed to read config") {
        return format!(
            "What happened: {msg}.\nLikely causes: The --config path does not exist or is not readable.\nHow to fix: Pass an existing TOML file, or omit --config to use built-in defaults."
        );
    }

    if lower.contains("invalid config toml") {
        let cause = err.root_cause();
        return format!(
            "What happened: The config file is not valid TOML for this tool ({cause}).\nLikely causes: A typo in a key or section, or a value of the wrong type.\nHow to fix: Compare with etc/arcfit.toml and fix the reported key."
        );
    }

    if lower.contains("must be") {
        return format!(
            "What happened: Invalid configuration ({msg}).\nLikely causes: An out-of-range value in the TOML or on the command line.\nHow to fix: Edit the config or the flag, then rerun."
        );
    }

    if lower.contains("failed to save plot") {
        return format!(
            "What happened: {msg}.\nLikely causes: The output directory is not writable.\nHow to fix: Choose another --image path or pass --no-image."
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes per error kind; everything untyped returns 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    match err.downcast_ref::<ArcfitError>() {
        Some(ArcfitError::Read(_)) => 3,
        Some(ArcfitError::EmptyCurve(_) | ArcfitError::CurveTooShort { .. }) => 4,
        Some(ArcfitError::DegenerateGeometry) => 5,
        Some(ArcfitError::PhaseNotFound { .. }) => 6,
        _ => 1,
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    if let Some(ae) = err.downcast_ref::<ArcfitError>() {
        let reason = error_reason_name(ae);
        return match ae {
            ArcfitError::PhaseNotFound { threshold } => json!({
                "reason": reason,
                "details": { "threshold": threshold },
                "message": humanize(err),
            }),
            ArcfitError::CurveTooShort { stage, needed, len } => json!({
                "reason": reason,
                "details": { "stage": stage, "needed": needed, "len": len },
                "message": humanize(err),
            }),
            _ => json!({ "reason": reason, "message": humanize(err) }),
        }
        .to_string();
    }

    // Generic error JSON
    json!({ "reason": "Error", "message": humanize(err) }).to_string()
}
