//! CLI argument definitions and shared statics.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "arcfit", version, about = "Arc radius estimation from time/value traces")]
pub struct Cli {
    /// Path to config TOML (typed); built-in defaults when omitted
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print results and errors as JSON, log as JSON lines
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); RUST_LOG takes precedence
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Layout of the samples file.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum InputFormat {
    /// Two whitespace-separated columns per line; ',' may be a decimal separator
    #[default]
    Text,
    /// CSV with a `time,value` header
    Csv,
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Samples file: (time, value) pairs
    #[arg(long, value_name = "FILE")]
    pub data: PathBuf,

    /// Samples file layout
    #[arg(long, value_enum, default_value_t = InputFormat::Text)]
    pub format: InputFormat,
}

/// Pipeline overrides; each one takes precedence over the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct PipelineArgs {
    /// Manual window start (used only together with --end)
    #[arg(long, value_name = "T", allow_negative_numbers = true)]
    pub start: Option<f64>,
    /// Manual window end (used only together with --start)
    #[arg(long, value_name = "T", allow_negative_numbers = true)]
    pub end: Option<f64>,
    /// Samples spanned by the smoothing kernel on the raw curve
    #[arg(long, value_name = "N")]
    pub smooth_samples: Option<usize>,
    /// Samples spanned by the smoothing kernel on each derivative
    #[arg(long, value_name = "N")]
    pub derivative_smooth_samples: Option<usize>,
    /// Threshold of the 2nd derivative as a fraction of its range, [0..1]
    #[arg(long, value_name = "F")]
    pub peak_multiplier: Option<f64>,
    /// Fraction of the detected width added on each side
    #[arg(long, value_name = "F")]
    pub enlarge_factor: Option<f64>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Radius range is [seed / F, seed * F]
    #[arg(long, value_name = "F")]
    pub radius_factor: Option<f64>,
    /// Centre range is seed +/- F * |first - middle| per axis
    #[arg(long, value_name = "F")]
    pub coordinate_factor: Option<f64>,
    /// Radius samples
    #[arg(long, value_name = "N")]
    pub radius_steps: Option<usize>,
    /// Samples per centre axis
    #[arg(long, value_name = "N")]
    pub coordinate_steps: Option<usize>,
    /// Worker threads for the search (0 = all cores)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,
    /// Evaluate every candidate in full
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_pruning: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ImageArgs {
    /// Output PNG path
    #[arg(long, value_name = "FILE", conflicts_with = "no_image")]
    pub image: Option<PathBuf>,
    /// Output image width in pixels (height is 3x)
    #[arg(long, value_name = "PX")]
    pub image_width: Option<u32>,
    /// Skip rendering
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_image: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect the phase window (or use --start/--end) and fit a circle
    Estimate {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        pipeline: PipelineArgs,
        #[command(flatten)]
        search: SearchArgs,
        #[command(flatten)]
        image: ImageArgs,
    },
    /// Print the detected phase window only
    Detect {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        pipeline: PipelineArgs,
    },
    /// Print sample count and extents
    Inspect {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn estimate_flags_parse() {
        let cli = Cli::try_parse_from([
            "arcfit",
            "--json",
            "estimate",
            "--data",
            "trace.txt",
            "--format",
            "csv",
            "--start",
            "-1.5",
            "--end",
            "2",
            "--radius-steps",
            "50",
            "--no-pruning",
            "--no-image",
        ])
        .unwrap();
        assert!(cli.json);
        let Commands::Estimate {
            input,
            pipeline,
            search,
            image,
        } = cli.cmd
        else {
            panic!("expected estimate");
        };
        assert_eq!(input.format, InputFormat::Csv);
        assert_eq!(pipeline.start, Some(-1.5));
        assert_eq!(pipeline.end, Some(2.0));
        assert_eq!(search.radius_steps, Some(50));
        assert!(search.no_pruning);
        assert!(image.no_image);
    }

    #[test]
    fn image_and_no_image_conflict() {
        let r = Cli::try_parse_from([
            "arcfit", "estimate", "--data", "t", "--image", "a.png", "--no-image",
        ]);
        assert!(r.is_err());
    }
}
