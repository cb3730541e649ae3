#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

mod cli;
mod error_fmt;
mod estimate;

use std::fs;
use std::path::Path;

use arcfit_config::Config;
use clap::Parser;
use eyre::{Result, WrapErr};

use crate::cli::{Cli, Commands, FILE_GUARD, JSON_MODE};
use crate::error_fmt::{exit_code_for_error, format_error_json, humanize};

fn main() {
    if let Err(e) = real_main() {
        if JSON_MODE.get().copied().unwrap_or(false) {
            println!("{}", format_error_json(&e));
        } else {
            eprintln!("{}", humanize(&e));
        }
        std::process::exit(exit_code_for_error(&e));
    }
}

fn real_main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    let mut cfg = load_config(cli.config.as_deref())?;
    match &cli.cmd {
        Commands::Estimate {
            pipeline,
            search,
            image,
            ..
        } => {
            estimate::apply_pipeline(&mut cfg, pipeline);
            estimate::apply_search(&mut cfg, search);
            estimate::apply_image(&mut cfg, image);
        }
        Commands::Detect { pipeline, .. } => estimate::apply_pipeline(&mut cfg, pipeline),
        Commands::Inspect { .. } => {}
    }
    cfg.validate()?;
    init_logging(&cli, &cfg)?;
    tracing::debug!(?cfg, "effective config");

    match &cli.cmd {
        Commands::Estimate { input, .. } => estimate::run_estimate(&cfg, input, cli.json),
        Commands::Detect { input, .. } => estimate::run_detect(&cfg, input, cli.json),
        Commands::Inspect { input } => estimate::run_inspect(input, cli.json),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
    arcfit_config::load_toml(&text).wrap_err("invalid config TOML")
}

fn init_logging(cli: &Cli, cfg: &Config) -> Result<()> {
    use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

    let level = cli
        .log_level
        .as_deref()
        .or(cfg.logging.level.as_deref())
        .unwrap_or("info");
    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(level).wrap_err_with(|| format!("invalid log level {level:?}"))?,
    };

    let console = if cli.json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed()
    };

    let file = match cfg.logging.file.as_deref() {
        Some(file) => {
            let path = Path::new(file);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let Some(name) = path.file_name() else {
                eyre::bail!("logging.file must name a file, got {file:?}");
            };
            let appender = match cfg.logging.rotation.as_deref() {
                Some("daily") => tracing_appender::rolling::daily(dir, name),
                Some("hourly") => tracing_appender::rolling::hourly(dir, name),
                _ => tracing_appender::rolling::never(dir, name),
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            Some(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(writer)
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .wrap_err("failed to initialise logging")
}
