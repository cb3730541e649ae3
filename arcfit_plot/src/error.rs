use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("cannot create {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("panel {0} does not exist")]
    InvalidPanel(usize),
    #[error("invalid canvas size: width {width}, {panels} panels")]
    InvalidSize { width: u32, panels: usize },
}

pub type Result<T> = std::result::Result<T, PlotError>;
