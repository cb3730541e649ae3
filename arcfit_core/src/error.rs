use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ArcfitError {
    #[error("read error: {0}")]
    Read(String),
    #[error("empty curve: {0}")]
    EmptyCurve(&'static str),
    #[error("{stage}: curve has {len} points, at least {needed} required")]
    CurveTooShort {
        stage: &'static str,
        needed: usize,
        len: usize,
    },
    #[error("degenerate geometry: seed points are collinear")]
    DegenerateGeometry,
    #[error("phase not found: no 2nd derivative sample exceeds {threshold}")]
    PhaseNotFound { threshold: f64 },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, ArcfitError>;
