#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! PNG rendering of an analysis through `arcfit_traits::PlotSink`.

pub mod canvas;
pub mod error;
pub mod mapper;

pub use canvas::PlotCanvas;
pub use error::PlotError;
pub use mapper::PointMapper;
