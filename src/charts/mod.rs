//! Charts module - Chart rendering

mod plotter;
mod renderer;
pub mod wordcloud;

pub use plotter::ChartPlotter;
pub use renderer::{RenderError, StaticChartRenderer};
