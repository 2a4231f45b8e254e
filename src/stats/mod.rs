//! Stats module - value counting and text mining

mod calculator;
pub mod text;

pub use calculator::{FrequencyDistribution, StatsCalculator};
