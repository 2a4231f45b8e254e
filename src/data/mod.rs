//! Data module - survey loading, model and processing

mod loader;
mod processor;
mod survey;

pub use loader::{DataLoader, LoadReport, LoaderError, RowIssue};
pub use processor::DataProcessor;
pub use survey::{CategoricalColumn, SurveyRow, SurveyTable};

#[cfg(test)]
pub(crate) use survey::fixtures;
