//! Survey Data Loader Module
//! Reads the interview CSV with Polars and validates it into typed rows.

use crate::data::survey::*;
use log::{info, warn};
use polars::prelude::*;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Survey data unavailable at {path}: {source}")]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Survey file {path} is missing required column(s): {}", .missing.join(", "))]
    SchemaMismatch { path: PathBuf, missing: Vec<String> },
    #[error("Failed to read CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Per-row problem that causes the row to be skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowIssue {
    #[error("missing Person ID")]
    MissingPersonId,
    #[error("Person ID {0:?} is not a positive integer")]
    InvalidPersonId(String),
    #[error("missing City")]
    MissingCity,
    #[error("Person ID {0} already used by an earlier row")]
    DuplicatePersonId(u64),
}

/// Outcome of a load beyond the table itself.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub path: PathBuf,
    pub rows_read: usize,
    /// Source line number (header is line 1) and the reason it was skipped.
    pub skipped: Vec<(usize, RowIssue)>,
}

impl LoadReport {
    pub fn rows_kept(&self) -> usize {
        self.rows_read - self.skipped.len()
    }
}

/// Loads survey files into a [`SurveyTable`].
pub struct DataLoader;

impl DataLoader {
    /// Load and validate a survey CSV.
    ///
    /// Every column is read as text so the loader decides what a valid
    /// `Person ID` is. Rows with an unusable ID or city are skipped and
    /// reported, never fatal.
    pub fn load(path: impl AsRef<Path>) -> Result<(SurveyTable, LoadReport), LoaderError> {
        let path = path.as_ref();

        // Polars reports a missing file or a directory as a generic compute error; check first.
        let unavailable = |source| LoaderError::DataUnavailable {
            path: path.to_path_buf(),
            source,
        };
        let meta = fs::metadata(path).map_err(unavailable)?;
        if !meta.is_file() {
            return Err(unavailable(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        let columns = Self::resolve_columns(&df, path)?;
        Self::rows_from_frame(&df, &columns, path)
    }

    /// Map each required header to the actual (possibly space-padded) column name.
    fn resolve_columns(
        df: &DataFrame,
        path: &Path,
    ) -> Result<HashMap<&'static str, String>, LoaderError> {
        let present: HashMap<String, String> = df
            .get_column_names()
            .iter()
            .map(|name| (name.trim().to_string(), name.to_string()))
            .collect();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !present.contains_key(**col))
            .map(|col| col.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(LoaderError::SchemaMismatch {
                path: path.to_path_buf(),
                missing,
            });
        }

        Ok(REQUIRED_COLUMNS
            .iter()
            .map(|col| (*col, present[*col].clone()))
            .collect())
    }

    fn rows_from_frame(
        df: &DataFrame,
        columns: &HashMap<&'static str, String>,
        path: &Path,
    ) -> Result<(SurveyTable, LoadReport), LoaderError> {
        let text = |header: &str| -> Result<Vec<Option<String>>, LoaderError> {
            let ca = df.column(columns[header].as_str())?.str()?;
            Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
        };

        let city = text(COL_CITY)?;
        let person_id = text(COL_PERSON_ID)?;
        let q1 = text(COL_Q1_ANSWER)?;
        let q2_choice = text(COL_Q2_CHOICE)?;
        let q2_text = text(COL_Q2_TEXT)?;
        let q3_choice = text(COL_Q3_CHOICE)?;
        let q3_text = text(COL_Q3_TEXT)?;
        let q4 = text(COL_Q4_ANSWER)?;
        let q5 = text(COL_Q5_ANSWER)?;

        let mut report = LoadReport {
            path: path.to_path_buf(),
            rows_read: df.height(),
            skipped: Vec::new(),
        };
        let mut rows = Vec::with_capacity(df.height());
        let mut seen_ids = HashSet::new();

        for i in 0..df.height() {
            let line = i + 2;
            let parsed = Self::parse_person_id(person_id[i].as_deref())
                .and_then(|id| match non_blank(&city[i]) {
                    Some(city) => Ok((id, city)),
                    None => Err(RowIssue::MissingCity),
                })
                .and_then(|(id, city)| {
                    // First occurrence wins.
                    if seen_ids.insert(id) {
                        Ok((id, city))
                    } else {
                        Err(RowIssue::DuplicatePersonId(id))
                    }
                });

            match parsed {
                Ok((id, city)) => rows.push(SurveyRow {
                    person_id: id,
                    city,
                    q1_answer: q1[i].clone().unwrap_or_default(),
                    q2_choice: non_blank(&q2_choice[i]),
                    q2_text: non_blank(&q2_text[i]),
                    q3_choice: non_blank(&q3_choice[i]),
                    q3_text: non_blank(&q3_text[i]),
                    q4_answer: q4[i].clone().unwrap_or_default(),
                    q5_answer: non_blank(&q5[i]),
                }),
                Err(issue) => {
                    warn!("{}:{}: skipping row, {}", path.display(), line, issue);
                    report.skipped.push((line, issue));
                }
            }
        }

        info!(
            "Loaded {} rows from {} ({} skipped)",
            rows.len(),
            path.display(),
            report.skipped.len()
        );

        Ok((SurveyTable::new(rows), report))
    }

    /// Accepts plain integers and integral floats such as `"3.0"`.
    fn parse_person_id(raw: Option<&str>) -> Result<u64, RowIssue> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty());
        let Some(raw) = raw else {
            return Err(RowIssue::MissingPersonId);
        };

        let invalid = || RowIssue::InvalidPersonId(raw.to_string());

        let id = match raw.parse::<u64>() {
            Ok(id) => id,
            Err(_) => {
                let v: f64 = raw.parse().map_err(|_| invalid())?;
                if !v.is_finite() || v.fract() != 0.0 || v < 0.0 || v > u64::MAX as f64 {
                    return Err(invalid());
                }
                v as u64
            }
        };

        if id == 0 {
            return Err(invalid());
        }
        Ok(id)
    }
}

/// Keep the original text but treat whitespace-only cells as absent.
fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.trim().is_empty()).cloned()
}
