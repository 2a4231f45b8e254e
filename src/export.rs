//! Report Export Module
//! Writes the report charts as PNG images plus a JSON summary of the counts.

use crate::charts::wordcloud;
use crate::charts::{RenderError, StaticChartRenderer};
use crate::data::{CategoricalColumn, LoadReport, SurveyTable};
use crate::stats::text::{build_corpus, distinct_suggestions};
use crate::stats::StatsCalculator;
use image::RgbImage;
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CHART_WIDTH: u32 = 800;
const CHART_HEIGHT: u32 = 600;
const WORD_CLOUD_FILE: &str = "q5_word_cloud.png";

pub const Q2_TITLE: &str = "Experience of Unusual Temperature Rise";
pub const Q3_TITLE: &str = "Health Issues Due to Temperature Rise";
pub const CITY_TITLE: &str = "Number of Participants per City";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Counts and text written to `summary.json`.
#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub title: String,
    pub source: PathBuf,
    pub rows_read: usize,
    pub rows_kept: usize,
    pub rows_skipped: usize,
    pub q2_counts: Vec<(String, usize)>,
    pub q3_counts: Vec<(String, usize)>,
    pub city_counts: Vec<(String, usize)>,
    pub suggestions: Vec<String>,
}

impl ReportSummary {
    pub fn from_table(title: &str, table: &SurveyTable, report: &LoadReport) -> Self {
        let counts = |col| StatsCalculator::count_by_category_with_unlabeled(table, col).sorted_desc();
        Self {
            title: title.to_string(),
            source: report.path.clone(),
            rows_read: report.rows_read,
            rows_kept: report.rows_kept(),
            rows_skipped: report.skipped.len(),
            q2_counts: counts(CategoricalColumn::Q2Choice),
            q3_counts: counts(CategoricalColumn::Q3Choice),
            city_counts: StatsCalculator::count_by_city(table).sorted_desc(),
            suggestions: distinct_suggestions(table),
        }
    }
}

/// Exports the report into a directory.
pub struct ReportExporter;

impl ReportExporter {
    /// Render every chart and the summary into `dir`, returning the files written.
    pub fn export(
        title: &str,
        table: &SurveyTable,
        report: &LoadReport,
        dir: &Path,
    ) -> Result<Vec<PathBuf>, ExportError> {
        fs::create_dir_all(dir)?;
        let mut written = Vec::new();

        let q2 = StatsCalculator::count_by_category_with_unlabeled(table, CategoricalColumn::Q2Choice);
        let q3 = StatsCalculator::count_by_category_with_unlabeled(table, CategoricalColumn::Q3Choice);
        let cities = StatsCalculator::count_by_city(table);

        let charts = [
            (
                "q2_temperature_rise.png",
                StaticChartRenderer::render_pie(&q2, Q2_TITLE, CHART_WIDTH, CHART_HEIGHT)?,
            ),
            (
                "q3_health_issues.png",
                StaticChartRenderer::render_pie(&q3, Q3_TITLE, CHART_WIDTH, CHART_HEIGHT)?,
            ),
            (
                "participants_per_city.png",
                StaticChartRenderer::render_city_bars(&cities, CITY_TITLE, CHART_WIDTH, CHART_HEIGHT)?,
            ),
        ];
        for (name, img) in charts {
            written.push(Self::save_png(&img, &dir.join(name))?);
        }

        match wordcloud::cloud_for_corpus(&build_corpus(table)) {
            Some(cloud) => {
                let img = StaticChartRenderer::render_word_cloud(&cloud)?;
                written.push(Self::save_png(&img, &dir.join(WORD_CLOUD_FILE))?);
            }
            None => debug!("No Q5 answers; skipping word cloud export"),
        }

        let summary = ReportSummary::from_table(title, table, report);
        written.push(Self::write_summary(&summary, dir)?);

        Ok(written)
    }

    fn save_png(img: &RgbImage, path: &Path) -> Result<PathBuf, ExportError> {
        img.save_with_format(path, image::ImageFormat::Png)?;
        debug!("Wrote {}", path.display());
        Ok(path.to_path_buf())
    }

    pub fn write_summary(summary: &ReportSummary, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join("summary.json");
        fs::write(&path, serde_json::to_string_pretty(summary)?)?;
        debug!("Wrote {}", path.display());
        Ok(path)
    }
}
