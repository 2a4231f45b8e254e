use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_TITLE: &str = "Urban Heat Island Effect in Moroccan Cities";

/// Interactive report for the urban heat island interview survey.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The survey CSV with the City, Person ID and Q1-Q5 columns.
    #[arg(short, long, default_value = "interview_data.csv")]
    pub data: PathBuf,

    /// (directory) Where "Export Report" writes the chart images and summary.json.
    #[arg(short, long, default_value = "report")]
    pub export_dir: PathBuf,

    /// Title shown at the top of the report.
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// If passed as an argument, will turn on debug logging.
    #[arg(long)]
    pub verbose: bool,
}

impl Args {
    /// Log filter used when RUST_LOG is not set.
    pub fn default_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["heat_survey"]);
        assert_eq!(args.data, PathBuf::from("interview_data.csv"));
        assert_eq!(args.export_dir, PathBuf::from("report"));
        assert_eq!(args.title, DEFAULT_TITLE);
        assert_eq!(args.default_log_level(), "info");
    }

    #[test]
    fn overrides() {
        let args = Args::parse_from([
            "heat_survey",
            "--data",
            "survey.csv",
            "-e",
            "out",
            "--verbose",
        ]);
        assert_eq!(args.data, PathBuf::from("survey.csv"));
        assert_eq!(args.export_dir, PathBuf::from("out"));
        assert_eq!(args.default_log_level(), "debug");
    }
}
