//! Heat Survey - Urban Heat Island Survey Report
//!
//! Loads the interview survey and presents it as an interactive report:
//! aggregate charts, a text-mining page and a per-city drill-down.

mod charts;
mod config;
mod data;
mod export;
mod gui;
mod stats;
mod view;

use anyhow::{anyhow, Context};
use clap::Parser;
use config::Args;
use data::{DataLoader, DataProcessor};
use eframe::egui;
use gui::SurveyApp;
use log::error;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.default_log_level()),
    )
    .init();

    // Fatal before any window opens: missing file or columns.
    let (table, report) = DataLoader::load(&args.data)
        .inspect_err(|e| error!("{}", e))
        .with_context(|| format!("Cannot start the report from {}", args.data.display()))?;
    let table = DataProcessor::normalize(&table);

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title(&args.title),
        ..Default::default()
    };

    let title = args.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(|cc| Ok(Box::new(SurveyApp::new(cc, args, table, report)))),
    )
    .map_err(|e| anyhow!("{}", e))
}
