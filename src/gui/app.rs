//! Survey Report Main Application
//! Main window with navigation panel and report page.

use crate::config::Args;
use crate::data::{DataLoader, DataProcessor, LoadReport, LoaderError, SurveyTable};
use crate::export::ReportExporter;
use crate::gui::{ControlPanel, ControlPanelAction, PageViewer};
use crate::view::build_view;
use egui::SidePanel;
use log::{debug, error, info, warn};
use std::path::Path;

/// Main application window.
pub struct SurveyApp {
    args: Args,
    /// Normalized table; replaced wholesale on reload, never edited.
    table: SurveyTable,
    report: LoadReport,
    control_panel: ControlPanel,
    page_viewer: PageViewer,
}

impl SurveyApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        args: Args,
        table: SurveyTable,
        report: LoadReport,
    ) -> Self {
        let mut control_panel = ControlPanel::new();
        control_panel.set_source(report.path.clone(), table.len(), report.skipped.len());
        control_panel.set_status(&format!("Loaded {} responses", table.len()));

        Self {
            args,
            table,
            report,
            control_panel,
            page_viewer: PageViewer::new(),
        }
    }

    /// Load and normalize a survey file, keeping the current table on failure.
    fn load(&mut self, path: &Path) {
        match DataLoader::load(path) {
            Ok((table, report)) => {
                self.table = DataProcessor::normalize(&table);
                self.control_panel
                    .set_source(path.to_path_buf(), self.table.len(), report.skipped.len());
                self.control_panel
                    .set_status(&format!("Loaded {} responses", self.table.len()));
                self.report = report;
                self.page_viewer.clear();
            }
            Err(LoaderError::SchemaMismatch { path, missing }) => {
                error!("{} is missing columns: {:?}", path.display(), missing);
                self.control_panel
                    .set_status(&format!("Not a survey file, missing: {}", missing.join(", ")));
            }
            Err(e) => {
                error!("{}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn handle_open_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.load(&path);
        }
    }

    fn handle_reload(&mut self) {
        let path = self.report.path.clone();
        self.load(&path);
    }

    fn handle_export(&mut self) {
        let dir = self.args.export_dir.clone();
        match ReportExporter::export(&self.args.title, &self.table, &self.report, &dir) {
            Ok(files) => {
                info!("Exported {} files to {}", files.len(), dir.display());
                self.control_panel
                    .set_status(&format!("Exported {} files to {}", files.len(), dir.display()));
                if let Err(e) = open::that(&dir) {
                    warn!("Could not open {}: {}", dir.display(), e);
                }
            }
            Err(e) => {
                error!("Export failed: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for SurveyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Navigation
        SidePanel::left("navigation")
            .min_width(240.0)
            .max_width(300.0)
            .show(ctx, |ui| {
                let action = self.control_panel.show(ui);

                match action {
                    ControlPanelAction::ViewChanged(view) => debug!("View: {}", view.label()),
                    ControlPanelAction::OpenCsv => self.handle_open_csv(),
                    ControlPanelAction::Reload => self.handle_reload(),
                    ControlPanelAction::ExportReport => self.handle_export(),
                    ControlPanelAction::None => {}
                }
            });

        // Central panel - active page, rebuilt from the table every frame
        let data = build_view(
            &self.table,
            self.control_panel.view,
            self.page_viewer.selected_city.as_deref(),
        );
        egui::CentralPanel::default().show(ctx, |ui| {
            self.page_viewer.show(ui, &self.args.title, &data);
        });
    }
}
