//! Navigation Panel Widget
//! Left side panel with the view selector, data source and export controls.

use crate::view::View;
use egui::{Color32, RichText};
use std::path::PathBuf;

/// Left side navigation panel.
pub struct ControlPanel {
    pub view: View,
    pub csv_path: Option<PathBuf>,
    pub row_count: usize,
    pub skipped_count: usize,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            view: View::default(),
            csv_path: None,
            row_count: 0,
            skipped_count: 0,
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the data source summary after a load.
    pub fn set_source(&mut self, path: PathBuf, rows: usize, skipped: usize) {
        self.csv_path = Some(path);
        self.row_count = rows;
        self.skipped_count = skipped;
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.add_space(5.0);
        ui.label(RichText::new("Navigation").size(22.0).strong());
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== View Selector =====
        ui.label(RichText::new("Go to:").size(14.0).strong());
        ui.add_space(5.0);
        for view in View::ALL {
            if ui.radio_value(&mut self.view, view, view.label()).changed() {
                action = ControlPanelAction::ViewChanged(view);
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Data Source =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let path_text = self
                    .csv_path
                    .as_ref()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "No file loaded".to_string());
                ui.label(RichText::new(path_text).size(12.0));
                ui.label(
                    RichText::new(format!(
                        "{} responses, {} skipped",
                        self.row_count, self.skipped_count
                    ))
                    .size(11.0)
                    .color(Color32::GRAY),
                );

                ui.horizontal(|ui| {
                    if ui.button("📂 Open").clicked() {
                        action = ControlPanelAction::OpenCsv;
                    }
                    if ui.button("⟳ Reload").clicked() {
                        action = ControlPanelAction::Reload;
                    }
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export =====
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("📄 Export Report").size(14.0))
                .min_size(egui::vec2(150.0, 30.0));
            if ui.add_enabled(self.row_count > 0, button).clicked() {
                action = ControlPanelAction::ExportReport;
            }
        });

        ui.add_space(10.0);

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Exported") || self.status.starts_with("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by the navigation panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    ViewChanged(View),
    OpenCsv,
    Reload,
    ExportReport,
}
