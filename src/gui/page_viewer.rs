//! Page Viewer Widget
//! Central scrollable area that lays out the active report page.

use crate::charts::wordcloud::{self, WordCloudLayout};
use crate::charts::ChartPlotter;
use crate::data::{SurveyRow, SurveyTable};
use crate::export::{CITY_TITLE, Q2_TITLE, Q3_TITLE};
use crate::stats::text::capitalize;
use crate::stats::FrequencyDistribution;
use crate::view::ViewData;
use egui::{ComboBox, RichText, ScrollArea};

const PIE_SIZE: f32 = 380.0;
const BAR_HEIGHT: f32 = 320.0;
const FOOTER: &str = "© 2023 Urban Heat Island Study in Morocco";

/// Renders a [`ViewData`] as a page.
#[derive(Default)]
pub struct PageViewer {
    /// City chosen in the drill-down selector.
    pub selected_city: Option<String>,
    /// Word cloud for the last corpus drawn; the layout is the costly part.
    cloud: Option<(String, Option<WordCloudLayout>)>,
}

impl PageViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop presentation caches after the table changes.
    pub fn clear(&mut self) {
        self.cloud = None;
        self.selected_city = None;
    }

    pub fn show(&mut self, ui: &mut egui::Ui, title: &str, data: &ViewData) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(RichText::new(format!("🌆 {}", title)).size(28.0));
                ui.separator();

                match data {
                    ViewData::Overview {
                        q2_counts,
                        q3_counts,
                        city_counts,
                    } => Self::show_overview(ui, q2_counts, q3_counts, city_counts),
                    ViewData::DetailedAnalysis {
                        corpus,
                        suggestions,
                    } => self.show_detailed_analysis(ui, corpus, suggestions),
                    ViewData::IndividualResponses {
                        cities,
                        selected_city,
                        responses,
                    } => self.show_individual_responses(ui, cities, selected_city.as_deref(), responses),
                }

                ui.add_space(20.0);
                ui.separator();
                ui.label(FOOTER);
            });
    }

    fn show_overview(
        ui: &mut egui::Ui,
        q2_counts: &FrequencyDistribution,
        q3_counts: &FrequencyDistribution,
        city_counts: &FrequencyDistribution,
    ) {
        ui.heading("Overview of Survey Results");
        ui.add_space(10.0);

        ui.columns(2, |cols| {
            cols[0].label(RichText::new(Q2_TITLE).size(16.0).strong());
            ChartPlotter::draw_pie_chart(&mut cols[0], q2_counts, PIE_SIZE);

            cols[1].label(RichText::new(Q3_TITLE).size(16.0).strong());
            ChartPlotter::draw_pie_chart(&mut cols[1], q3_counts, PIE_SIZE);
        });

        ui.separator();
        ui.label(RichText::new(CITY_TITLE).size(16.0).strong());
        ChartPlotter::draw_city_bar_chart(ui, city_counts, BAR_HEIGHT);
    }

    fn show_detailed_analysis(&mut self, ui: &mut egui::Ui, corpus: &str, suggestions: &[String]) {
        ui.heading("Detailed Analysis of Responses");
        ui.label(RichText::new("Common Themes in Solutions Suggested (Q5)").size(16.0).strong());
        ui.add_space(5.0);

        match self.word_cloud(corpus) {
            Some(cloud) => ChartPlotter::draw_word_cloud(ui, cloud),
            None => {
                ui.label(RichText::new("No suggestions were given.").italics());
            }
        }

        ui.add_space(10.0);
        ui.separator();
        ui.label(RichText::new("Suggestions to Address Rising Temperatures").size(16.0).strong());
        for suggestion in suggestions {
            ui.label(format!("• {}", suggestion));
        }
    }

    fn word_cloud(&mut self, corpus: &str) -> Option<&WordCloudLayout> {
        let entry = match self.cloud.take() {
            Some(cached) if cached.0 == corpus => cached,
            _ => {
                log::debug!("Laying out word cloud for {} chars of text", corpus.len());
                (corpus.to_string(), wordcloud::cloud_for_corpus(corpus))
            }
        };
        self.cloud.insert(entry).1.as_ref()
    }

    fn show_individual_responses(
        &mut self,
        ui: &mut egui::Ui,
        cities: &[String],
        selected: Option<&str>,
        responses: &SurveyTable,
    ) {
        ui.heading("Explore Individual Responses");

        let Some(selected) = selected else {
            ui.label("No responses loaded.");
            return;
        };

        ui.horizontal(|ui| {
            ui.label("Select a city to view responses:");
            ComboBox::from_id_salt("city_select")
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    for city in cities {
                        if ui.selectable_label(city == selected, city).clicked() {
                            self.selected_city = Some(city.clone());
                        }
                    }
                });
        });

        ui.add_space(10.0);
        ui.label(RichText::new(format!("Participants from {}", selected)).size(18.0).strong());

        for row in responses {
            Self::show_response(ui, row);
        }
    }

    fn show_response(ui: &mut egui::Ui, row: &SurveyRow) {
        let choice = |value: &Option<String>, text: &Option<String>| {
            let choice = value.as_deref().map(capitalize).unwrap_or_default();
            match text {
                Some(text) => format!("{} - {}", choice, text),
                None => choice,
            }
        };

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(format!("Participant {}:", row.person_id)).strong());
                Self::answer(ui, "Q1", &row.q1_answer);
                Self::answer(ui, "Q2", &choice(&row.q2_choice, &row.q2_text));
                Self::answer(ui, "Q3", &choice(&row.q3_choice, &row.q3_text));
                Self::answer(ui, "Q4", &row.q4_answer);
                Self::answer(ui, "Q5", row.q5_answer.as_deref().unwrap_or_default());
            });
        ui.add_space(6.0);
    }

    fn answer(ui: &mut egui::Ui, question: &str, text: &str) {
        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new(format!("{}:", question)).strong());
            ui.label(text);
        });
    }
}
