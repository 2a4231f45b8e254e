//! Report views and the data each one presents.
//!
//! Every render rebuilds its [`ViewData`] from the normalized table; nothing
//! here is cached or mutated between renders.

use crate::data::{CategoricalColumn, DataProcessor, SurveyTable};
use crate::stats::text::{build_corpus, distinct_suggestions};
use crate::stats::{FrequencyDistribution, StatsCalculator};

/// The three navigable pages of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Overview,
    DetailedAnalysis,
    IndividualResponses,
}

impl View {
    pub const ALL: [View; 3] = [
        View::Overview,
        View::DetailedAnalysis,
        View::IndividualResponses,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::DetailedAnalysis => "Detailed Analysis",
            View::IndividualResponses => "Individual Responses",
        }
    }
}

/// Aggregates needed to draw one page.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewData {
    Overview {
        /// Experience of unusual temperature rise.
        q2_counts: FrequencyDistribution,
        /// Health issues due to temperature rise.
        q3_counts: FrequencyDistribution,
        city_counts: FrequencyDistribution,
    },
    DetailedAnalysis {
        corpus: String,
        suggestions: Vec<String>,
    },
    IndividualResponses {
        cities: Vec<String>,
        /// `None` only when the table has no rows.
        selected_city: Option<String>,
        responses: SurveyTable,
    },
}

/// Build the data for `view` from a normalized table.
///
/// `selected_city` falls back to the first city (sorted) when it is absent
/// or no longer in the table.
pub fn build_view(table: &SurveyTable, view: View, selected_city: Option<&str>) -> ViewData {
    match view {
        View::Overview => ViewData::Overview {
            q2_counts: StatsCalculator::count_by_category_with_unlabeled(
                table,
                CategoricalColumn::Q2Choice,
            ),
            q3_counts: StatsCalculator::count_by_category_with_unlabeled(
                table,
                CategoricalColumn::Q3Choice,
            ),
            city_counts: StatsCalculator::count_by_city(table),
        },
        View::DetailedAnalysis => ViewData::DetailedAnalysis {
            corpus: build_corpus(table),
            suggestions: distinct_suggestions(table),
        },
        View::IndividualResponses => {
            let cities = DataProcessor::distinct_cities(table);
            let selected_city = selected_city
                .filter(|c| cities.iter().any(|city| city == c))
                .map(str::to_string)
                .or_else(|| cities.first().cloned());
            let responses = selected_city
                .as_deref()
                .map(|c| DataProcessor::filter_by_city(table, c))
                .unwrap_or_default();

            ViewData::IndividualResponses {
                cities,
                selected_city,
                responses,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::row;

    fn table() -> SurveyTable {
        DataProcessor::normalize(&SurveyTable::new(vec![
            row(1, "Rabat", Some("Yes"), Some("no"), Some("Plant trees")),
            row(2, "Rabat", Some(" yes "), None, Some("Plant trees")),
            row(3, "Fes", Some("No"), Some("Yes"), None),
        ]))
    }

    #[test]
    fn overview_counts() {
        let ViewData::Overview {
            q2_counts,
            q3_counts,
            city_counts,
        } = build_view(&table(), View::Overview, None)
        else {
            panic!("expected overview");
        };

        assert_eq!(q2_counts.get("yes"), Some(2));
        assert_eq!(q2_counts.get("no"), Some(1));
        assert_eq!(q3_counts.get("unlabeled"), Some(1));
        assert_eq!(city_counts.get("Rabat"), Some(2));
        assert_eq!(city_counts.get("Fes"), Some(1));
    }

    #[test]
    fn detailed_analysis_text() {
        let data = build_view(&table(), View::DetailedAnalysis, None);
        assert_eq!(
            data,
            ViewData::DetailedAnalysis {
                corpus: "Plant trees Plant trees".to_string(),
                suggestions: vec!["Plant trees".to_string()],
            }
        );
    }

    #[test]
    fn individual_responses_for_selected_city() {
        let ViewData::IndividualResponses {
            cities,
            selected_city,
            responses,
        } = build_view(&table(), View::IndividualResponses, Some("Fes"))
        else {
            panic!("expected individual responses");
        };

        assert_eq!(cities, vec!["Fes", "Rabat"]);
        assert_eq!(selected_city.as_deref(), Some("Fes"));
        assert_eq!(responses.len(), 1);
        assert_eq!(responses.rows()[0].person_id, 3);
    }

    #[test]
    fn unknown_city_falls_back_to_first() {
        let ViewData::IndividualResponses {
            selected_city,
            responses,
            ..
        } = build_view(&table(), View::IndividualResponses, Some("Agadir"))
        else {
            panic!("expected individual responses");
        };

        assert_eq!(selected_city.as_deref(), Some("Fes"));
        assert_eq!(responses.len(), 1);
    }

    #[test]
    fn empty_table_has_no_selection() {
        let data = build_view(&SurveyTable::default(), View::IndividualResponses, None);
        assert_eq!(
            data,
            ViewData::IndividualResponses {
                cities: Vec::new(),
                selected_city: None,
                responses: SurveyTable::default(),
            }
        );
    }

    #[test]
    fn labels() {
        let labels: Vec<_> = View::ALL.iter().map(View::label).collect();
        assert_eq!(labels, vec!["Overview", "Detailed Analysis", "Individual Responses"]);
    }
}
