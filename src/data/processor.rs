//! Data Processor Module
//! Normalization of categorical answers and row selection by city.

use crate::data::survey::{SurveyRow, SurveyTable};

/// Handles data cleaning and row selection.
pub struct DataProcessor;

impl DataProcessor {
    /// Canonical key for a categorical answer: trimmed and lower-cased.
    /// Blank answers become `None`.
    pub fn normalize_choice(value: Option<&str>) -> Option<String> {
        value
            .map(|v| v.trim().to_lowercase())
            .filter(|v| !v.is_empty())
    }

    /// Normalize the Q2 and Q3 choice columns; every other field passes through.
    ///
    /// Idempotent: normalizing a normalized table yields the same table.
    pub fn normalize(table: &SurveyTable) -> SurveyTable {
        table
            .iter()
            .map(|row| SurveyRow {
                q2_choice: Self::normalize_choice(row.q2_choice.as_deref()),
                q3_choice: Self::normalize_choice(row.q3_choice.as_deref()),
                ..row.clone()
            })
            .collect()
    }

    /// Rows whose city equals `city` exactly, in table order.
    pub fn filter_by_city(table: &SurveyTable, city: &str) -> SurveyTable {
        table.iter().filter(|row| row.city == city).cloned().collect()
    }

    /// Distinct cities, sorted ascending.
    pub fn distinct_cities(table: &SurveyTable) -> Vec<String> {
        let mut cities: Vec<String> = table.iter().map(|row| row.city.clone()).collect();
        cities.sort();
        cities.dedup();
        cities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::survey::fixtures::row;

    fn mixed_table() -> SurveyTable {
        SurveyTable::new(vec![
            row(1, "Rabat", Some("Yes"), Some(" No "), Some("Plant trees")),
            row(2, "Rabat", Some(" yes "), Some("NO"), None),
            row(3, "Fes", Some("No"), Some("   "), Some("More shade")),
        ])
    }

    #[test]
    fn normalize_trims_and_lowercases_choices_only() {
        let normalized = DataProcessor::normalize(&mixed_table());
        let rows = normalized.rows();

        assert_eq!(rows[0].q2_choice.as_deref(), Some("yes"));
        assert_eq!(rows[1].q2_choice.as_deref(), Some("yes"));
        assert_eq!(rows[0].q3_choice.as_deref(), Some("no"));
        assert_eq!(rows[2].q3_choice, None);

        // Untouched fields
        assert_eq!(rows[0].city, "Rabat");
        assert_eq!(rows[0].q5_answer.as_deref(), Some("Plant trees"));
        assert_eq!(rows[2].q1_answer, "answer 3");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = DataProcessor::normalize(&mixed_table());
        let twice = DataProcessor::normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn filter_by_city_is_exact_and_ordered() {
        let table = mixed_table();

        let rabat = DataProcessor::filter_by_city(&table, "Rabat");
        assert_eq!(rabat.len(), 2);
        assert!(rabat.iter().all(|r| r.city == "Rabat"));
        assert_eq!(
            rabat.iter().map(|r| r.person_id).collect::<Vec<_>>(),
            vec![1, 2]
        );

        let fes = DataProcessor::filter_by_city(&table, "Fes");
        assert_eq!(fes.len(), 1);
        assert_eq!(fes.rows()[0].person_id, 3);

        assert!(DataProcessor::filter_by_city(&table, "rabat").is_empty());
        assert!(DataProcessor::filter_by_city(&table, "Agadir").is_empty());
    }

    #[test]
    fn distinct_cities_sorted() {
        assert_eq!(
            DataProcessor::distinct_cities(&mixed_table()),
            vec!["Fes".to_string(), "Rabat".to_string()]
        );
    }
}
