//! Statistics Calculator Module
//! Value counting over the survey table.

use crate::data::{CategoricalColumn, SurveyTable};
use std::collections::HashMap;

/// Label used for rows with no answer in a categorical column.
pub const UNLABELED: &str = "unlabeled";

/// Count of rows per distinct value, kept in first-encountered order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyDistribution {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `label`.
    pub fn add(&mut self, label: &str) {
        self.add_n(label, 1);
    }

    pub fn add_n(&mut self, label: &str, n: usize) {
        match self.index.get(label) {
            Some(&i) => self.entries[i].1 += n,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push((label.to_string(), n));
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.index.get(label).map(|&i| self.entries[i].1)
    }

    /// Entries in first-encountered order.
    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    /// Entries by count descending; ties keep encounter order.
    pub fn sorted_desc(&self) -> Vec<(String, usize)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Percentage share of each entry in [`Self::sorted_desc`] order; sums to 100.
    pub fn shares(&self) -> Vec<(String, f64)> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }
        self.sorted_desc()
            .into_iter()
            .map(|(label, n)| (label, n as f64 * 100.0 / total as f64))
            .collect()
    }
}

/// Handles the counting aggregations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Count each distinct value in a categorical column. Rows without a
    /// value are not counted.
    pub fn count_by_category(table: &SurveyTable, column: CategoricalColumn) -> FrequencyDistribution {
        let mut dist = FrequencyDistribution::new();
        for value in table.iter().filter_map(|row| column.value(row)) {
            dist.add(value);
        }
        dist
    }

    /// Like [`Self::count_by_category`], with unanswered rows gathered under
    /// [`UNLABELED`].
    pub fn count_by_category_with_unlabeled(
        table: &SurveyTable,
        column: CategoricalColumn,
    ) -> FrequencyDistribution {
        let mut dist = Self::count_by_category(table, column);
        let missing = table.len() - dist.total();
        if missing > 0 {
            dist.add_n(UNLABELED, missing);
        }
        dist
    }

    /// Participants per city, case-sensitive.
    pub fn count_by_city(table: &SurveyTable) -> FrequencyDistribution {
        let mut dist = FrequencyDistribution::new();
        for row in table {
            dist.add(&row.city);
        }
        dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::row;
    use crate::data::DataProcessor;

    #[test]
    fn normalized_choices_collapse_into_one_bucket() {
        let table = DataProcessor::normalize(&SurveyTable::new(vec![
            row(1, "Rabat", Some("Yes"), None, None),
            row(2, "Rabat", Some(" yes "), None, None),
            row(3, "Fes", Some("No"), None, None),
        ]));

        let dist = StatsCalculator::count_by_category(&table, CategoricalColumn::Q2Choice);

        assert_eq!(dist.len(), 2);
        assert!(!dist.is_empty());
        assert_eq!(dist.get("yes"), Some(2));
        assert_eq!(dist.get("no"), Some(1));
    }

    #[test]
    fn count_conservation_ignores_missing_values() {
        let table = SurveyTable::new(vec![
            row(1, "Rabat", None, Some("yes"), None),
            row(2, "Rabat", None, None, None),
            row(3, "Fes", None, Some("no"), None),
            row(4, "Fes", None, Some("yes"), None),
        ]);

        let dist = StatsCalculator::count_by_category(&table, CategoricalColumn::Q3Choice);
        let non_null = table.iter().filter(|r| r.q3_choice.is_some()).count();
        assert_eq!(dist.total(), non_null);

        let with_unlabeled =
            StatsCalculator::count_by_category_with_unlabeled(&table, CategoricalColumn::Q3Choice);
        assert_eq!(with_unlabeled.get(UNLABELED), Some(1));
        assert_eq!(with_unlabeled.total(), table.len());

        let q2 = StatsCalculator::count_by_category_with_unlabeled(&table, CategoricalColumn::Q2Choice);
        assert_eq!(q2.entries(), &[(UNLABELED.to_string(), 4)]);
    }

    #[test]
    fn count_by_city_is_case_sensitive() {
        let table = SurveyTable::new(vec![
            row(1, "Rabat", None, None, None),
            row(2, "Rabat", None, None, None),
            row(3, "Fes", None, None, None),
            row(4, "fes", None, None, None),
        ]);

        let dist = StatsCalculator::count_by_city(&table);
        assert_eq!(dist.get("Rabat"), Some(2));
        assert_eq!(dist.get("Fes"), Some(1));
        assert_eq!(dist.get("fes"), Some(1));
    }

    #[test]
    fn sorted_desc_keeps_encounter_order_on_ties() {
        let mut dist = FrequencyDistribution::new();
        for label in ["b", "a", "c", "a", "c"] {
            dist.add(label);
        }
        assert_eq!(
            dist.sorted_desc(),
            vec![
                ("a".to_string(), 2),
                ("c".to_string(), 2),
                ("b".to_string(), 1)
            ]
        );
    }

    #[test]
    fn shares_sum_to_hundred() {
        let mut dist = FrequencyDistribution::new();
        dist.add("no");
        dist.add_n("yes", 2);
        dist.add_n(UNLABELED, 4);

        let shares = dist.shares();
        let labels: Vec<&str> = shares.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec![UNLABELED, "yes", "no"]);

        let sum: f64 = shares.iter().map(|(_, s)| s).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert!((shares[1].1 - 200.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn empty_distribution_has_no_shares() {
        let dist = FrequencyDistribution::new();
        assert!(dist.is_empty());
        assert!(dist.shares().is_empty());
    }
}
