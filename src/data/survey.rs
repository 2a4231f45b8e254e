//! Survey Data Model
//! Typed rows for the interview table and the column schema they are read from.

/// Header names the survey file must carry (order-independent).
pub const COL_CITY: &str = "City";
pub const COL_PERSON_ID: &str = "Person ID";
pub const COL_Q1_ANSWER: &str = "Q1 Answer";
pub const COL_Q2_CHOICE: &str = "Q2 Multiple Choice";
pub const COL_Q2_TEXT: &str = "Q2 Text";
pub const COL_Q3_CHOICE: &str = "Q3 Multiple Choice";
pub const COL_Q3_TEXT: &str = "Q3 Text";
pub const COL_Q4_ANSWER: &str = "Q4 Answer";
pub const COL_Q5_ANSWER: &str = "Q5 Answer";

pub const REQUIRED_COLUMNS: [&str; 9] = [
    COL_CITY,
    COL_PERSON_ID,
    COL_Q1_ANSWER,
    COL_Q2_CHOICE,
    COL_Q2_TEXT,
    COL_Q3_CHOICE,
    COL_Q3_TEXT,
    COL_Q4_ANSWER,
    COL_Q5_ANSWER,
];

/// One participant's response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyRow {
    pub person_id: u64,
    pub city: String,
    pub q1_answer: String,
    /// Categorical; `None` when the cell is blank.
    pub q2_choice: Option<String>,
    pub q2_text: Option<String>,
    /// Categorical; `None` when the cell is blank.
    pub q3_choice: Option<String>,
    pub q3_text: Option<String>,
    pub q4_answer: String,
    pub q5_answer: Option<String>,
}

/// Categorical columns that can be grouped and counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoricalColumn {
    Q2Choice,
    Q3Choice,
}

impl CategoricalColumn {
    /// Value of this column for a row.
    pub fn value<'a>(&self, row: &'a SurveyRow) -> Option<&'a str> {
        match self {
            CategoricalColumn::Q2Choice => row.q2_choice.as_deref(),
            CategoricalColumn::Q3Choice => row.q3_choice.as_deref(),
        }
    }
}

/// Ordered, read-only sequence of rows in source-file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyTable {
    rows: Vec<SurveyRow>,
}

impl SurveyTable {
    pub fn new(rows: Vec<SurveyRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[SurveyRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SurveyRow> {
        self.rows.iter()
    }
}

impl FromIterator<SurveyRow> for SurveyTable {
    fn from_iter<I: IntoIterator<Item = SurveyRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SurveyTable {
    type Item = &'a SurveyRow;
    type IntoIter = std::slice::Iter<'a, SurveyRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
