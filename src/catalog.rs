use thiserror::Error;

use crate::{constants::FINAL_ROUND_LABEL, parser::Record};

/// One playable question. Immutable after construction except for `grid_id`,
/// which the board layout fills in when the question is placed on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub category: String,
    pub points: i64,
    pub answer: String,
    pub prompt: String,
    pub final_round: bool,
    pub grid_id: String,
}

/// A named category and its questions, in input order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryBucket {
    pub name: String,
    pub questions: Vec<Question>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionCatalog {
    /// Named categories in first-seen order.
    pub categories: Vec<CategoryBucket>,
    /// The reserved final-round bucket; never merged with named categories.
    pub final_round: Vec<Question>,
    /// Longest named bucket, used for grid sizing. Excludes the final round.
    pub max_in_category: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("no questions found, or the set is not formatted correctly")]
    EmptyCatalog,
}

/// Groups parsed records into a catalog. Record 0 is the header and is
/// skipped; records with fewer than 4 fields are skipped silently. A trimmed
/// category equal to "final jeopardy" (case-insensitive) routes to the
/// final-round bucket; named categories match by exact trimmed comparison.
pub fn build_catalog(records: &[Record]) -> Result<QuestionCatalog, CatalogError> {
    let mut categories: Vec<CategoryBucket> = Vec::new();
    let mut final_round: Vec<Question> = Vec::new();
    let mut max_in_category = 0usize;

    for record in records.iter().skip(1) {
        if record.len() < 4 {
            continue;
        }

        let name = record[0].trim();
        let mut question = Question {
            category: record[0].clone(),
            points: record[1].trim().parse().unwrap_or(0),
            answer: record[2].clone(),
            prompt: record[3].clone(),
            final_round: false,
            grid_id: String::new(),
        };

        if name.eq_ignore_ascii_case(FINAL_ROUND_LABEL) {
            question.final_round = true;
            final_round.push(question);
            continue;
        }

        let index = match categories.iter().position(|bucket| bucket.name == name) {
            Some(index) => index,
            None => {
                categories.push(CategoryBucket {
                    name: name.to_string(),
                    questions: Vec::new(),
                });
                categories.len() - 1
            }
        };
        categories[index].questions.push(question);
        max_in_category = max_in_category.max(categories[index].questions.len());
    }

    if categories.is_empty() {
        return Err(CatalogError::EmptyCatalog);
    }

    Ok(QuestionCatalog {
        categories,
        final_round,
        max_in_category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> Record {
        fields.iter().map(|f| f.to_string()).collect()
    }

    fn header() -> Record {
        record(&["Category", "Points", "Answer", "Question"])
    }

    #[test]
    fn test_groups_by_first_seen_order() {
        let records = vec![
            header(),
            record(&["A", "100", "a1", "q1"]),
            record(&["B", "100", "b1", "q2"]),
            record(&["A", "200", "a2", "q3"]),
            record(&["C", "100", "c1", "q4"]),
        ];

        let catalog = build_catalog(&records).unwrap();
        let names: Vec<&str> = catalog
            .categories
            .iter()
            .map(|bucket| bucket.name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(catalog.categories[0].questions.len(), 2);
        assert_eq!(catalog.categories[0].questions[0].answer, "a1");
        assert_eq!(catalog.categories[0].questions[1].answer, "a2");
        assert_eq!(catalog.max_in_category, 2);
    }

    #[test]
    fn test_header_row_is_skipped() {
        let records = vec![header(), record(&["A", "100", "a", "q"])];
        let catalog = build_catalog(&records).unwrap();
        assert_eq!(catalog.categories.len(), 1);
        assert_eq!(catalog.categories[0].questions.len(), 1);
    }

    #[test]
    fn test_short_records_are_skipped() {
        let records = vec![
            header(),
            record(&["A", "100", "a", "q"]),
            record(&["ragged", "200"]),
            record(&[""]),
        ];
        let catalog = build_catalog(&records).unwrap();
        assert_eq!(catalog.categories.len(), 1);
        assert_eq!(catalog.categories[0].questions.len(), 1);
    }

    #[test]
    fn test_non_numeric_points_default_to_zero() {
        let records = vec![header(), record(&["A", "lots", "a", "q"])];
        let catalog = build_catalog(&records).unwrap();
        assert_eq!(catalog.categories[0].questions[0].points, 0);
    }

    #[test]
    fn test_points_trim_whitespace() {
        let records = vec![header(), record(&["A", " 400 ", "a", "q"])];
        let catalog = build_catalog(&records).unwrap();
        assert_eq!(catalog.categories[0].questions[0].points, 400);
    }

    #[test]
    fn test_final_round_matches_case_insensitively() {
        for label in ["final jeopardy", "Final Jeopardy", "FINAL JEOPARDY", "  final jeopardy  "] {
            let records = vec![
                header(),
                record(&["A", "100", "a", "q"]),
                record(&[label, "0", "fa", "fq"]),
            ];
            let catalog = build_catalog(&records).unwrap();
            assert_eq!(catalog.final_round.len(), 1, "label {:?}", label);
            assert!(catalog.final_round[0].final_round);
            // The sentinel never becomes a named category.
            assert_eq!(catalog.categories.len(), 1);
        }
    }

    #[test]
    fn test_final_round_excluded_from_max() {
        let records = vec![
            header(),
            record(&["A", "100", "a", "q"]),
            record(&["Final Jeopardy", "0", "f1", "p1"]),
            record(&["Final Jeopardy", "0", "f2", "p2"]),
            record(&["Final Jeopardy", "0", "f3", "p3"]),
        ];
        let catalog = build_catalog(&records).unwrap();
        assert_eq!(catalog.max_in_category, 1);
        assert_eq!(catalog.final_round.len(), 3);
    }

    #[test]
    fn test_named_categories_match_case_sensitively() {
        let records = vec![
            header(),
            record(&["History", "100", "a", "q"]),
            record(&["HISTORY", "200", "b", "r"]),
        ];
        let catalog = build_catalog(&records).unwrap();
        assert_eq!(catalog.categories.len(), 2);
    }

    #[test]
    fn test_category_names_compared_trimmed() {
        let records = vec![
            header(),
            record(&["History", "100", "a", "q"]),
            record(&[" History ", "200", "b", "r"]),
        ];
        let catalog = build_catalog(&records).unwrap();
        assert_eq!(catalog.categories.len(), 1);
        assert_eq!(catalog.categories[0].questions.len(), 2);
    }

    #[test]
    fn test_empty_catalog_condition() {
        assert_eq!(build_catalog(&[header()]), Err(CatalogError::EmptyCatalog));

        let only_final = vec![header(), record(&["Final Jeopardy", "0", "a", "q"])];
        assert_eq!(build_catalog(&only_final), Err(CatalogError::EmptyCatalog));

        assert_eq!(build_catalog(&[]), Err(CatalogError::EmptyCatalog));
    }

    #[test]
    fn test_build_is_deterministic() {
        let records = vec![
            header(),
            record(&["A", "100", "a1", "q1"]),
            record(&["B", "100", "b1", "q2"]),
            record(&["A", "200", "a2", "q3"]),
        ];
        assert_eq!(build_catalog(&records), build_catalog(&records));
    }
}
