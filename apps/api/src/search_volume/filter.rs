use crate::search_volume::dataset::TableRow;

/// Rows where any cell's text contains `query`, ignoring case. Order is kept.
/// An empty query returns every row.
pub fn filter_rows(rows: &[TableRow], query: &str) -> Vec<TableRow> {
    if query.is_empty() {
        return rows.to_vec();
    }
    let needle = query.to_lowercase();
    rows.iter()
        .filter(|row| row_matches(row, &needle))
        .cloned()
        .collect()
}

fn row_matches(row: &TableRow, lowered_needle: &str) -> bool {
    row.values()
        .any(|value| value.to_string().to_lowercase().contains(lowered_needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<TableRow> {
        vec![
            [("kw", "running shoes"), ("vol", "100")].into_iter().collect(),
            [("kw", "hiking boots"), ("vol", "50")].into_iter().collect(),
            [("kw", "Trail SHOES"), ("vol", "1500")].into_iter().collect(),
        ]
    }

    #[test]
    fn test_filter_scenario() {
        let input: Vec<TableRow> = rows().into_iter().take(2).collect();
        let filtered = filter_rows(&input, "shoe");
        assert_eq!(filtered, vec![input[0].clone()]);
    }

    #[test]
    fn test_case_insensitive_and_order_preserved() {
        let input = rows();
        let filtered = filter_rows(&input, "SHOES");
        assert_eq!(filtered, vec![input[0].clone(), input[2].clone()]);
    }

    #[test]
    fn test_matches_numeric_columns_by_text() {
        let input = rows();
        let filtered = filter_rows(&input, "50");
        // "50" appears in 50 and 1500
        assert_eq!(filtered, vec![input[1].clone(), input[2].clone()]);
    }

    #[test]
    fn test_empty_query_is_identity() {
        let input = rows();
        assert_eq!(filter_rows(&input, ""), input);
    }

    #[test]
    fn test_no_rows_and_no_matches() {
        assert!(filter_rows(&[], "shoes").is_empty());
        assert!(filter_rows(&rows(), "sandals").is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let input = rows();
        for query in ["shoe", "0", "boots", "zzz", ""] {
            let once = filter_rows(&input, query);
            assert!(once.len() <= input.len());
            assert_eq!(filter_rows(&once, query), once);
        }
    }
}
