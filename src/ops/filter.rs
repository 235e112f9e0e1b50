use regex::Regex;

use crate::model::record::ProjectRecord;

/// Keep the records whose search text contains `query`, case-insensitively.
///
/// The search text is `name + description + tech` with no separator, so a
/// query may match across a field boundary ("ab" + "cd" matches "bc").
/// Order is preserved; an empty query keeps everything.
pub fn filter_records(records: &[ProjectRecord], query: &str) -> Vec<ProjectRecord> {
    if query.is_empty() {
        return records.to_vec();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| r.search_text().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Case-insensitive literal regex for highlighting `query` inside one field.
/// Returns `None` for an empty query.
pub fn highlight_regex(query: &str) -> Option<Regex> {
    if query.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", regex::escape(query))).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn rec(name: &str, description: &str, tech: &str) -> ProjectRecord {
        ProjectRecord::new(name, description, tech, Utc::now())
    }

    fn names(records: &[ProjectRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    fn sample() -> Vec<ProjectRecord> {
        vec![
            rec("Atlas", "Tile server for maps", "Rust"),
            rec("Beacon", "Alerting dashboard", "React"),
            rec("Compass", "Route planner", "Go"),
            rec("Dune", "Sand simulation", "rust"),
        ]
    }

    #[test]
    fn empty_query_is_identity() {
        let records = sample();
        assert_eq!(filter_records(&records, ""), records);
    }

    #[test]
    fn case_insensitive_substring() {
        let records = sample();
        assert_eq!(names(&filter_records(&records, "RUST")), vec!["Atlas", "Dune"]);
        assert_eq!(names(&filter_records(&records, "dash")), vec!["Beacon"]);
    }

    #[test]
    fn match_spans_field_boundary() {
        let records = vec![rec("ab", "cd", "ef")];
        assert_eq!(filter_records(&records, "bc").len(), 1);
        assert_eq!(filter_records(&records, "de").len(), 1);
        assert!(filter_records(&records, "b c").is_empty());
    }

    #[test]
    fn result_is_order_preserving_subset() {
        let records = sample();
        for q in ["a", "r", "o", "s", "zz", "ANS"] {
            let out = filter_records(&records, q);
            let mut last_idx = None;
            for r in &out {
                let idx = records.iter().position(|x| x == r).unwrap();
                assert!(last_idx.is_none_or(|l| idx > l), "order broken for {q:?}");
                last_idx = Some(idx);
            }
        }
    }

    #[test]
    fn no_match_yields_empty() {
        assert!(filter_records(&sample(), "zzz").is_empty());
    }

    #[test]
    fn highlight_regex_escapes_metacharacters() {
        let re = highlight_regex("c++").unwrap();
        assert!(re.is_match("Written in C++"));
        assert!(highlight_regex("").is_none());
    }
}
