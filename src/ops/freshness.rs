use chrono::{DateTime, Utc};

use crate::model::record::ProjectRecord;

pub const DAY_MS: i64 = 86_400_000;

/// Default width of the NEW window, in days
pub const DEFAULT_NEW_DAYS: i64 = 5;

/// Sort records newest first. Ties keep their incoming order, and records
/// without a usable timestamp go last.
pub fn sort_by_freshness(records: &mut [ProjectRecord]) {
    // Option orders None below Some, so reversing the comparison pushes
    // undated records to the end. sort_by is stable.
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Whether the record falls inside the NEW window relative to `now`.
///
/// Evaluated on every render; never cache the result. `new_days` comes from
/// user config, so the window saturates instead of overflowing.
pub fn is_new(record: &ProjectRecord, now: DateTime<Utc>, new_days: i64) -> bool {
    let window_ms = new_days.saturating_mul(DAY_MS);
    match record.created_at {
        Some(created) => (now - created).num_milliseconds().abs() < window_ms,
        None => false,
    }
}

/// Short relative age for display ("today", "3d ago"), counting whole
/// elapsed days.
pub fn age_label(record: &ProjectRecord, now: DateTime<Utc>) -> String {
    match record.created_at {
        Some(created) => match (now - created).num_days().max(0) {
            0 => "today".to_string(),
            d => format!("{}d ago", d),
        },
        None => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn at(name: &str, ts: Option<DateTime<Utc>>) -> ProjectRecord {
        let mut r = ProjectRecord::new(name, "", "", Utc::now());
        r.created_at = ts;
        r.created_at_raw = ts.map(|t| t.to_rfc3339());
        r
    }

    fn names(records: &[ProjectRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    fn sorted(records: &[ProjectRecord]) -> Vec<ProjectRecord> {
        let mut out = records.to_vec();
        sort_by_freshness(&mut out);
        out
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn newest_first() {
        let records = vec![
            at("old", Some(t0() - Duration::days(10))),
            at("new", Some(t0())),
            at("mid", Some(t0() - Duration::days(2))),
        ];
        assert_eq!(names(&sorted(&records)), vec!["new", "mid", "old"]);
    }

    #[test]
    fn ties_keep_fetch_order() {
        let records = vec![
            at("b", Some(t0())),
            at("a", Some(t0())),
            at("c", Some(t0() + Duration::hours(1))),
            at("d", Some(t0())),
        ];
        assert_eq!(names(&sorted(&records)), vec!["c", "b", "a", "d"]);
    }

    #[test]
    fn sorting_is_idempotent() {
        let records = vec![
            at("x", None),
            at("a", Some(t0() - Duration::days(1))),
            at("b", Some(t0())),
            at("c", Some(t0() - Duration::days(1))),
        ];
        let once = sorted(&records);
        let twice = sorted(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn undated_records_sort_last_in_fetch_order() {
        let records = vec![
            at("u1", None),
            at("dated", Some(t0() - Duration::days(400))),
            at("u2", None),
        ];
        assert_eq!(names(&sorted(&records)), vec!["dated", "u1", "u2"]);
    }

    #[test]
    fn new_window_boundaries() {
        let now = t0();
        let new_days = DEFAULT_NEW_DAYS;
        assert!(is_new(&at("now", Some(now)), now, new_days));
        assert!(is_new(
            &at("almost", Some(now - Duration::days(4) - Duration::hours(23))),
            now,
            new_days
        ));
        assert!(!is_new(
            &at("past", Some(now - Duration::days(5) - Duration::hours(1))),
            now,
            new_days
        ));
        assert!(!is_new(&at("undated", None), now, new_days));
    }

    #[test]
    fn huge_or_negative_window_does_not_overflow() {
        let now = t0();
        let old = at("old", Some(now - Duration::days(3650)));
        assert!(is_new(&old, now, 200_000_000_000));
        assert!(is_new(&old, now, i64::MAX));
        assert!(!is_new(&old, now, i64::MIN));
        assert!(!is_new(&at("now", Some(now)), now, -1));
    }

    #[test]
    fn age_labels() {
        let now = t0();
        assert_eq!(age_label(&at("a", Some(now)), now), "today");
        assert_eq!(age_label(&at("b", Some(now - Duration::days(3))), now), "3d ago");
        assert_eq!(age_label(&at("c", None), now), "unknown");
        assert_eq!(age_label(&at("d", Some(now - Duration::hours(23))), now), "today");
        assert_eq!(
            age_label(&at("e", Some(now - Duration::days(3) - Duration::hours(5))), now),
            "3d ago"
        );
    }
}
