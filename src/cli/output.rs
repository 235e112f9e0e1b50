use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::ProjectRecord;
use crate::ops::freshness::{age_label, is_new};
use crate::util::unicode::{display_width, fit_to_width};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ProjectJson {
    pub name: String,
    pub description: String,
    pub tech: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub is_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
}

#[derive(Serialize)]
pub struct ListJson {
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub projects: Vec<ProjectJson>,
}

pub fn project_to_json(
    record: &ProjectRecord,
    now: DateTime<Utc>,
    new_days: i64,
    route: Option<String>,
) -> ProjectJson {
    ProjectJson {
        name: record.name.clone(),
        description: record.description.clone(),
        tech: record.tech.clone(),
        created_at: record
            .created_at
            .map(|ts| ts.to_rfc3339())
            .or_else(|| record.created_at_raw.clone()),
        is_new: is_new(record, now, new_days),
        route,
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

const MAX_NAME_W: usize = 32;

/// One line per record: name, NEW marker, tech, age, description.
/// Names are padded to a common width so columns line up.
pub fn format_listing(records: &[ProjectRecord], now: DateTime<Utc>, new_days: i64) -> Vec<String> {
    let name_w = records
        .iter()
        .map(|r| display_width(&r.name))
        .max()
        .unwrap_or(0)
        .min(MAX_NAME_W);
    let tech_w = records
        .iter()
        .map(|r| display_width(&r.tech))
        .max()
        .unwrap_or(0);

    records
        .iter()
        .map(|r| {
            let marker = if is_new(r, now, new_days) { "NEW" } else { "   " };
            let mut line = format!(
                "{} {} {} {:>8}",
                fit_to_width(&r.name, name_w),
                marker,
                fit_to_width(&r.tech, tech_w),
                age_label(r, now)
            );
            if !r.description.is_empty() {
                line.push_str("  ");
                line.push_str(&r.description);
            }
            line.trim_end().to_string()
        })
        .collect()
}

/// Key/value lines for a single record
pub fn format_project_detail(
    record: &ProjectRecord,
    now: DateTime<Utc>,
    new_days: i64,
    route: &str,
) -> Vec<String> {
    let mut lines = Vec::new();
    let title = if is_new(record, now, new_days) {
        format!("{} [NEW]", record.name)
    } else {
        record.name.clone()
    };
    lines.push(title);
    if !record.description.is_empty() {
        lines.push(format!("  summary: {}", record.description));
    }
    if !record.tech.is_empty() {
        lines.push(format!("  tech:    {}", record.tech));
    }
    match (&record.created_at, &record.created_at_raw) {
        (Some(ts), _) => lines.push(format!(
            "  created: {} ({})",
            ts.format("%Y-%m-%d %H:%M UTC"),
            age_label(record, now)
        )),
        (None, Some(raw)) => lines.push(format!("  created: {} (unreadable)", raw)),
        (None, None) => {}
    }
    lines.push(format!("  open:    {}", route));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use insta::assert_snapshot;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
    }

    fn records() -> Vec<ProjectRecord> {
        vec![
            ProjectRecord::new("atlas", "Tile server", "Rust", now() - Duration::hours(3)),
            ProjectRecord::new("beacon", "Alerting daemon", "Go", now() - Duration::days(4)),
            ProjectRecord::new("compass", "", "TypeScript", now() - Duration::days(30)),
        ]
    }

    #[test]
    fn listing_aligns_columns() {
        let text = format_listing(&records(), now(), 5).join("\n");
        assert_snapshot!(text, @r"
        atlas   NEW Rust          today  Tile server
        beacon  NEW Go           4d ago  Alerting daemon
        compass     TypeScript  30d ago
        ");
    }

    #[test]
    fn detail_lists_fields() {
        let record = &records()[1];
        let text = format_project_detail(record, now(), 5, "/projects/beacon").join("\n");
        assert_snapshot!(text, @r"
        beacon [NEW]
          summary: Alerting daemon
          tech:    Go
          created: 2024-06-06 12:00 UTC (4d ago)
          open:    /projects/beacon
        ");
    }

    #[test]
    fn json_prefers_parsed_timestamp() {
        let json = project_to_json(&records()[0], now(), 5, None);
        assert!(json.is_new);
        assert_eq!(json.created_at.as_deref(), Some("2024-06-10T09:00:00+00:00"));

        let mut bad = records()[0].clone();
        bad.created_at = None;
        bad.created_at_raw = Some("garbage".into());
        let json = project_to_json(&bad, now(), 5, None);
        assert!(!json.is_new);
        assert_eq!(json.created_at.as_deref(), Some("garbage"));
    }

    #[test]
    fn empty_listing() {
        assert!(format_listing(&[], now(), 5).is_empty());
    }
}
