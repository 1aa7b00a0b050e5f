//! Builds the participant × date status matrix for a training.
//!
//! The matrix is derived purely from already-fetched documents: the
//! training's current roster, its removal audit trail, and its attendance
//! documents. Handlers fetch; this module only transforms, so the rules
//! below are tested without a database.

use chrono::{DateTime, NaiveDate, Utc};
use db::models::{AttendanceEvent, RemovalRecord};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("start date must not be after end date")]
    InvalidRange,
}

/// One cell of the matrix.
///
/// `Removed` overlays any present/absent value for dates strictly after
/// the participant's removal date. `NoRecord` only occurs on the
/// calendar-range axis, for dates with no attendance document at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellMark {
    Present,
    Absent,
    Removed,
    NoRecord,
}

impl CellMark {
    /// The spreadsheet-cell spelling of this mark.
    pub fn symbol(self) -> &'static str {
        match self {
            CellMark::Present => "P",
            CellMark::Absent => "A",
            CellMark::Removed => "X",
            CellMark::NoRecord => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateColumn {
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

impl DateColumn {
    /// Column header text: the date, suffixed with the topic when one was
    /// recorded for it.
    pub fn label(&self) -> String {
        match &self.topic {
            Some(topic) => format!("{} ({})", self.date, topic),
            None => self.date.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantRow {
    pub participant_name: String,
    pub cells: Vec<CellMark>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMatrix {
    pub columns: Vec<DateColumn>,
    pub rows: Vec<ParticipantRow>,
}

/// Rejects an inverted range before anything is queried.
pub fn validate_range(range: Option<(NaiveDate, NaiveDate)>) -> Result<(), ReportError> {
    match range {
        Some((start, end)) if start > end => Err(ReportError::InvalidRange),
        _ => Ok(()),
    }
}

/// Builds the status matrix for one training.
///
/// - The reporting set is the current roster (in roster order) plus every
///   participant with a removal record (sorted, after the roster), so
///   removed participants keep their history visible.
/// - With a range, the date axis is every calendar date in `[start, end]`;
///   without one it is every date seen in `events`, ascending.
/// - Cells on dates that have at least one attendance document default to
///   absent; presence recorded in any duplicate document for a date wins
///   (logical OR). Dates without any document render as no-record.
/// - For dates strictly after a participant's removal date the removed
///   marker overwrites whatever the attendance documents say.
///
/// Returns `Ok(None)` when there are no attendance documents to report on.
pub fn build_matrix(
    roster: &[String],
    removals: &[RemovalRecord],
    events: &[AttendanceEvent],
    range: Option<(NaiveDate, NaiveDate)>,
) -> Result<Option<StatusMatrix>, ReportError> {
    validate_range(range)?;

    let events: Vec<&AttendanceEvent> = match range {
        Some((start, end)) => events
            .iter()
            .filter(|e| e.date >= start && e.date <= end)
            .collect(),
        None => events.iter().collect(),
    };

    if events.is_empty() {
        return Ok(None);
    }

    let mut participants: Vec<String> = roster.to_vec();
    let removed_only: BTreeSet<&String> = removals
        .iter()
        .map(|r| &r.participant_name)
        .filter(|name| !roster.contains(name))
        .collect();
    participants.extend(removed_only.into_iter().cloned());

    let dates: Vec<NaiveDate> = match range {
        Some((start, end)) => start.iter_days().take_while(|d| *d <= end).collect(),
        None => events
            .iter()
            .map(|e| e.date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
    };
    let column_index: HashMap<NaiveDate, usize> =
        dates.iter().enumerate().map(|(i, d)| (*d, i)).collect();

    let recorded_dates: BTreeSet<NaiveDate> = events.iter().map(|e| e.date).collect();

    let defaults: Vec<CellMark> = dates
        .iter()
        .map(|d| {
            if recorded_dates.contains(d) {
                CellMark::Absent
            } else {
                CellMark::NoRecord
            }
        })
        .collect();

    let mut rows: Vec<ParticipantRow> = participants
        .iter()
        .map(|name| ParticipantRow {
            participant_name: name.clone(),
            cells: defaults.clone(),
        })
        .collect();

    for event in &events {
        let Some(&col) = column_index.get(&event.date) else {
            continue;
        };
        for row in rows.iter_mut() {
            if event.marked_present(&row.participant_name) == Some(true) {
                row.cells[col] = CellMark::Present;
            }
        }
    }

    // Removal overlay, applied after presence so pre-removal history stays
    // as recorded.
    for removal in removals {
        let Some(row) = rows
            .iter_mut()
            .find(|r| r.participant_name == removal.participant_name)
        else {
            continue;
        };
        let removed_on = removal.removed_at.date_naive();
        for (col, date) in dates.iter().enumerate() {
            if *date > removed_on {
                row.cells[col] = CellMark::Removed;
            }
        }
    }

    // The latest recording for a date supplies the column topic.
    let mut topics: BTreeMap<NaiveDate, (DateTime<Utc>, String)> = BTreeMap::new();
    for event in &events {
        if let Some(topic) = event.topic.as_ref().filter(|t| !t.trim().is_empty()) {
            match topics.get(&event.date) {
                Some((seen, _)) if *seen >= event.recorded_at => {}
                _ => {
                    topics.insert(event.date, (event.recorded_at, topic.clone()));
                }
            }
        }
    }

    let columns = dates
        .into_iter()
        .map(|date| DateColumn {
            topic: topics.get(&date).map(|(_, t)| t.clone()),
            date,
        })
        .collect();

    Ok(Some(StatusMatrix { columns, rows }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashMap;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(d: NaiveDate, marks: &[(&str, bool)], topic: Option<&str>) -> AttendanceEvent {
        AttendanceEvent {
            id: None,
            training_name: "Onboarding".into(),
            date: d,
            attendance: marks
                .iter()
                .map(|(n, p)| (n.to_string(), *p))
                .collect::<HashMap<_, _>>(),
            present: Vec::new(),
            topic: topic.map(Into::into),
            recorded_at: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
        }
    }

    fn list_event(d: NaiveDate, present: &[&str]) -> AttendanceEvent {
        AttendanceEvent {
            id: None,
            training_name: "Onboarding".into(),
            date: d,
            attendance: HashMap::new(),
            present: present.iter().map(|s| s.to_string()).collect(),
            topic: None,
            recorded_at: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
        }
    }

    fn removal(name: &str, y: i32, m: u32, d: u32) -> RemovalRecord {
        RemovalRecord {
            id: None,
            training_name: "Onboarding".into(),
            participant_name: name.into(),
            reason: "left program".into(),
            removed_at: Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap(),
        }
    }

    fn roster(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn cells_for<'a>(matrix: &'a StatusMatrix, name: &str) -> &'a [CellMark] {
        &matrix
            .rows
            .iter()
            .find(|r| r.participant_name == name)
            .unwrap()
            .cells
    }

    #[test]
    fn onboarding_scenario() {
        let roster = roster(&["Alice", "Bob"]);
        let events = vec![
            event(date(2024, 1, 8), &[("Alice", true), ("Bob", false)], None),
            event(date(2024, 1, 10), &[("Alice", true), ("Bob", true)], None),
        ];
        let removals = vec![removal("Bob", 2024, 1, 9)];

        let matrix = build_matrix(&roster, &removals, &events, None)
            .unwrap()
            .unwrap();

        assert_eq!(
            matrix.columns.iter().map(|c| c.date).collect::<Vec<_>>(),
            vec![date(2024, 1, 8), date(2024, 1, 10)]
        );
        assert_eq!(
            cells_for(&matrix, "Alice"),
            &[CellMark::Present, CellMark::Present]
        );
        // Bob's pre-removal history follows the record; post-removal cells
        // show removed even though the 2024-01-10 document marks him present.
        assert_eq!(
            cells_for(&matrix, "Bob"),
            &[CellMark::Absent, CellMark::Removed]
        );
    }

    #[test]
    fn present_iff_marked_true_with_no_removals() {
        let roster = roster(&["Alice", "Bob"]);
        let events = vec![
            event(date(2024, 2, 5), &[("Alice", true)], None),
            event(date(2024, 2, 7), &[("Alice", false), ("Bob", true)], None),
        ];

        let matrix = build_matrix(&roster, &[], &events, None).unwrap().unwrap();

        assert_eq!(
            cells_for(&matrix, "Alice"),
            &[CellMark::Present, CellMark::Absent]
        );
        // Unmentioned on the first date: absent by default.
        assert_eq!(
            cells_for(&matrix, "Bob"),
            &[CellMark::Absent, CellMark::Present]
        );
    }

    #[test]
    fn cells_on_or_before_removal_date_follow_the_records() {
        let roster = roster(&["Carol"]);
        let events = vec![
            event(date(2024, 3, 4), &[("Carol", true)], None),
            event(date(2024, 3, 5), &[("Carol", false)], None),
            event(date(2024, 3, 6), &[("Carol", true)], None),
        ];
        // Removed on the 5th: that day itself still follows the record.
        let removals = vec![removal("Carol", 2024, 3, 5)];

        let matrix = build_matrix(&roster, &removals, &events, None)
            .unwrap()
            .unwrap();

        assert_eq!(
            cells_for(&matrix, "Carol"),
            &[CellMark::Present, CellMark::Absent, CellMark::Removed]
        );
    }

    #[test]
    fn removed_participant_still_appears_after_leaving_roster() {
        // Dave was pulled from the roster entirely; the union with the
        // removal trail keeps his row.
        let roster = roster(&["Alice"]);
        let events = vec![event(date(2024, 1, 8), &[("Alice", true), ("Dave", true)], None)];
        let removals = vec![removal("Dave", 2024, 1, 9)];

        let matrix = build_matrix(&roster, &removals, &events, None)
            .unwrap()
            .unwrap();

        assert_eq!(matrix.rows.len(), 2);
        assert_eq!(cells_for(&matrix, "Dave"), &[CellMark::Present]);
    }

    #[test]
    fn duplicate_records_present_wins() {
        let roster = roster(&["Alice"]);
        let events = vec![
            event(date(2024, 1, 8), &[("Alice", false)], None),
            event(date(2024, 1, 8), &[("Alice", true)], None),
            event(date(2024, 1, 8), &[("Alice", false)], None),
        ];

        let matrix = build_matrix(&roster, &[], &events, None).unwrap().unwrap();

        assert_eq!(matrix.columns.len(), 1);
        assert_eq!(cells_for(&matrix, "Alice"), &[CellMark::Present]);
    }

    #[test]
    fn list_form_records_leave_unlisted_absent() {
        let roster = roster(&["Alice", "Bob", "Carol"]);
        let events = vec![list_event(date(2024, 1, 8), &["Alice", "Carol"])];

        let matrix = build_matrix(&roster, &[], &events, None).unwrap().unwrap();

        assert_eq!(cells_for(&matrix, "Alice"), &[CellMark::Present]);
        assert_eq!(cells_for(&matrix, "Bob"), &[CellMark::Absent]);
        assert_eq!(cells_for(&matrix, "Carol"), &[CellMark::Present]);
    }

    #[test]
    fn calendar_range_axis_marks_recordless_dates() {
        let roster = roster(&["Alice"]);
        let events = vec![
            event(date(2024, 1, 8), &[("Alice", true)], None),
            event(date(2024, 1, 10), &[("Alice", false)], None),
        ];
        let range = Some((date(2024, 1, 8), date(2024, 1, 11)));

        let matrix = build_matrix(&roster, &[], &events, range).unwrap().unwrap();

        assert_eq!(matrix.columns.len(), 4);
        assert_eq!(
            cells_for(&matrix, "Alice"),
            &[
                CellMark::Present,
                CellMark::NoRecord,
                CellMark::Absent,
                CellMark::NoRecord,
            ]
        );
    }

    #[test]
    fn range_excludes_events_outside_it() {
        let roster = roster(&["Alice"]);
        let events = vec![
            event(date(2024, 1, 5), &[("Alice", true)], None),
            event(date(2024, 1, 9), &[("Alice", true)], None),
        ];
        let range = Some((date(2024, 1, 8), date(2024, 1, 9)));

        let matrix = build_matrix(&roster, &[], &events, range).unwrap().unwrap();

        assert_eq!(matrix.columns.len(), 2);
        assert_eq!(
            cells_for(&matrix, "Alice"),
            &[CellMark::NoRecord, CellMark::Present]
        );
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = build_matrix(
            &roster(&["Alice"]),
            &[],
            &[],
            Some((date(2024, 2, 1), date(2024, 1, 1))),
        )
        .unwrap_err();
        assert_eq!(err, ReportError::InvalidRange);
    }

    #[test]
    fn no_events_reports_no_data() {
        let result = build_matrix(&roster(&["Alice"]), &[], &[], None).unwrap();
        assert!(result.is_none());

        // A range with events only outside it is no data as well.
        let events = vec![event(date(2024, 1, 5), &[("Alice", true)], None)];
        let result = build_matrix(
            &roster(&["Alice"]),
            &[],
            &events,
            Some((date(2024, 2, 1), date(2024, 2, 2))),
        )
        .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn rebuilding_yields_identical_matrix() {
        let roster = roster(&["Alice", "Bob"]);
        let events = vec![
            event(date(2024, 1, 8), &[("Alice", true), ("Bob", false)], Some("Intro")),
            event(date(2024, 1, 10), &[("Alice", true), ("Bob", true)], None),
        ];
        let removals = vec![removal("Bob", 2024, 1, 9)];

        let first = build_matrix(&roster, &removals, &events, None).unwrap();
        let second = build_matrix(&roster, &removals, &events, None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn topic_labels_column_latest_recording_wins() {
        let mut early = event(date(2024, 1, 8), &[("Alice", true)], Some("Draft agenda"));
        early.recorded_at = Utc.with_ymd_and_hms(2024, 1, 8, 10, 0, 0).unwrap();
        let mut late = event(date(2024, 1, 8), &[("Alice", true)], Some("Safety basics"));
        late.recorded_at = Utc.with_ymd_and_hms(2024, 1, 8, 11, 0, 0).unwrap();

        let matrix = build_matrix(&roster(&["Alice"]), &[], &[early, late], None)
            .unwrap()
            .unwrap();

        assert_eq!(matrix.columns[0].label(), "2024-01-08 (Safety basics)");
    }

    #[test]
    fn column_without_topic_is_labeled_with_the_date_only() {
        let matrix = build_matrix(
            &roster(&["Alice"]),
            &[],
            &[event(date(2024, 1, 8), &[("Alice", true)], None)],
            None,
        )
        .unwrap()
        .unwrap();

        assert_eq!(matrix.columns[0].label(), "2024-01-08");
    }
}
