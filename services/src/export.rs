//! Renders a status matrix as a downloadable CSV sheet.

use crate::status_report::StatusMatrix;

/// Fixed download name for the exported sheet.
pub const EXPORT_FILENAME: &str = "attendance_status.csv";

fn esc(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// One header row (participant name + one labeled column per date), one
/// row per participant, cells in {P, A, X, -}.
pub fn matrix_to_csv(matrix: &StatusMatrix) -> String {
    let mut csv = String::from("Participant Name");
    for column in &matrix.columns {
        csv.push(',');
        csv.push_str(&esc(&column.label()));
    }
    csv.push('\n');

    for row in &matrix.rows {
        csv.push_str(&esc(&row.participant_name));
        for cell in &row.cells {
            csv.push(',');
            csv.push_str(cell.symbol());
        }
        csv.push('\n');
    }

    csv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status_report::{CellMark, DateColumn, ParticipantRow};
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn matrix() -> StatusMatrix {
        StatusMatrix {
            columns: vec![
                DateColumn {
                    date: date(8),
                    topic: Some("Safety basics".into()),
                },
                DateColumn {
                    date: date(10),
                    topic: None,
                },
            ],
            rows: vec![
                ParticipantRow {
                    participant_name: "Alice".into(),
                    cells: vec![CellMark::Present, CellMark::Present],
                },
                ParticipantRow {
                    participant_name: "Bob".into(),
                    cells: vec![CellMark::Absent, CellMark::Removed],
                },
            ],
        }
    }

    #[test]
    fn renders_header_rows_and_symbols() {
        let csv = matrix_to_csv(&matrix());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Participant Name,2024-01-08 (Safety basics),2024-01-10",
                "Alice,P,P",
                "Bob,A,X",
            ]
        );
    }

    #[test]
    fn quotes_fields_containing_commas() {
        let mut m = matrix();
        m.rows[0].participant_name = "Nkosi, Alice".into();
        let csv = matrix_to_csv(&m);
        assert!(csv.contains("\"Nkosi, Alice\",P,P"));
    }

    #[test]
    fn quotes_topics_containing_quotes() {
        let mut m = matrix();
        m.columns[0].topic = Some("the \"basics\"".into());
        let csv = matrix_to_csv(&m);
        assert!(csv.contains("\"2024-01-08 (the \"\"basics\"\")\""));
    }
}
