//! Parses a bulk participant import file.
//!
//! The file must carry the `participant_name`, `email` and `phone` columns;
//! anything less rejects the whole upload before a single insert happens.

use db::models::Participant;
use thiserror::Error;

pub const REQUIRED_COLUMNS: [&str; 3] = ["participant_name", "email", "phone"];

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("file is missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("row {0} has an empty participant_name")]
    EmptyName(usize),

    #[error("could not parse file: {0}")]
    Parse(#[from] csv::Error),
}

/// Parses CSV bytes into participant records, one per data row.
///
/// All-or-nothing: any missing column, unparseable row, or nameless row
/// fails the whole file and nothing is returned for insertion.
pub fn parse_participants_csv(bytes: &[u8]) -> Result<Vec<Participant>, ImportError> {
    let mut reader = csv::Reader::from_reader(bytes);

    let headers = reader.headers()?.clone();
    let mut indices = [0usize; REQUIRED_COLUMNS.len()];
    for (i, column) in REQUIRED_COLUMNS.into_iter().enumerate() {
        indices[i] = headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or(ImportError::MissingColumn(column))?;
    }

    let mut participants = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let field = |i: usize| record.get(indices[i]).unwrap_or("").trim().to_string();

        let name = field(0);
        if name.is_empty() {
            // Rows are 1-based for the person reading the error, past the header.
            return Err(ImportError::EmptyName(row + 2));
        }

        participants.push(Participant::new(name, field(1), field(2)));
    }

    Ok(participants)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_file_yields_one_participant_per_row() {
        let csv = b"participant_name,email,phone\n\
            Alice,alice@example.com,555-0100\n\
            Bob,bob@example.com,555-0101\n";

        let participants = parse_participants_csv(csv).unwrap();
        assert_eq!(participants.len(), 2);
        assert_eq!(participants[0].participant_name, "Alice");
        assert_eq!(participants[0].email, "alice@example.com");
        assert_eq!(participants[1].phone, "555-0101");
    }

    #[test]
    fn extra_columns_and_any_order_are_accepted() {
        let csv = b"phone,participant_name,department,email\n\
            555-0100,Alice,Ops,alice@example.com\n";

        let participants = parse_participants_csv(csv).unwrap();
        assert_eq!(participants[0].participant_name, "Alice");
        assert_eq!(participants[0].email, "alice@example.com");
        assert_eq!(participants[0].phone, "555-0100");
    }

    #[test]
    fn missing_column_rejects_the_whole_file() {
        let csv = b"participant_name,email\nAlice,alice@example.com\n";

        let err = parse_participants_csv(csv).unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn("phone")));
    }

    #[test]
    fn empty_name_rejects_the_whole_file() {
        let csv = b"participant_name,email,phone\n\
            Alice,alice@example.com,555-0100\n\
            ,bob@example.com,555-0101\n";

        let err = parse_participants_csv(csv).unwrap_err();
        assert!(matches!(err, ImportError::EmptyName(3)));
    }

    #[test]
    fn ragged_row_surfaces_the_parser_error() {
        let csv = b"participant_name,email,phone\nAlice,alice@example.com\n";

        let err = parse_participants_csv(csv).unwrap_err();
        assert!(matches!(err, ImportError::Parse(_)));
    }

    #[test]
    fn header_only_file_imports_zero_rows() {
        let csv = b"participant_name,email,phone\n";
        assert!(parse_participants_csv(csv).unwrap().is_empty());
    }
}
