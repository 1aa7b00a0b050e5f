use bson::doc;
use chrono::NaiveDate;
use futures::TryStreamExt;
use mongodb::{Collection, Database};

use crate::error::DbError;
use crate::models::AttendanceEvent;

pub const COLLECTION: &str = "attendance";

fn collection(db: &Database) -> Collection<AttendanceEvent> {
    db.collection(COLLECTION)
}

/// Append-only insert. Duplicate (training, date) submissions create
/// separate documents; the status reporter resolves them.
pub async fn insert(db: &Database, event: &AttendanceEvent) -> Result<(), DbError> {
    collection(db).insert_one(event).await?;
    Ok(())
}

/// Fetches every attendance document for a training, optionally bounded to
/// an inclusive date range, ordered by date then recording time.
///
/// Dates are stored as `YYYY-MM-DD` strings, so the range bound is a plain
/// lexicographic comparison.
pub async fn find_by_training(
    db: &Database,
    training_name: &str,
    range: Option<(NaiveDate, NaiveDate)>,
) -> Result<Vec<AttendanceEvent>, DbError> {
    let mut filter = doc! { "training_name": training_name };
    if let Some((start, end)) = range {
        filter.insert(
            "date",
            doc! { "$gte": start.to_string(), "$lte": end.to_string() },
        );
    }

    let cursor = collection(db)
        .find(filter)
        .sort(doc! { "date": 1, "recorded_at": 1 })
        .await?;
    Ok(cursor.try_collect().await?)
}
