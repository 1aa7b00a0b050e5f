use bson::doc;
use futures::TryStreamExt;
use mongodb::{Collection, Database};

use crate::error::DbError;
use crate::models::RemovalRecord;

pub const COLLECTION: &str = "removals";

fn collection(db: &Database) -> Collection<RemovalRecord> {
    db.collection(COLLECTION)
}

/// Write-once audit insert; removal records are never mutated.
pub async fn insert(db: &Database, record: &RemovalRecord) -> Result<(), DbError> {
    collection(db).insert_one(record).await?;
    Ok(())
}

pub async fn find_by_training(
    db: &Database,
    training_name: &str,
) -> Result<Vec<RemovalRecord>, DbError> {
    let cursor = collection(db)
        .find(doc! { "training_name": training_name })
        .sort(doc! { "removed_at": 1 })
        .await?;
    Ok(cursor.try_collect().await?)
}
