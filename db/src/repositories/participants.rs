use bson::{Document, doc};
use futures::TryStreamExt;
use mongodb::{Collection, Database};

use crate::error::DbError;
use crate::models::{Participant, ParticipantStatus};

pub const COLLECTION: &str = "participants";

fn collection(db: &Database) -> Collection<Participant> {
    db.collection(COLLECTION)
}

pub async fn insert(db: &Database, participant: &Participant) -> Result<(), DbError> {
    collection(db).insert_one(participant).await?;
    Ok(())
}

/// Inserts a batch of participants (bulk import). Returns the number of
/// inserted documents.
pub async fn insert_many(db: &Database, participants: &[Participant]) -> Result<usize, DbError> {
    if participants.is_empty() {
        return Ok(0);
    }
    let result = collection(db).insert_many(participants).await?;
    Ok(result.inserted_ids.len())
}

pub async fn find_by_name(db: &Database, name: &str) -> Result<Option<Participant>, DbError> {
    Ok(collection(db)
        .find_one(doc! { "participant_name": name })
        .await?)
}

pub async fn list(db: &Database) -> Result<Vec<Participant>, DbError> {
    let cursor = collection(db)
        .find(doc! {})
        .sort(doc! { "participant_name": 1 })
        .await?;
    Ok(cursor.try_collect().await?)
}

/// Fetches every participant whose name is in `names`.
pub async fn find_many_by_names(
    db: &Database,
    names: &[String],
) -> Result<Vec<Participant>, DbError> {
    if names.is_empty() {
        return Ok(Vec::new());
    }
    let cursor = collection(db)
        .find(doc! { "participant_name": { "$in": names.to_vec() } })
        .await?;
    Ok(cursor.try_collect().await?)
}

pub async fn update_fields(db: &Database, name: &str, fields: Document) -> Result<bool, DbError> {
    let result = collection(db)
        .update_one(doc! { "participant_name": name }, doc! { "$set": fields })
        .await?;
    Ok(result.matched_count > 0)
}

/// Soft delete: flips the status field and stamps the removal time in
/// place so attendance history keeps joining against the record.
pub async fn mark_removed(db: &Database, name: &str) -> Result<bool, DbError> {
    let result = collection(db)
        .update_one(
            doc! { "participant_name": name },
            doc! { "$set": {
                "status": ParticipantStatus::Removed.to_string(),
                "removed_at": bson::DateTime::now(),
            } },
        )
        .await?;
    Ok(result.matched_count > 0)
}
