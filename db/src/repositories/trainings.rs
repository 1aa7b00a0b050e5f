use bson::{Document, doc};
use futures::TryStreamExt;
use mongodb::{Collection, Database};

use crate::error::DbError;
use crate::models::Training;

pub const COLLECTION: &str = "trainings";

fn collection(db: &Database) -> Collection<Training> {
    db.collection(COLLECTION)
}

pub async fn insert(db: &Database, training: &Training) -> Result<(), DbError> {
    collection(db).insert_one(training).await?;
    Ok(())
}

pub async fn find_by_name(db: &Database, name: &str) -> Result<Option<Training>, DbError> {
    Ok(collection(db)
        .find_one(doc! { "training_name": name })
        .await?)
}

pub async fn list(db: &Database) -> Result<Vec<Training>, DbError> {
    let cursor = collection(db)
        .find(doc! {})
        .sort(doc! { "training_name": 1 })
        .await?;
    Ok(cursor.try_collect().await?)
}

/// `$set`s exactly the given fields on one training. Returns whether a
/// document matched.
pub async fn update_fields(db: &Database, name: &str, fields: Document) -> Result<bool, DbError> {
    let result = collection(db)
        .update_one(doc! { "training_name": name }, doc! { "$set": fields })
        .await?;
    Ok(result.matched_count > 0)
}

/// Deletes one training document. No referential cleanup of attendance or
/// removal documents is performed.
pub async fn delete_by_name(db: &Database, name: &str) -> Result<bool, DbError> {
    let result = collection(db)
        .delete_one(doc! { "training_name": name })
        .await?;
    Ok(result.deleted_count > 0)
}

/// Adds names to the roster with set semantics; assigning the same name
/// twice leaves a single entry.
pub async fn add_participants(
    db: &Database,
    name: &str,
    participants: &[String],
) -> Result<bool, DbError> {
    let result = collection(db)
        .update_one(
            doc! { "training_name": name },
            doc! { "$addToSet": { "participants": { "$each": participants.to_vec() } } },
        )
        .await?;
    Ok(result.matched_count > 0)
}

pub async fn pull_participant(
    db: &Database,
    name: &str,
    participant: &str,
) -> Result<bool, DbError> {
    let result = collection(db)
        .update_one(
            doc! { "training_name": name },
            doc! { "$pull": { "participants": participant } },
        )
        .await?;
    Ok(result.matched_count > 0)
}
