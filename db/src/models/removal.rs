use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A write-once audit entry in the `removals` collection, inserted when a
/// participant is pulled from a training's roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemovalRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub training_name: String,
    pub participant_name: String,
    pub reason: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub removed_at: DateTime<Utc>,
}
