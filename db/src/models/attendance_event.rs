use bson::oid::ObjectId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A dated attendance document for one training.
///
/// The collection is append-only: re-marking the same (training, date)
/// inserts a second document rather than updating in place, and the status
/// reporter resolves the duplicates.
///
/// Two presence encodings exist in stored data. New documents carry the
/// full `attendance` map; older ones may carry only a `present` list, in
/// which case everyone not listed was absent that day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceEvent {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub training_name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub attendance: HashMap<String, bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub present: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub recorded_at: DateTime<Utc>,
}

impl AttendanceEvent {
    /// The presence decision this document records for `name`, if any.
    ///
    /// Map form wins over list form when both are present. A list-form
    /// document says nothing about names it does not list; those fall back
    /// to the reporter's default for the date.
    pub fn marked_present(&self, name: &str) -> Option<bool> {
        if !self.attendance.is_empty() {
            self.attendance.get(name).copied()
        } else if self.present.iter().any(|p| p == name) {
            Some(true)
        } else {
            None
        }
    }
}
