use bson::oid::ObjectId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A document in the `trainings` collection.
///
/// `training_name` is the identifier used by every cross-collection
/// reference; it is assumed unique within a deployment. The roster is
/// embedded as a list of participant names and mutated with set semantics
/// (`$addToSet` / `$pull`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Training {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub training_name: String,
    pub trainer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub training_days: Vec<TrainingDay>,
    #[serde(default)]
    pub participants: Vec<String>,
}

/// A scheduled weekday, stored as its English name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum TrainingDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}
