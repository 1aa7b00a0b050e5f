use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A document in the `participants` collection.
///
/// Participants are never hard-deleted once attendance history references
/// them: deletion flips `status` to `removed` and stamps `removed_at`,
/// leaving historical attendance rows joinable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub participant_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub status: ParticipantStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed_at: Option<bson::DateTime>,
}

impl Participant {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: None,
            participant_name: name.into(),
            email: email.into(),
            phone: phone.into(),
            status: ParticipantStatus::Active,
            removed_at: None,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ParticipantStatus {
    #[default]
    Active,
    Removed,
}
