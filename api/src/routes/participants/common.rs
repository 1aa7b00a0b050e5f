use db::models::Participant;
use serde::Serialize;

#[derive(Debug, Serialize, Default)]
pub struct ParticipantResponse {
    pub participant_name: String,
    pub email: String,
    pub phone: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_at: Option<String>,
}

impl From<Participant> for ParticipantResponse {
    fn from(p: Participant) -> Self {
        Self {
            participant_name: p.participant_name,
            email: p.email,
            phone: p.phone,
            status: p.status.to_string(),
            removed_at: p
                .removed_at
                .map(|at| at.to_chrono().to_rfc3339()),
        }
    }
}
