use db::models::Training;
use serde::Serialize;

#[derive(Debug, Serialize, Default)]
pub struct TrainingResponse {
    pub training_name: String,
    pub trainer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: String,
    pub training_days: Vec<String>,
    pub participants: Vec<String>,
}

impl From<Training> for TrainingResponse {
    fn from(t: Training) -> Self {
        Self {
            training_name: t.training_name,
            trainer_name: t.trainer_name,
            description: t.description,
            start_date: t.start_date.to_string(),
            training_days: t.training_days.iter().map(|d| d.to_string()).collect(),
            participants: t.participants,
        }
    }
}
