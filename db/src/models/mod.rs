pub mod attendance_event;
pub mod participant;
pub mod removal;
pub mod training;
pub mod user;

pub use attendance_event::AttendanceEvent;
pub use participant::{Participant, ParticipantStatus};
pub use removal::RemovalRecord;
pub use training::{Training, TrainingDay};
pub use user::User;
