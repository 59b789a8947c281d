mod bank;
mod ids;
mod outcome;
mod question;
mod review;
mod snapshot;

pub use bank::QuestionBank;
pub use ids::QuestionId;
pub use outcome::Outcome;
pub use question::{DEFAULT_HINT, Question, QuestionError, REVIEW_TOPIC};
pub use review::build_review_set;
pub use snapshot::{ProgressSnapshot, SnapshotError};
