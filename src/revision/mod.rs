pub mod classify;
pub mod mutations;
pub mod schedule;
pub mod stats;

pub use classify::{classify, RevisionStatus, Urgency};
pub use mutations::{record_revision, toggle_completion, CompletionUpdate, RevisionError, RevisionUpdate};
pub use schedule::{RevisionSchedule, DEFAULT_INTERVALS};
pub use stats::{aggregate, StudyStats};
