pub mod exercise;
pub mod quiz;
pub mod state;
pub mod topic;

pub use state::{Event, LessonState, TransitionError, View};
