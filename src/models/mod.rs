pub use assignment::{Assignment, AssignmentRow, NewAssignment};
pub use priority::Priority;

mod assignment;
mod priority;
