pub mod recording;
pub mod roster;
pub mod source;

pub use recording::{IncompleteFrame, RecordedFrame, Recording, ReplaySource};
pub use roster::{PlayerRoster, RosterEvent};
pub use source::{SkeletonFrame, SkeletonSource};
